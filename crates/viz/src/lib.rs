//! wgpu/winit host for the backdrop animations.
//!
//! `anim` holds the deterministic math; this crate owns the GPU: surface
//! and device acquisition (the explicit attach phase), render pipelines,
//! the WGSL mirrors of the grid-warp math, and the winit loop that drives
//! time-based ticks into the scene.

pub mod app;
pub mod config;
pub mod gpu;
pub mod scene;

pub use app::context::{GpuContext, GpuError};
pub use config::{ConfigError, SceneConfig, SceneKind};
pub use scene::Backdrop;

use anim::theme::ThemeSignal;

/// Open a window and run the configured backdrop scene until it is closed.
/// Fails explicitly when no rendering capability is available.
pub fn run_backdrop(config: SceneConfig, theme: ThemeSignal) -> Result<(), GpuError> {
    app::runner::run::<Backdrop>(config, theme)
}
