//! Deterministic animation cores for the decorative page backdrops.
//!
//! Two independent effects live here:
//!
//! - [`gridwarp`] - a warped grid plane with a pulse ring that sweeps out
//!   from the center on a fixed 6-second cycle.
//! - [`flow`] - a fixed pool of signal particles flowing left-to-right
//!   through raw / classification / routed zones in three lanes.
//!
//! Everything in this crate is a pure function of elapsed time, fixed
//! constants, and the current [`theme::Theme`]. No GPU types appear here;
//! the `viz` crate mirrors the grid math in WGSL and uploads the particle
//! pool as instance data each frame.
//!
//! # Example
//!
//! ```
//! use anim::flow::FlowField;
//! use anim::theme::Theme;
//!
//! let mut field = FlowField::seeded(300, Theme::Light, 7);
//!
//! // Advance one 60 Hz frame.
//! field.update(1.0 / 60.0, Theme::Light);
//! assert_eq!(field.len(), 300);
//! ```

pub mod flow;
pub mod glow;
pub mod gridwarp;
pub mod theme;

pub use flow::{FlowField, FlowParticle, SignalClass};
pub use glam::{Vec2, Vec3};
pub use theme::{Theme, ThemeSignal, ThemeWatch};
