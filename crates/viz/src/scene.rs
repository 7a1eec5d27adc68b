//! The composed backdrop scene: grid warp under particle flow, with the
//! optional activation glow on top.

use anim::flow::FlowField;
use anim::theme::Theme;

use crate::app::camera::ViewCamera;
use crate::app::context::GpuContext;
use crate::app::runner::App;
use crate::config::SceneConfig;
use crate::gpu::flow::FlowRenderer;
use crate::gpu::glow::GlowRenderer;
use crate::gpu::gridwarp::GridWarpRenderer;

pub struct Backdrop {
    camera: ViewCamera,
    gridwarp: Option<GridWarpRenderer>,
    flow: Option<(FlowField, FlowRenderer)>,
    glow: Option<GlowRenderer>,
}

impl App for Backdrop {
    fn init(ctx: &GpuContext, config: &SceneConfig, theme: Theme) -> Self {
        // When both layers run the wider flow framing wins; the grid still
        // reads as a floor from there.
        let camera = if config.scene.has_flow() {
            ViewCamera::flow()
        } else {
            ViewCamera::gridwarp()
        };

        let gridwarp = config
            .scene
            .has_gridwarp()
            .then(|| GridWarpRenderer::new(ctx));

        let flow = config.scene.has_flow().then(|| {
            let count = config.effective_particle_count();
            let field = FlowField::new(count, theme);
            let renderer = FlowRenderer::new(ctx, count);
            (field, renderer)
        });

        // Glow flashes come from the flow field's activation snapshots, so
        // the layer only exists when the flow does. One flash per particle
        // at most, so the pool size bounds the instance buffer.
        let glow = (config.glow && config.scene.has_flow())
            .then(|| GlowRenderer::new(ctx, config.effective_particle_count()));

        log::info!(
            "backdrop initialized: scene {:?}, {} particles, glow {}",
            config.scene,
            flow.as_ref().map_or(0, |(field, _)| field.len()),
            glow.is_some(),
        );

        Self {
            camera,
            gridwarp,
            flow,
            glow,
        }
    }

    fn update(&mut self, dt: f32, _time: f32, theme: Theme) {
        if let Some((field, _)) = &mut self.flow {
            field.update(dt, theme);
        }
        // The grid warp is stateless; its motion comes from the shader clock.
    }

    fn render(
        &mut self,
        ctx: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        time: f32,
        _theme: Theme,
    ) {
        if let Some(gridwarp) = &self.gridwarp {
            gridwarp.draw(ctx, encoder, view, time);
        }
        if let Some((field, renderer)) = &self.flow {
            renderer.draw(ctx, encoder, view, field);
            if let Some(glow) = &self.glow {
                glow.draw(ctx, encoder, view, field);
            }
        }
    }

    fn camera(&self) -> &ViewCamera {
        &self.camera
    }

    fn title() -> &'static str {
        "Backdrop"
    }
}
