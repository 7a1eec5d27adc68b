use std::sync::Arc;
use std::time::Instant;

use anim::theme::{Theme, ThemeSignal};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key, NamedKey},
    window::Window,
};

use super::{camera::ViewCamera, context::GpuContext, context::GpuError, uniforms::ViewUniforms};
use crate::config::SceneConfig;

/// A renderable backdrop scene. `init` runs after the GPU attach phase has
/// succeeded; everything before that point is cheap CPU state.
pub trait App: 'static {
    fn init(ctx: &GpuContext, config: &SceneConfig, theme: Theme) -> Self;
    fn update(&mut self, dt: f32, time: f32, theme: Theme);
    fn render(
        &mut self,
        ctx: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        time: f32,
        theme: Theme,
    );
    fn camera(&self) -> &ViewCamera;
    fn title() -> &'static str {
        "Backdrop"
    }
}

/// Run the event loop until the window closes. Returns the attach error if
/// the GPU phase failed; the decorative layer then simply never appears.
pub fn run<A: App>(config: SceneConfig, theme: ThemeSignal) -> Result<(), GpuError> {
    let event_loop = EventLoop::new().map_err(GpuError::EventLoop)?;
    let mut runner = AppRunner::<A>::new(config, theme);
    event_loop.run_app(&mut runner).map_err(GpuError::EventLoop)?;

    match runner.attach_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct AppRunner<A: App> {
    config: SceneConfig,
    theme: ThemeSignal,
    window: Option<Arc<Window>>,
    ctx: Option<GpuContext>,
    app: Option<A>,
    start: Option<Instant>,
    last_time: Option<Instant>,
    attach_error: Option<GpuError>,
}

impl<A: App> AppRunner<A> {
    fn new(config: SceneConfig, theme: ThemeSignal) -> Self {
        Self {
            config,
            theme,
            window: None,
            ctx: None,
            app: None,
            start: None,
            last_time: None,
            attach_error: None,
        }
    }

    fn clear_color(theme: Theme) -> wgpu::Color {
        if theme.is_dark() {
            // The fog tone of the dark hero section.
            wgpu::Color {
                r: 0.0,
                g: 0.0,
                b: 0.125,
                a: 1.0,
            }
        } else {
            wgpu::Color {
                r: 0.97,
                g: 0.97,
                b: 0.98,
                a: 1.0,
            }
        }
    }
}

impl<A: App> ApplicationHandler for AppRunner<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = if self.config.compact {
            (720, 480)
        } else {
            (1280, 720)
        };
        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(A::title())
                .with_inner_size(winit::dpi::LogicalSize::new(width, height)),
        ) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("window creation failed, backdrop disabled: {err}");
                self.attach_error = Some(GpuError::Window(err));
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        // Attach phase: the only step that may fail. On failure the
        // backdrop is suppressed rather than retried.
        match pollster::block_on(GpuContext::new(window)) {
            Ok(ctx) => {
                self.app = Some(A::init(&ctx, &self.config, self.theme.get()));
                self.ctx = Some(ctx);
                self.start = Some(Instant::now());
                self.last_time = Some(Instant::now());
            }
            Err(err) => {
                log::error!("GPU attach failed, backdrop disabled: {err}");
                self.attach_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::Resized(size) => {
                if let Some(ctx) = &mut self.ctx {
                    ctx.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                match event.logical_key {
                    Key::Character(ref ch) if ch == "d" || ch == "D" => {
                        self.theme.toggle();
                        log::info!("theme switched to {:?}", self.theme.get());
                    }
                    Key::Named(NamedKey::Escape) => event_loop.exit(),
                    _ => {}
                }
            }
            WindowEvent::CloseRequested => event_loop.exit(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(ctx), Some(app), Some(start), Some(last_time)) =
            (&mut self.ctx, &mut self.app, self.start, self.last_time)
        else {
            return;
        };

        let now = Instant::now();
        // Time-based animation: a stalled frame advances further next tick.
        // The dt clamp only bounds the single-step integration error.
        let dt = (now - last_time).as_secs_f32().min(0.1);
        let time = (now - start).as_secs_f32();
        self.last_time = Some(now);

        let theme = self.theme.get();
        app.update(dt, time, theme);

        let uniforms = ViewUniforms::new(app.camera(), ctx.aspect(), time, theme);
        ctx.update_view_uniforms(&uniforms);

        let surface_texture = match ctx.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = ctx.size;
                ctx.resize(w, h);
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => return,
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory, stopping backdrop");
                event_loop.exit();
                return;
            }
        };
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor::default());

        // Page background clear; the scene layers load over it.
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(Self::clear_color(theme)),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        app.render(ctx, &mut encoder, &view, time, theme);

        ctx.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
