//! Activation flash renderer.
//!
//! Each particle that recently crossed the activation band gets a short
//! white flash drawn at the position its `Activation` snapshot recorded.
//! The envelope math lives in `anim::glow`; this side just collects the
//! live flashes into instance data each frame.

use anim::flow::{FlowField, FlowParticle};
use anim::glow;
use bytemuck::{Pod, Zeroable};

use crate::app::context::GpuContext;
use crate::app::pipeline::PipelinePreset;

/// The envelope is in abstract units; scale it up to pipe-world size.
const WORLD_SCALE: f32 = 4.0;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct GlowInstance {
    position: [f32; 3],
    size: f32,
}

impl GlowInstance {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlowInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

/// One instance per particle whose activation flash is still live at `now`.
/// The clock is the field's own elapsed time, the same one the snapshots
/// were recorded against.
fn flash_instances<'a>(
    particles: impl Iterator<Item = &'a FlowParticle>,
    now: f32,
) -> Vec<GlowInstance> {
    particles
        .filter_map(|p| {
            let mark = p.activation?;
            let size = glow::flash_size(now, mark.time) * WORLD_SCALE;
            (size > 0.0).then(|| GlowInstance {
                position: mark.position.to_array(),
                size,
            })
        })
        .collect()
}

pub struct GlowRenderer {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    max_flashes: usize,
}

impl GlowRenderer {
    pub fn new(ctx: &GpuContext, max_flashes: usize) -> Self {
        let pipeline = ctx.create_pipeline(
            PipelinePreset::Additive,
            "glow_pipeline",
            include_str!("shaders/activation_glow.wgsl"),
            &[GlowInstance::desc()],
            &[],
        );

        let instance_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glow_instances"),
            size: (max_flashes * std::mem::size_of::<GlowInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            instance_buffer,
            max_flashes,
        }
    }

    pub fn draw(
        &self,
        ctx: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        field: &FlowField,
    ) {
        let mut instances = flash_instances(field.particles().iter(), field.elapsed());
        instances.truncate(self.max_flashes);
        if instances.is_empty() {
            return;
        }

        ctx.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glow_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &ctx.view_bind_group, &[]);
        pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        pass.draw(0..6, 0..instances.len() as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anim::flow::{Activation, SignalClass};
    use glam::Vec3;

    fn particle(activation: Option<Activation>) -> FlowParticle {
        FlowParticle {
            class: SignalClass::Cache,
            position: Vec3::ZERO,
            color: Vec3::ZERO,
            activation,
        }
    }

    #[test]
    fn test_instance_layout() {
        let layout = GlowInstance::desc();
        assert_eq!(layout.array_stride, 16);
        assert_eq!(layout.attributes.len(), 2);
    }

    #[test]
    fn test_only_live_activations_become_instances() {
        let now = 10.0;
        let live = particle(Some(Activation {
            time: now - 0.1,
            position: Vec3::new(-4.7, 3.0, 1.0),
        }));
        let expired = particle(Some(Activation {
            time: now - 2.0,
            position: Vec3::new(-4.6, -3.0, 0.0),
        }));
        let never = particle(None);

        let pool = [live, expired, never];
        let instances = flash_instances(pool.iter(), now);
        assert_eq!(instances.len(), 1);
        // The flash sits at the recorded crossing, not the particle's
        // current position.
        assert_eq!(instances[0].position, [-4.7, 3.0, 1.0]);
        assert!(instances[0].size > 0.0);
    }

    #[test]
    fn test_flash_size_scales_to_world_units() {
        let now = 1.0;
        let peak = particle(Some(Activation {
            time: now - glow::VISIBLE / 2.0,
            position: Vec3::ZERO,
        }));
        let instances = flash_instances([peak].iter(), now);
        let expected = (glow::BASE_SIZE + glow::SWELL) * WORLD_SCALE;
        assert!((instances[0].size - expected).abs() < 1e-3);
    }
}
