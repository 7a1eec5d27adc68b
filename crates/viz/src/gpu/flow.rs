//! Instanced sprite renderer for the flow particle field.
//!
//! The field itself lives on the CPU (`anim::flow`); each frame the pool is
//! flattened into instance data and drawn as additive billboarded quads,
//! one soft round sprite per particle.

use anim::flow::{FlowField, FlowParticle};
use bytemuck::{Pod, Zeroable};

use crate::app::context::GpuContext;
use crate::app::pipeline::PipelinePreset;

/// World-space sprite size for every particle.
pub const POINT_SIZE: f32 = 0.28;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct ParticleInstance {
    position: [f32; 3],
    _pad0: f32,
    color: [f32; 3],
    size: f32,
}

impl ParticleInstance {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ParticleInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 16,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 28,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }

    fn from_particle(p: &FlowParticle) -> Self {
        Self {
            position: p.position.to_array(),
            _pad0: 0.0,
            color: p.color.to_array(),
            size: POINT_SIZE,
        }
    }
}

pub struct FlowRenderer {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    max_particles: usize,
}

impl FlowRenderer {
    pub fn new(ctx: &GpuContext, max_particles: usize) -> Self {
        let pipeline = ctx.create_pipeline(
            PipelinePreset::Additive,
            "flow_pipeline",
            include_str!("shaders/flow_particles.wgsl"),
            &[ParticleInstance::desc()],
            &[],
        );

        let instance_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("flow_instances"),
            size: (max_particles * std::mem::size_of::<ParticleInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            instance_buffer,
            max_particles,
        }
    }

    pub fn draw(
        &self,
        ctx: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        field: &FlowField,
    ) {
        let count = field.len().min(self.max_particles);
        if count == 0 {
            return;
        }

        let instances: Vec<ParticleInstance> = field.particles()[..count]
            .iter()
            .map(ParticleInstance::from_particle)
            .collect();
        ctx.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("flow_pass"),
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
        // Two triangles per particle, expanded in the vertex shader.
        pass.draw(0..6, 0..count as u32);
    }
}
