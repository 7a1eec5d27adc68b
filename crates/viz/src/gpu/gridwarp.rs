//! Grid-warp plane renderer.
//!
//! Builds the subdivided plane once and lets the shader do the rest: the
//! WGSL in `shaders/gridwarp.wgsl` mirrors `anim::gridwarp` exactly, so
//! the CPU-side golden tests pin down what this draws. The only per-frame
//! CPU work is the model matrix (framing transform plus the slow sway).

use anim::gridwarp::{self, PLANE_SEGMENTS, PLANE_SIZE};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::app::context::GpuContext;
use crate::app::pipeline::PipelinePreset;

/// Framing of the plane in the hero section.
const TILT: f32 = -std::f32::consts::PI / 2.5;
const OFFSET: Vec3 = Vec3::new(0.0, -0.5, 0.0);
const SCALE: Vec3 = Vec3::new(1.8, 2.0, 1.0);

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct GridVertex {
    position: [f32; 3],
    uv: [f32; 2],
}

impl GridVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GridVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct GridUniforms {
    model: [[f32; 4]; 4],
}

/// Flat plane centered on the origin, z = 0; displacement happens in the
/// vertex shader. UVs span [0, 1] so the fragment shader's grid-cell math
/// matches the reference implementation.
fn plane_mesh() -> (Vec<GridVertex>, Vec<u32>) {
    let (seg_x, seg_y) = PLANE_SEGMENTS;
    let mut vertices = Vec::with_capacity(((seg_x + 1) * (seg_y + 1)) as usize);
    let mut indices = Vec::with_capacity((seg_x * seg_y * 6) as usize);

    for iy in 0..=seg_y {
        for ix in 0..=seg_x {
            let u = ix as f32 / seg_x as f32;
            let v = iy as f32 / seg_y as f32;
            vertices.push(GridVertex {
                position: [
                    (u - 0.5) * PLANE_SIZE.x,
                    (v - 0.5) * PLANE_SIZE.y,
                    0.0,
                ],
                uv: [u, v],
            });
        }
    }

    let stride = seg_x + 1;
    for iy in 0..seg_y {
        for ix in 0..seg_x {
            let i = iy * stride + ix;
            indices.extend_from_slice(&[i, i + 1, i + stride, i + 1, i + stride + 1, i + stride]);
        }
    }

    (vertices, indices)
}

pub struct GridWarpRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GridWarpRenderer {
    pub fn new(ctx: &GpuContext) -> Self {
        let (vertices, indices) = plane_mesh();

        let vertex_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gridwarp_vertices"),
            size: (vertices.len() * std::mem::size_of::<GridVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        ctx.queue
            .write_buffer(&vertex_buffer, 0, bytemuck::cast_slice(&vertices));

        let index_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gridwarp_indices"),
            size: (indices.len() * std::mem::size_of::<u32>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        ctx.queue
            .write_buffer(&index_buffer, 0, bytemuck::cast_slice(&indices));

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gridwarp_uniforms"),
            size: std::mem::size_of::<GridUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("gridwarp_bind_group_layout"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gridwarp_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline = ctx.create_pipeline(
            PipelinePreset::Transparent,
            "gridwarp_pipeline",
            include_str!("shaders/gridwarp.wgsl"),
            &[GridVertex::desc()],
            &[&bind_group_layout],
        );

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            uniform_buffer,
            bind_group,
        }
    }

    fn model_matrix(time: f32) -> Mat4 {
        let rotation =
            Quat::from_rotation_z(gridwarp::sway(time)) * Quat::from_rotation_x(TILT);
        Mat4::from_scale_rotation_translation(SCALE, rotation, OFFSET)
    }

    pub fn draw(
        &self,
        ctx: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        time: f32,
    ) {
        let uniforms = GridUniforms {
            model: Self::model_matrix(time).to_cols_array_2d(),
        };
        ctx.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("gridwarp_pass"),
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
        pass.set_bind_group(1, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_mesh_counts() {
        let (vertices, indices) = plane_mesh();
        let (sx, sy) = PLANE_SEGMENTS;
        assert_eq!(vertices.len(), ((sx + 1) * (sy + 1)) as usize);
        assert_eq!(indices.len(), (sx * sy * 6) as usize);
    }

    #[test]
    fn test_plane_mesh_spans_extents() {
        let (vertices, _) = plane_mesh();
        let first = vertices.first().unwrap();
        let last = vertices.last().unwrap();
        assert_eq!(first.position[0], -PLANE_SIZE.x / 2.0);
        assert_eq!(first.uv, [0.0, 0.0]);
        assert_eq!(last.position[0], PLANE_SIZE.x / 2.0);
        assert_eq!(last.position[1], PLANE_SIZE.y / 2.0);
        assert_eq!(last.uv, [1.0, 1.0]);
        assert!(vertices.iter().all(|v| v.position[2] == 0.0));
    }

    #[test]
    fn test_indices_stay_in_bounds() {
        let (vertices, indices) = plane_mesh();
        let max = *indices.iter().max().unwrap();
        assert!((max as usize) < vertices.len());
    }

    #[test]
    fn test_vertex_layout() {
        let layout = GridVertex::desc();
        assert_eq!(layout.array_stride, 20);
        assert_eq!(layout.attributes.len(), 2);
    }

    #[test]
    fn test_model_matrix_places_plane_at_offset() {
        let m = GridWarpRenderer::model_matrix(0.0);
        let origin = m.transform_point3(Vec3::ZERO);
        assert!((origin - OFFSET).length() < 1e-6);
    }
}
