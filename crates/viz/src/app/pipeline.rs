use wgpu::*;

/// Blend presets for the backdrop layers. Everything here is decorative
/// and depth-free: layers are drawn back-to-front over the page clear.
pub enum PipelinePreset {
    /// Straight alpha blending (grid plane).
    Transparent,
    /// Additive accumulation (particle and glow sprites).
    Additive,
}

impl PipelinePreset {
    fn blend(&self) -> BlendState {
        match self {
            PipelinePreset::Transparent => BlendState::ALPHA_BLENDING,
            PipelinePreset::Additive => BlendState {
                color: BlendComponent {
                    src_factor: BlendFactor::One,
                    dst_factor: BlendFactor::One,
                    operation: BlendOperation::Add,
                },
                alpha: BlendComponent {
                    src_factor: BlendFactor::One,
                    dst_factor: BlendFactor::One,
                    operation: BlendOperation::Add,
                },
            },
        }
    }
}

impl crate::app::context::GpuContext {
    /// Build a render pipeline in the house style: group 0 is always the
    /// shared view uniforms, both sides rendered, no depth buffer.
    pub fn create_pipeline(
        &self,
        preset: PipelinePreset,
        label: &str,
        shader_source: &str,
        vertex_layouts: &[VertexBufferLayout],
        additional_bind_group_layouts: &[&BindGroupLayout],
    ) -> RenderPipeline {
        let shader = self.device.create_shader_module(ShaderModuleDescriptor {
            label: Some(label),
            source: ShaderSource::Wgsl(shader_source.into()),
        });

        let mut bind_group_layouts = vec![&self.view_bind_group_layout];
        bind_group_layouts.extend(additional_bind_group_layouts);

        let pipeline_layout = self
            .device
            .create_pipeline_layout(&PipelineLayoutDescriptor {
                label: Some(label),
                bind_group_layouts: &bind_group_layouts,
                push_constant_ranges: &[],
            });

        let target = Some(ColorTargetState {
            format: self.config.format,
            blend: Some(preset.blend()),
            write_mask: ColorWrites::ALL,
        });

        self.device
            .create_render_pipeline(&RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                cache: None,
                vertex: VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: vertex_layouts,
                },
                primitive: PrimitiveState {
                    topology: PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: FrontFace::Ccw,
                    cull_mode: None,
                    unclipped_depth: false,
                    polygon_mode: PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                fragment: Some(FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[target],
                }),
                multiview: None,
            })
    }
}
