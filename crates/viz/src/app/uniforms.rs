use anim::theme::Theme;
use bytemuck::{Pod, Zeroable};

use super::camera::ViewCamera;

/// Per-frame uniforms shared by all pipelines at group 0. `view` and `proj`
/// are carried separately from the combined matrix so point sprites can
/// billboard in view space.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct ViewUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub time: f32,
    pub is_dark: f32,
    pub _pad: [f32; 2],
}

impl ViewUniforms {
    pub fn new(camera: &ViewCamera, aspect: f32, time: f32, theme: Theme) -> Self {
        let view = camera.view();
        let proj = camera.projection(aspect);

        Self {
            view_proj: (proj * view).to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            time,
            is_dark: if theme.is_dark() { 1.0 } else { 0.0 },
            _pad: [0.0; 2],
        }
    }
}
