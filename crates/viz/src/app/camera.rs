use glam::{Mat4, Vec3};

/// Fixed framing camera. The backdrops are non-interactive, so there is no
/// fly/orbit control; each scene just picks the vantage point the page
/// composition was designed for.
#[derive(Clone, Copy, Debug)]
pub struct ViewCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl ViewCamera {
    /// Looking down onto the warped grid plane.
    pub fn gridwarp() -> Self {
        Self {
            position: Vec3::new(0.0, 3.0, 6.0),
            target: Vec3::ZERO,
            fov: 60f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }

    /// Side-on view of the particle pipe.
    pub fn flow() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 15.0),
            target: Vec3::ZERO,
            fov: 75f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_look_at_origin() {
        for cam in [ViewCamera::gridwarp(), ViewCamera::flow()] {
            assert_eq!(cam.target, Vec3::ZERO);
            assert!(cam.near > 0.0 && cam.far > cam.near);
        }
        assert!(ViewCamera::flow().fov > ViewCamera::gridwarp().fov);
    }

    #[test]
    fn test_view_projection_maps_target_in_front() {
        let cam = ViewCamera::flow();
        let clip = cam.view_projection(16.0 / 9.0) * cam.target.extend(1.0);
        // Target is ahead of the camera: positive w, inside the depth range.
        assert!(clip.w > 0.0);
        let ndc_z = clip.z / clip.w;
        assert!(ndc_z > 0.0 && ndc_z < 1.0);
    }
}
