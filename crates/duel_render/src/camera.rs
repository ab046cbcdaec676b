use glam::Mat4;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Orthographic camera parameterized by a world-space boundary rectangle.
///
/// World units are pixels with y growing downward; passing the boundary's
/// bottom edge as the projection's `bottom` plane flips the axis so world
/// (0,0) lands at the top-left of the screen.
pub struct Camera2D {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Camera2D {
    pub fn from_bounds(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn build_uniform(&self) -> CameraUniform {
        let proj = Mat4::orthographic_rh(
            self.left,
            self.right,
            self.bottom,
            self.top,
            -1.0,
            1.0,
        );
        CameraUniform {
            view_proj: proj.to_cols_array_2d(),
        }
    }
}
