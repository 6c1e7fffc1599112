use cgmath::{Matrix4, SquareMatrix};

/// Remaps OpenGL clip depth (-1..1) to the 0..1 range wgpu expects.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f64> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

/// Column-major `f32` copy of a double-precision matrix.
pub fn convert_matrix4_to_array(matrix4: Matrix4<f64>) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for (i, column) in result.iter_mut().enumerate() {
        for (j, value) in column.iter_mut().enumerate() {
            *value = matrix4[i][j] as f32;
        }
    }

    result
}
