use cgmath::{
    perspective, Deg, InnerSpace, Matrix, Matrix3, Matrix4, SquareMatrix, Vector3, Vector4, Zero,
};

use super::camera_utils::{convert_matrix4_to_array, CameraUniform, OPENGL_TO_WGPU_MATRIX};
use crate::gfx::rendering::depth::DepthBuffer;

/// Depth returned by a cleared buffer; used when a read falls outside it.
pub const FAR_DEPTH: f32 = 1.0;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    pub fovy_degrees: f64,
    pub z_near: f64,
    pub z_far: f64,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fovy_degrees: 45.0,
            z_near: 0.01,
            z_far: 100.0,
        }
    }
}

/// The view/projection state shared by rendering and picking.
///
/// `rotation` maps camera-local axes to world axes; the camera looks down its
/// local -Z with +Y up. Matrices are cached by [`Camera::update_matrices`] and
/// stay fixed until the next call, so every consumer in a frame sees the same
/// transform.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vector3<f64>,
    rotation: Matrix3<f64>,
    perspective: Perspective,
    viewport: [i32; 4],
    view: Matrix4<f64>,
    projection: Matrix4<f64>,
    view_projection: Matrix4<f64>,
    inverse_view_projection: Option<Matrix4<f64>>,
}

impl Camera {
    pub fn new(perspective: Perspective, width: u32, height: u32) -> Self {
        let mut camera = Self {
            position: Vector3::zero(),
            rotation: Matrix3::identity(),
            perspective,
            viewport: [0, 0, width.max(1) as i32, height.max(1) as i32],
            view: Matrix4::identity(),
            projection: Matrix4::identity(),
            view_projection: Matrix4::identity(),
            inverse_view_projection: None,
        };
        camera.update_matrices();
        camera
    }

    pub fn position(&self) -> Vector3<f64> {
        self.position
    }

    pub fn rotation(&self) -> Matrix3<f64> {
        self.rotation
    }

    pub fn perspective(&self) -> Perspective {
        self.perspective
    }

    pub fn set_perspective(&mut self, perspective: Perspective) {
        self.perspective = perspective;
    }

    /// Sets position and camera-to-world rotation. Takes effect at the next
    /// [`Camera::update_matrices`].
    pub fn set_pose(&mut self, position: Vector3<f64>, rotation: Matrix3<f64>) {
        self.position = position;
        self.rotation = rotation;
    }

    /// Places the camera at `eye` looking at `target`.
    pub fn look_at(&mut self, eye: Vector3<f64>, target: Vector3<f64>, up: Vector3<f64>) {
        let forward = target - eye;
        if forward.magnitude2() < f64::EPSILON {
            log::warn!("look_at with coincident eye and target ignored");
            return;
        }
        let forward = forward.normalize();
        let mut right = forward.cross(up);
        if right.magnitude2() < 1e-12 {
            // up parallel to the view direction: borrow any perpendicular axis
            let fallback = if forward.x.abs() < 0.9 {
                Vector3::unit_x()
            } else {
                Vector3::unit_y()
            };
            right = forward.cross(fallback);
        }
        let right = right.normalize();
        let true_up = right.cross(forward);
        self.set_pose(eye, Matrix3::from_cols(right, true_up, -forward));
    }

    /// Window size in pixels.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = [0, 0, width.max(1) as i32, height.max(1) as i32];
    }

    pub fn viewport(&self) -> [i32; 4] {
        self.viewport
    }

    pub fn width(&self) -> u32 {
        self.viewport[2] as u32
    }

    pub fn height(&self) -> u32 {
        self.viewport[3] as u32
    }

    pub fn aspect(&self) -> f64 {
        self.viewport[2] as f64 / self.viewport[3] as f64
    }

    /// Recomputes the cached matrices from the current pose, perspective and
    /// viewport.
    pub fn update_matrices(&mut self) {
        let rt = self.rotation.transpose();
        self.view = Matrix4::from(rt) * Matrix4::from_translation(-self.position);
        self.projection = perspective(
            Deg(self.perspective.fovy_degrees),
            self.aspect(),
            self.perspective.z_near,
            self.perspective.z_far,
        );
        self.view_projection = self.projection * self.view;
        self.inverse_view_projection = self.view_projection.invert();
        if self.inverse_view_projection.is_none() {
            log::warn!("camera view-projection is not invertible; unprojection disabled");
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f64> {
        self.view
    }

    pub fn projection_matrix(&self) -> Matrix4<f64> {
        self.projection
    }

    pub fn view_projection(&self) -> Matrix4<f64> {
        self.view_projection
    }

    /// World-space direction the camera looks along.
    pub fn view_direction(&self) -> Vector3<f64> {
        -self.rotation.z
    }

    pub fn right(&self) -> Vector3<f64> {
        self.rotation.x
    }

    pub fn up(&self) -> Vector3<f64> {
        self.rotation.y
    }

    /// Maps a world point to window coordinates, Y from the bottom. The `z`
    /// component is the window depth in 0..1. `None` for points on the camera
    /// plane.
    pub fn project(&self, p: Vector3<f64>) -> Option<Vector3<f64>> {
        let clip = self.view_projection * p.extend(1.0);
        if clip.w.abs() < f64::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let [vx, vy, vw, vh] = self.viewport;
        Some(Vector3::new(
            vx as f64 + vw as f64 * (ndc.x + 1.0) / 2.0,
            vy as f64 + vh as f64 * (ndc.y + 1.0) / 2.0,
            (ndc.z + 1.0) / 2.0,
        ))
    }

    /// Like [`Camera::project`] with Y measured from the top of the window.
    pub fn project_2d(&self, p: Vector3<f64>) -> Option<Vector3<f64>> {
        self.project(p)
            .map(|w| Vector3::new(w.x, self.viewport[3] as f64 - w.y, w.z))
    }

    /// Maps a window coordinate (Y from the bottom) at a given window depth
    /// back to world space.
    pub fn unproject_at_depth(&self, x: f64, y: f64, depth: f64) -> Option<Vector3<f64>> {
        let inverse = self.inverse_view_projection?;
        let [vx, vy, vw, vh] = self.viewport;
        let ndc = Vector4::new(
            2.0 * (x - vx as f64) / vw as f64 - 1.0,
            2.0 * (y - vy as f64) / vh as f64 - 1.0,
            2.0 * depth - 1.0,
            1.0,
        );
        let world = inverse * ndc;
        if world.w.abs() < f64::EPSILON {
            return None;
        }
        Some(world.truncate() / world.w)
    }

    /// Maps a window coordinate (Y from the bottom) back to world space using
    /// the depth the last render left at that pixel.
    ///
    /// Only meaningful between a render and the next depth clear.
    pub fn unproject(&self, x: f64, y: f64, depth: &dyn DepthBuffer) -> Option<Vector3<f64>> {
        let z = depth
            .read_depth(x.floor() as i32, y.floor() as i32)
            .unwrap_or(FAR_DEPTH);
        self.unproject_at_depth(x, y, z as f64)
    }

    /// Like [`Camera::unproject`] with Y measured from the top of the window.
    pub fn unproject_2d(&self, x: f64, y: f64, depth: &dyn DepthBuffer) -> Option<Vector3<f64>> {
        self.unproject(x, self.viewport[3] as f64 - y, depth)
    }

    /// GPU upload block for a wgpu-style backend.
    pub fn uniform(&self) -> CameraUniform {
        let p = self.position;
        CameraUniform {
            view_position: [p.x as f32, p.y as f32, p.z as f32, 1.0],
            view_proj: convert_matrix4_to_array(OPENGL_TO_WGPU_MATRIX * self.view_projection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::rendering::depth::UniformDepth;

    fn camera_on_z(distance: f64) -> Camera {
        let mut camera = Camera::new(Perspective::default(), 640, 480);
        camera.look_at(
            Vector3::new(0.0, 0.0, distance),
            Vector3::zero(),
            Vector3::unit_y(),
        );
        camera.update_matrices();
        camera
    }

    #[test]
    fn test_origin_projects_to_viewport_center() {
        let camera = camera_on_z(10.0);
        let w = camera.project(Vector3::zero()).unwrap();
        assert!((w.x - 320.0).abs() < 1e-9);
        assert!((w.y - 240.0).abs() < 1e-9);
        assert!(w.z > 0.0 && w.z < 1.0);

        let s = camera.project_2d(Vector3::new(0.0, 1.0, 0.0)).unwrap();
        let b = camera.project(Vector3::new(0.0, 1.0, 0.0)).unwrap();
        assert!((s.y - (480.0 - b.y)).abs() < 1e-9);
        assert!(b.y > 240.0);
    }

    #[test]
    fn test_project_unproject_round_trip() {
        let camera = camera_on_z(10.0);
        let p = Vector3::new(0.7, -1.3, 2.0);
        let w = camera.project(p).unwrap();
        let depth = UniformDepth(w.z as f32);
        // f32 depth storage limits precision
        let back = camera.unproject_at_depth(w.x, w.y, w.z).unwrap();
        assert!((back - p).magnitude() < 1e-6);
        let back = camera.unproject(w.x, w.y, &depth).unwrap();
        assert!((back - p).magnitude() < 1e-2);
    }

    #[test]
    fn test_view_direction_follows_look_at() {
        let camera = camera_on_z(5.0);
        assert!((camera.view_direction() - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-12);
        assert!((camera.right() - Vector3::unit_x()).magnitude() < 1e-12);
        assert!((camera.up() - Vector3::unit_y()).magnitude() < 1e-12);
    }

    #[test]
    fn test_look_at_with_parallel_up() {
        let mut camera = Camera::new(Perspective::default(), 100, 100);
        camera.look_at(Vector3::new(0.0, 0.0, 5.0), Vector3::zero(), Vector3::unit_z());
        let r = camera.rotation();
        assert!((r.x.dot(r.y)).abs() < 1e-12);
        assert!((camera.view_direction() - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-12);
    }

    #[test]
    fn test_uniform_carries_eye_position() {
        let camera = camera_on_z(3.0);
        let uniform = camera.uniform();
        assert_eq!(uniform.view_position, [0.0, 0.0, 3.0, 1.0]);
    }
}
