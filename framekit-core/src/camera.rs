/// Orbit camera and screen-space helpers built on the reference-frame math
use crate::frame::{Handedness, ReferenceFrame};
use crate::matrix::Matrix;
use crate::vector::Vector;

/// Camera configuration for 3D rendering
#[derive(Debug, Clone)]
pub struct Camera {
    pub eye: Vector,
    pub target: Vector,
    pub up: Vector,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub handedness: Handedness,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            eye: Vector::point(0.0, 0.0, -5.0),
            target: Vector::point(0.0, 0.0, 0.0),
            up: Vector::direction(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height as f32,
            near: 0.1,
            far: 100.0,
            handedness: Handedness::Left,
        }
    }

    /// World-to-view transform.
    pub fn view_matrix(&self) -> Matrix {
        ReferenceFrame::look_at(&self.eye, &self.target, &self.up)
    }

    pub fn projection_matrix(&self) -> Matrix {
        ReferenceFrame::perspective_projection(self.handedness, self.fov, self.aspect, self.near, self.far)
    }

    /// `projection * view`, ready for [`crate::Aabb::draw`].
    pub fn view_projection(&self) -> Matrix {
        self.projection_matrix().multiply_matrix(&self.view_matrix())
    }

    /// Swing the eye around the target: `yaw` about world Y, then `pitch`
    /// about the camera's right axis. Pitch stops short of the poles so the
    /// up hint never lines up with the view direction.
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        let offset = self.eye.sub(&self.target);
        let offset = Matrix::rotate_y(yaw).multiply_vector(&offset);

        let forward = offset.scale(-1.0).normalized();
        let right = self.up.cross(&forward).normalized();
        let pitched = Matrix::rotate_from_axis_angle(pitch, &right).multiply_vector(&offset);

        let alignment = pitched.normalized().dot(&self.up).abs();
        let offset = if alignment < 0.99 { pitched } else { offset };

        let eye = self.target.add(&offset);
        self.eye = Vector::point(eye.x, eye.y, eye.z);
    }

    /// Distance from eye to target.
    pub fn distance(&self) -> f32 {
        self.eye.sub(&self.target).length()
    }

    /// Distance of a world-space point in front of the eye, along the view
    /// direction. Negative behind the camera.
    pub fn view_depth(&self, point: &Vector) -> f32 {
        self.depth_of(&self.view_matrix().multiply_vector(point))
    }

    fn depth_of(&self, eye_space: &Vector) -> f32 {
        match self.handedness {
            Handedness::Left => eye_space.z,
            Handedness::Right => -eye_space.z,
        }
    }

    /// Project a point through `model`, view and projection into pixel space.
    ///
    /// Returns `None` for points behind the near plane or outside the clip
    /// cube's x/y range. The third value is the NDC depth.
    pub fn project_to_screen(
        &self,
        point: &Vector,
        model: &Matrix,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let eye_space = self.view_matrix().multiply_matrix(model).multiply_vector(point);
        if self.depth_of(&eye_space) < self.near {
            return None;
        }

        let ndc = self.projection_matrix().multiply_vector(&eye_space);
        if ndc.x < -1.0 || ndc.x > 1.0 || ndc.y < -1.0 || ndc.y > 1.0 {
            return None;
        }

        let screen = viewport_matrix(width, height).multiply_vector(&ndc);
        Some((screen.x, screen.y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// NDC `[-1, 1]` square to pixel coordinates with y growing downward.
pub fn viewport_matrix(width: u32, height: u32) -> Matrix {
    let hw = width as f32 / 2.0;
    let hh = height as f32 / 2.0;
    Matrix::from_column_major([
        hw,  0.0, 0.0, 0.0,
        0.0, -hh, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        hw,  hh,  0.0, 1.0,
    ])
}
