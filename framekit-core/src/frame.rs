/// Reference frames, look-at view matrices and perspective projection
///
/// The engine is left-handed: +X right, +Y up, +Z into the screen.
use crate::matrix::Matrix;
use crate::trig::{ExactTrig, Trig};
use crate::vector::Vector;

/// Which way the camera looks down its local Z axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Handedness {
    /// Camera looks down +Z; visible points have positive view-space z.
    #[default]
    Left,
    /// Camera looks down -Z; visible points have negative view-space z.
    Right,
}

/// An up/look/position frame.
///
/// `up` and `look` must be unit length and perpendicular for
/// [`ReferenceFrame::matrix`] to describe a rigid placement. Nothing here
/// checks that.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceFrame {
    pub up: Vector,
    pub look: Vector,
    pub position: Vector,
}

impl ReferenceFrame {
    pub fn new() -> Self {
        Self {
            up: Vector::direction(0.0, 1.0, 0.0),
            look: Vector::direction(0.0, 0.0, 1.0),
            position: Vector::direction(0.0, 0.0, 0.0),
        }
    }

    pub fn set_up(&mut self, x: f32, y: f32, z: f32) {
        self.up = Vector::direction(x, y, z);
    }

    pub fn set_look(&mut self, x: f32, y: f32, z: f32) {
        self.look = Vector::direction(x, y, z);
    }

    /// Stores the position with `w == 0`. [`ReferenceFrame::matrix`] writes
    /// `w == 1` into the translation column regardless.
    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vector::direction(x, y, z);
    }

    /// Placement matrix with columns `cross(up, look)`, `up`, `look`, `position`.
    pub fn matrix(&self) -> Matrix {
        let x_axis = self.up.cross(&self.look);
        let p = &self.position;

        Matrix::from_columns(
            x_axis,
            Vector::direction(self.up.x, self.up.y, self.up.z),
            Vector::direction(self.look.x, self.look.y, self.look.z),
            Vector::point(p.x, p.y, p.z),
        )
    }

    /// World-to-view matrix for a camera at `eye` looking at `center`.
    ///
    /// Forward `z = normalize(center - eye)`, right `x = normalize(cross(up_hint, z))`,
    /// true up `y = cross(z, x)`. The rotation stores x, y and z as rows and
    /// the translation is `(-x·eye, -y·eye, -z·eye)`, which places `center`
    /// at positive view-space z in front of the camera.
    ///
    /// `up_hint` must not be parallel to the viewing direction.
    pub fn look_at(eye: &Vector, center: &Vector, up_hint: &Vector) -> Matrix {
        let z = center.sub(eye).normalized();
        let x = up_hint.cross(&z).normalized();
        let y = z.cross(&x).normalized();

        Matrix::from_column_major([
            x.x, y.x, z.x, 0.0,
            x.y, y.y, z.y, 0.0,
            x.z, y.z, z.z, 0.0,
            -x.dot(eye), -y.dot(eye), -z.dot(eye), 1.0,
        ])
    }

    /// Symmetric-frustum perspective projection into the `[-1, 1]` clip cube.
    ///
    /// `fov_y` is the vertical field of view in radians. Both handedness
    /// variants map the near plane to z = -1 and the far plane to z = +1
    /// after the homogeneous divide. Clipping and the viewport transform
    /// happen elsewhere.
    pub fn perspective_projection(
        handedness: Handedness,
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Matrix {
        Self::perspective_projection_with(&ExactTrig, handedness, fov_y, aspect, near, far)
    }

    pub fn perspective_projection_with(
        trig: &impl Trig,
        handedness: Handedness,
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Matrix {
        let top = trig.tan(fov_y / 2.0) * near;
        let bottom = -top;
        let right = top * aspect;
        let left = bottom * aspect;

        let sx = 2.0 * near / (right - left);
        let sy = 2.0 * near / (top - bottom);
        let ox = (right + left) / (right - left);
        let oy = (top + bottom) / (top - bottom);
        let depth = (far + near) / (far - near);
        let offset = -(2.0 * far * near) / (far - near);

        match handedness {
            Handedness::Right => Matrix::from_column_major([
                sx,  0.0, 0.0,    0.0,
                0.0, sy,  0.0,    0.0,
                ox,  oy,  -depth, -1.0,
                0.0, 0.0, offset, 0.0,
            ]),
            Handedness::Left => Matrix::from_column_major([
                sx,  0.0, 0.0,   0.0,
                0.0, sy,  0.0,   0.0,
                -ox, -oy, depth, 1.0,
                0.0, 0.0, offset, 0.0,
            ]),
        }
    }
}

impl Default for ReferenceFrame {
    fn default() -> Self {
        Self::new()
    }
}
