/// 4x4 column-major matrices and transform builders
///
/// Storage is column-major: components 0..4 are the X basis column, 4..8 the
/// Y basis, 8..12 the Z basis and 12..16 the translation. Vectors are column
/// vectors multiplied on the right, so `a.multiply_matrix(&b)` means "apply
/// `b`, then `a`".
///
/// Rotation conventions (left-handed, angles in radians):
/// - about X carries `(0,1,0)` toward `(0,0,1)`
/// - about Y carries `(0,0,1)` toward `(1,0,0)`
/// - about Z carries `(1,0,0)` toward `(0,1,0)`
use std::fmt;
use std::ops::Mul;

use crate::error::MathError;
use crate::trig::{ExactTrig, Trig};
use crate::vector::{nearly_equal_f32, Vector, EPSILON};

#[derive(Debug, Clone, Copy)]
pub struct Matrix {
    m: [f32; 16],
}

impl Matrix {
    /// Build from 16 components already in column-major order.
    pub const fn from_column_major(m: [f32; 16]) -> Self {
        Self { m }
    }

    /// Build from four columns; `w` of each column is taken as-is.
    pub fn from_columns(x: Vector, y: Vector, z: Vector, t: Vector) -> Self {
        Self::from_column_major([
            x.x, x.y, x.z, x.w,
            y.x, y.y, y.z, y.w,
            z.x, z.y, z.z, z.w,
            t.x, t.y, t.z, t.w,
        ])
    }

    pub const fn identity() -> Self {
        Self::from_column_major([
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub const fn zero() -> Self {
        Self::from_column_major([0.0; 16])
    }

    pub fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        Self::from_column_major([
            sx,  0.0, 0.0, 0.0,
            0.0, sy,  0.0, 0.0,
            0.0, 0.0, sz,  0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub fn translate(tx: f32, ty: f32, tz: f32) -> Self {
        Self::from_column_major([
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            tx,  ty,  tz,  1.0,
        ])
    }

    pub fn rotate_x(theta: f32) -> Self {
        Self::rotate_x_with(&ExactTrig, theta)
    }

    pub fn rotate_x_with(trig: &impl Trig, theta: f32) -> Self {
        let (s, c) = (trig.sin(theta), trig.cos(theta));
        Self::from_column_major([
            1.0, 0.0, 0.0, 0.0,
            0.0, c,   s,   0.0,
            0.0, -s,  c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub fn rotate_y(theta: f32) -> Self {
        Self::rotate_y_with(&ExactTrig, theta)
    }

    pub fn rotate_y_with(trig: &impl Trig, theta: f32) -> Self {
        let (s, c) = (trig.sin(theta), trig.cos(theta));
        Self::from_column_major([
            c,   0.0, -s,  0.0,
            0.0, 1.0, 0.0, 0.0,
            s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub fn rotate_z(theta: f32) -> Self {
        Self::rotate_z_with(&ExactTrig, theta)
    }

    pub fn rotate_z_with(trig: &impl Trig, theta: f32) -> Self {
        let (s, c) = (trig.sin(theta), trig.cos(theta));
        Self::from_column_major([
            c,   s,   0.0, 0.0,
            -s,  c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation by `theta` about the line through `point` along `direction`.
    ///
    /// `direction` must already be unit length; it is not renormalized here.
    pub fn rotate_around_axis(theta: f32, point: &Vector, direction: &Vector) -> Self {
        Self::rotate_around_axis_with(&ExactTrig, theta, point, direction)
    }

    pub fn rotate_around_axis_with(
        trig: &impl Trig,
        theta: f32,
        point: &Vector,
        direction: &Vector,
    ) -> Self {
        let (s, c) = (trig.sin(theta), trig.cos(theta));
        let t = 1.0 - c;
        let (px, py, pz) = (point.x, point.y, point.z);
        let (dx, dy, dz) = (direction.x, direction.y, direction.z);
        let (xx, yy, zz) = (dx * dx, dy * dy, dz * dz);

        Self::from_column_major([
            // X column
            xx + (yy + zz) * c,
            dx * dy * t + dz * s,
            dx * dz * t - dy * s,
            0.0,
            // Y column
            dx * dy * t - dz * s,
            yy + (xx + zz) * c,
            dy * dz * t + dx * s,
            0.0,
            // Z column
            dx * dz * t + dy * s,
            dy * dz * t - dx * s,
            zz + (xx + yy) * c,
            0.0,
            // translation
            (px * (yy + zz) - dx * (py * dy + pz * dz)) * t + (py * dz - pz * dy) * s,
            (py * (xx + zz) - dy * (px * dx + pz * dz)) * t + (pz * dx - px * dz) * s,
            (pz * (xx + yy) - dz * (px * dx + py * dy)) * t + (px * dy - py * dx) * s,
            1.0,
        ])
    }

    /// Rotation about an axis through the origin. `axis` must be unit length.
    pub fn rotate_from_axis_angle(theta: f32, axis: &Vector) -> Self {
        Self::rotate_from_axis_angle_with(&ExactTrig, theta, axis)
    }

    pub fn rotate_from_axis_angle_with(trig: &impl Trig, theta: f32, axis: &Vector) -> Self {
        let (s, c) = (trig.sin(theta), trig.cos(theta));
        let t = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);

        Self::from_column_major([
            t * x * x + c,     t * x * y + z * s, t * x * z - y * s, 0.0,
            t * x * y - z * s, t * y * y + c,     t * y * z + x * s, 0.0,
            t * x * z + y * s, t * y * z - x * s, t * z * z + c,     0.0,
            0.0,               0.0,               0.0,               1.0,
        ])
    }

    pub fn as_array(&self) -> &[f32; 16] {
        &self.m
    }

    /// Component by column-major index 0..15.
    pub fn get(&self, index: usize) -> Result<f32, MathError> {
        self.m
            .get(index)
            .copied()
            .ok_or(MathError::IndexOutOfRange { index, len: 16 })
    }

    pub fn set(&mut self, index: usize, value: f32) -> Result<(), MathError> {
        let slot = self
            .m
            .get_mut(index)
            .ok_or(MathError::IndexOutOfRange { index, len: 16 })?;
        *slot = value;
        Ok(())
    }

    /// Column 0..3 as a vector (X, Y, Z basis, translation).
    pub fn column(&self, index: usize) -> Result<Vector, MathError> {
        if index >= 4 {
            return Err(MathError::IndexOutOfRange { index, len: 4 });
        }
        let base = index * 4;
        Ok(Vector::new(
            self.m[base],
            self.m[base + 1],
            self.m[base + 2],
            self.m[base + 3],
        ))
    }

    pub fn transpose(&self) -> Self {
        let mut out = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[row * 4 + col] = self.m[col * 4 + row];
            }
        }
        Self::from_column_major(out)
    }

    /// Transform `v` as a column vector.
    ///
    /// The homogeneous divide happens only for points (`w == 1`) whose
    /// transformed `w` is no longer 1. Free vectors are never divided.
    pub fn multiply_vector(&self, v: &Vector) -> Vector {
        let m = &self.m;
        let mut x = m[0] * v.x + m[4] * v.y + m[8] * v.z + m[12] * v.w;
        let mut y = m[1] * v.x + m[5] * v.y + m[9] * v.z + m[13] * v.w;
        let mut z = m[2] * v.x + m[6] * v.y + m[10] * v.z + m[14] * v.w;
        let mut w = m[3] * v.x + m[7] * v.y + m[11] * v.z + m[15] * v.w;

        if v.w == 1.0 && w != 1.0 {
            x /= w;
            y /= w;
            z /= w;
            w = 1.0;
        }

        Vector::new(x, y, z, w)
    }

    /// `self * other`: the result applies `other` first, then `self`.
    pub fn multiply_matrix(&self, other: &Matrix) -> Matrix {
        let a = &self.m;
        let b = &other.m;
        let mut result = [0.0f32; 16];

        for col in 0..4 {
            for row in 0..4 {
                result[col * 4 + row] = a[row] * b[col * 4]
                    + a[4 + row] * b[col * 4 + 1]
                    + a[8 + row] * b[col * 4 + 2]
                    + a[12 + row] * b[col * 4 + 3];
            }
        }

        Self::from_column_major(result)
    }

    /// All sixteen components within `epsilon`.
    pub fn nearly_equal(&self, other: &Matrix, epsilon: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| nearly_equal_f32(*a, *b, epsilon))
    }

    pub fn approx_eq(&self, other: &Matrix) -> bool {
        self.nearly_equal(other, EPSILON)
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        self.multiply_matrix(&rhs)
    }
}

impl Mul<Vector> for Matrix {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Vector {
        self.multiply_vector(&rhs)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.m;
        for row in 0..4 {
            writeln!(
                f,
                "| {} {} {} {} |",
                m[row], m[4 + row], m[8 + row], m[12 + row]
            )?;
        }
        Ok(())
    }
}

impl From<Matrix> for nalgebra::Matrix4<f32> {
    fn from(m: Matrix) -> Self {
        nalgebra::Matrix4::from_column_slice(&m.m)
    }
}

impl From<nalgebra::Matrix4<f32>> for Matrix {
    fn from(m: nalgebra::Matrix4<f32>) -> Self {
        let mut out = [0.0f32; 16];
        out.copy_from_slice(m.as_slice());
        Matrix::from_column_major(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trig::TrigTable;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn nalgebra_reference(m: &Matrix) -> nalgebra::Matrix4<f32> {
        (*m).into()
    }

    #[test]
    fn test_identity_is_unit() {
        let m = Matrix::rotate_y(0.7) * Matrix::translate(1.0, 2.0, 3.0);
        assert!(Matrix::identity().multiply_matrix(&m).approx_eq(&m));
        assert!(m.multiply_matrix(&Matrix::identity()).approx_eq(&m));

        let v = Vector::new(1.0, -2.0, 3.0, 0.0);
        assert!(Matrix::identity().multiply_vector(&v).approx_eq(&v));
    }

    #[test]
    fn test_rotation_conventions() {
        let x = Vector::direction(1.0, 0.0, 0.0);
        let y = Vector::direction(0.0, 1.0, 0.0);
        let z = Vector::direction(0.0, 0.0, 1.0);

        assert!((Matrix::rotate_x(FRAC_PI_2) * y).approx_eq(&z));
        assert!((Matrix::rotate_y(FRAC_PI_2) * z).approx_eq(&x));
        assert!((Matrix::rotate_z(FRAC_PI_2) * x).approx_eq(&y));
    }

    #[test]
    fn test_translate_moves_points_not_vectors() {
        let t = Matrix::translate(1.0, 2.0, 3.0);
        let p = t.multiply_vector(&Vector::point(1.0, 1.0, 1.0));
        assert!(p.approx_eq(&Vector::point(2.0, 3.0, 4.0)));

        let d = t.multiply_vector(&Vector::direction(1.0, 1.0, 1.0));
        assert!(d.approx_eq(&Vector::direction(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_scale() {
        let p = Matrix::scale(2.0, 3.0, 4.0) * Vector::point(1.0, 1.0, 1.0);
        assert!(p.approx_eq(&Vector::point(2.0, 3.0, 4.0)));
    }

    #[test]
    fn test_homogeneous_divide_only_for_points() {
        let mut m = Matrix::identity();
        m.set(15, 2.0).unwrap();

        let p = m.multiply_vector(&Vector::point(2.0, 4.0, 6.0));
        assert!(p.approx_eq(&Vector::point(1.0, 2.0, 3.0)));

        let d = m.multiply_vector(&Vector::direction(2.0, 4.0, 6.0));
        assert!(d.approx_eq(&Vector::direction(2.0, 4.0, 6.0)));
    }

    #[test]
    fn test_composition_order() {
        // translate * rotate: rotate first, then translate
        let m = Matrix::translate(10.0, 0.0, 0.0) * Matrix::rotate_z(FRAC_PI_2);
        let p = m * Vector::point(1.0, 0.0, 0.0);
        assert!(p.approx_eq(&Vector::point(10.0, 1.0, 0.0)));
    }

    #[test]
    fn test_multiply_matches_nalgebra() {
        let a = Matrix::rotate_x(0.3) * Matrix::translate(1.0, -2.0, 0.5);
        let b = Matrix::scale(2.0, 1.0, 0.5) * Matrix::rotate_z(1.1);
        let expected: Matrix = (nalgebra_reference(&a) * nalgebra_reference(&b)).into();
        assert!(a.multiply_matrix(&b).approx_eq(&expected));
    }

    #[test]
    fn test_axis_angle_matches_nalgebra() {
        let axis = nalgebra::Vector3::new(1.0_f32, 2.0, 3.0).normalize();
        let ours = Matrix::rotate_from_axis_angle(0.8, &Vector::direction(axis.x, axis.y, axis.z));
        let reference = nalgebra::Matrix4::from_axis_angle(&nalgebra::Unit::new_normalize(axis), 0.8);
        assert!(ours.approx_eq(&reference.into()));
    }

    #[test]
    fn test_axis_angle_agrees_with_basis_rotations() {
        let theta = 0.6;
        let z_axis = Vector::direction(0.0, 0.0, 1.0);
        assert!(Matrix::rotate_from_axis_angle(theta, &z_axis).approx_eq(&Matrix::rotate_z(theta)));
        let x_axis = Vector::direction(1.0, 0.0, 0.0);
        assert!(Matrix::rotate_from_axis_angle(theta, &x_axis).approx_eq(&Matrix::rotate_x(theta)));
    }

    #[test]
    fn test_rotate_around_axis_through_origin() {
        let axis = Vector::direction(0.0, 1.0, 0.0);
        let origin = Vector::point(0.0, 0.0, 0.0);
        let m = Matrix::rotate_around_axis(1.2, &origin, &axis);
        assert!(m.approx_eq(&Matrix::rotate_from_axis_angle(1.2, &axis)));
    }

    #[test]
    fn test_rotate_around_offset_axis() {
        // Axis parallel to Z through (1,0,0); the pivot itself stays fixed.
        let pivot = Vector::point(1.0, 0.0, 0.0);
        let dir = Vector::direction(0.0, 0.0, 1.0);
        let m = Matrix::rotate_around_axis(PI, &pivot, &dir);

        assert!((m * pivot).nearly_equal(&pivot, 1e-4));
        let p = m * Vector::point(2.0, 0.0, 5.0);
        assert!(p.nearly_equal(&Vector::point(0.0, 0.0, 5.0), 1e-4));

        let expected = Matrix::translate(1.0, 0.0, 0.0)
            * Matrix::rotate_z(PI)
            * Matrix::translate(-1.0, 0.0, 0.0);
        assert!(m.nearly_equal(&expected, 1e-4));
    }

    #[test]
    fn test_trig_table_builders() {
        let table = TrigTable::new();
        let exact = Matrix::rotate_x(0.9);
        let approx = Matrix::rotate_x_with(&table, 0.9);
        assert!(exact.nearly_equal(&approx, 1e-3));
    }

    #[test]
    fn test_index_and_column_access() {
        let mut m = Matrix::translate(4.0, 5.0, 6.0);
        assert_eq!(m.get(12), Ok(4.0));
        assert_eq!(m.get(16), Err(MathError::IndexOutOfRange { index: 16, len: 16 }));
        assert!(m.set(99, 1.0).is_err());

        let t = m.column(3).unwrap();
        assert!(t.approx_eq(&Vector::point(4.0, 5.0, 6.0)));
        assert!(m.column(4).is_err());

        m.set(0, 7.0).unwrap();
        assert_eq!(m.as_array()[0], 7.0);
    }

    #[test]
    fn test_transpose_inverts_rotation() {
        let r = Matrix::rotate_from_axis_angle(0.4, &Vector::direction(0.0, 0.6, 0.8));
        assert!((r * r.transpose()).approx_eq(&Matrix::identity()));
    }

    #[test]
    fn test_zero_and_display() {
        let z = Matrix::zero();
        assert!(z.as_array().iter().all(|c| *c == 0.0));
        let text = Matrix::identity().to_string();
        assert_eq!(text.lines().next(), Some("| 1 0 0 0 |"));
        assert_eq!(text.lines().count(), 4);
    }
}
