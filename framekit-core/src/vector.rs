/// Homogeneous 4-component vectors
///
/// `w == 0.0` marks a free vector (direction), `w == 1.0` marks a point.
/// The arithmetic below works on the x/y/z triple only; value-returning
/// producers yield `w == 0.0`, in-place operations leave `w` untouched.
use std::fmt;
use std::ops::{Mul, Neg};

use crate::error::MathError;

/// Default tolerance for approximate float comparisons.
pub const EPSILON: f32 = 1e-5;

/// Compare two scalars within `epsilon`.
pub fn nearly_equal_f32(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// A free vector (`w == 0`).
    pub const fn direction(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 0.0)
    }

    /// A point (`w == 1`).
    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 1.0)
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    pub fn xyz(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Component by index: 0..3 map to x, y, z, w.
    pub fn get(&self, index: usize) -> Result<f32, MathError> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            3 => Ok(self.w),
            _ => Err(MathError::IndexOutOfRange { index, len: 4 }),
        }
    }

    pub fn set(&mut self, index: usize, value: f32) -> Result<(), MathError> {
        let slot = match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => return Err(MathError::IndexOutOfRange { index, len: 4 }),
        };
        *slot = value;
        Ok(())
    }

    pub fn make_point(&mut self) {
        self.w = 1.0;
    }

    pub fn make_vector(&mut self) {
        self.w = 0.0;
    }

    pub fn is_point(&self) -> bool {
        self.w == 1.0
    }

    pub fn add(&self, other: &Self) -> Self {
        Self::direction(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self::direction(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-hand cross product formula. Which handedness the result lives in
    /// is the caller's convention.
    pub fn cross(&self, other: &Self) -> Self {
        Self::direction(
            self.y * other.z - other.y * self.z,
            self.z * other.x - other.z * self.x,
            self.x * other.y - other.x * self.y,
        )
    }

    pub fn scale(&self, k: f32) -> Self {
        Self::direction(self.x * k, self.y * k, self.z * k)
    }

    pub fn scale_in_place(&mut self, k: f32) {
        self.x *= k;
        self.y *= k;
        self.z *= k;
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Normalize in place.
    ///
    /// A zero-length vector yields NaN components; callers must not normalize
    /// degenerate vectors.
    pub fn normalize(&mut self) {
        let inv_length = 1.0 / self.length();
        self.scale_in_place(inv_length);
    }

    /// Normalized copy; same zero-length caveat as [`Vector::normalize`].
    pub fn normalized(&self) -> Self {
        self.scale(1.0 / self.length())
    }

    /// All four components within `epsilon`.
    pub fn nearly_equal(&self, other: &Self, epsilon: f32) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| nearly_equal_f32(*a, *b, epsilon))
    }

    /// [`Vector::nearly_equal`] with [`EPSILON`].
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.nearly_equal(other, EPSILON)
    }
}

// `Add`/`Sub` stay out of scope here so `a.add(&b)` hits the inherent method.
impl std::ops::Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::add(&self, &rhs)
    }
}

impl std::ops::Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::sub(&self, &rhs)
    }
}

impl Mul<f32> for Vector {
    type Output = Vector;

    fn mul(self, k: f32) -> Vector {
        self.scale(k)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::direction(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {}, {}, {}, {} ]", self.x, self.y, self.z, self.w)
    }
}

impl From<Vector> for nalgebra::Vector4<f32> {
    fn from(v: Vector) -> Self {
        nalgebra::Vector4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<nalgebra::Vector4<f32>> for Vector {
    fn from(v: nalgebra::Vector4<f32>) -> Self {
        Vector::new(v.x, v.y, v.z, v.w)
    }
}

impl From<nalgebra::Point3<f32>> for Vector {
    fn from(p: nalgebra::Point3<f32>) -> Self {
        Vector::point(p.x, p.y, p.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_drops_w() {
        let a = Vector::point(1.0, 2.0, 3.0);
        let b = Vector::point(4.0, 5.0, 6.0);
        assert!(a.add(&b).approx_eq(&Vector::direction(5.0, 7.0, 9.0)));
        assert!((b - a).approx_eq(&Vector::direction(3.0, 3.0, 3.0)));
        assert!((a * 2.0).approx_eq(&Vector::direction(2.0, 4.0, 6.0)));
        assert!((-a).approx_eq(&Vector::direction(-1.0, -2.0, -3.0)));
    }

    #[test]
    fn test_dot_and_cross() {
        let x = Vector::direction(1.0, 0.0, 0.0);
        let y = Vector::direction(0.0, 1.0, 0.0);
        assert_eq!(x.dot(&y), 0.0);
        assert!(x.cross(&y).approx_eq(&Vector::direction(0.0, 0.0, 1.0)));
        assert!(y.cross(&x).approx_eq(&Vector::direction(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_length_and_normalize() {
        let mut v = Vector::direction(3.0, 4.0, 0.0);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.length(), 5.0);

        let n = v.normalized();
        assert!(nearly_equal_f32(n.length(), 1.0, EPSILON));
        assert!(nearly_equal_f32(v.length(), 5.0, EPSILON));

        v.w = 1.0;
        v.normalize();
        assert!(v.approx_eq(&Vector::point(0.6, 0.8, 0.0)));
    }

    #[test]
    fn test_normalize_zero_is_nan() {
        let v = Vector::zero().normalized();
        assert!(v.x.is_nan());
    }

    #[test]
    fn test_index_access() {
        let mut v = Vector::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.get(0), Ok(1.0));
        assert_eq!(v.get(3), Ok(4.0));
        assert_eq!(v.get(4), Err(MathError::IndexOutOfRange { index: 4, len: 4 }));

        v.set(2, 9.0).unwrap();
        assert_eq!(v.z, 9.0);
        assert!(v.set(7, 1.0).is_err());
    }

    #[test]
    fn test_point_vector_toggle() {
        let mut v = Vector::direction(1.0, 1.0, 1.0);
        assert!(!v.is_point());
        v.make_point();
        assert!(v.is_point());
        v.make_vector();
        assert_eq!(v.w, 0.0);
    }

    #[test]
    fn test_nearly_equal_respects_epsilon() {
        let a = Vector::point(1.0, 1.0, 1.0);
        let b = Vector::point(1.0 + 5e-6, 1.0, 1.0);
        let c = Vector::point(1.0 + 1e-3, 1.0, 1.0);
        assert!(a.approx_eq(&b));
        assert!(!a.approx_eq(&c));
        assert!(a.nearly_equal(&c, 1e-2));
    }

    #[test]
    fn test_display() {
        let v = Vector::new(1.0, 2.5, -3.0, 1.0);
        assert_eq!(v.to_string(), "[ 1, 2.5, -3, 1 ]");
    }
}
