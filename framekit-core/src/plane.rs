/// Point-normal planes and closest-point queries
use crate::vector::Vector;

/// Plane through `p` with normal `n`.
///
/// `n` must be unit length (and `w == 0`); a non-unit normal makes every
/// query below silently scale its answer.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub p: Vector,
    pub n: Vector,
}

impl Plane {
    pub fn new(p: Vector, n: Vector) -> Self {
        Self { p, n }
    }

    /// Distance of `q` above the plane along `n` (negative below).
    pub fn signed_distance(&self, q: &Vector) -> f32 {
        self.n.dot(q) - self.n.dot(&self.p)
    }
}

/// Orthogonal projection of `q` onto `plane`: `q - ((n·q) - (n·p)) n`.
///
/// The result keeps `q`'s `w`, so projecting a point yields a point.
pub fn closest_point_on_plane(q: &Vector, plane: &Plane) -> Vector {
    let t = plane.signed_distance(q);
    let r = q.sub(&plane.n.scale(t));
    Vector::new(r.x, r.y, r.z, q.w)
}
