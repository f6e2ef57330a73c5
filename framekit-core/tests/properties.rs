use framekit_core::{
    closest_point_on_plane, Aabb, MathError, Matrix, MatrixStack, Plane, Vector,
};
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = f32> {
    -100.0f32..100.0
}

fn direction() -> impl Strategy<Value = Vector> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| Vector::direction(x, y, z))
}

fn point() -> impl Strategy<Value = Vector> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| Vector::point(x, y, z))
}

fn matrix() -> impl Strategy<Value = Matrix> {
    prop::array::uniform16(-10.0f32..10.0).prop_map(Matrix::from_column_major)
}

fn aabb() -> impl Strategy<Value = Aabb> {
    (point(), 0.0f32..50.0, 0.0f32..50.0, 0.0f32..50.0).prop_map(|(min, dx, dy, dz)| {
        Aabb::new(min.xyz(), [min.x + dx, min.y + dy, min.z + dz]).unwrap()
    })
}

proptest! {
    #[test]
    fn normalized_vectors_have_unit_length(v in direction()) {
        prop_assume!(v.length() > 1e-3);
        let mut n = v;
        n.normalize();
        prop_assert!((n.length() - 1.0).abs() < 1e-4);
        prop_assert_eq!(n.w, v.w);
    }

    #[test]
    fn dot_is_symmetric(a in direction(), b in direction()) {
        prop_assert_eq!(a.dot(&b), b.dot(&a));
    }

    #[test]
    fn cross_is_anti_symmetric_and_orthogonal(a in direction(), b in direction()) {
        let ab = a.cross(&b);
        let ba = b.cross(&a);
        prop_assert!(ab.nearly_equal(&ba.scale(-1.0), 1e-6));

        let tolerance = 1e-4 * (1.0 + a.length_squared() * b.length());
        prop_assert!(ab.dot(&a).abs() < tolerance);
        prop_assert_eq!(ab.w, 0.0);
    }

    #[test]
    fn identity_is_a_two_sided_unit(m in matrix(), v in direction()) {
        let id = Matrix::identity();
        prop_assert!(id.multiply_matrix(&m).nearly_equal(&m, 1e-6));
        prop_assert!(m.multiply_matrix(&id).nearly_equal(&m, 1e-6));
        prop_assert!(id.multiply_vector(&v).nearly_equal(&v, 1e-6));
    }

    #[test]
    fn products_match_nalgebra(a in matrix(), b in matrix()) {
        let ours = a.multiply_matrix(&b);
        let theirs = Matrix::from(nalgebra::Matrix4::from(a) * nalgebra::Matrix4::from(b));
        prop_assert!(ours.nearly_equal(&theirs, 1e-3));
    }

    #[test]
    fn rotations_preserve_length(theta in -10.0f32..10.0, v in direction()) {
        let tolerance = 1e-4 * (1.0 + v.length());
        for m in [Matrix::rotate_x(theta), Matrix::rotate_y(theta), Matrix::rotate_z(theta)] {
            prop_assert!((m.multiply_vector(&v).length() - v.length()).abs() < tolerance);
        }
    }

    #[test]
    fn stack_composes_in_push_order(a in matrix(), b in matrix()) {
        let mut stack = MatrixStack::new();
        stack.push(&a);
        stack.push(&b);
        prop_assert!(stack.composition().nearly_equal(&a.multiply_matrix(&b), 1e-3));

        prop_assert!(stack.pop().unwrap().nearly_equal(&b, 1e-6));
        prop_assert!(stack.pop().is_ok());
        prop_assert!(matches!(stack.pop(), Err(MathError::StackUnderflow)));
    }

    #[test]
    fn collision_is_symmetric(a in aabb(), b in aabb()) {
        prop_assert_eq!(a.is_colliding(&b), b.is_colliding(&a));
        prop_assert!(a.is_colliding(&a));
    }

    #[test]
    fn closest_point_lies_on_plane(p in point(), n in direction(), q in point()) {
        prop_assume!(n.length() > 1e-2);
        let plane = Plane::new(p, n.normalized());
        let r = closest_point_on_plane(&q, &plane);

        prop_assert!(plane.signed_distance(&r).abs() < 1e-2);
        prop_assert_eq!(r.w, q.w);
        // Projecting twice changes nothing.
        prop_assert!(closest_point_on_plane(&r, &plane).nearly_equal(&r, 1e-2));
    }
}
