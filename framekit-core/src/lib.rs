/// framekit core - homogeneous vector and matrix math for 3D scenes
///
/// This library provides the stateless math layer: vectors, column-major
/// 4x4 matrices, transform stacks, reference frames and projections,
/// axis-aligned bounding boxes and plane queries, plus a small path-addressed
/// configuration tree.

pub mod aabb;
pub mod camera;
pub mod config;
pub mod error;
pub mod frame;
pub mod matrix;
pub mod matrix_stack;
pub mod plane;
pub mod scene;
pub mod trig;
pub mod vector;

// Re-export commonly used types
pub use aabb::{Aabb, CollisionGeomType, LineSurface, EDGES};
pub use camera::{viewport_matrix, Camera};
pub use config::{ConfigTree, ConfigValue, KeyPath};
pub use error::{ConfigError, MathError, SceneError};
pub use frame::{Handedness, ReferenceFrame};
pub use matrix::Matrix;
pub use matrix_stack::MatrixStack;
pub use plane::{closest_point_on_plane, Plane};
pub use scene::{Entity, EntityGraph, EntityId, Scene};
pub use trig::{ExactTrig, Trig, TrigTable};
pub use vector::{nearly_equal_f32, Vector, EPSILON};
