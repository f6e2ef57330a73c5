/// Error types for the math, scene and config layers
use crate::scene::EntityId;

/// Failures raised by the vector/matrix/stack types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MathError {
    #[error("component index {index} out of range for {len} components")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("pop on an empty matrix stack")]
    StackUnderflow,

    #[error("invalid bounds: min ({min:?}) exceeds max ({max:?})")]
    InvalidBounds { min: [f32; 3], max: [f32; 3] },
}

/// Failures raised while walking an entity graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("unknown entity: {0}")]
    UnknownEntity(EntityId),

    #[error("entity {parent} already has a child named {name:?}")]
    DuplicateChild { parent: EntityId, name: String },
}

/// Failures raised by the hierarchical config tree.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid key path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("no key {path:?} in config")]
    KeyNotFound { path: String },

    #[error("{path:?} is a value, not a table")]
    NotATable { path: String },

    #[error("{path:?} holds {found}, expected {expected}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
