/// Fixed-function style matrix stack
use crate::error::MathError;
use crate::matrix::Matrix;

/// LIFO stack of transforms.
///
/// Push matrices in the reverse of the order they should apply to a vertex:
/// pushing translate and then rotate composes to "rotate, then translate".
#[derive(Debug, Clone, Default)]
pub struct MatrixStack {
    entries: Vec<Matrix>,
}

impl MatrixStack {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Push a copy of `m`; later edits to the caller's matrix do not reach the stack.
    pub fn push(&mut self, m: &Matrix) {
        self.entries.push(*m);
    }

    /// Remove the top entry.
    pub fn pop(&mut self) -> Result<Matrix, MathError> {
        match self.entries.pop() {
            Some(m) => Ok(m),
            None => {
                tracing::warn!("matrix stack underflow");
                Err(MathError::StackUnderflow)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Fold the stack into one matrix.
    ///
    /// Walks from the top entry down to the bottom one, computing
    /// `result = entry * result` from identity, so the bottom entry is the
    /// outermost (last applied) transform. An empty stack yields identity.
    pub fn composition(&self) -> Matrix {
        self.entries
            .iter()
            .rev()
            .fold(Matrix::identity(), |result, entry| entry.multiply_matrix(&result))
    }
}
