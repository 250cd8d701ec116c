use crate::shape::Shape;

/// All errors that can occur within Vole.
///
/// This enum captures every failure mode: empty shapes at construction,
/// shape mismatches in element-wise arithmetic, bad multi-dimensional
/// indices, and misuse of the layer state machine. Using a single error
/// type across the library simplifies error propagation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A tensor was constructed with an empty shape.
    #[error("shape cannot be empty")]
    EmptyShape,

    /// Shape mismatch between two tensors (e.g., trying to add [2,3] + [4,5]).
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: Shape, got: Shape },

    /// A multi-index had the wrong number of components for the tensor's rank.
    #[error("rank mismatch: expected rank {expected}, got {got}")]
    RankMismatch { expected: usize, got: usize },

    /// An index component exceeded its dimension's bound.
    #[error("index out of range: index {index} for dimension {dim} of size {size}")]
    IndexOutOfRange {
        dim: usize,
        index: usize,
        size: usize,
    },

    /// A layer was fed an input whose feature dimension does not match.
    #[error("feature mismatch: input last dimension is {got}, layer expects {expected}")]
    FeatureMismatch { expected: usize, got: usize },

    /// Element count mismatch when creating a tensor from a vec.
    #[error("element count mismatch: shape {shape} requires {expected} elements, got {got}")]
    ElementCountMismatch {
        shape: Shape,
        expected: usize,
        got: usize,
    },

    /// A parameter or accessor was used outside its valid domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation was called in the wrong state (e.g., backward before forward).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Generic message for cases not covered above.
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an error from any string message.
    pub fn msg(s: impl Into<String>) -> Self {
        Error::Msg(s.into())
    }
}

/// Convenience Result type used throughout Vole.
pub type Result<T> = std::result::Result<T, Error>;

/// Macro for early return with a formatted error message.
/// Usage: `bail!("something went wrong: {}", detail)`
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::Msg(format!($($arg)*)))
    };
}
