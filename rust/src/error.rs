//! Error handling and result types for ArenaTreeMap operations.
//!
//! Ordinary misses (searching or removing an absent key) are not errors; they
//! are reported through [`crate::Lookup`]. The variants here cover invalid
//! construction input, arena misuse, and internal-consistency faults that mean
//! the tree structure itself is corrupt.

use crate::types::NodeId;
use thiserror::Error;

/// Error type for AVL tree operations.
#[derive(Debug, Error)]
pub enum AvlTreeError {
    /// Key not found in the tree.
    #[error("Key not found in tree")]
    KeyNotFound,
    /// Invalid capacity specified.
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(String),
    /// Bulk build input was not strictly ascending by key.
    #[error("Unsorted input: key at position {index} is not greater than its predecessor")]
    UnsortedInput { index: usize },
    /// A slot was requested from an arena whose free list is empty.
    #[error("Arena exhausted: no free slot available")]
    ArenaExhausted,
    /// An index that does not refer to an occupied slot.
    #[error("Invalid node index {0}")]
    InvalidNode(NodeId),
    /// Balance factor or rotation dispatch outside the reachable range.
    #[error("Corrupted tree: {0}")]
    CorruptedTree(String),
    /// Cached metadata disagrees with a full recount.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),
    /// Malformed command or seed line.
    #[error("Parse error: {0}")]
    Parse(String),
    /// I/O error while reading commands or seed data.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AvlTreeError {
    /// Create an InvalidCapacity error with context
    pub fn invalid_capacity(capacity: usize, min_required: usize) -> Self {
        Self::InvalidCapacity(format!(
            "Capacity {} is invalid (minimum required: {})",
            capacity, min_required
        ))
    }

    /// Create a CorruptedTree error with context
    pub fn corrupted_tree(component: &str, details: &str) -> Self {
        Self::CorruptedTree(format!("{} corruption: {}", component, details))
    }

    /// Create a DataIntegrityError with context
    pub fn data_integrity(context: &str, details: &str) -> Self {
        Self::DataIntegrityError(format!("{}: {}", context, details))
    }

    /// Create a Parse error with context
    pub fn parse(input: &str, reason: &str) -> Self {
        Self::Parse(format!("'{}': {}", input, reason))
    }

    /// True for errors that indicate structural corruption rather than bad input.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::CorruptedTree(_) | Self::DataIntegrityError(_) | Self::InvalidNode(_)
        )
    }

    /// Check if this error is a capacity error
    pub fn is_capacity_error(&self) -> bool {
        matches!(self, Self::InvalidCapacity(_))
    }
}

/// Internal result type for tree operations
pub(crate) type TreeResult<T> = Result<T, AvlTreeError>;

/// Public result type for tree operations that may fail
pub type AvlResult<T> = Result<T, AvlTreeError>;

/// Result type for key lookup operations
pub type KeyResult<T> = Result<T, AvlTreeError>;

/// Result type for tree modification operations
pub type ModifyResult<T> = Result<T, AvlTreeError>;

/// Result type for tree construction
pub type InitResult<T> = Result<T, AvlTreeError>;

/// Result extension trait for attaching context to failures
pub trait AvlResultExt<T> {
    /// Prefix the error message with additional context
    fn with_context(self, context: &str) -> AvlResult<T>;

    /// Prefix the error message with the name of the failed operation
    fn with_operation(self, operation: &str) -> AvlResult<T>;

    /// Log error and continue with default value
    fn or_default_with_log(self) -> T
    where
        T: Default;
}

impl<T> AvlResultExt<T> for Result<T, AvlTreeError> {
    fn with_context(self, context: &str) -> AvlResult<T> {
        self.map_err(|e| match e {
            AvlTreeError::InvalidCapacity(msg) => {
                AvlTreeError::InvalidCapacity(format!("{}: {}", context, msg))
            }
            AvlTreeError::CorruptedTree(msg) => AvlTreeError::corrupted_tree(context, &msg),
            AvlTreeError::DataIntegrityError(msg) => AvlTreeError::data_integrity(context, &msg),
            AvlTreeError::Parse(msg) => AvlTreeError::Parse(format!("{}: {}", context, msg)),
            other => other,
        })
    }

    fn with_operation(self, operation: &str) -> AvlResult<T> {
        self.with_context(&format!("Operation '{}'", operation))
    }

    fn or_default_with_log(self) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "AVL tree operation failed, using default");
                T::default()
            }
        }
    }
}
