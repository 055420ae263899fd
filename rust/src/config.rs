//! Construction-time options for ArenaTreeMap.

use crate::error::{AvlTreeError, InitResult};
use crate::types::{DEFAULT_CAPACITY, MIN_CAPACITY};

/// How much self-checking a tree performs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerifyMode {
    /// No checks beyond those the algorithms need.
    #[default]
    Off,
    /// Re-validate every node after each insert, remove and bulk build.
    /// Costs O(n) per mutation; meant for tests and debugging sessions.
    EveryMutation,
}

/// Options passed to [`crate::ArenaTreeMap::with_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Number of slots allocated up front.
    pub initial_capacity: usize,
    /// Verification performed after mutations.
    pub verify: VerifyMode,
}

impl TreeConfig {
    /// Config with the given initial capacity and verification off.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            verify: VerifyMode::Off,
        }
    }

    /// Set the initial capacity.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Set the verification mode.
    pub fn with_verify(mut self, verify: VerifyMode) -> Self {
        self.verify = verify;
        self
    }

    /// Shorthand for `with_verify(VerifyMode::EveryMutation)`.
    pub fn verifying(self) -> Self {
        self.with_verify(VerifyMode::EveryMutation)
    }

    /// Returns true if mutations should end with a full validation.
    pub fn verifies_mutations(&self) -> bool {
        self.verify == VerifyMode::EveryMutation
    }

    /// Reject capacities below `MIN_CAPACITY`.
    pub fn validate(&self) -> InitResult<()> {
        if self.initial_capacity < MIN_CAPACITY {
            return Err(AvlTreeError::invalid_capacity(
                self.initial_capacity,
                MIN_CAPACITY,
            ));
        }
        Ok(())
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TreeConfig::default();
        assert_eq!(config.initial_capacity, DEFAULT_CAPACITY);
        assert_eq!(config.verify, VerifyMode::Off);
        assert!(!config.verifies_mutations());
    }

    #[test]
    fn test_builder_methods() {
        let config = TreeConfig::default().with_initial_capacity(3).verifying();
        assert_eq!(config.initial_capacity, 3);
        assert!(config.verifies_mutations());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(TreeConfig::new(0).validate().is_err());
        assert!(TreeConfig::new(MIN_CAPACITY).validate().is_ok());
    }
}
