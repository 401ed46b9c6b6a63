//! Configuration management for the co-occurrence graph builder

use crate::data::CellPolicy;
use crate::error::{GraphError, Result};

/// Smallest intersection that may form a group
pub const MIN_SHARED_ITEMS: usize = 2;

/// Default configuration for group discovery and graph assembly
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Config {
    /// Minimum number of shared items for a member pair to form a group
    pub min_shared_items: usize,

    /// Node size for a group sharing exactly two items
    pub base_size: u32,

    /// Size increment per additional shared item
    pub scale: u32,

    /// How non-binary cell values are handled while building a matrix
    pub cell_policy: CellPolicy,

    /// Member (or group) count at which the pairwise scans go parallel
    pub parallel_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_shared_items: MIN_SHARED_ITEMS,
            base_size: 10,
            scale: 1,
            cell_policy: CellPolicy::Permissive,
            parallel_threshold: 1000,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(
        min_shared_items: usize,
        base_size: u32,
        scale: u32,
        cell_policy: CellPolicy,
        parallel_threshold: usize,
    ) -> Self {
        Self {
            min_shared_items,
            base_size,
            scale,
            cell_policy,
            parallel_threshold,
        }
    }

    /// Reject settings that would break the group invariants
    pub fn validate(&self) -> Result<()> {
        if self.min_shared_items < MIN_SHARED_ITEMS {
            return Err(GraphError::Config(format!(
                "min_shared_items must be at least {}, got {}",
                MIN_SHARED_ITEMS, self.min_shared_items
            )));
        }
        if self.parallel_threshold == 0 {
            return Err(GraphError::Config(
                "parallel_threshold must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_sizes() {
        let config = Config::default();
        assert_eq!(config.min_shared_items, 2);
        assert_eq!(config.base_size, 10);
        assert_eq!(config.scale, 1);
        assert_eq!(config.cell_policy, CellPolicy::Permissive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_single_item_threshold() {
        let mut config = Config::default();
        config.min_shared_items = 1;
        assert!(matches!(config.validate(), Err(GraphError::Config(_))));
    }

    #[test]
    fn rejects_zero_parallel_threshold() {
        let config = Config::new(2, 10, 1, CellPolicy::Strict, 0);
        assert!(config.validate().is_err());
    }
}
