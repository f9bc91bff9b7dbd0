//! Configuration types for tree walkers

/// Configuration for tree walking behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Deepest level that is still descended into, counted from the root
    /// (depth 0). `None` walks down to the leaves.
    pub max_depth: Option<usize>,
    /// Follow symbolic links (and junctions) to directories instead of
    /// listing them as leaves.
    pub expand_symlinks: bool,
}

impl WalkerConfig {
    /// Build a config from a signed depth where any negative value means
    /// "unbounded".
    pub fn with_signed_depth(depth: i64, expand_symlinks: bool) -> Self {
        Self {
            max_depth: usize::try_from(depth).ok(),
            expand_symlinks,
        }
    }

    /// Whether a directory at `depth` may be descended into.
    pub fn allows_descent(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth < max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_depth_is_unbounded() {
        let config = WalkerConfig::with_signed_depth(-1, false);
        assert_eq!(config.max_depth, None);
        assert!(config.allows_descent(10_000));
    }

    #[test]
    fn test_zero_depth_keeps_root_closed() {
        let config = WalkerConfig::with_signed_depth(0, false);
        assert_eq!(config.max_depth, Some(0));
        assert!(!config.allows_descent(0));
    }

    #[test]
    fn test_depth_limit_boundary() {
        let config = WalkerConfig::with_signed_depth(2, true);
        assert!(config.allows_descent(0));
        assert!(config.allows_descent(1));
        assert!(!config.allows_descent(2));
        assert!(config.expand_symlinks);
    }
}
