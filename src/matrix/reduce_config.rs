/// Cells above a pivot cleared sequentially below this count.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Settings of a [`Reducer`](crate::matrix::reduce::Reducer).
///
/// Only the execution strategy is configurable: the reduced matrices are the
/// same for every setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReduceConfig {
    /// During back-substitution, the rows above a pivot are cleared with rayon
    /// once they hold at least this many cells.
    pub parallel_threshold: usize,
}

impl ReduceConfig {
    pub fn new() -> Self {
        ReduceConfig {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn sequential() -> Self {
        ReduceConfig {
            parallel_threshold: usize::MAX,
        }
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self::new()
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_config() {
        assert_eq!(ReduceConfig::default().parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
        assert_eq!(ReduceConfig::sequential().parallel_threshold, usize::MAX);
        assert_eq!(
            ReduceConfig::sequential().with_parallel_threshold(8),
            ReduceConfig {
                parallel_threshold: 8
            }
        );
    }
}
