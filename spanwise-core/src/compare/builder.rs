//! Configuration surface for [`Comparator`].

use crate::error::ComparisonError;

use super::Comparator;

/// How [`Comparator::compare_all`] schedules a batch of graphs.
///
/// # Examples
/// ```
/// use spanwise_core::BatchStrategy;
///
/// assert_eq!(BatchStrategy::default(), BatchStrategy::Sequential);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum BatchStrategy {
    /// One graph after another on the calling thread.
    #[default]
    Sequential,
    /// Each graph as an isolated task on the rayon pool. Requires the
    /// `parallel` feature.
    Parallel,
}

/// Configures and constructs [`Comparator`] instances.
///
/// # Examples
/// ```
/// use spanwise_core::{BatchStrategy, ComparisonBuilder};
///
/// let comparator = ComparisonBuilder::new()
///     .with_strategy(BatchStrategy::Sequential)
///     .with_forest_verification(false)
///     .build()
///     .expect("sequential comparison is always available");
/// assert_eq!(comparator.strategy(), BatchStrategy::Sequential);
/// assert!(!comparator.verifies_forests());
/// ```
#[derive(Clone, Debug)]
pub struct ComparisonBuilder {
    strategy: BatchStrategy,
    verify_forests: bool,
}

impl Default for ComparisonBuilder {
    fn default() -> Self {
        Self {
            strategy: BatchStrategy::Sequential,
            verify_forests: true,
        }
    }
}

impl ComparisonBuilder {
    /// Creates a builder for a sequential comparator that verifies forests.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the batch strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: BatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the configured batch strategy.
    #[must_use]
    #[rustfmt::skip]
    pub fn strategy(&self) -> BatchStrategy { self.strategy }

    /// Enables or disables structural validation of each result.
    #[must_use]
    pub fn with_forest_verification(mut self, enabled: bool) -> Self {
        self.verify_forests = enabled;
        self
    }

    /// Returns whether results will be validated.
    #[must_use]
    #[rustfmt::skip]
    pub fn verifies_forests(&self) -> bool { self.verify_forests }

    /// Validates the configuration and constructs a [`Comparator`].
    ///
    /// # Errors
    /// Returns [`ComparisonError::BackendUnavailable`] when
    /// [`BatchStrategy::Parallel`] is requested without the `parallel`
    /// feature.
    pub fn build(self) -> Result<Comparator, ComparisonError> {
        if cfg!(not(feature = "parallel")) && self.strategy == BatchStrategy::Parallel {
            return Err(ComparisonError::BackendUnavailable {
                requested: self.strategy,
            });
        }
        Ok(Comparator {
            strategy: self.strategy,
            verify_forests: self.verify_forests,
        })
    }
}
