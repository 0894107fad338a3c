//! Haystack parameters and the builder that validates them.

use crate::{Result, error::HaystackError};

/// Number of distractor paths emitted when no count is supplied.
pub const DEFAULT_NUM_OTHER_PATHS: i64 = 99;
/// Fitness attached to each distractor node by default.
pub const DEFAULT_OTHER_PATH_FITNESS: f64 = 0.1;
/// Weight of the favoured path's `start` edge and every distractor `start` edge.
pub const DEFAULT_PATH_LENGTH: f64 = 7.0;

/// The three scalars that fully determine a haystack.
///
/// A negative `num_other_paths` is accepted and emits no distractors.
///
/// # Examples
/// ```
/// use haystack_core::HaystackParams;
///
/// let params = HaystackParams::default();
/// assert_eq!(params.num_other_paths(), 99);
/// assert_eq!(params.distractor_count(), 99);
/// assert_eq!(HaystackParams::new(-4, 0.1, 7.0).distractor_count(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaystackParams {
    num_other_paths: i64,
    other_path_fitness: f64,
    path_length: f64,
}

impl Default for HaystackParams {
    fn default() -> Self {
        Self {
            num_other_paths: DEFAULT_NUM_OTHER_PATHS,
            other_path_fitness: DEFAULT_OTHER_PATH_FITNESS,
            path_length: DEFAULT_PATH_LENGTH,
        }
    }
}

impl HaystackParams {
    /// Creates parameters without validation.
    ///
    /// Non-finite floats are rendered as-is; use [`HaystackParamsBuilder`]
    /// to reject them.
    #[must_use]
    pub const fn new(num_other_paths: i64, other_path_fitness: f64, path_length: f64) -> Self {
        Self {
            num_other_paths,
            other_path_fitness,
            path_length,
        }
    }

    /// Returns a builder seeded with the default parameters.
    #[must_use]
    pub fn builder() -> HaystackParamsBuilder {
        HaystackParamsBuilder::default()
    }

    /// Requested number of distractor paths, as supplied.
    #[must_use]
    pub const fn num_other_paths(&self) -> i64 {
        self.num_other_paths
    }

    /// Number of distractor paths actually emitted.
    #[must_use]
    pub fn distractor_count(&self) -> u64 {
        u64::try_from(self.num_other_paths).unwrap_or(0)
    }

    /// Fitness attached to every distractor node.
    #[must_use]
    pub const fn other_path_fitness(&self) -> f64 {
        self.other_path_fitness
    }

    /// Weight of `start -> B` and of every `start -> N<i>` edge.
    #[must_use]
    pub const fn path_length(&self) -> f64 {
        self.path_length
    }
}

/// Configures and validates [`HaystackParams`].
///
/// # Examples
/// ```
/// use haystack_core::HaystackParams;
///
/// let params = HaystackParams::builder()
///     .with_num_other_paths(3)
///     .with_other_path_fitness(0.5)
///     .with_path_length(2.0)
///     .build()
///     .expect("finite parameters are valid");
/// assert_eq!(params.distractor_count(), 3);
///
/// let err = HaystackParams::builder()
///     .with_path_length(f64::NAN)
///     .build()
///     .expect_err("NaN is rejected");
/// assert_eq!(err.code().as_str(), "HAYSTACK_NON_FINITE_VALUE");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HaystackParamsBuilder {
    params: HaystackParams,
}

impl HaystackParamsBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of distractor paths.
    #[must_use]
    pub const fn with_num_other_paths(mut self, num_other_paths: i64) -> Self {
        self.params.num_other_paths = num_other_paths;
        self
    }

    /// Overrides the distractor node fitness.
    #[must_use]
    pub const fn with_other_path_fitness(mut self, other_path_fitness: f64) -> Self {
        self.params.other_path_fitness = other_path_fitness;
        self
    }

    /// Overrides the favoured path length.
    #[must_use]
    pub const fn with_path_length(mut self, path_length: f64) -> Self {
        self.params.path_length = path_length;
        self
    }

    /// Validates the configuration and returns the parameters.
    ///
    /// # Errors
    /// Returns [`HaystackError::NonFiniteValue`] when the fitness or the path
    /// length is NaN or infinite.
    pub fn build(self) -> Result<HaystackParams> {
        ensure_finite("other_path_fitness", self.params.other_path_fitness)?;
        ensure_finite("path_length", self.params.path_length)?;
        Ok(self.params)
    }
}

fn ensure_finite(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(HaystackError::NonFiniteValue { parameter, value })
    }
}
