//! Error types for review-platform configuration

use thiserror::Error;

/// Why a platform weight configuration was rejected.
///
/// The messages are shown verbatim by the settings surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeightError {
    /// No platforms were submitted
    #[error("At least one platform is required")]
    Empty,

    /// A single weight falls outside 0..=100
    #[error("Each platform weight must be between 0 and 100 (platform {index} has {weight})")]
    OutOfRange { index: usize, weight: u32 },

    /// A submitted weight is negative, fractional or not a number
    #[error("Each platform weight must be a whole number between 0 and 100 (platform {index} has {value})")]
    NotAWholeNumber { index: usize, value: String },

    /// Weights do not add up to 100
    #[error("Total weight must equal 100% (currently {total}%)")]
    SumMismatch { total: u64 },

    /// An enabled platform has no destination URL
    #[error("Platform '{name}' has a weight of {weight}% but no URL")]
    MissingUrl { name: String, weight: u32 },
}
