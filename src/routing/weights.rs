//! Weight validation and normalization for review platform settings.
//!
//! A valid configuration is a non-empty list of weights, each within
//! `0..=100`, summing to exactly [`TOTAL_WEIGHT`]. A weight of zero disables
//! its platform.

use super::error::WeightError;
use crate::store::{PlatformDraft, ReviewPlatform};

/// The total every valid configuration must add up to.
pub const TOTAL_WEIGHT: u32 = 100;

/// Slot recomputed by the three-slot settings form when an earlier slot changes.
pub const DEFAULT_AUTO_FILL_SLOT: usize = 2;

/// Anything carrying a platform weight.
pub trait Weighted {
    fn weight(&self) -> u32;
    fn set_weight(&mut self, weight: u32);
}

impl Weighted for u32 {
    fn weight(&self) -> u32 {
        *self
    }

    fn set_weight(&mut self, weight: u32) {
        *self = weight;
    }
}

impl Weighted for PlatformDraft {
    fn weight(&self) -> u32 {
        self.weight
    }

    fn set_weight(&mut self, weight: u32) {
        self.weight = weight;
    }
}

impl Weighted for ReviewPlatform {
    fn weight(&self) -> u32 {
        self.weight
    }

    fn set_weight(&mut self, weight: u32) {
        self.weight = weight;
    }
}

/// Check that `items` is non-empty, every weight is in `0..=100`, and the
/// weights sum to exactly 100.
///
/// # Examples
///
/// ```
/// use reviewgate::routing::{validate_weights, WeightError};
///
/// assert!(validate_weights(&[50u32, 25, 25]).is_ok());
/// assert_eq!(
///     validate_weights(&[50u32, 30, 25]),
///     Err(WeightError::SumMismatch { total: 105 })
/// );
/// assert_eq!(validate_weights::<u32>(&[]), Err(WeightError::Empty));
/// ```
pub fn validate_weights<T: Weighted>(items: &[T]) -> Result<(), WeightError> {
    if items.is_empty() {
        return Err(WeightError::Empty);
    }

    if let Some((index, weight)) = items
        .iter()
        .map(T::weight)
        .enumerate()
        .find(|(_, w)| *w > TOTAL_WEIGHT)
    {
        return Err(WeightError::OutOfRange { index, weight });
    }

    let total = sum_weights(items);
    if total != u64::from(TOTAL_WEIGHT) {
        return Err(WeightError::SumMismatch { total });
    }

    Ok(())
}

/// Settings-save gate: weights must be valid and every enabled platform needs
/// a URL to redirect to.
pub fn validate_platform_drafts(drafts: &[PlatformDraft]) -> Result<(), WeightError> {
    validate_weights(drafts)?;

    if let Some(draft) = drafts
        .iter()
        .find(|d| d.weight > 0 && d.url.trim().is_empty())
    {
        return Err(WeightError::MissingUrl {
            name: draft.name.clone(),
            weight: draft.weight,
        });
    }

    Ok(())
}

/// Weight left over for the slot at `exclude_index`, clamped at zero.
///
/// Sums every weight except the excluded one and returns `max(0, 100 - sum)`.
/// An out-of-bounds index excludes nothing.
///
/// ```
/// use reviewgate::routing::remaining_weight;
///
/// assert_eq!(remaining_weight(&[50u32, 30, 0], 2), 20);
/// assert_eq!(remaining_weight(&[70u32, 50, 0], 2), 0);
/// ```
pub fn remaining_weight<T: Weighted>(items: &[T], exclude_index: usize) -> u32 {
    let others: u64 = items
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != exclude_index)
        .map(|(_, item)| u64::from(item.weight()))
        .sum();

    u64::from(TOTAL_WEIGHT).saturating_sub(others) as u32
}

/// Overwrite the weight at `slot` with [`remaining_weight`].
///
/// Returns the filled value, or `None` if `slot` is out of bounds. This does
/// not make an over-allocated list valid: if the other slots already exceed
/// 100, the slot gets zero and [`validate_weights`] still fails.
pub fn fill_remaining<T: Weighted>(items: &mut [T], slot: usize) -> Option<u32> {
    if slot >= items.len() {
        return None;
    }
    let remaining = remaining_weight(items, slot);
    items[slot].set_weight(remaining);
    Some(remaining)
}

fn sum_weights<T: Weighted>(items: &[T]) -> u64 {
    items.iter().map(|item| u64::from(item.weight())).sum()
}
