//! Review platform selection for happy visits
//!
//! Given a business's weighted review platforms, picks where a happy
//! customer is sent. When the active weights form an exact 100% partition
//! the platforms are rotated round-robin using the business's persisted
//! cursor; otherwise a weighted random draw is used. Weight configuration is
//! validated on the settings path by [`validate_weights`], never here.

use dashmap::DashMap;
use rand::Rng;
use std::borrow::Cow;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;

pub mod error;
pub mod strategies;
pub mod weights;

pub use error::WeightError;
pub use strategies::{CursorWrite, SelectionMode};
pub use weights::{
    fill_remaining, remaining_weight, validate_platform_drafts, validate_weights, Weighted,
    DEFAULT_AUTO_FILL_SLOT, TOTAL_WEIGHT,
};

use crate::store::{Business, BusinessRepository, ReviewPlatform, StoreError};

/// Outcome of a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub platform: ReviewPlatform,
    pub mode: SelectionMode,
    /// Cursor value to persist; only set for round-robin
    pub next_cursor: Option<u64>,
}

/// Platforms eligible for selection: positive weight, sorted by `order`.
pub fn active_platforms(platforms: &[ReviewPlatform]) -> Vec<&ReviewPlatform> {
    let mut active: Vec<&ReviewPlatform> = platforms.iter().filter(|p| p.is_active()).collect();
    active.sort_by_key(|p| p.order);
    active
}

/// The mode a happy visit would be served with, without selecting.
pub fn selection_mode(platforms: &[ReviewPlatform]) -> Option<SelectionMode> {
    let active = active_platforms(platforms);
    let total: u64 = active.iter().map(|p| u64::from(p.weight)).sum();
    match active.len() {
        0 => None,
        1 => Some(SelectionMode::Single),
        _ if total == u64::from(TOTAL_WEIGHT) => Some(SelectionMode::RoundRobin),
        _ => Some(SelectionMode::WeightedRandom),
    }
}

/// Pure selection step. Returns `None` when no platform has positive weight.
///
/// Never fails for a non-empty active set, whatever the weights add up to.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use reviewgate::routing::{choose_platform, SelectionMode};
/// use reviewgate::store::{Business, PlatformDraft};
///
/// let mut business = Business::new("1", "Cafe", "cafe", "owner@cafe.test");
/// business.platforms = business.build_platforms(vec![
///     PlatformDraft::new("Google", "https://g", 50),
///     PlatformDraft::new("Yelp", "https://y", 50),
/// ]);
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let selection = choose_platform(&business.platforms, 3, &mut rng).unwrap();
/// assert_eq!(selection.mode, SelectionMode::RoundRobin);
/// assert_eq!(selection.platform.name, "Yelp");
/// assert_eq!(selection.next_cursor, Some(4));
/// ```
pub fn choose_platform<R: Rng + ?Sized>(
    platforms: &[ReviewPlatform],
    cursor: u64,
    rng: &mut R,
) -> Option<Selection> {
    let active = active_platforms(platforms);

    match active.len() {
        0 => None,
        1 => Some(Selection {
            platform: active[0].clone(),
            mode: SelectionMode::Single,
            next_cursor: None,
        }),
        len => {
            let total: u64 = active.iter().map(|p| u64::from(p.weight)).sum();

            if total == u64::from(TOTAL_WEIGHT) {
                let index = (cursor % len as u64) as usize;
                Some(Selection {
                    platform: active[index].clone(),
                    mode: SelectionMode::RoundRobin,
                    next_cursor: Some(cursor.wrapping_add(1)),
                })
            } else {
                Some(Selection {
                    platform: weighted_pick(&active, total, rng).clone(),
                    mode: SelectionMode::WeightedRandom,
                    next_cursor: None,
                })
            }
        }
    }
}

/// Draw `r` uniformly from `[0, total)` and return the first platform whose
/// cumulative weight reaches `r`. Falls back to the first platform.
fn weighted_pick<'a, R: Rng + ?Sized>(
    active: &[&'a ReviewPlatform],
    total: u64,
    rng: &mut R,
) -> &'a ReviewPlatform {
    let draw: f64 = rng.gen_range(0.0..total as f64);

    let mut cumulative = 0.0;
    for &platform in active {
        cumulative += f64::from(platform.weight);
        if cumulative >= draw {
            return platform;
        }
    }

    active[0]
}

/// Chooses review platforms and advances rotation cursors through a
/// [`BusinessRepository`].
pub struct PlatformSelector {
    repository: Arc<dyn BusinessRepository>,
    cursor_write: CursorWrite,
    /// Detached cursor writes still in flight
    pending_writes: TaskTracker,
    /// Latest detached cursor write per business id
    last_write: DashMap<String, JoinHandle<()>>,
}

impl PlatformSelector {
    /// Create a selector that writes cursors in the background.
    pub fn new(repository: Arc<dyn BusinessRepository>) -> Self {
        Self {
            repository,
            cursor_write: CursorWrite::default(),
            pending_writes: TaskTracker::new(),
            last_write: DashMap::new(),
        }
    }

    pub fn with_cursor_write(mut self, cursor_write: CursorWrite) -> Self {
        self.cursor_write = cursor_write;
        self
    }

    pub fn cursor_write(&self) -> CursorWrite {
        self.cursor_write
    }

    /// Wait for detached cursor writes to finish. Writes started afterwards
    /// are still tracked.
    pub async fn flush(&self) {
        self.pending_writes.close();
        self.pending_writes.wait().await;
        self.pending_writes.reopen();
    }

    /// Pick the destination for a happy visit to `business`.
    ///
    /// `None` means no platform is enabled and the caller should show a
    /// plain acknowledgment instead of redirecting. If a detached cursor
    /// write for this business is still running, it is awaited and the
    /// business re-read first.
    pub async fn select_platform(&self, business: &Business) -> Option<ReviewPlatform> {
        let business = self.settled(business).await;
        let selection = {
            let mut rng = rand::thread_rng();
            choose_platform(&business.platforms, business.last_platform_index, &mut rng)?
        };
        self.commit(&business, &selection).await;
        Some(selection.platform)
    }

    /// Same as [`select_platform`](Self::select_platform) with a caller
    /// supplied random source, returning the full [`Selection`].
    pub async fn select_with_rng<R: Rng + ?Sized + Send>(
        &self,
        business: &Business,
        rng: &mut R,
    ) -> Option<Selection> {
        let business = self.settled(business).await;
        let selection = choose_platform(&business.platforms, business.last_platform_index, rng)?;
        self.commit(&business, &selection).await;
        Some(selection)
    }

    /// Re-read the business by slug, then select.
    pub async fn select_for_slug(&self, slug: &str) -> Result<Option<ReviewPlatform>, StoreError> {
        let business = self.repository.load_business_by_slug(slug).await?;
        Ok(self.select_platform(&business).await)
    }

    /// `business` as of its latest cursor write from this selector.
    ///
    /// Concurrent visits may both see the same cursor; only sequential
    /// visits are ordered.
    async fn settled<'a>(&self, business: &'a Business) -> Cow<'a, Business> {
        let Some((_, write)) = self.last_write.remove(&business.id) else {
            return Cow::Borrowed(business);
        };
        if let Err(e) = write.await {
            tracing::warn!(business_id = %business.id, error = %e, "Cursor write task failed");
        }

        match self.repository.load_business(&business.id).await {
            Ok(current) => Cow::Owned(current),
            Err(e) => {
                tracing::warn!(
                    business_id = %business.id,
                    error = %e,
                    "Failed to reload business after cursor write"
                );
                Cow::Borrowed(business)
            }
        }
    }

    async fn commit(&self, business: &Business, selection: &Selection) {
        tracing::debug!(
            business = %business.slug,
            platform = %selection.platform.name,
            order = selection.platform.order,
            mode = %selection.mode,
            "Selected review platform"
        );
        metrics::counter!("reviewgate_selections_total", "mode" => selection.mode.as_str())
            .increment(1);

        let Some(next) = selection.next_cursor else {
            return;
        };

        match self.cursor_write {
            CursorWrite::Awaited => {
                persist_cursor(self.repository.as_ref(), &business.id, next).await;
            }
            CursorWrite::Detached => {
                let repository = Arc::clone(&self.repository);
                let business_id = business.id.clone();
                let write = self.pending_writes.spawn(async move {
                    persist_cursor(repository.as_ref(), &business_id, next).await;
                });
                self.last_write.insert(business.id.clone(), write);
            }
        }
    }
}

/// Cursor write failures never affect the redirect already chosen.
async fn persist_cursor(repository: &dyn BusinessRepository, business_id: &str, next: u64) {
    if let Err(e) = repository.advance_rotation_cursor(business_id, next).await {
        tracing::warn!(
            business_id = %business_id,
            cursor = next,
            error = %e,
            "Failed to advance rotation cursor"
        );
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::store::PlatformDraft;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn platforms(weights: &[u32]) -> Vec<ReviewPlatform> {
        let business = Business::new("biz", "Cafe", "cafe", "o@cafe.test");
        let drafts = weights
            .iter()
            .enumerate()
            .map(|(i, w)| PlatformDraft::new(format!("p{}", i), format!("https://p{}", i), *w))
            .collect();
        business.build_platforms(drafts)
    }

    /// Positive weights summing to exactly 100, 2 to 5 of them.
    fn partition() -> impl Strategy<Value = Vec<u32>> {
        proptest::sample::subsequence((1u32..100).collect::<Vec<_>>(), 1..5).prop_map(|cuts| {
            let mut bounds = vec![0];
            bounds.extend(cuts);
            bounds.push(100);
            bounds.windows(2).map(|w| w[1] - w[0]).collect()
        })
    }

    proptest! {
        #[test]
        fn prop_round_robin_visits_every_platform_once_per_cycle(
            weights in partition(),
            zeros in 0usize..3,
            start in 0u64..1_000_000,
        ) {
            let mut all = weights.clone();
            all.extend(std::iter::repeat(0).take(zeros));
            let platforms = platforms(&all);
            let mut rng = StdRng::seed_from_u64(7);

            let mut cursor = start;
            let mut orders = Vec::new();
            for _ in 0..weights.len() {
                let selection = choose_platform(&platforms, cursor, &mut rng).unwrap();
                prop_assert_eq!(selection.mode, SelectionMode::RoundRobin);
                prop_assert!(selection.platform.weight > 0);
                orders.push(selection.platform.order);
                cursor = selection.next_cursor.unwrap();
            }

            prop_assert_eq!(cursor, start + weights.len() as u64);
            let mut sorted = orders.clone();
            sorted.sort();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), weights.len());
        }

        #[test]
        fn prop_single_active_platform_ignores_cursor(
            weight in 1u32..=100,
            slot in 0usize..3,
            cursor in any::<u64>(),
        ) {
            let mut weights = vec![0, 0, 0];
            weights[slot] = weight;
            let platforms = platforms(&weights);

            let selection = choose_platform(&platforms, cursor, &mut StdRng::seed_from_u64(1)).unwrap();
            prop_assert_eq!(selection.platform.order, slot as u32);
            prop_assert_eq!(selection.next_cursor, None);
        }

        #[test]
        fn prop_all_zero_weights_select_nothing(len in 0usize..6, cursor in any::<u64>()) {
            let platforms = platforms(&vec![0; len]);
            prop_assert!(choose_platform(&platforms, cursor, &mut StdRng::seed_from_u64(1)).is_none());
        }

        #[test]
        fn prop_weighted_draw_only_returns_active_platforms(
            weights in proptest::collection::vec(0u32..=60, 2..5),
            seed in any::<u64>(),
        ) {
            let platforms = platforms(&weights);
            let mut rng = StdRng::seed_from_u64(seed);
            match choose_platform(&platforms, 0, &mut rng) {
                Some(selection) => prop_assert!(selection.platform.weight > 0),
                None => prop_assert!(weights.iter().all(|&w| w == 0)),
            }
        }

        #[test]
        fn prop_validate_matches_definition(weights in proptest::collection::vec(0u32..=150, 0..5)) {
            let sum: u64 = weights.iter().map(|&w| u64::from(w)).sum();
            let expected = !weights.is_empty() && weights.iter().all(|&w| w <= 100) && sum == 100;
            prop_assert_eq!(validate_weights(&weights).is_ok(), expected);
        }

        #[test]
        fn prop_fill_remaining_completes_under_allocated_lists(
            weights in proptest::collection::vec(0u32..=100, 1..4),
            slot in 0usize..4,
        ) {
            let mut weights = weights;
            prop_assume!(slot < weights.len());
            let others: u64 = weights
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != slot)
                .map(|(_, &w)| u64::from(w))
                .sum();

            fill_remaining(&mut weights, slot);
            prop_assert_eq!(validate_weights(&weights).is_ok(), others <= 100);
        }
    }
}
