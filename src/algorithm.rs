//! Duration-window knapsack selection.
//!
//! Picks the subset of candidates with the highest summed tier whose total
//! duration fits inside a target window.
//!
//! # Algorithm
//!
//! A classic 0/1 knapsack table over the duration axis, using the window's
//! upper bound as capacity:
//!
//! ```text
//! K[0][w] = 0
//! K[i][w] = K[i-1][w]                                        if dur[i-1] > w
//!         = max(tier[i-1] + K[i-1][w - dur[i-1]], K[i-1][w])  otherwise
//! ```
//!
//! The table can only enforce the maximum. The minimum is applied afterwards:
//! when the tier-optimal subset under `max` is shorter than `min`, the result
//! is empty and the caller has to grow the catalog. A shorter-but-feasible
//! subset with a lower score is never searched for.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**: O(n * max)
//! - **Space Complexity**: O(n * max), one `u32` per cell, freed on return
//!
//! # Examples
//!
//! ```
//! use fitlist::algorithm::{solve, Item};
//!
//! let items = [
//!     Item { duration: 100, tier: 10 },
//!     Item { duration: 200, tier: 10 },
//!     Item { duration: 50, tier: 1 },
//! ];
//!
//! assert_eq!(solve(&items, 140, 260), vec![0, 2]);
//! assert!(solve(&items, 400, 500).is_empty());
//! ```

use log::{debug, trace};

/// One knapsack item: a candidate's duration and importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    /// Deciseconds.
    pub duration: u32,
    pub tier: u32,
}

/// Row-major DP table with `max + 1` columns per item row.
///
/// Cells hold tier sums; a `u64` fits any sum of `u32` tiers.
struct Table {
    cells: Vec<u64>,
    width: usize,
}

impl Table {
    fn build(items: &[Item], max: u32) -> Self {
        let width = max as usize + 1;
        let mut cells = vec![0u64; (items.len() + 1) * width];

        for (i, item) in items.iter().enumerate() {
            let (prev, row) = cells[i * width..(i + 2) * width].split_at_mut(width);
            let dur = item.duration as usize;
            let tier = u64::from(item.tier);

            for w in 0..width {
                row[w] = if dur > w {
                    prev[w]
                } else {
                    (tier + prev[w - dur]).max(prev[w])
                };
            }
        }

        Self { cells, width }
    }

    #[inline]
    fn get(&self, i: usize, w: usize) -> u64 {
        self.cells[i * self.width + w]
    }
}

/// Best-scoring subset of `items` whose total duration lies in `[min, max]`.
///
/// Returns positions into `items` in ascending order, or an empty vector when
/// no selection is found. Ties between equally scored subsets are broken by
/// whichever the backtrack reaches first.
#[must_use]
pub fn solve(items: &[Item], min: u32, max: u32) -> Vec<usize> {
    if min > max {
        debug!("Empty window: min {min} > max {max}");
        return Vec::new();
    }

    let available: u64 = items.iter().map(|i| u64::from(i.duration)).sum();
    if available < u64::from(min) {
        trace!("Catalog too short for window: {available} < {min}");
        return Vec::new();
    }

    let table = Table::build(items, max);
    let best = table.get(items.len(), max as usize);

    let mut remaining = best;
    let mut w = max as usize;
    let mut selected = Vec::new();

    for i in (1..=items.len()).rev() {
        if remaining == 0 {
            break;
        }
        if table.get(i, w) == table.get(i - 1, w) {
            continue;
        }

        let item = items[i - 1];
        selected.push(i - 1);
        remaining -= u64::from(item.tier);
        w -= item.duration as usize;
    }

    let total = selection_duration(items, &selected);
    if total < u64::from(min) {
        debug!("Best selection (tier {best}) only lasts {total}, below minimum {min}");
        return Vec::new();
    }

    selected.reverse();
    debug!(
        "Selected {} of {} items, tier {best}, duration {total}",
        selected.len(),
        items.len()
    );
    selected
}

/// Total duration of the items at `positions`.
#[must_use]
pub fn selection_duration(items: &[Item], positions: &[usize]) -> u64 {
    positions
        .iter()
        .map(|&p| u64::from(items[p].duration))
        .sum()
}

/// Total tier of the items at `positions`.
#[must_use]
pub fn selection_tier(items: &[Item], positions: &[usize]) -> u64 {
    positions.iter().map(|&p| u64::from(items[p].tier)).sum()
}
