//! Pure package selection: loading order, greedy fill and 0/1 knapsack.
//!
//! Nothing here touches a store; [`LoadPlanner`](crate::LoadPlanner) applies
//! the selections afterwards.

use std::cmp::Ordering;

use hubroute_core::{Package, Priority};

/// Knapsack value of a package with `priority`. Higher priority is worth
/// more; an unset priority is valued like [`Priority::Low`].
///
/// # Examples
/// ```
/// use hubroute_core::Priority;
/// use hubroute_load::priority_value;
///
/// assert_eq!(priority_value(Some(Priority::High)), 3000);
/// assert_eq!(priority_value(None), 1000);
/// ```
#[must_use]
pub const fn priority_value(priority: Option<Priority>) -> u64 {
    match priority {
        Some(Priority::High) => 3000,
        Some(Priority::Medium) => 2000,
        Some(Priority::Low) | None => 1000,
    }
}

/// Compare packages by priority (unset last), then by weight.
#[must_use]
pub fn loading_order(a: &Package, b: &Package) -> Ordering {
    let rank = |p: &Package| p.priority.map_or(u8::MAX, u8::from);
    rank(a)
        .cmp(&rank(b))
        .then_with(|| a.weight_kg.total_cmp(&b.weight_kg))
}

/// Stable sort of `packages` into loading order.
pub fn sort_for_loading(packages: &mut [Package]) {
    packages.sort_by(loading_order);
}

/// Outcome of [`select_greedy`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GreedySelection {
    /// Packages admitted, in loading order.
    pub admitted: Vec<Package>,
    /// Packages that did not fit, in loading order.
    pub rejected: Vec<Package>,
    /// Weight of the admitted packages in kilograms.
    pub weight_kg: f64,
    /// Volume of the admitted packages in cubic metres.
    pub volume_m3: f64,
}

/// Scan `packages` in loading order, admitting each one that keeps both
/// the running weight and the running volume within capacity.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "running load totals are floating-point sums"
)]
pub fn select_greedy(
    mut packages: Vec<Package>,
    capacity_kg: f64,
    capacity_m3: f64,
) -> GreedySelection {
    sort_for_loading(&mut packages);
    let mut selection = GreedySelection::default();
    for package in packages {
        let weight = selection.weight_kg + package.weight_kg;
        let volume = selection.volume_m3 + package.volume_m3;
        if weight <= capacity_kg && volume <= capacity_m3 {
            selection.weight_kg = weight;
            selection.volume_m3 = volume;
            selection.admitted.push(package);
        } else {
            selection.rejected.push(package);
        }
    }
    selection
}

/// Outcome of [`select_knapsack`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KnapsackSelection {
    /// Packages chosen, in input order.
    pub selected: Vec<Package>,
    /// Packages left out, in input order.
    pub unselected: Vec<Package>,
    /// Whole-kilogram weight of the chosen packages.
    pub weight_kg: u64,
    /// Sum of [`priority_value`] over the chosen packages.
    pub value: u64,
}

/// Whole kilograms in `weight`, truncated. Negative or non-finite weights
/// count as zero.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "weights are truncated to whole kilograms after range checks"
)]
pub fn whole_kilograms(weight: f64) -> usize {
    if weight.is_finite() && weight > 0.0 {
        weight.trunc() as usize
    } else {
        0
    }
}

/// Choose the subset of `packages` with the greatest total
/// [`priority_value`] whose whole-kilogram weight fits `capacity_kg`.
///
/// Only weight constrains the choice; volume is ignored. Among equally
/// valuable subsets the reconstruction prefers later packages.
///
/// # Examples
/// ```
/// use hubroute_core::{Package, Priority};
/// use hubroute_load::select_knapsack;
///
/// let packages = vec![
///     Package::new("P1", 4.0, 0.1).with_priority(Priority::High),
///     Package::new("P2", 6.0, 0.1).with_priority(Priority::High),
///     Package::new("P3", 3.0, 0.1).with_priority(Priority::Medium),
/// ];
/// let selection = select_knapsack(packages, 10.0);
/// assert_eq!(selection.value, 6000);
/// assert_eq!(selection.weight_kg, 10);
/// ```
#[must_use]
#[expect(
    clippy::indexing_slicing,
    reason = "table rows span 0..=capacity and item weights are checked against the column"
)]
pub fn select_knapsack(packages: Vec<Package>, capacity_kg: f64) -> KnapsackSelection {
    let items: Vec<(usize, u64)> = packages
        .iter()
        .map(|p| (whole_kilograms(p.weight_kg), priority_value(p.priority)))
        .collect();
    let capacity = whole_kilograms(capacity_kg);
    let fitting = items
        .iter()
        .map(|&(weight, _)| weight)
        .filter(|&weight| weight <= capacity)
        .try_fold(0_usize, usize::checked_add);
    if fitting.is_some_and(|total| total <= capacity) {
        return take_fitting(packages, &items, capacity);
    }

    let mut table: Vec<Vec<u64>> = Vec::with_capacity(items.len() + 1);
    table.push(vec![0; capacity + 1]);
    for &(weight, value) in &items {
        let previous = &table[table.len() - 1];
        let row: Vec<u64> = (0..=capacity)
            .map(|column| {
                let skip = previous[column];
                if weight > column {
                    skip
                } else {
                    skip.max(value + previous[column - weight])
                }
            })
            .collect();
        table.push(row);
    }

    let mut chosen = vec![false; items.len()];
    let mut column = capacity;
    for (index, &(weight, value)) in items.iter().enumerate().rev() {
        let row = &table[index + 1];
        let previous = &table[index];
        if weight <= column && row[column] == value + previous[column - weight] {
            chosen[index] = true;
            column -= weight;
        }
    }

    let mut selection = KnapsackSelection {
        value: table[items.len()][capacity],
        ..KnapsackSelection::default()
    };
    let picks = chosen.into_iter().zip(&items);
    for (package, (picked, &(weight, _))) in packages.into_iter().zip(picks) {
        if picked {
            selection.weight_kg += u64::try_from(weight).unwrap_or(u64::MAX);
            selection.selected.push(package);
        } else {
            selection.unselected.push(package);
        }
    }
    selection
}

/// Every package no heavier than `capacity`, when together they fit.
fn take_fitting(
    packages: Vec<Package>,
    items: &[(usize, u64)],
    capacity: usize,
) -> KnapsackSelection {
    let mut selection = KnapsackSelection::default();
    for (package, &(weight, value)) in packages.into_iter().zip(items) {
        if weight <= capacity {
            selection.weight_kg += u64::try_from(weight).unwrap_or(u64::MAX);
            selection.value += value;
            selection.selected.push(package);
        } else {
            selection.unselected.push(package);
        }
    }
    selection
}
