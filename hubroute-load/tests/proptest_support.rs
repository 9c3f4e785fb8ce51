//! Proptest strategies and oracles for load planning property tests.
//!
//! Weights and volumes are whole numbers so that floating-point sums stay
//! exact and the knapsack oracle can enumerate subsets directly.

use hubroute_core::{Package, Priority};
use hubroute_load::priority_value;
use proptest::prelude::*;

/// Strategy for an optional priority, unset about a quarter of the time.
pub fn priority_strategy() -> impl Strategy<Value = Option<Priority>> {
    prop_oneof![
        Just(None),
        Just(Some(Priority::High)),
        Just(Some(Priority::Medium)),
        Just(Some(Priority::Low)),
    ]
}

/// Strategy for up to `max` packages with ids `P00`, `P01`, ...
pub fn packages_strategy(max: usize) -> impl Strategy<Value = Vec<Package>> {
    let package = (1_u8..=20, 1_u8..=10, priority_strategy());
    proptest::collection::vec(package, 0..=max).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(index, (weight, volume, priority))| {
                let mut package =
                    Package::new(format!("P{index:02}"), f64::from(weight), f64::from(volume));
                package.priority = priority;
                package
            })
            .collect()
    })
}

/// Best total priority value over every subset of `packages` whose whole
/// weight fits `capacity_kg`.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "generated weights are small positive whole numbers"
)]
pub fn brute_force_best_value(packages: &[Package], capacity_kg: u64) -> u64 {
    let subsets = 1_u32 << packages.len();
    (0..subsets)
        .filter_map(|mask| {
            let mut weight = 0_u64;
            let mut value = 0_u64;
            for (index, package) in packages.iter().enumerate() {
                if (mask >> index) & 1 == 1 {
                    weight += package.weight_kg as u64;
                    value += priority_value(package.priority);
                }
            }
            (weight <= capacity_kg).then_some(value)
        })
        .max()
        .unwrap_or(0)
}

/// Ids of `packages`, in order.
#[must_use]
pub fn ids(packages: &[Package]) -> Vec<String> {
    packages.iter().map(|p| p.id.clone()).collect()
}

/// Whether `subset` appears in `whole` in the same relative order.
#[must_use]
pub fn is_subsequence(subset: &[String], whole: &[String]) -> bool {
    let mut rest = whole.iter();
    subset.iter().all(|id| rest.any(|other| other == id))
}
