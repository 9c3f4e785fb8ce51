//! Vehicle load planning for hubroute depots.
//!
//! Two planners share one [`LoadPlanner`]:
//!
//! - [`LoadPlanner::plan_greedy`] fills a vehicle in priority-then-weight
//!   order, honouring both weight and volume capacity.
//! - [`LoadPlanner::plan_knapsack`] picks the subset of packages with the
//!   highest total [`priority_value`] that fits the weight capacity.
//!
//! The selection functions in [`selection`] are pure and usable without a
//! store.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod planner;
pub mod selection;

pub use error::LoadError;
pub use planner::{GreedyPlan, KnapsackPlan, LoadPlanner, LoadRequest};
pub use selection::{
    GreedySelection, KnapsackSelection, loading_order, priority_value, select_greedy,
    select_knapsack, sort_for_loading,
};
