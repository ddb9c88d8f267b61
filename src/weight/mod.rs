//! Weight tracking: a chained record list with change direction and aggregate
//! statistics, persisted as one JSON document.

mod models;
mod store;
mod tracker;

pub use models::{calculate_change, ChangeType, WeightRecord, WeightStats};
pub use store::WeightStore;
pub use tracker::{AddWeightError, WeightTracker};
