//! Weight tracker controller: owns the in-memory record list and its store.

use crate::config::{MAX_WEIGHT_KG, MIN_WEIGHT_KG};
use crate::error_handling::{StorageError, WeightError};
use crate::weight::models::{WeightRecord, WeightStats};
use crate::weight::store::WeightStore;

/// Per-screen state for the weight tracker: the loaded record list
/// (most-recent-first) plus the backing store.
#[derive(Debug)]
pub struct WeightTracker {
    records: Vec<WeightRecord>,
    store: WeightStore,
}

impl WeightTracker {
    /// Opens the tracker, loading existing records from the store.
    pub fn open(store: WeightStore) -> Result<Self, StorageError> {
        let records = store.load()?;
        Ok(Self { records, store })
    }

    /// Validates a weight entry: a positive number within the accepted range.
    pub fn validate_weight(weight: f64) -> Result<(), WeightError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(WeightError::NotPositive);
        }
        if !(MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&weight) {
            return Err(WeightError::OutOfRange {
                min: MIN_WEIGHT_KG,
                max: MAX_WEIGHT_KG,
            });
        }
        Ok(())
    }

    /// Adds a record for `weight`, chained to the most recent record, and
    /// persists the updated list. Returns the new record.
    pub fn add(&mut self, weight: f64) -> Result<&WeightRecord, AddWeightError> {
        Self::validate_weight(weight).map_err(AddWeightError::Invalid)?;

        let record = WeightRecord::new(weight, self.records.first());
        self.records.insert(0, record);
        self.store
            .save(&self.records)
            .map_err(AddWeightError::Storage)?;

        Ok(&self.records[0])
    }

    /// All records, most-recent-first.
    pub fn records(&self) -> &[WeightRecord] {
        &self.records
    }

    /// Aggregate statistics over the current records.
    pub fn stats(&self) -> WeightStats {
        WeightStats::from_records(&self.records)
    }
}

/// Failure adding a weight record: either the entry was invalid or the store
/// rejected the write.
#[derive(Debug, thiserror::Error)]
pub enum AddWeightError {
    #[error(transparent)]
    Invalid(#[from] WeightError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
