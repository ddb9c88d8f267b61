//! Weight record data model and statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a weight change relative to the previous record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// The very first record; no previous value to compare against.
    First,
    Increase,
    Decrease,
    Stable,
}

/// One weight measurement, chained to its predecessor through the computed
/// change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    pub id: Uuid,
    pub weight: f64,
    pub date: DateTime<Utc>,
    pub change: f64,
    pub change_type: ChangeType,
}

impl WeightRecord {
    /// Creates a record for `weight`, computing the change against the most
    /// recent previous record, if any.
    pub fn new(weight: f64, previous: Option<&WeightRecord>) -> Self {
        let (change, change_type) = match previous {
            None => (0.0, ChangeType::First),
            Some(prev) => calculate_change(weight, prev.weight),
        };

        Self {
            id: Uuid::new_v4(),
            weight,
            date: Utc::now(),
            change,
            change_type,
        }
    }

    /// Short display text for the change column.
    pub fn change_label(&self) -> String {
        match self.change_type {
            ChangeType::First => "● first record".to_string(),
            ChangeType::Increase => format!("↑ +{:.1} kg", self.change),
            ChangeType::Decrease => format!("↓ {:.1} kg", self.change),
            ChangeType::Stable => "● steady".to_string(),
        }
    }

    /// Record date as `YYYY-MM-DD HH:MM`.
    pub fn date_label(&self) -> String {
        self.date.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Computes the signed change `current - previous` and its direction.
pub fn calculate_change(current: f64, previous: f64) -> (f64, ChangeType) {
    let change = current - previous;
    let change_type = if change > 0.0 {
        ChangeType::Increase
    } else if change < 0.0 {
        ChangeType::Decrease
    } else {
        ChangeType::Stable
    };
    (change, change_type)
}

/// Aggregate statistics over a most-recent-first record list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightStats {
    pub total_records: usize,
    pub current_weight: f64,
    pub start_weight: f64,
    pub total_change: f64,
    pub highest_weight: f64,
    pub lowest_weight: f64,
}

impl WeightStats {
    /// Computes statistics; an empty list yields the all-zero default.
    pub fn from_records(records: &[WeightRecord]) -> Self {
        let Some(first) = records.first() else {
            return Self::default();
        };
        let last = records.last().unwrap_or(first);

        let mut stats = Self {
            total_records: records.len(),
            current_weight: first.weight,
            start_weight: last.weight,
            total_change: 0.0,
            highest_weight: first.weight,
            lowest_weight: first.weight,
        };

        for record in records {
            if record.weight > stats.highest_weight {
                stats.highest_weight = record.weight;
            }
            if record.weight < stats.lowest_weight {
                stats.lowest_weight = record.weight;
            }
        }

        stats.total_change = stats.current_weight - stats.start_weight;
        stats
    }
}
