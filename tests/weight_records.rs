//! Weight record chain scenarios across the public API.

use toolbox::weight::{calculate_change, ChangeType, WeightRecord, WeightStats, WeightStore, WeightTracker};

#[test]
fn first_then_lower_weight_chain() {
    // first record: "first", change 0
    let first = WeightRecord::new(82.0, None);
    assert_eq!(first.change_type, ChangeType::First);
    assert_eq!(first.change, 0.0);

    // a subsequent smaller weight: "decrease", change = new - old (negative)
    let second = WeightRecord::new(80.2, Some(&first));
    assert_eq!(second.change_type, ChangeType::Decrease);
    assert!((second.change - (80.2 - 82.0)).abs() < 1e-9);
}

#[test]
fn calculate_change_direction() {
    assert_eq!(calculate_change(81.0, 80.0).1, ChangeType::Increase);
    assert_eq!(calculate_change(79.0, 80.0).1, ChangeType::Decrease);
    assert_eq!(calculate_change(80.0, 80.0).1, ChangeType::Stable);
}

#[test]
fn tracker_persists_the_chain_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let mut tracker =
            WeightTracker::open(WeightStore::open_in(dir.path())).expect("open tracker");
        tracker.add(82.0).expect("add");
        tracker.add(80.2).expect("add");
        tracker.add(80.2).expect("add");
    }

    let tracker = WeightTracker::open(WeightStore::open_in(dir.path())).expect("reopen tracker");
    let records = tracker.records();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].change_type, ChangeType::Stable);
    assert_eq!(records[1].change_type, ChangeType::Decrease);
    assert_eq!(records[2].change_type, ChangeType::First);

    let stats = tracker.stats();
    assert_eq!(
        stats,
        WeightStats {
            total_records: 3,
            current_weight: 80.2,
            start_weight: 82.0,
            total_change: 80.2 - 82.0,
            highest_weight: 82.0,
            lowest_weight: 80.2,
        }
    );
}
