use crate::error::SimulationError;
use crate::fragment_index::FragmentId;
use crate::trajectory::TrajectoryRecord;

fn id(star: usize, fragment: usize) -> FragmentId {
    FragmentId { star, fragment }
}

#[test]
fn add_star_allocates_empty_tracks() {
    let mut record = TrajectoryRecord::new();
    assert_eq!(record.add_star(3), 0);
    assert_eq!(record.add_star(2), 1);

    assert_eq!(record.star_count(), 2);
    assert_eq!(record.active_fragments(0), 3);
    assert_eq!(record.tracks(1).len(), 2);
    assert!(record.tracks(1).iter().all(|t| t.is_empty() && t.is_active()));
    assert!(record.tracks(7).is_empty());
}

#[test]
fn record_appends_per_axis() {
    let mut record = TrajectoryRecord::new();
    record.add_star(1);

    record.record(id(0, 0), [1.0, 2.0, 3.0]).unwrap();
    record.record(id(0, 0), [4.0, 5.0, 6.0]).unwrap();

    let track = record.track(id(0, 0)).unwrap();
    assert_eq!(track.len(), 2);
    assert_eq!(track.x, vec![1.0, 4.0]);
    assert_eq!(track.y, vec![2.0, 5.0]);
    assert_eq!(track.z, vec![3.0, 6.0]);
}

#[test]
fn unknown_fragment_is_an_invariant_violation() {
    let mut record = TrajectoryRecord::new();
    record.add_star(2);

    assert!(matches!(
        record.record(id(0, 2), [0.0; 3]),
        Err(SimulationError::InvariantViolation(_))
    ));
    assert!(matches!(
        record.retire(id(1, 0), 0.0),
        Err(SimulationError::InvariantViolation(_))
    ));
}

#[test]
fn retired_track_keeps_history_and_rejects_writes() {
    let mut record = TrajectoryRecord::new();
    record.add_star(2);
    record.record(id(0, 1), [1.0, 1.0, 1.0]).unwrap();

    record.retire(id(0, 1), 42.0).unwrap();

    let track = record.track(id(0, 1)).unwrap();
    assert_eq!(track.retired_at, Some(42.0));
    assert_eq!(track.x, vec![1.0]);
    assert_eq!(record.active_fragments(0), 1);
    assert!(record.record(id(0, 1), [0.0; 3]).is_err());
    assert!(record.retire(id(0, 1), 43.0).is_err());
}

#[test]
fn export_skips_retired_fragments_and_empty_stars() {
    let mut record = TrajectoryRecord::new();
    record.add_star(1);
    record.add_star(3);

    for f in 0..3 {
        record.record(id(1, f), [f as f64, 0.0, -(f as f64)]).unwrap();
    }
    record.retire(id(0, 0), 1.0).unwrap();
    record.retire(id(1, 1), 1.0).unwrap();

    let export = record.export();
    assert_eq!(export.shape(), vec![2]);
    assert_eq!(export.x[0], vec![vec![0.0], vec![2.0]]);
    assert_eq!(export.z[0], vec![vec![0.0], vec![-2.0]]);
}
