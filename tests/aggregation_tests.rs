//! Tests for overall operations absorbing the updates of their children.

use progressmgr::{Lifecycle, Outcome, StaticText};

mod common;
use common::helpers::*;

#[test]
fn test_finished_child_adds_to_overall() {
    let registry = create_test_registry();
    let overall =
        registry.register_overall_operation(TEST_LENGTH, "Age", StaticText::Linking, false);
    let child =
        registry.register_operation(TEST_LENGTH, "city.prp", StaticText::Linking, false, false);

    child.set_how_much(TEST_LENGTH);
    // Intermediate contributions are taken back after each update.
    assert_eq!(overall.progress(), 0.0);

    child.finish();

    let op = overall.snapshot().unwrap();
    assert_eq!(op.progress(), 100.0);
    assert_eq!(op.max(), 100.0);
}

#[test]
fn test_observer_sees_overall_including_current_update() {
    let (registry, log) = create_recording_registry();
    let overall =
        registry.register_overall_operation(TEST_LENGTH, "Age", StaticText::Linking, false);
    let child =
        registry.register_operation(TEST_LENGTH, "city.prp", StaticText::Linking, false, false);

    child.set_how_much(40.0);

    let last = last_seen(&log, child.id());
    assert_eq!(last.progress, 40.0);
    assert_eq!(last.overall, vec![(overall.id(), 40.0, 100.0)]);
    assert_eq!(overall.progress(), 0.0);
}

#[test]
fn test_overall_only_absorbs_later_registrations() {
    let (registry, log) = create_recording_registry();
    let early = registry.register_operation(10.0, "early", StaticText::Linking, false, false);
    let overall = registry.register_overall_operation(10.0, "Age", StaticText::Linking, false);

    early.set_how_much(10.0);
    assert!(last_seen(&log, early.id()).overall.is_empty());

    early.finish();
    assert_eq!(overall.progress(), 0.0);
}

#[test]
fn test_concurrent_children_accumulate_as_they_finish() {
    let (registry, log) = create_recording_registry();
    let overall = registry.register_overall_operation(150.0, "Age", StaticText::Linking, false);
    let a = registry.register_operation(100.0, "a", StaticText::Linking, false, false);
    let b = registry.register_operation(50.0, "b", StaticText::Linking, false, false);

    a.set_how_much(60.0);
    b.set_how_much(20.0);
    assert_eq!(last_seen(&log, b.id()).overall, vec![(overall.id(), 20.0, 150.0)]);

    a.set_how_much(100.0);
    a.finish();
    assert_eq!(overall.progress(), 100.0);

    b.set_how_much(30.0);
    assert_eq!(last_seen(&log, b.id()).overall, vec![(overall.id(), 130.0, 150.0)]);

    b.increment(20.0);
    b.finish();
    assert_eq!(overall.progress(), 150.0);
    assert_overall_complete(&registry, overall.id());
}

fn assert_overall_complete(
    registry: &progressmgr::ProgressRegistry,
    id: progressmgr::OperationId,
) {
    let op = registry.operation(id).unwrap();
    assert_eq!(op.progress(), op.max());
    assert_eq!(op.fraction(), 1.0);
}

#[test]
fn test_retry_child_grows_overall_once() {
    let (registry, log) = create_recording_registry();
    let overall =
        registry.register_overall_operation(TEST_LENGTH, "Age", StaticText::Linking, false);
    let child = registry.register_operation(50.0, "retry.prp", StaticText::Linking, true, false);

    // Registration alone does not change the total.
    assert_eq!(overall.snapshot().unwrap().max(), 100.0);
    assert_eq!(
        child.snapshot().unwrap().outcome(),
        Outcome::Retry
    );

    child.increment(10.0);
    assert_eq!(last_seen(&log, child.id()).overall, vec![(overall.id(), 10.0, 150.0)]);

    child.increment(40.0);
    child.finish();

    let op = overall.snapshot().unwrap();
    assert_eq!(op.max(), 150.0);
    assert_eq!(op.progress(), 50.0);
}

#[test]
fn test_set_retry_rearms_first_update() {
    let (registry, log) = create_recording_registry();
    let overall =
        registry.register_overall_operation(TEST_LENGTH, "Age", StaticText::Linking, false);
    let child =
        registry.register_operation(TEST_LENGTH, "city.prp", StaticText::Linking, false, false);

    child.set_how_much(20.0);
    assert_eq!(child.snapshot().unwrap().lifecycle(), Lifecycle::Active);

    let before = log.lock().unwrap().len();
    child.set_retry();
    // Marking a retry is silent until the next update.
    assert_eq!(log.lock().unwrap().len(), before);
    assert!(child.snapshot().unwrap().is_first_update());

    child.set_how_much(0.0);
    assert_eq!(last_seen(&log, child.id()).overall, vec![(overall.id(), 0.0, 200.0)]);
    assert_eq!(child.snapshot().unwrap().lifecycle(), Lifecycle::Active);

    child.set_how_much(5.0);
    assert_eq!(last_seen(&log, child.id()).overall, vec![(overall.id(), 5.0, 200.0)]);
}

#[test]
fn test_aborting_child_shrinks_overall() {
    let (registry, log) = create_recording_registry();
    let overall =
        registry.register_overall_operation(TEST_LENGTH, "Age", StaticText::Linking, false);
    let child =
        registry.register_operation(TEST_LENGTH, "city.prp", StaticText::Linking, false, false);

    child.set_how_much(30.0);
    child.set_aborting();

    let aborting = last_seen(&log, child.id());
    assert!(matches!(aborting.outcome, Outcome::Aborting { retry: false }));
    assert_eq!(aborting.progress, 30.0);
    assert_eq!(aborting.max, 100.0);

    // The finished part stays; the unfinished part leaves the total.
    let op = overall.snapshot().unwrap();
    assert_eq!(op.progress(), 30.0);
    assert_eq!(op.max(), 30.0);

    // Counters are zeroed once observers have seen the abort.
    let snapshot = child.snapshot().unwrap();
    assert_eq!(snapshot.progress(), 0.0);
    assert_eq!(snapshot.max(), 0.0);
    assert!(child.is_aborting());

    child.finish();
    let op = overall.snapshot().unwrap();
    assert_eq!(op.progress(), 30.0);
    assert_eq!(op.max(), 30.0);
}

#[test]
fn test_aborting_retry_keeps_retry_marker() {
    let (registry, log) = create_recording_registry();
    let _overall =
        registry.register_overall_operation(TEST_LENGTH, "Age", StaticText::Linking, false);
    let child =
        registry.register_operation(TEST_LENGTH, "city.prp", StaticText::Linking, true, false);

    child.set_aborting();

    assert_eq!(
        last_seen(&log, child.id()).outcome,
        Outcome::Aborting { retry: true }
    );
}

#[test]
fn test_nested_overall_is_not_counted_twice() {
    let registry = create_test_registry();
    let outer = registry.register_overall_operation(100.0, "outer", StaticText::Linking, false);
    let inner = registry.register_overall_operation(100.0, "inner", StaticText::Linking, false);
    let child = registry.register_operation(100.0, "leaf", StaticText::Linking, false, false);

    child.set_how_much(100.0);
    child.finish();

    assert_eq!(inner.progress(), 100.0);
    assert_eq!(outer.progress(), 100.0);

    inner.finish();
    assert_eq!(outer.progress(), 100.0);
    assert_eq!(outer.snapshot().unwrap().max(), 100.0);
}

#[test]
fn test_all_older_overall_operations_absorb() {
    let (registry, log) = create_recording_registry();
    let outer = registry.register_overall_operation(100.0, "outer", StaticText::Linking, false);
    let plain = registry.register_operation(10.0, "plain", StaticText::Linking, false, false);
    let inner = registry.register_overall_operation(100.0, "inner", StaticText::Linking, false);
    let child = registry.register_operation(100.0, "leaf", StaticText::Linking, false, false);

    child.set_how_much(25.0);

    assert_eq!(
        last_seen(&log, child.id()).overall,
        vec![(inner.id(), 25.0, 100.0), (outer.id(), 25.0, 100.0)]
    );
    assert_progress_in_bounds(&registry, plain.id());
}

#[test]
fn test_overall_statistics_follow_absorbed_progress() {
    let (registry, clock) = create_clocked_registry();
    let overall = registry.register_overall_operation(100.0, "Age", StaticText::Linking, false);
    let child = registry.register_operation(100.0, "city.prp", StaticText::Linking, false, false);

    clock.set_secs(10.0);
    child.set_how_much(100.0);
    child.finish();

    let op = overall.snapshot().unwrap();
    assert_eq!(op.rate(), 10.0);
    assert_eq!(op.elapsed(), std::time::Duration::from_secs(10));
    assert_eq!(op.remaining(), Some(std::time::Duration::ZERO));
}

#[test]
fn test_cancelled_child_shrinks_overall_when_destroyed() {
    let registry = create_test_registry();
    let overall =
        registry.register_overall_operation(TEST_LENGTH, "Age", StaticText::Linking, false);
    let child =
        registry.register_operation(TEST_LENGTH, "city.prp", StaticText::Linking, false, false);

    child.set_how_much(30.0);
    registry.cancel_all_ops();

    // Cancelling only flags; counters stay until the owner lets go.
    assert_eq!(child.progress(), 30.0);
    assert_eq!(overall.snapshot().unwrap().max(), 100.0);

    child.finish();

    let op = overall.snapshot().unwrap();
    assert_eq!(op.progress(), 30.0);
    assert_eq!(op.max(), 30.0);
}

#[test]
fn test_non_finite_child_leaves_overall_finite() {
    let registry = create_test_registry();
    let overall =
        registry.register_overall_operation(TEST_LENGTH, "Age", StaticText::Linking, false);
    let unbounded =
        registry.register_operation(f64::INFINITY, "stream", StaticText::Linking, false, false);
    let child =
        registry.register_operation(TEST_LENGTH, "city.prp", StaticText::Linking, false, false);

    unbounded.set_how_much(f64::INFINITY);
    child.set_how_much(f64::INFINITY);
    child.increment(f64::NAN);
    unbounded.finish();
    child.finish();

    let op = overall.snapshot().unwrap();
    assert_eq!(op.progress(), 0.0);
    assert_eq!(op.max(), 100.0);
}
