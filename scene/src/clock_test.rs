use super::*;
use crate::consts::MAX_OBJECT_ID;

#[test]
fn next_uses_wall_clock_when_ahead() {
    let mut clock = IdClock::new();
    assert_eq!(clock.next_at(1_000).unwrap(), 1_000);
    assert_eq!(clock.next_at(2_000).unwrap(), 2_000);
}

#[test]
fn same_millisecond_still_distinct() {
    let mut clock = IdClock::new();
    let a = clock.next_at(5_000).unwrap();
    let b = clock.next_at(5_000).unwrap();
    let c = clock.next_at(5_000).unwrap();
    assert_eq!((a, b, c), (5_000, 5_001, 5_002));
}

#[test]
fn clock_stepping_backwards_keeps_increasing() {
    let mut clock = IdClock::new();
    clock.next_at(9_000).unwrap();
    assert_eq!(clock.next_at(1_000).unwrap(), 9_001);
}

#[test]
fn observe_advances_past_loaded_ids() {
    let mut clock = IdClock::new();
    clock.observe(50_000);
    assert_eq!(clock.next_at(10).unwrap(), 50_001);
    clock.observe(3);
    assert_eq!(clock.next_at(10).unwrap(), 50_002);
}

#[test]
fn next_is_positive_and_monotonic() {
    let mut clock = IdClock::new();
    let a = clock.next().unwrap();
    let b = clock.next().unwrap();
    assert!(a > 0);
    assert!(b > a);
}

#[test]
fn exhausted_clock_fails_instead_of_repeating() {
    let mut clock = IdClock::new();
    clock.observe(MAX_OBJECT_ID - 1);
    assert_eq!(clock.next_at(0).unwrap(), MAX_OBJECT_ID);
    assert_eq!(clock.next_at(0), Err(SceneError::IdsExhausted(MAX_OBJECT_ID)));
    assert_eq!(clock.next_at(0), Err(SceneError::IdsExhausted(MAX_OBJECT_ID)));
}

#[test]
fn observing_i64_max_exhausts_the_clock() {
    let mut clock = IdClock::new();
    clock.observe(i64::MAX);
    let err = clock.next_at(1_000).unwrap_err();
    assert_eq!(err.error_code(), "E_IDS_EXHAUSTED");
}

#[test]
fn wall_clock_past_the_ceiling_is_refused() {
    let mut clock = IdClock::new();
    assert!(clock.next_at(MAX_OBJECT_ID + 1).is_err());
    assert_eq!(clock.next_at(7).unwrap(), 7);
}
