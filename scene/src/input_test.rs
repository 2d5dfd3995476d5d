#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Key
// =============================================================

#[test]
fn key_from_browser_names() {
    assert_eq!(Key::from_name("ArrowUp"), Key::ArrowUp);
    assert_eq!(Key::from_name("Backspace"), Key::Backspace);
    assert_eq!(Key::from_name("Escape"), Key::Escape);
    assert_eq!(Key::from_name("q"), Key::Other("q".into()));
}

#[test]
fn arrow_keys_map_to_ground_plane() {
    assert_eq!(Key::ArrowUp.ground_direction(), Some((0.0, -1.0)));
    assert_eq!(Key::ArrowDown.ground_direction(), Some((0.0, 1.0)));
    assert_eq!(Key::ArrowLeft.ground_direction(), Some((-1.0, 0.0)));
    assert_eq!(Key::ArrowRight.ground_direction(), Some((1.0, 0.0)));
    assert_eq!(Key::Delete.ground_direction(), None);
}

#[test]
fn delete_and_backspace_remove() {
    assert!(Key::Delete.is_delete());
    assert!(Key::Backspace.is_delete());
    assert!(!Key::Escape.is_delete());
}

// =============================================================
// StepControl
// =============================================================

#[test]
fn step_control_signs() {
    assert_eq!(StepControl::ScaleUp.sign(), 1.0);
    assert_eq!(StepControl::ScaleDown.sign(), -1.0);
    assert_eq!(StepControl::RotateRight.sign(), 1.0);
    assert_eq!(StepControl::RotateLeft.sign(), -1.0);
    assert!(StepControl::ScaleDown.is_scale());
    assert!(!StepControl::RotateLeft.is_scale());
}

// =============================================================
// ManipulatorReading
// =============================================================

#[test]
fn reading_rejects_non_finite() {
    let mut reading = ManipulatorReading::from(&Transform3D::default());
    assert!(reading.is_finite());
    reading.position[2] = f64::INFINITY;
    assert!(!reading.is_finite());
}

#[test]
fn reading_clamps_scale() {
    let reading = ManipulatorReading { position: [1.0, 0.0, 2.0], rotation: [0.0, 0.5, 0.0], scale: [0.02, 1.0, -3.0] };
    let t = reading.into_transform();
    assert_eq!(t.position, [1.0, 0.0, 2.0]);
    assert_eq!(t.rotation, [0.0, 0.5, 0.0]);
    assert_eq!(t.scale, [0.1, 1.0, 0.1]);
}

// =============================================================
// SyncState
// =============================================================

#[test]
fn sync_state_defaults_to_idle() {
    let state = SyncState::default();
    assert_eq!(state, SyncState::Idle);
    assert_eq!(state.target(), None);
}

#[test]
fn sync_state_targets() {
    let drag = SyncState::Dragging { id: 4, offset: Point::new(5.0, 5.0) };
    assert_eq!(drag.target(), Some(4));
    assert!(drag.is_dragging());

    let attached = SyncState::ManipulatorAttached { id: 9 };
    assert_eq!(attached.target(), Some(9));
    assert!(!attached.is_dragging());
}
