//! Input model: pointer buttons, keys, step controls, manipulator readings,
//! and the selection/transform sync state machine.
//!
//! `SyncState` records which writer currently owns the selected object's
//! transform. In plan view that is the pointer while a drag is active; in
//! scene view it is the external manipulator while it is attached. Field
//! edits, step controls and arrow keys write through the engine regardless of
//! state, but pointer moves and manipulator events only land when the state
//! names the object they target.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::{ObjectId, Transform3D};
use crate::viewport::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key the engine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Delete,
    Backspace,
    Escape,
    /// Any other key, by its browser-reported name.
    Other(String),
}

impl Key {
    /// Map a browser `KeyboardEvent.key` name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Delete" => Self::Delete,
            "Backspace" => Self::Backspace,
            "Escape" => Self::Escape,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Ground-plane direction `(dx, dz)` for arrow keys, in key steps.
    #[must_use]
    pub fn ground_direction(&self) -> Option<(f64, f64)> {
        match self {
            Self::ArrowUp => Some((0.0, -1.0)),
            Self::ArrowDown => Some((0.0, 1.0)),
            Self::ArrowLeft => Some((-1.0, 0.0)),
            Self::ArrowRight => Some((1.0, 0.0)),
            _ => None,
        }
    }

    /// Whether the key removes the selected object.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete | Self::Backspace)
    }
}

/// Discrete adjust buttons shown next to the selected object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
    ScaleUp,
    ScaleDown,
    RotateLeft,
    RotateRight,
}

impl StepControl {
    /// `+1` for growing/clockwise controls, `-1` otherwise.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::ScaleUp | Self::RotateRight => 1.0,
            Self::ScaleDown | Self::RotateLeft => -1.0,
        }
    }

    #[must_use]
    pub fn is_scale(self) -> bool {
        matches!(self, Self::ScaleUp | Self::ScaleDown)
    }
}

/// Live transform reported by the external 3D manipulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManipulatorReading {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl ManipulatorReading {
    /// Whether every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position
            .iter()
            .chain(&self.rotation)
            .chain(&self.scale)
            .all(|v| v.is_finite())
    }

    /// Convert into a transform with scale clamped to the minimum.
    #[must_use]
    pub fn into_transform(self) -> Transform3D {
        let mut t = Transform3D { position: self.position, rotation: self.rotation, scale: self.scale };
        t.clamp_scale();
        t
    }
}

impl From<&Transform3D> for ManipulatorReading {
    fn from(t: &Transform3D) -> Self {
        Self { position: t.position, rotation: t.rotation, scale: t.scale }
    }
}

/// Which writer owns the selected object's transform right now.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SyncState {
    /// Nothing is being dragged or manipulated.
    #[default]
    Idle,
    /// A plan-view object follows the pointer.
    Dragging {
        id: ObjectId,
        /// Pointer position minus object origin at pointer-down, in room units.
        offset: Point,
    },
    /// The external manipulator is attached to a scene-view object.
    ManipulatorAttached { id: ObjectId },
}

impl SyncState {
    /// Object the active writer targets, if any.
    #[must_use]
    pub fn target(&self) -> Option<ObjectId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::ManipulatorAttached { id } => Some(*id),
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}
