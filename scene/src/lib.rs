//! Scene state and transform synchronization engine for the room planner.
//!
//! This crate owns the in-memory model of one design: which furniture is
//! placed where, the room it sits in, and which object is selected. It
//! translates user intent (catalog picks, property edits, pointer drags in
//! plan view, manipulator callbacks and key presses in scene view) into scene
//! mutations and reports each change as an [`engine::Action`]. Rendering and
//! persistence live outside; the host hands actions to its renderer and
//! snapshots the scene when the user saves.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EngineCore`], the single writer of scene state |
//! | [`doc`] | Placed objects, transforms, room parameters, [`doc::SceneModel`] |
//! | [`catalog`] | Closed furniture catalog and the sprite allow-list |
//! | [`field`] | Editable field names and lenient numeric parsing |
//! | [`input`] | Buttons, keys, step controls, and the sync state machine |
//! | [`hit`] | Plan-view hit testing |
//! | [`grid`] | Grid snapping |
//! | [`viewport`] | Client-to-room coordinate conversion |
//! | [`clock`] | Monotonic object id issuance |
//! | [`consts`] | Shared numeric constants (grid pitch, step sizes, defaults) |

pub mod catalog;
pub mod clock;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod field;
pub mod grid;
pub mod hit;
pub mod input;
pub mod viewport;

pub use error::SceneError;
