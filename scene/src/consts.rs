//! Shared numeric constants for the scene crate.

// ── Grid ────────────────────────────────────────────────────────

/// Snapping unit for 2D placement. One grid cell is also one foot of room.
pub const GRID_PITCH: f64 = 20.0;

// ── Ids ─────────────────────────────────────────────────────────

/// Largest object id. Stored documents carry ids as JSON numbers, which stay
/// exact only up to 2^53 - 1.
pub const MAX_OBJECT_ID: i64 = (1 << 53) - 1;

// ── 2D objects ──────────────────────────────────────────────────

/// Width and height of a freshly added 2D object.
pub const DEFAULT_SIZE_2D: f64 = 40.0;

/// Width/height change applied by one scale step in plan view.
pub const SCALE_STEP_2D: f64 = 10.0;

/// Smallest width/height a scale step may leave behind in plan view.
pub const MIN_SIZE_2D: f64 = 10.0;

/// Degrees added or removed by one rotate step in plan view.
pub const ROTATE_STEP_2D_DEG: f64 = 15.0;

// ── 3D objects ──────────────────────────────────────────────────

/// Uniform scale of a freshly added 3D model.
pub const DEFAULT_SCALE_3D: f64 = 0.5;

/// Scale change applied by one scale step, per axis.
pub const SCALE_STEP_3D: f64 = 0.1;

/// Lower bound for every 3D scale component.
pub const MIN_SCALE_3D: f64 = 0.1;

/// Radians added or removed about the vertical axis by one rotate step.
pub const ROTATE_STEP_3D_RAD: f64 = 0.1;

/// Ground-plane distance moved by one arrow keystroke.
pub const KEY_STEP_3D: f64 = 0.2;

/// Offset on x and z given to a cloned 3D object.
pub const CLONE_OFFSET_3D: f64 = 0.2;

/// Color assigned to new `glb` models, which the renderer tints.
pub const DEFAULT_MODEL_COLOR: &str = "#ffffff";

// ── Rooms ───────────────────────────────────────────────────────

/// Plan-view room width in feet.
pub const DEFAULT_ROOM_WIDTH_FT: f64 = 30.0;

/// Plan-view room height (depth on screen) in feet.
pub const DEFAULT_ROOM_HEIGHT_FT: f64 = 20.0;

/// Plan-view wall/canvas color.
pub const DEFAULT_PLAN_WALL_COLOR: &str = "#ffffff";

/// 3D room width in meters.
pub const DEFAULT_ROOM_WIDTH_M: f64 = 8.0;

/// 3D room length in meters.
pub const DEFAULT_ROOM_LENGTH_M: f64 = 8.0;

/// 3D room height in meters.
pub const DEFAULT_ROOM_HEIGHT_M: f64 = 3.0;

/// 3D wall color.
pub const DEFAULT_SPATIAL_WALL_COLOR: &str = "#f5f5f5";

/// 3D floor color.
pub const DEFAULT_FLOOR_COLOR: &str = "#e0cda9";
