#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{ObjectId, SceneModel};
use crate::viewport::Point;

/// Topmost plan-view object whose bounding box contains `room_pt`.
///
/// Objects later in render order are drawn on top, so the scan runs back to
/// front. Rotation is ignored; sprites are picked by their unrotated box.
/// Scene-view objects are never hit here (the external manipulator owns 3D
/// picking).
#[must_use]
pub fn hit_test(room_pt: Point, scene: &SceneModel) -> Option<ObjectId> {
    scene
        .objects()
        .iter()
        .rev()
        .find(|obj| {
            obj.transform
                .as_plan()
                .is_some_and(|t| t.contains(room_pt.x, room_pt.y))
        })
        .map(|obj| obj.id)
}
