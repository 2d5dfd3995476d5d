//! Object id issuance.
//!
//! Ids are millisecond timestamps. Two objects created within the same
//! millisecond, or after the wall clock steps backwards, still get distinct,
//! increasing ids. Issuance fails rather than repeat an id once the clock
//! reaches [`MAX_OBJECT_ID`].

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use std::time::{SystemTime, UNIX_EPOCH};

use crate::consts::MAX_OBJECT_ID;
use crate::doc::ObjectId;
use crate::error::SceneError;

/// Current wall-clock time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}

/// Monotonic id source.
#[derive(Debug, Clone, Default)]
pub struct IdClock {
    last: ObjectId,
}

impl IdClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue an id: `max(now_ms, last + 1)`.
    ///
    /// # Errors
    ///
    /// Returns `IdsExhausted` if the id would pass [`MAX_OBJECT_ID`].
    pub fn next(&mut self) -> Result<ObjectId, SceneError> {
        self.next_at(now_ms())
    }

    /// Issue an id as if the wall clock read `now`.
    ///
    /// # Errors
    ///
    /// Returns `IdsExhausted` if the id would pass [`MAX_OBJECT_ID`]. The
    /// clock is unchanged.
    pub fn next_at(&mut self, now: i64) -> Result<ObjectId, SceneError> {
        let id = self
            .last
            .checked_add(1)
            .map(|after| now.max(after))
            .filter(|id| *id <= MAX_OBJECT_ID)
            .ok_or(SceneError::IdsExhausted(self.last))?;
        self.last = id;
        Ok(id)
    }

    /// Make sure future ids are greater than `id`.
    pub fn observe(&mut self, id: ObjectId) {
        self.last = self.last.max(id);
    }
}
