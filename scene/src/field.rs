//! Named, editable fields and the lenient number parsing used by property panels.
//!
//! Property editors send raw strings on every keystroke. Partial input such as
//! `"-"`, `"1e"` or `"abc"` must never fail an edit, so numeric values go
//! through [`parse_lenient`], which keeps the longest numeric prefix and falls
//! back to `0`.

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;

use crate::doc::Mode;
use crate::error::SceneError;

/// Component of a 3D vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Array index of the component.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "x" | "0" => Some(Self::X),
            "y" | "1" => Some(Self::Y),
            "z" | "2" => Some(Self::Z),
            _ => None,
        }
    }
}

/// An editable property of a placed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectField {
    X,
    Y,
    Width,
    Height,
    RotateX,
    RotateY,
    Position(Axis),
    Rotation(Axis),
    Scale(Axis),
    Color,
}

impl ObjectField {
    /// Parse a field name valid for `mode`.
    ///
    /// Plan view accepts `x`, `y`, `width`, `height`, `rotateX`, `rotateY`,
    /// `color`. Scene view accepts `position.<axis>`, `rotation.<axis>`,
    /// `scale.<axis>` (axis `x`/`y`/`z` or `0`/`1`/`2`) and `color`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` when the name is not a field of `mode`.
    pub fn parse(mode: Mode, name: &str) -> Result<Self, SceneError> {
        let field = match (mode, name) {
            (_, "color") => Some(Self::Color),
            (Mode::Plan, "x") => Some(Self::X),
            (Mode::Plan, "y") => Some(Self::Y),
            (Mode::Plan, "width") => Some(Self::Width),
            (Mode::Plan, "height") => Some(Self::Height),
            (Mode::Plan, "rotateX") => Some(Self::RotateX),
            (Mode::Plan, "rotateY") => Some(Self::RotateY),
            (Mode::Spatial, vector) => vector.split_once('.').and_then(|(head, axis)| {
                let axis = Axis::parse(axis)?;
                match head {
                    "position" => Some(Self::Position(axis)),
                    "rotation" => Some(Self::Rotation(axis)),
                    "scale" => Some(Self::Scale(axis)),
                    _ => None,
                }
            }),
            (Mode::Plan, _) => None,
        };
        field.ok_or_else(|| SceneError::UnknownField { mode, field: name.to_owned() })
    }
}

/// An editable property of the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomField {
    Width,
    Height,
    Length,
    WallColor,
    FloorColor,
    Background,
}

impl RoomField {
    /// Parse a room field name valid for `mode`, using the persisted names
    /// (`roomWidth`, `roomHeight`, `roomLength`, `wallColor`, `floorColor`,
    /// `background`).
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` when the name is not a room field of `mode`.
    pub fn parse(mode: Mode, name: &str) -> Result<Self, SceneError> {
        let field = match (mode, name) {
            (_, "roomWidth") => Some(Self::Width),
            (_, "roomHeight") => Some(Self::Height),
            (_, "wallColor") => Some(Self::WallColor),
            (Mode::Plan, "background") => Some(Self::Background),
            (Mode::Spatial, "roomLength") => Some(Self::Length),
            (Mode::Spatial, "floorColor") => Some(Self::FloorColor),
            _ => None,
        };
        field.ok_or_else(|| SceneError::UnknownField { mode, field: name.to_owned() })
    }
}

/// Parse the longest leading decimal number in `raw`, or `0` if there is none.
///
/// Leading whitespace is skipped and trailing garbage ignored (`"12px"` is
/// 12). Non-finite results collapse to `0` so transforms stay finite.
#[must_use]
pub fn parse_lenient(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end]
        .parse::<f64>()
        .map_or(0.0, |v| if v.is_finite() { v } else { 0.0 })
}
