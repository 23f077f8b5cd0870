// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Angle helpers in degrees, and the truncating "gauss" integer function used
//! by the calendar formulas.

use crate::error::{ensure_finite, Result};
use std::f64::consts::PI;

/// Degrees in a full turn.
pub const FULL_TURN_DEG: f64 = 360.0;

/// Reduces an angle in degrees to `[0, 360)`.
///
/// Negative angles are negated, reduced, then reflected (`360 − reduced`).
/// A result that lands on 360 (exact negative multiples of a full turn, or
/// rounding of tiny negative angles) is reported as 0.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut reduced = if angle < 0.0 {
        let positive = -angle;
        FULL_TURN_DEG - (positive - FULL_TURN_DEG * (positive / FULL_TURN_DEG).trunc())
    } else {
        angle - FULL_TURN_DEG * (angle / FULL_TURN_DEG).trunc()
    };

    // The quotient may round across an integer, leaving one turn too much
    // or too little.
    if reduced < 0.0 {
        reduced += FULL_TURN_DEG;
    } else if reduced >= FULL_TURN_DEG {
        reduced -= FULL_TURN_DEG;
    }
    if (0.0..FULL_TURN_DEG).contains(&reduced) {
        reduced
    } else {
        0.0
    }
}

#[inline]
pub fn deg_to_rad(angle: f64) -> f64 {
    angle * PI / 180.0
}

#[inline]
pub fn rad_to_deg(angle: f64) -> f64 {
    angle * 180.0 / PI
}

/// Sine of an angle given in degrees.
#[inline]
pub fn degree_sin(angle: f64) -> f64 {
    deg_to_rad(angle).sin()
}

/// Cosine of an angle given in degrees.
#[inline]
pub fn degree_cos(angle: f64) -> f64 {
    deg_to_rad(angle).cos()
}

/// Integer part toward zero: `floor(x)` for `x >= 0`, `ceil(x)` otherwise.
///
/// Fails with [`NonFinite`](crate::AstroTimeError::NonFinite) for NaN or
/// infinite input.
#[inline]
pub fn gauss(value: f64) -> Result<f64> {
    let value = ensure_finite("gauss", value)?;
    Ok(if value >= 0.0 {
        value.floor()
    } else {
        value.ceil()
    })
}
