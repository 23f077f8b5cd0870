// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Solar ecliptic longitude.

use qtty::Centuries;

use super::series::{PeriodicTerm, Series};
use crate::error::Result;

/// Equation-of-centre terms, smallest first.
///
/// The last two share `k = 35999.05`, `θ = 267.52` (the solar mean anomaly):
/// a secular `−0.0048·t` correction and the main `1.9147` term, both taken at
/// the same argument.
#[rustfmt::skip]
const TERMS: [PeriodicTerm; 16] = [
    PeriodicTerm::new(0.0004, 31_557.0, 161.0),
    PeriodicTerm::new(0.0004, 29_930.0, 48.0),
    PeriodicTerm::new(0.0005, 2_281.0, 221.0),
    PeriodicTerm::new(0.0005, 155.0, 118.0),
    PeriodicTerm::new(0.0006, 33_718.0, 316.0),
    PeriodicTerm::new(0.0007, 9_038.0, 64.0),
    PeriodicTerm::new(0.0007, 3_035.0, 110.0),
    PeriodicTerm::new(0.0007, 65_929.0, 45.0),
    PeriodicTerm::new(0.0013, 22_519.0, 352.0),
    PeriodicTerm::new(0.0015, 45_038.0, 254.0),
    PeriodicTerm::new(0.0018, 445_267.0, 208.0),
    PeriodicTerm::new(0.0018, 19.0, 159.0),
    PeriodicTerm::new(0.0020, 32_964.0, 158.0),
    PeriodicTerm::new(0.0200, 71_998.1, 265.1),
    PeriodicTerm::secular(-0.0048, 35_999.05, 267.52),
    PeriodicTerm::new(1.9147, 35_999.05, 267.52),
];

/// Solar longitude model.
pub const SUN: Series = Series {
    terms: &TERMS,
    mean_motion: 36_000.7695,
    mean_longitude: 280.4659,
};

/// Apparent ecliptic longitude of the Sun in degrees, `[0, 360)`.
pub fn solar_longitude(t: Centuries) -> Result<f64> {
    SUN.evaluate(t)
}
