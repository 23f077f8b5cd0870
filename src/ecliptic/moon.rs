// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunar ecliptic longitude.

use qtty::Centuries;

use super::series::{PeriodicTerm, Series};
use crate::error::Result;

/// Perturbation terms, smallest amplitude first. The last one (6.2888°) is
/// the equation of the centre; 1.2740° is the evection and 0.6583° the
/// variation.
#[rustfmt::skip]
const TERMS: [PeriodicTerm; 61] = [
    PeriodicTerm::new(0.0003, 2_322_131.0, 191.0),
    PeriodicTerm::new(0.0003, 4_067.0, 70.0),
    PeriodicTerm::new(0.0003, 549_197.0, 220.0),
    PeriodicTerm::new(0.0003, 1_808_933.0, 58.0),
    PeriodicTerm::new(0.0003, 349_472.0, 337.0),
    PeriodicTerm::new(0.0003, 381_404.0, 354.0),
    PeriodicTerm::new(0.0003, 958_465.0, 340.0),
    PeriodicTerm::new(0.0004, 12_006.0, 187.0),
    PeriodicTerm::new(0.0004, 39_871.0, 223.0),
    PeriodicTerm::new(0.0005, 509_131.0, 242.0),
    PeriodicTerm::new(0.0005, 1_745_069.0, 24.0),
    PeriodicTerm::new(0.0005, 1_908_795.0, 90.0),
    PeriodicTerm::new(0.0006, 2_258_267.0, 156.0),
    PeriodicTerm::new(0.0006, 111_869.0, 38.0),
    PeriodicTerm::new(0.0007, 27_864.0, 127.0),
    PeriodicTerm::new(0.0007, 485_333.0, 186.0),
    PeriodicTerm::new(0.0007, 405_201.0, 50.0),
    PeriodicTerm::new(0.0007, 790_672.0, 114.0),
    PeriodicTerm::new(0.0008, 1_403_732.0, 98.0),
    PeriodicTerm::new(0.0009, 858_602.0, 129.0),
    PeriodicTerm::new(0.0011, 1_920_802.0, 186.0),
    PeriodicTerm::new(0.0012, 1_267_871.0, 249.0),
    PeriodicTerm::new(0.0016, 1_856_938.0, 152.0),
    PeriodicTerm::new(0.0018, 401_329.0, 274.0),
    PeriodicTerm::new(0.0021, 341_337.0, 16.0),
    PeriodicTerm::new(0.0021, 71_998.0, 85.0),
    PeriodicTerm::new(0.0021, 990_397.0, 357.0),
    PeriodicTerm::new(0.0022, 818_536.0, 151.0),
    PeriodicTerm::new(0.0023, 922_466.0, 163.0),
    PeriodicTerm::new(0.0024, 99_863.0, 122.0),
    PeriodicTerm::new(0.0026, 1_379_739.0, 17.0),
    PeriodicTerm::new(0.0027, 918_399.0, 182.0),
    PeriodicTerm::new(0.0028, 1_934.0, 145.0),
    PeriodicTerm::new(0.0037, 541_062.0, 259.0),
    PeriodicTerm::new(0.0038, 1_781_068.0, 21.0),
    PeriodicTerm::new(0.0040, 133.0, 29.0),
    PeriodicTerm::new(0.0040, 1_844_932.0, 56.0),
    PeriodicTerm::new(0.0040, 1_331_734.0, 283.0),
    PeriodicTerm::new(0.0050, 481_266.0, 205.0),
    PeriodicTerm::new(0.0052, 31_932.0, 107.0),
    PeriodicTerm::new(0.0068, 926_533.0, 323.0),
    PeriodicTerm::new(0.0079, 449_334.0, 188.0),
    PeriodicTerm::new(0.0085, 826_671.0, 111.0),
    PeriodicTerm::new(0.0100, 1_431_597.0, 315.0),
    PeriodicTerm::new(0.0107, 1_303_870.0, 246.0),
    PeriodicTerm::new(0.0110, 489_205.0, 142.0),
    PeriodicTerm::new(0.0125, 1_443_603.0, 52.0),
    PeriodicTerm::new(0.0154, 75_870.0, 41.0),
    PeriodicTerm::new(0.0304, 513_197.9, 222.5),
    PeriodicTerm::new(0.0347, 445_267.1, 27.9),
    PeriodicTerm::new(0.0409, 441_199.8, 47.4),
    PeriodicTerm::new(0.0458, 854_535.2, 148.2),
    PeriodicTerm::new(0.0533, 1_367_733.1, 280.7),
    PeriodicTerm::new(0.0571, 377_336.3, 13.2),
    PeriodicTerm::new(0.0588, 63_863.5, 124.2),
    PeriodicTerm::new(0.1144, 966_404.0, 276.5),
    PeriodicTerm::new(0.1851, 35_999.05, 87.53),
    PeriodicTerm::new(0.2136, 954_397.74, 179.93),
    PeriodicTerm::new(0.6583, 890_534.22, 145.7),
    PeriodicTerm::new(1.2740, 413_335.35, 10.74),
    PeriodicTerm::new(6.2888, 477_198.868, 44.963),
];

/// Lunar longitude model.
pub const MOON: Series = Series {
    terms: &TERMS,
    mean_motion: 481_267.8809,
    mean_longitude: 218.3162,
};

/// Ecliptic longitude of the Moon in degrees, `[0, 360)`.
///
/// `t` should be Julian centuries of TT.
pub fn lunar_longitude(t: Centuries) -> Result<f64> {
    MOON.evaluate(t)
}
