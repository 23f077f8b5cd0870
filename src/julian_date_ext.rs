// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Day (`Time<JD>`) specific extensions.

use qtty::*;

use super::scales::{JD, MJD};
use super::time::Time;

impl Time<JD> {
    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// First day of the Gregorian calendar, 1582-10-15T00:00:00.
    pub const GREGORIAN_REFORM: Self = Self::new(2_299_160.5);

    /// Unix epoch, 1970-01-01T00:00:00.
    pub const UNIX_EPOCH: Self = Self::new(2_440_587.5);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Julian centuries since J2000.0.
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new(
            ((*self - Self::J2000) / Self::JULIAN_CENTURY)
                .simplify()
                .value(),
        )
    }

    /// `true` when the inverse calendar conversion must use the Gregorian
    /// formulas.
    #[inline]
    pub fn is_gregorian(&self) -> bool {
        *self >= Self::GREGORIAN_REFORM
    }

    #[inline]
    pub fn to_mjd(&self) -> Time<MJD> {
        self.to::<MJD>()
    }
}

impl From<Time<JD>> for Centuries {
    fn from(jd: Time<JD>) -> Self {
        jd.julian_centuries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centuries_since_j2000() {
        let jd = Time::<JD>::J2000 + Days::new(36_525.0 * 3.0);
        assert!((jd.julian_centuries() - Centuries::new(3.0)).abs() < Centuries::new(1e-12));
        let c: Centuries = Time::<JD>::J2000.into();
        assert_eq!(c, Centuries::new(0.0));
    }

    #[test]
    fn reform_boundary_is_inclusive() {
        assert!(Time::<JD>::GREGORIAN_REFORM.is_gregorian());
        assert!(!(Time::<JD>::GREGORIAN_REFORM - Days::new(1e-6)).is_gregorian());
    }

    #[test]
    fn to_mjd_subtracts_epoch() {
        assert_eq!(Time::<JD>::J2000.to_mjd().value(), 51_544.5);
    }
}
