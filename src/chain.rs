// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Time-scale cascade
//!
//! Derives every astronomical time scale of a UTC instant in dependency
//! order:
//!
//! ```text
//! UTC ─┬─► UT1 = UTC + ΔUT1
//!      ├─► UTC − TAI (leap table) ─► TAI = UTC − (UTC − TAI)
//!      └─► ΔT ─► TT = UT1 + ΔT ─┬─► TCG = TT + L_G (JD − T₀) 86400
//!                              └─► TCB = TT + L_B (JD − T₀) 86400 ─► TDB
//! ```
//!
//! UT1, TT, TCG, TCB and TDB are returned as [`Seconds`] on the Unix axis
//! (seconds since 1970-01-01T00:00:00 of that scale). `JD` is always the
//! UTC-based Julian Day of the instant.
//!
//! ## TDB
//! `TDB = TCB − L_B (JD_TCB − T₀) 86400 + TDB₀`, where `JD_TCB` is obtained
//! by reading the TCB value back as a Unix timestamp (whole seconds) and
//! converting it through
//! [`utc_to_julian_day`](crate::calendar::utc_to_julian_day). This is a low-precision
//! substitute for the full TDB series and is kept as such.

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use qtty::{Days, Seconds};

use crate::calendar::unix_timestamp_to_julian_day;
use crate::delta_t::delta_t;
use crate::error::{ensure_finite, AstroTimeError, Result};
use crate::leap_seconds::LeapSecondTable;
use crate::JulianDate;

/// Rate of TCG relative to TT.
pub const L_G: f64 = 6.969_290_134e-10;
/// Rate of TCB relative to TT.
pub const L_B: f64 = 1.550_519_768e-8;
/// Rate of TCB relative to TCG.
pub const L_C: f64 = 1.480_826_867_41e-8;
/// 1977-01-01T00:00:32.184 TAI, the epoch at which TT, TCG and TCB agree.
pub const T0: JulianDate = JulianDate::new(2_443_144.500_372_5);
/// TDB − TT at `T0`.
pub const TDB0: Seconds = Seconds::new(-6.55e-5);

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Every scale derived from one UTC instant.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeScales {
    /// UT1 on the Unix axis.
    #[cfg_attr(feature = "serde", serde(with = "crate::time::serde_seconds"))]
    pub ut1: Seconds,
    /// UTC − TAI in seconds, from the leap table.
    pub utc_minus_tai: i32,
    /// TAI as a civil date/time.
    pub tai: DateTime<Utc>,
    /// ΔT = TT − UT1.
    #[cfg_attr(feature = "serde", serde(with = "crate::time::serde_seconds"))]
    pub delta_t: Seconds,
    #[cfg_attr(feature = "serde", serde(with = "crate::time::serde_seconds"))]
    pub tt: Seconds,
    #[cfg_attr(feature = "serde", serde(with = "crate::time::serde_seconds"))]
    pub tcg: Seconds,
    #[cfg_attr(feature = "serde", serde(with = "crate::time::serde_seconds"))]
    pub tcb: Seconds,
    #[cfg_attr(feature = "serde", serde(with = "crate::time::serde_seconds"))]
    pub tdb: Seconds,
}

impl TimeScales {
    /// Run the full cascade.
    ///
    /// `jd` is the UTC Julian Day of `utc` (see
    /// [`utc_to_julian_day`](crate::calendar::utc_to_julian_day)); `offset`
    /// selects the calendar used when re-deriving the Julian Day of TCB.
    pub fn derive(
        utc: &DateTime<Utc>,
        jd: JulianDate,
        table: &LeapSecondTable,
        delta_ut1: Seconds,
        offset: &FixedOffset,
    ) -> Result<Self> {
        let ut1 = utc_to_ut1(utc, delta_ut1)?;
        let utc_minus_tai = table.utc_minus_tai(utc);
        let tai = utc_to_tai(utc, utc_minus_tai)?;
        let delta_t = delta_t(utc, table);
        let tt = ut1_to_tt(ut1, delta_t)?;
        let tcg = tt_to_tcg(jd, tt)?;
        let tcb = tt_to_tcb(jd, tt)?;
        let jd_tcb = seconds_to_julian_day(tcb, offset)?;
        let tdb = tcb_to_tdb(tcb, jd_tcb)?;

        tracing::trace!(
            %utc,
            jd = jd.value(),
            delta_t = delta_t.value(),
            utc_minus_tai,
            "derived time scales"
        );

        Ok(Self {
            ut1,
            utc_minus_tai,
            tai,
            delta_t,
            tt,
            tcg,
            tcb,
            tdb,
        })
    }
}

/// Unix timestamp of `utc` in whole seconds.
#[inline]
fn unix_seconds(utc: &DateTime<Utc>) -> Seconds {
    Seconds::new(utc.timestamp() as f64)
}

/// `UT1 = UTC + ΔUT1`.
pub fn utc_to_ut1(utc: &DateTime<Utc>, delta_ut1: Seconds) -> Result<Seconds> {
    ensure_finite("ΔUT1", delta_ut1.value())?;
    Ok(unix_seconds(utc) + delta_ut1)
}

/// `TAI = UTC − (UTC − TAI)`.
pub fn utc_to_tai(utc: &DateTime<Utc>, utc_minus_tai: i32) -> Result<DateTime<Utc>> {
    TimeDelta::try_seconds(i64::from(utc_minus_tai))
        .and_then(|offset| utc.checked_sub_signed(offset))
        .ok_or_else(|| AstroTimeError::invalid_date_time(format!("TAI of {utc} is out of range")))
}

/// `TT = UT1 + ΔT`.
pub fn ut1_to_tt(ut1: Seconds, delta_t: Seconds) -> Result<Seconds> {
    ensure_finite("UT1", ut1.value())?;
    ensure_finite("ΔT", delta_t.value())?;
    Ok(ut1 + delta_t)
}

/// `L · (JD − T₀) · 86400`
#[inline]
fn rate_offset(rate: f64, jd: JulianDate) -> Seconds {
    let since_t0: Days = jd - T0;
    Seconds::new(rate * since_t0.value() * SECONDS_PER_DAY)
}

/// `TCG = TT + L_G (JD − T₀) 86400`.
pub fn tt_to_tcg(jd: JulianDate, tt: Seconds) -> Result<Seconds> {
    ensure_finite("JD", jd.value())?;
    ensure_finite("TT", tt.value())?;
    Ok(tt + rate_offset(L_G, jd))
}

/// `TCB = TT + L_B (JD − T₀) 86400`.
pub fn tt_to_tcb(jd: JulianDate, tt: Seconds) -> Result<Seconds> {
    ensure_finite("JD", jd.value())?;
    ensure_finite("TT", tt.value())?;
    Ok(tt + rate_offset(L_B, jd))
}

/// `TDB = TCB − L_B (JD_TCB − T₀) 86400 + TDB₀`.
pub fn tcb_to_tdb(tcb: Seconds, jd_tcb: JulianDate) -> Result<Seconds> {
    ensure_finite("TCB", tcb.value())?;
    ensure_finite("JD(TCB)", jd_tcb.value())?;
    Ok(tcb - rate_offset(L_B, jd_tcb) + TDB0)
}

/// Julian Day of a scale value read as a Unix timestamp, truncated to whole
/// seconds.
pub fn seconds_to_julian_day(seconds: Seconds, offset: &FixedOffset) -> Result<JulianDate> {
    let value = ensure_finite("timestamp", seconds.value())?.floor();
    if !(i64::MIN as f64..i64::MAX as f64).contains(&value) {
        return Err(AstroTimeError::invalid_date_time(format!(
            "timestamp {value} is out of range"
        )));
    }
    unix_timestamp_to_julian_day(value as i64, offset)
}
