// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Julian Day ⇄ civil calendar
//!
//! Conversions between civil UTC fields and Julian Days, on either side of
//! the Gregorian reform of 1582.
//!
//! * Instants at or after **1582-10-15T00:00:00** (read in the caller's
//!   timezone) use the Gregorian calendar and the Fliegel–Van Flandern
//!   integer decomposition.
//! * Earlier instants use the Julian calendar, with January and February
//!   counted as months 13 and 14 of the previous year.
//! * The ten days **1582-10-05 … 1582-10-14** never existed. The Julian
//!   formula already maps their fields onto the Julian Days of
//!   1582-10-15 … 1582-10-24, so they land on the same Julian Day as the
//!   date ten days later and the day count never steps backwards.
//!
//! The inverse ([`julian_day_to_civil`]) picks the Gregorian branch for
//! `jd >= 2 299 160.5` and the Julian branch otherwise. Hours and minutes
//! are truncated from the day fraction and only the seconds are rounded, so
//! a second may round up to 60; [`CivilFields::to_utc`] carries it into the
//! minute.
//!
//! ## Known boundary imprecision
//! Near the reform the two branches are not mutual inverses: a date inside
//! the skipped range has a Julian Day past 2 299 160.5 and comes back as the
//! Gregorian date ten days later. Away from that discontinuity `julian_day_to_utc(utc_to_julian_day(d))`
//! returns `d` to the second.
//!
//! The forward Julian formula truncates `365.25 · year` toward zero, so
//! negative years whose product is fractional land one day off under the
//! (floor-based) inverse.
//!
//! All civil fields are the raw year/month/day labels held by `chrono`; for
//! pre-reform instants they are interpreted as Julian-calendar labels, not
//! converted.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc};
use std::fmt;

use crate::angle::gauss;
use crate::error::{ensure_finite, AstroTimeError, Result};
use crate::scales::JD;
use crate::time::Time;
use crate::{JulianDate, ModifiedJulianDate};
use qtty::Centuries;

const MINUTES_OF_DAY: f64 = 1_440.0;
const SECONDS_OF_DAY: f64 = 86_400.0;
const DAY_OF_YEAR_JULIAN: f64 = 365.25;

/// Unix timestamp of 1582-10-15T00:00:00 UTC (proleptic Gregorian).
const GREGORIAN_REFORM_UNIX_SECONDS: i64 = -12_219_292_800;

/// Calendar system in force for an instant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CalendarSystem {
    Gregorian,
    Julian,
}

impl CalendarSystem {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gregorian => "gregorian",
            Self::Julian => "julian",
        }
    }
}

impl fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Civil fields recovered from a Julian Day.
///
/// `second` may be 60 after rounding; `day` may exceed the month length for
/// Julian-calendar leap days the proleptic Gregorian labels cannot name
/// (e.g. 1500-02-29). [`to_utc`](Self::to_utc) resolves both by carrying.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CivilFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CivilFields {
    /// Assemble a UTC date-time, carrying overflowing seconds and days.
    pub fn to_utc(&self) -> Result<DateTime<Utc>> {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(|| {
            AstroTimeError::invalid_date_time(format!(
                "year {} month {} is out of range",
                self.year, self.month
            ))
        })?;
        let seconds = i64::from(self.hour) * 3_600 + i64::from(self.minute) * 60 + i64::from(self.second);
        let offset = TimeDelta::try_days(i64::from(self.day) - 1)
            .zip(TimeDelta::try_seconds(seconds))
            .map(|(days, secs)| days + secs)
            .ok_or_else(|| AstroTimeError::invalid_date_time("civil field overflow"))?;
        first
            .and_time(chrono::NaiveTime::MIN)
            .checked_add_signed(offset)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| AstroTimeError::invalid_date_time(format!("{self:?} is out of range")))
    }
}

// ---------------------------------------------------------------------------
// Calendar system
// ---------------------------------------------------------------------------

/// Calendar system of a UTC instant.
///
/// The reform boundary is 1582-10-15T00:00:00 in the caller's timezone:
/// instants at or after it are Gregorian, strictly earlier ones Julian.
pub fn calendar_system(utc: &DateTime<Utc>, offset: &FixedOffset) -> CalendarSystem {
    let boundary = GREGORIAN_REFORM_UNIX_SECONDS - i64::from(offset.local_minus_utc());
    if utc.timestamp() < boundary {
        CalendarSystem::Julian
    } else {
        CalendarSystem::Gregorian
    }
}

// ---------------------------------------------------------------------------
// Civil → Julian Day
// ---------------------------------------------------------------------------

/// Julian Day of a UTC instant, dispatching on [`calendar_system`].
pub fn utc_to_julian_day(utc: &DateTime<Utc>, offset: &FixedOffset) -> Result<JulianDate> {
    match calendar_system(utc, offset) {
        CalendarSystem::Julian => julian_calendar_to_julian_day(&utc.naive_utc()),
        CalendarSystem::Gregorian => gregorian_to_julian_day(&utc.naive_utc()),
    }
}

/// Julian Day of a Unix timestamp (whole seconds, UTC).
pub fn unix_timestamp_to_julian_day(timestamp: i64, offset: &FixedOffset) -> Result<JulianDate> {
    let utc = DateTime::<Utc>::from_timestamp(timestamp, 0).ok_or_else(|| {
        AstroTimeError::invalid_date_time(format!("timestamp {timestamp} is out of range"))
    })?;
    utc_to_julian_day(&utc, offset)
}

/// Gregorian-calendar formula. Sub-second parts are ignored.
pub fn gregorian_to_julian_day(utc: &NaiveDateTime) -> Result<JulianDate> {
    let y = f64::from(utc.year());
    let m = f64::from(utc.month());
    let k = gauss((14.0 - m) / 12.0)?;

    let jd = gauss((-k + y + 4_800.0) * 1_461.0 / 4.0)?
        + gauss((k * 12.0 + m - 2.0) * 367.0 / 12.0)?
        - gauss(gauss((-k + y + 4_900.0) / 100.0)? * 3.0 / 4.0)?
        + f64::from(utc.day())
        - 32_075.5
        + day_fraction(utc);
    Ok(JulianDate::new(jd))
}

/// Julian-calendar formula. Sub-second parts are ignored.
///
/// Fields in the skipped days 1582-10-05 … 1582-10-14 need no adjustment:
/// Julian 1582-10-05 is Gregorian 1582-10-15, so the formula already yields
/// the Julian Day of the date ten days later.
pub fn julian_calendar_to_julian_day(utc: &NaiveDateTime) -> Result<JulianDate> {
    let (mut y, mut m) = (f64::from(utc.year()), f64::from(utc.month()));
    if m < 3.0 {
        y -= 1.0;
        m += 12.0;
    }

    let jd = gauss(y * DAY_OF_YEAR_JULIAN)? + gauss(30.59 * (m - 2.0))? + f64::from(utc.day())
        - 678_914.0
        + crate::scales::MJD_EPOCH.value()
        + day_fraction(utc);
    Ok(JulianDate::new(jd))
}

#[inline]
fn day_fraction(utc: &NaiveDateTime) -> f64 {
    f64::from(utc.hour()) / 24.0
        + f64::from(utc.minute()) / MINUTES_OF_DAY
        + f64::from(utc.second()) / SECONDS_OF_DAY
}

// ---------------------------------------------------------------------------
// Julian Day → civil
// ---------------------------------------------------------------------------

/// Civil UTC fields of a Julian Day, Gregorian for `jd >= 2 299 160.5`,
/// Julian before.
pub fn julian_day_to_civil(jd: JulianDate) -> Result<CivilFields> {
    ensure_finite("julian day", jd.value())?;
    if jd.is_gregorian() {
        gregorian_civil(jd.value())
    } else {
        julian_civil(jd.value())
    }
}

/// [`julian_day_to_civil`] assembled into a UTC date-time.
pub fn julian_day_to_utc(jd: JulianDate) -> Result<DateTime<Utc>> {
    julian_day_to_civil(jd)?.to_utc()
}

/// Formats the local time of a Julian Day with a `chrono` format string.
pub fn julian_day_to_string(jd: JulianDate, format: &str, offset: &FixedOffset) -> Result<String> {
    let utc = julian_day_to_utc(jd)?;
    format_datetime(&utc.with_timezone(offset), format)
}

/// `chrono` formatting that reports bad format strings instead of panicking.
pub(crate) fn format_datetime(local: &DateTime<FixedOffset>, format: &str) -> Result<String> {
    use std::fmt::Write;

    let mut out = String::new();
    write!(out, "{}", local.format(format))
        .map_err(|_| AstroTimeError::invalid_date_time(format!("bad format string `{format}`")))?;
    Ok(out)
}

fn gregorian_civil(jd: f64) -> Result<CivilFields> {
    let jd = jd + 0.5;
    let whole = jd.floor();
    let fraction = jd - whole;

    let mut l = whole + 68_569.0;
    let n = gauss(4.0 * l / 146_097.0)?;
    l -= gauss((146_097.0 * n + 3.0) / 4.0)?;
    let i = gauss(4_000.0 * (l + 1.0) / 1_461_001.0)?;
    l = l - gauss(1_461.0 * i / 4.0)? + 31.0;
    let j = gauss(80.0 * l / 2_447.0)?;
    let day = l - gauss(2_447.0 * j / 80.0)?;
    l = gauss(j / 11.0)?;
    let month = j + 2.0 - 12.0 * l;
    let year = 100.0 * (n - 49.0) + i + l;

    assemble(year, month, day, fraction)
}

fn julian_civil(jd: f64) -> Result<CivilFields> {
    let shifted = jd - 0.5;
    let whole = shifted.floor();
    let fraction = shifted - whole;

    // `whole` is the MJD day number offset by 2 400 000.
    let n = whole - 2_400_000.0 + 678_883.0;
    let a = 4.0 * n + 3.0;
    let b = 5.0 * (a.rem_euclid(1_461.0) / 4.0).floor() + 2.0;

    let mut year = (a / 1_461.0).floor();
    let mut month = (b / 153.0).floor() + 3.0;
    let day = (b.rem_euclid(153.0) / 5.0).floor() + 1.0;
    if month > 12.0 {
        year += 1.0;
        month -= 12.0;
    }

    assemble(year, month, day, fraction)
}

fn assemble(year: f64, month: f64, day: f64, fraction: f64) -> Result<CivilFields> {
    let hours = fraction * 24.0;
    let hour = hours.floor();
    let minutes = (hours - hour) * 60.0;
    let minute = minutes.floor();
    let second = ((minutes - minute) * 60.0).round();

    let year = ensure_finite("year", year)?;
    if year.abs() > f64::from(i32::MAX) {
        return Err(AstroTimeError::invalid_date_time(format!("year {year} is out of range")));
    }
    Ok(CivilFields {
        year: year as i32,
        month: month as u32,
        day: day as u32,
        hour: hour as u32,
        minute: minute as u32,
        second: second as u32,
    })
}

// ---------------------------------------------------------------------------
// Derived day counts
// ---------------------------------------------------------------------------

/// `jd − 2 400 000.5`.
#[inline]
pub fn julian_day_to_modified_julian_day(jd: JulianDate) -> ModifiedJulianDate {
    jd.to_mjd()
}

/// `(jd − 2 451 545.0) / 36 525`.
#[inline]
pub fn julian_century(jd: Time<JD>) -> Centuries {
    jd.julian_centuries()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn tokyo() -> FixedOffset {
        FixedOffset::east_opt(9 * 3_600).unwrap()
    }

    fn utc0() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, mi, s).unwrap()
    }

    #[test]
    fn gregorian_scenario_2019() {
        // 2019-01-01 00:00:00 JST
        let t = utc(2018, 12, 31, 15, 0, 0);
        assert_eq!(calendar_system(&t, &tokyo()), CalendarSystem::Gregorian);
        let jd = utc_to_julian_day(&t, &tokyo()).unwrap();
        assert_eq!(jd.value(), 2_458_484.125);
        assert_eq!(julian_day_to_modified_julian_day(jd).value(), 58_483.625);
        assert!((julian_century(jd).value() - 0.189_982_888_4).abs() < 1e-10);
    }

    #[test]
    fn julian_scenario_1582() {
        // 1582-10-01 00:00:00 JST
        let t = utc(1582, 9, 30, 15, 0, 0);
        assert_eq!(calendar_system(&t, &tokyo()), CalendarSystem::Julian);
        let jd = utc_to_julian_day(&t, &tokyo()).unwrap();
        assert_eq!(jd.value(), 2_299_156.125);
        assert_eq!(julian_day_to_modified_julian_day(jd).value(), -100_844.375);
        assert!((julian_century(jd).value() + 4.172_180_013_7).abs() < 1e-10);
        assert_eq!(gregorian_to_julian_day(&t.naive_utc()).unwrap().value(), 2_299_146.125);
    }

    #[test]
    fn julian_scenario_formats_back_to_local_string() {
        let s = julian_day_to_string(JulianDate::new(2_299_156.125), "%Y-%m-%d %H:%M:%S", &tokyo())
            .unwrap();
        assert_eq!(s, "1582-10-01 00:00:00");
    }

    #[test]
    fn boundary_follows_the_callers_timezone() {
        assert_eq!(
            calendar_system(&utc(1582, 10, 15, 0, 0, 0), &utc0()),
            CalendarSystem::Gregorian
        );
        assert_eq!(
            calendar_system(&utc(1582, 10, 14, 23, 59, 59), &utc0()),
            CalendarSystem::Julian
        );
        assert_eq!(
            calendar_system(&utc(1582, 10, 14, 15, 0, 0), &tokyo()),
            CalendarSystem::Gregorian
        );
        assert_eq!(
            calendar_system(&utc(1582, 10, 14, 14, 59, 59), &tokyo()),
            CalendarSystem::Julian
        );
    }

    #[test]
    fn skipped_days_match_the_date_ten_days_later() {
        for day in 5..15 {
            let skipped = utc_to_julian_day(&utc(1582, 10, day, 12, 0, 0), &utc0()).unwrap();
            let later = utc_to_julian_day(&utc(1582, 10, day + 10, 12, 0, 0), &utc0()).unwrap();
            assert_eq!(skipped, later, "1582-10-{day:02}");
        }
        let jd = utc_to_julian_day(&utc(1582, 10, 7, 12, 0, 0), &utc0()).unwrap();
        assert_eq!(jd.value(), 2_299_163.0);
        assert_eq!(julian_day_to_utc(jd).unwrap(), utc(1582, 10, 17, 12, 0, 0));
    }

    #[test]
    fn julian_days_never_step_back_across_the_gap() {
        let jd = |d, h, mi, s| utc_to_julian_day(&utc(1582, 10, d, h, mi, s), &utc0()).unwrap();
        let last_julian = jd(4, 23, 59, 59);
        let gap_start = jd(5, 0, 0, 0);
        let reform = jd(15, 0, 0, 0);

        assert!(last_julian < gap_start);
        assert!((gap_start - last_julian).value() < 2.0 / 86_400.0);
        assert_eq!(gap_start, JulianDate::GREGORIAN_REFORM);
        assert_eq!(reform, gap_start);
    }

    #[test]
    fn j2000_inverse() {
        let civil = julian_day_to_civil(JulianDate::J2000).unwrap();
        assert_eq!(
            civil,
            CivilFields {
                year: 2000,
                month: 1,
                day: 1,
                hour: 12,
                minute: 0,
                second: 0
            }
        );
    }

    #[test]
    fn julian_branch_roundtrip() {
        for t in [
            utc(1000, 3, 1, 12, 34, 56),
            utc(800, 2, 10, 0, 0, 1),
            utc(1582, 10, 4, 23, 59, 59),
            utc(-200, 7, 4, 6, 30, 0),
        ] {
            let jd = utc_to_julian_day(&t, &utc0()).unwrap();
            assert!(!jd.is_gregorian());
            assert_eq!(julian_day_to_utc(jd).unwrap(), t, "jd {jd}");
        }
    }

    #[test]
    fn second_of_sixty_carries() {
        let civil = CivilFields {
            year: 2020,
            month: 12,
            day: 31,
            hour: 23,
            minute: 59,
            second: 60,
        };
        assert_eq!(civil.to_utc().unwrap(), utc(2021, 1, 1, 0, 0, 0));
    }

    #[test]
    fn julian_leap_day_carries_into_march() {
        // 1500 is a Julian leap year but not a Gregorian one.
        let civil = CivilFields {
            year: 1500,
            month: 2,
            day: 29,
            hour: 0,
            minute: 0,
            second: 0,
        };
        assert_eq!(civil.to_utc().unwrap(), utc(1500, 3, 1, 0, 0, 0));
    }

    #[test]
    fn non_finite_julian_day_is_rejected() {
        assert!(matches!(
            julian_day_to_civil(JulianDate::new(f64::NAN)),
            Err(AstroTimeError::NonFinite { .. })
        ));
    }

    #[test]
    fn unix_timestamp_entry_point() {
        let jd = unix_timestamp_to_julian_day(1_546_268_400, &tokyo()).unwrap();
        assert_eq!(jd.value(), 2_458_484.125);
        assert!(unix_timestamp_to_julian_day(i64::MAX, &tokyo()).is_err());
    }

    proptest! {
        #[test]
        fn gregorian_roundtrip_to_the_second(ts in -11_676_096_000i64..13_569_465_600i64) {
            let t = DateTime::<Utc>::from_timestamp(ts, 0).unwrap();
            let jd = utc_to_julian_day(&t, &utc0()).unwrap();
            prop_assert_eq!(julian_day_to_utc(jd).unwrap(), t);
        }
    }
}
