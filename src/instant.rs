// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Instant
//!
//! An immutable moment in civil time with every astronomical quantity derived
//! eagerly at construction:
//!
//! * Julian Day, Modified Julian Day and Julian Century (UTC-based),
//! * the calendar system in force,
//! * the time-scale cascade UT1, TAI, ΔT, TT, TCG, TCB, TDB,
//! * the Julian Century of TT, used by the lunar model.
//!
//! Construction either succeeds with all fields valid or fails; there is no
//! partially derived state. Operations that "move" an instant (adding days,
//! snapping to the end of a month, changing timezone) return a new `Instant`
//! with the cascade recomputed.
//!
//! Instants carry whole seconds; sub-second parts of their inputs are
//! dropped.
//!
//! ```rust
//! use astrotime::{CalendarSystem, Config, Instant};
//! use chrono::FixedOffset;
//!
//! let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
//! let config = Config::bundled().unwrap().with_offset(tokyo);
//! let t = Instant::parse("2019-01-01 00:00:00", &config).unwrap();
//!
//! assert_eq!(t.calendar_system(), CalendarSystem::Gregorian);
//! assert_eq!(t.julian_day().value(), 2_458_484.125);
//! assert_eq!(t.delta_t().value(), 69.184);
//! ```

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, TimeDelta,
    TimeZone, Utc, Weekday,
};
use qtty::{Centuries, Seconds};
use std::cmp::Ordering;
use std::fmt;

use crate::calendar::{
    calendar_system, format_datetime, gregorian_to_julian_day, julian_century,
    julian_day_to_modified_julian_day, julian_day_to_utc, utc_to_julian_day, CalendarSystem,
};
use crate::chain::{seconds_to_julian_day, TimeScales};
use crate::config::Config;
use crate::ecliptic::{lunar_longitude, solar_longitude};
use crate::error::{AstroTimeError, Result};
use crate::{JulianDate, ModifiedJulianDate};

/// Accepted layouts for [`Instant::parse`], tried in order.
const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A civil date/time with its derived astronomical time scales.
///
/// Equality and ordering compare the UTC moment only.
#[derive(Debug, Clone)]
pub struct Instant {
    local: DateTime<FixedOffset>,
    utc: DateTime<Utc>,
    calendar: CalendarSystem,
    jd: JulianDate,
    jd_gregorian: JulianDate,
    mjd: ModifiedJulianDate,
    jc: Centuries,
    jc_tt: Centuries,
    scales: TimeScales,
    config: Config,
}

// ═══════════════════════════════════════════════════════════════════════════
// Construction
// ═══════════════════════════════════════════════════════════════════════════

impl Instant {
    /// From a UTC date-time.
    pub fn from_utc(utc: DateTime<Utc>, config: &Config) -> Result<Self> {
        let utc = utc.trunc_subsecs(0);
        let offset = config.offset();

        let calendar = calendar_system(&utc, &offset);
        let jd = utc_to_julian_day(&utc, &offset)?;
        let jd_gregorian = gregorian_to_julian_day(&utc.naive_utc())?;
        let mjd = julian_day_to_modified_julian_day(jd);
        let jc = julian_century(jd);

        let scales = TimeScales::derive(
            &utc,
            jd,
            config.leap_seconds(),
            config.delta_ut1(),
            &offset,
        )?;
        let jc_tt = julian_century(seconds_to_julian_day(scales.tt, &offset)?);

        Ok(Self {
            local: utc.with_timezone(&offset),
            utc,
            calendar,
            jd,
            jd_gregorian,
            mjd,
            jc,
            jc_tt,
            scales,
            config: config.clone(),
        })
    }

    /// From civil fields read in the configured timezone.
    pub fn from_local(local: NaiveDateTime, config: &Config) -> Result<Self> {
        Self::from_utc(local_to_utc(&local, &config.offset())?, config)
    }

    /// From local civil fields. Fails for impossible dates such as
    /// February 30.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        config: &Config,
    ) -> Result<Self> {
        let local = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .ok_or_else(|| {
                AstroTimeError::invalid_date_time(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
                ))
            })?;
        Self::from_local(local, config)
    }

    /// From a Unix timestamp in seconds.
    pub fn from_timestamp(timestamp: i64, config: &Config) -> Result<Self> {
        let utc = DateTime::<Utc>::from_timestamp(timestamp, 0).ok_or_else(|| {
            AstroTimeError::invalid_date_time(format!("timestamp {timestamp} is out of range"))
        })?;
        Self::from_utc(utc, config)
    }

    /// From a UTC-based Julian Day.
    ///
    /// The day is first turned into civil UTC fields (Gregorian for
    /// `jd >= 2 299 160.5`, Julian before), then the instant is built from
    /// them.
    pub fn from_julian_day(jd: JulianDate, config: &Config) -> Result<Self> {
        Self::from_utc(julian_day_to_utc(jd)?, config)
    }

    /// Parse `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM`
    /// or `YYYY-MM-DD`, read in the configured timezone.
    pub fn parse(s: &str, config: &Config) -> Result<Self> {
        Self::from_local(parse_local(s)?, config)
    }
}

/// Julian Day of a local date string (see [`Instant::parse`] for layouts).
pub fn date_string_to_julian_day(s: &str, config: &Config) -> Result<JulianDate> {
    let offset = config.offset();
    let utc = local_to_utc(&parse_local(s)?, &offset)?;
    utc_to_julian_day(&utc, &offset)
}

fn parse_local(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .ok_or_else(|| AstroTimeError::invalid_date_time(format!("cannot parse `{s}`")))
}

fn local_to_utc(local: &NaiveDateTime, offset: &FixedOffset) -> Result<DateTime<Utc>> {
    offset
        .from_local_datetime(local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AstroTimeError::invalid_date_time(format!("{local} is out of range")))
}

// ═══════════════════════════════════════════════════════════════════════════
// Accessors
// ═══════════════════════════════════════════════════════════════════════════

impl Instant {
    /// Civil time in the configured timezone.
    pub fn local(&self) -> DateTime<FixedOffset> {
        self.local
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    /// Unix timestamp in seconds.
    pub fn timestamp(&self) -> i64 {
        self.utc.timestamp()
    }

    pub fn offset(&self) -> FixedOffset {
        self.config.offset()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn calendar_system(&self) -> CalendarSystem {
        self.calendar
    }

    /// Julian Day of the UTC fields, in the calendar in force.
    pub fn julian_day(&self) -> JulianDate {
        self.jd
    }

    /// Julian Day of the UTC fields read as proleptic Gregorian, whatever
    /// the calendar in force.
    pub fn julian_day_gregorian(&self) -> JulianDate {
        self.jd_gregorian
    }

    pub fn modified_julian_day(&self) -> ModifiedJulianDate {
        self.mjd
    }

    /// Julian centuries since J2000.0 of the UTC Julian Day.
    pub fn julian_century(&self) -> Centuries {
        self.jc
    }

    /// Julian centuries since J2000.0 of the Julian Day of TT.
    pub fn julian_century_tt(&self) -> Centuries {
        self.jc_tt
    }

    /// The whole time-scale cascade.
    pub fn scales(&self) -> &TimeScales {
        &self.scales
    }

    /// UT1 in seconds on the Unix axis.
    pub fn ut1(&self) -> Seconds {
        self.scales.ut1
    }

    /// UTC − TAI in seconds.
    pub fn utc_minus_tai(&self) -> i32 {
        self.scales.utc_minus_tai
    }

    pub fn tai(&self) -> DateTime<Utc> {
        self.scales.tai
    }

    /// ΔT = TT − UT1.
    pub fn delta_t(&self) -> Seconds {
        self.scales.delta_t
    }

    /// TT in seconds on the Unix axis.
    pub fn tt(&self) -> Seconds {
        self.scales.tt
    }

    pub fn tcg(&self) -> Seconds {
        self.scales.tcg
    }

    pub fn tcb(&self) -> Seconds {
        self.scales.tcb
    }

    pub fn tdb(&self) -> Seconds {
        self.scales.tdb
    }

    /// Julian Day of the TT timestamp (whole seconds).
    pub fn tt_julian_day(&self) -> Result<JulianDate> {
        seconds_to_julian_day(self.scales.tt, &self.config.offset())
    }

    /// Ecliptic longitude of the Sun in degrees, from the UTC Julian Century.
    pub fn sun_longitude(&self) -> Result<f64> {
        solar_longitude(self.jc)
    }

    /// Ecliptic longitude of the Moon in degrees, from the TT Julian Century.
    pub fn moon_longitude(&self) -> Result<f64> {
        lunar_longitude(self.jc_tt)
    }

    /// Local time formatted with a `chrono` format string.
    pub fn format(&self, format: &str) -> Result<String> {
        format_datetime(&self.local, format)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Civil arithmetic
// ═══════════════════════════════════════════════════════════════════════════

impl Instant {
    pub fn year(&self) -> i32 {
        self.local.year()
    }

    pub fn month(&self) -> u32 {
        self.local.month()
    }

    pub fn day(&self) -> u32 {
        self.local.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.local.weekday()
    }

    pub fn is_sunday(&self) -> bool {
        self.weekday() == Weekday::Sun
    }

    pub fn is_saturday(&self) -> bool {
        self.weekday() == Weekday::Sat
    }

    /// Same UTC moment seen from another timezone. The calendar system and
    /// every derived scale are recomputed.
    pub fn with_offset(&self, offset: FixedOffset) -> Result<Self> {
        Self::from_utc(self.utc, &self.config.clone().with_offset(offset))
    }

    /// `days` later (earlier if negative), same local time of day.
    pub fn add_days(&self, days: i64) -> Result<Self> {
        let moved = TimeDelta::try_days(days)
            .and_then(|delta| self.utc.checked_add_signed(delta))
            .ok_or_else(|| AstroTimeError::invalid_date_time(format!("{self} + {days} days")))?;
        Self::from_utc(moved, &self.config)
    }

    pub fn sub_days(&self, days: i64) -> Result<Self> {
        let negated = days
            .checked_neg()
            .ok_or_else(|| AstroTimeError::invalid_date_time(format!("{self} - {days} days")))?;
        self.add_days(negated)
    }

    /// 00:00:00 on the first day of this week. Weeks run Monday–Sunday, or
    /// Sunday–Saturday when `week_starts_sunday`.
    pub fn start_of_week(&self, week_starts_sunday: bool) -> Result<Self> {
        let date = self.local.date_naive();
        let back = if week_starts_sunday {
            date.weekday().num_days_from_sunday()
        } else {
            date.weekday().num_days_from_monday()
        };
        let first = date
            .checked_sub_signed(TimeDelta::days(i64::from(back)))
            .ok_or_else(|| self.out_of_range("start of week"))?;
        self.at_local(first, NaiveTime::MIN)
    }

    /// 23:59:59 on the last day of this week.
    pub fn end_of_week(&self, week_starts_sunday: bool) -> Result<Self> {
        let first = self.start_of_week(week_starts_sunday)?.local.date_naive();
        let last = first
            .checked_add_signed(TimeDelta::days(6))
            .ok_or_else(|| self.out_of_range("end of week"))?;
        self.at_end_of_day(last)
    }

    /// 00:00:00 on the first day of this month.
    pub fn start_of_month(&self) -> Result<Self> {
        let first = self
            .local
            .date_naive()
            .with_day(1)
            .ok_or_else(|| self.out_of_range("start of month"))?;
        self.at_local(first, NaiveTime::MIN)
    }

    /// 23:59:59 on the last day of this month.
    pub fn end_of_month(&self) -> Result<Self> {
        let (year, month) = match self.month() {
            12 => (self.year() + 1, 1),
            m => (self.year(), m + 1),
        };
        let last = NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| self.out_of_range("end of month"))?;
        self.at_end_of_day(last)
    }

    /// 23:59:59 on December 31 of this year.
    pub fn end_of_year(&self) -> Result<Self> {
        let last = NaiveDate::from_ymd_opt(self.year(), 12, 31)
            .ok_or_else(|| self.out_of_range("end of year"))?;
        self.at_end_of_day(last)
    }

    fn at_end_of_day(&self, date: NaiveDate) -> Result<Self> {
        let time = NaiveTime::from_hms_opt(23, 59, 59)
            .ok_or_else(|| self.out_of_range("end of day"))?;
        self.at_local(date, time)
    }

    fn at_local(&self, date: NaiveDate, time: NaiveTime) -> Result<Self> {
        Self::from_local(date.and_time(time), &self.config)
    }

    fn out_of_range(&self, what: &str) -> AstroTimeError {
        AstroTimeError::invalid_date_time(format!("{what} of {self} is out of range"))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait impls
// ═══════════════════════════════════════════════════════════════════════════

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.local.format("%Y-%m-%d %H:%M:%S %:z"))
    }
}

impl PartialEq for Instant {
    fn eq(&self, other: &Self) -> bool {
        self.utc == other.utc
    }
}

impl Eq for Instant {}

impl PartialOrd for Instant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.utc.cmp(&other.utc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokyo() -> FixedOffset {
        FixedOffset::east_opt(9 * 3_600).unwrap()
    }

    fn config() -> Config {
        Config::bundled().unwrap().with_offset(tokyo())
    }

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn gregorian_scenario() {
        let t = Instant::parse("2019-01-01 00:00:00", &config()).unwrap();
        assert_eq!(t.timestamp(), 1_546_268_400);
        assert_eq!(t.calendar_system(), CalendarSystem::Gregorian);
        assert_eq!(t.julian_day().value(), 2_458_484.125);
        assert_eq!(t.julian_day_gregorian(), t.julian_day());
        assert_eq!(t.modified_julian_day().value(), 58_483.625);
        assert!(close(t.julian_century().value(), 0.189_982_888_4, 1e-10));
        assert_eq!(t.utc_minus_tai(), -37);
        assert!(close(t.delta_t().value(), 69.184, 1e-12));
        assert_eq!(t.ut1(), Seconds::new(1_546_268_400.0));
    }

    #[test]
    fn julian_scenario() {
        let t = Instant::from_ymd_hms(1582, 10, 1, 0, 0, 0, &config()).unwrap();
        assert_eq!(t.calendar_system(), CalendarSystem::Julian);
        assert_eq!(t.julian_day().value(), 2_299_156.125);
        assert_eq!(t.julian_day_gregorian().value(), 2_299_146.125);
        assert_eq!(t.modified_julian_day().value(), -100_844.375);
        assert!(close(t.julian_century().value(), -4.172_180_013_689_254, 1e-12));
        assert_eq!(t.utc_minus_tai(), crate::leap_seconds::DEFAULT_UTC_TAI);
    }

    #[test]
    fn julian_century_of_tt_leads_utc() {
        let t = Instant::parse("2019-01-01", &config()).unwrap();
        assert!(close(t.julian_century_tt().value(), 0.189_982_910_297_357_17, 1e-12));
        assert!(t.julian_century_tt() > t.julian_century());
        let jd_tt = t.tt_julian_day().unwrap();
        assert!(close(jd_tt.value(), 2_458_484.125_798_611, 1e-9));
    }

    #[test]
    fn longitudes() {
        let t = Instant::parse("2019-01-01 00:00:00", &config()).unwrap();
        assert!(close(t.sun_longitude().unwrap(), 279.883_452_546_805_76, 1e-9));
        assert!(close(t.moon_longitude().unwrap(), 217.476_413_799_541_06, 1e-8));
    }

    #[test]
    fn constructors_agree() {
        let config = config();
        let parsed = Instant::parse("2019-01-01T00:00:00", &config).unwrap();
        let from_ts = Instant::from_timestamp(1_546_268_400, &config).unwrap();
        let from_utc =
            Instant::from_utc(Utc.with_ymd_and_hms(2018, 12, 31, 15, 0, 0).unwrap(), &config).unwrap();
        let from_jd = Instant::from_julian_day(JulianDate::new(2_458_484.125), &config).unwrap();
        assert_eq!(parsed, from_ts);
        assert_eq!(parsed, from_utc);
        assert_eq!(parsed, from_jd);
        assert_eq!(parsed.tdb(), from_jd.tdb());
    }

    #[test]
    fn sub_seconds_are_dropped() {
        let utc = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap() + TimeDelta::milliseconds(750);
        let t = Instant::from_utc(utc, &config()).unwrap();
        assert_eq!(t.utc().timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn invalid_inputs() {
        let config = config();
        assert!(Instant::parse("2019-02-30", &config).is_err());
        assert!(Instant::parse("yesterday", &config).is_err());
        assert!(Instant::from_ymd_hms(2019, 13, 1, 0, 0, 0, &config).is_err());
        assert!(Instant::from_timestamp(i64::MAX, &config).is_err());
        assert!(Instant::from_julian_day(JulianDate::new(f64::NAN), &config).is_err());
    }

    #[test]
    fn date_string_helper() {
        let jd = date_string_to_julian_day("1582-10-01 00:00:00", &config()).unwrap();
        assert_eq!(jd.value(), 2_299_156.125);
    }

    #[test]
    fn format_local_time() {
        let t = Instant::parse("1582-10-01 00:00:00", &config()).unwrap();
        assert_eq!(t.format("%Y-%m-%d %H:%M:%S").unwrap(), "1582-10-01 00:00:00");
        assert_eq!(t.to_string(), "1582-10-01 00:00:00 +09:00");
        assert!(t.format("%Q").is_err());
    }

    #[test]
    fn with_offset_keeps_the_moment() {
        // 1582-10-15 00:00 UTC is Gregorian in UTC but still Julian seen
        // from 14 hours behind.
        let config = Config::bundled().unwrap();
        let t = Instant::parse("1582-10-15 00:00:00", &config).unwrap();
        assert_eq!(t.calendar_system(), CalendarSystem::Gregorian);

        let hawaii = FixedOffset::west_opt(14 * 3_600).unwrap();
        let moved = t.with_offset(hawaii).unwrap();
        assert_eq!(moved, t);
        assert_eq!(moved.offset(), hawaii);
        assert_eq!(moved.day(), 14);
        assert_eq!(moved.calendar_system(), CalendarSystem::Julian);
        assert_ne!(moved.julian_day(), t.julian_day());

        let east = t.with_offset(tokyo()).unwrap();
        assert_eq!(east.calendar_system(), CalendarSystem::Gregorian);
    }

    #[test]
    fn day_arithmetic() {
        let t = Instant::parse("2019-01-31 12:00:00", &config()).unwrap();
        let next = t.add_days(1).unwrap();
        assert_eq!((next.month(), next.day()), (2, 1));
        assert_eq!(next.julian_day() - t.julian_day(), qtty::Days::new(1.0));
        assert_eq!(next.sub_days(1).unwrap(), t);
        assert_eq!(t.add_days(-31).unwrap().day(), 31);
    }

    #[test]
    fn week_bounds() {
        // 2019-01-16 is a Wednesday.
        let t = Instant::parse("2019-01-16 15:30:00", &config()).unwrap();
        assert_eq!(t.weekday(), Weekday::Wed);

        let monday = t.start_of_week(false).unwrap();
        assert_eq!(monday.format("%Y-%m-%d %H:%M:%S").unwrap(), "2019-01-14 00:00:00");
        let sunday_end = t.end_of_week(false).unwrap();
        assert_eq!(sunday_end.format("%Y-%m-%d %H:%M:%S").unwrap(), "2019-01-20 23:59:59");
        assert!(sunday_end.is_sunday());

        let sunday = t.start_of_week(true).unwrap();
        assert_eq!(sunday.day(), 13);
        assert!(sunday.is_sunday());
        let saturday = t.end_of_week(true).unwrap();
        assert_eq!(saturday.day(), 19);
        assert!(saturday.is_saturday());
    }

    #[test]
    fn month_and_year_bounds() {
        let t = Instant::parse("2020-02-10", &config()).unwrap();
        assert_eq!(t.start_of_month().unwrap().day(), 1);
        let end = t.end_of_month().unwrap();
        assert_eq!(end.format("%Y-%m-%d %H:%M:%S").unwrap(), "2020-02-29 23:59:59");

        let december = Instant::parse("2019-12-05", &config()).unwrap();
        assert_eq!(december.end_of_month().unwrap().day(), 31);
        let end_of_year = t.end_of_year().unwrap();
        assert_eq!(end_of_year.format("%Y-%m-%d %H:%M:%S").unwrap(), "2020-12-31 23:59:59");
    }

    #[test]
    fn ordering_follows_utc() {
        let config = config();
        let a = Instant::parse("2019-01-01", &config).unwrap();
        let b = a.add_days(1).unwrap();
        assert!(a < b);
        assert_eq!(a.clone().max(b.clone()), b);
    }
}
