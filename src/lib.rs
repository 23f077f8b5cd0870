// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Astronomical time
//!
//! Conversions between civil time and the astronomical time scales, Julian
//! Day arithmetic across the Julian/Gregorian reform, and low-precision
//! ecliptic longitudes of the Sun and the Moon.
//!
//! # Core types
//!
//! - [`Instant`]: an immutable civil date/time with every derived quantity
//!   (JD, MJD, Julian Century, UT1, TAI, ΔT, TT, TCG, TCB, TDB).
//! - [`Config`]: the explicit conversion context (leap-second table,
//!   UT1 − UTC, timezone).
//! - [`LeapSecondTable`]: the date-ordered UTC − TAI table.
//! - [`Time<S>`]: a day count tagged with a [`DayScale`] marker;
//!   [`JulianDate`] and [`ModifiedJulianDate`] are aliases.
//! - [`TimeScales`]: the scale cascade of one instant.
//!
//! # Calendar
//!
//! Instants before 1582-10-15T00:00:00 (in the configured timezone) use the
//! Julian calendar, later ones the Gregorian calendar. See [`calendar`] for
//! the formulas and their known imprecision at the reform boundary.
//!
//! # Time scales
//!
//! | Scale | Definition |
//! |-------|------------|
//! | UT1 | UTC + ΔUT1 |
//! | TAI | UTC − (UTC − TAI), from the leap-second table |
//! | TT  | UT1 + ΔT |
//! | TCG | TT + L_G (JD − T₀) · 86400 |
//! | TCB | TT + L_B (JD − T₀) · 86400 |
//! | TDB | TCB − L_B (JD_TCB − T₀) · 86400 + TDB₀ |
//!
//! ΔT comes from a piecewise polynomial model in the UTC year, replaced by
//! `32.184 − (UTC − TAI)` inside the leap-second era; see [`delta_t()`].
//!
//! # Logging
//!
//! Diagnostics are emitted through [`tracing`]; install a subscriber to see
//! them.

pub mod angle;
pub mod calendar;
pub mod chain;
mod config;
pub mod delta_t;
pub mod ecliptic;
mod error;
mod instant;
mod julian_date_ext;
pub mod leap_seconds;
mod scales;
mod time;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use angle::{gauss, normalize_angle};
pub use calendar::{
    calendar_system, julian_century, julian_day_to_civil, julian_day_to_modified_julian_day,
    julian_day_to_string, julian_day_to_utc, unix_timestamp_to_julian_day, utc_to_julian_day,
    CalendarSystem, CivilFields,
};
pub use chain::TimeScales;
pub use config::Config;
pub use delta_t::delta_t;
pub use ecliptic::{lunar_longitude, solar_longitude};
pub use error::{AstroTimeError, Result};
pub use instant::{date_string_to_julian_day, Instant};
pub use leap_seconds::{LeapSecond, LeapSecondTable, DEFAULT_UTC_TAI};
pub use scales::{JD, MJD};
pub use time::{DayScale, Time};

/// Julian Day: continuous count of days since −4712-01-01T12:00 (Julian
/// calendar).
pub type JulianDate = Time<JD>;

/// Modified Julian Day: `JD − 2 400 000.5`.
pub type ModifiedJulianDate = Time<MJD>;
