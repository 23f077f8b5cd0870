// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # ΔT (Delta T): TT − UT1
//!
//! Piecewise model selected by the **integer UTC year** of the instant:
//!
//! | Range | Model |
//! |-------|-------|
//! | year < −500 | long-term parabola |
//! | −500 … 1960 | NASA polynomial expressions (Espenak & Meeus) |
//! | 1961 … 1971 | cubic about 1975 |
//! | 1972-01-01 … latest leap entry | `32.184 − (UTC − TAI)` |
//! | … 2049 | quadratic about 2000 |
//! | 2050 … 2150 | parabola with linear correction |
//! | > 2150 | long-term parabola |
//!
//! The leap-table branch ends at the date of the **latest entry** of the
//! supplied table, so extending the table moves the switch to the
//! extrapolated polynomial.
//!
//! ## Scientific References
//! * Espenak & Meeus (2006): *Polynomial Expressions for Delta T*,
//!   NASA Five Millennium Canon of Solar Eclipses.
//! * Morrison & Stephenson (2004): "Historical values of the Earth's clock error".

use chrono::{DateTime, Datelike, Utc};
use qtty::Seconds;

use crate::leap_seconds::LeapSecondTable;

/// TT − TAI, exact by definition.
pub const TT_MINUS_TAI: Seconds = Seconds::new(32.184);

/// One polynomial term, added to the running sum in table order.
#[derive(Debug, Copy, Clone)]
enum Term {
    /// `c · tⁿ`
    Scaled(f64, i32),
    /// `tⁿ / d`
    Divided(f64, i32),
}

use Term::{Divided, Scaled};

/// `constant + Σ terms`, summed left to right.
///
/// Powers go through `powf` and reciprocal coefficients stay divisions, so
/// each term rounds the same way as the published `c·tⁿ` and `tⁿ/d` forms.
#[inline]
fn accumulate(t: f64, constant: f64, terms: &[Term]) -> f64 {
    terms.iter().fold(constant, |sum, term| match *term {
        Scaled(c, n) => sum + c * t.powf(f64::from(n)),
        Divided(d, n) => sum + t.powf(f64::from(n)) / d,
    })
}

// ------------------------------------------------------------------------------------
// ΔT Approximation Sections by Year
// ------------------------------------------------------------------------------------

/// Long-term parabola, used before −500 and after 2150.
#[inline]
fn delta_t_long_term(year: f64) -> f64 {
    accumulate((year - 1_820.0) / 100.0, -20.0, &[Scaled(32.0, 2)])
}

/// **−500 … 499**
#[inline]
fn delta_t_antiquity(year: f64) -> f64 {
    accumulate(
        year / 100.0,
        10_583.6,
        &[
            Scaled(-1_014.41, 1),
            Scaled(33.783_11, 2),
            Scaled(-5.952_053, 3),
            Scaled(-0.179_845_2, 4),
            Scaled(0.022_174_192, 5),
            Scaled(0.009_031_652_1, 6),
        ],
    )
}

/// **500 … 1599**
#[inline]
fn delta_t_medieval(year: f64) -> f64 {
    accumulate(
        (year - 1_000.0) / 100.0,
        1_574.2,
        &[
            Scaled(-556.01, 1),
            Scaled(71.234_72, 2),
            Scaled(0.319_781, 3),
            Scaled(-0.850_346_3, 4),
            Scaled(-0.005_050_998, 5),
            Scaled(0.008_357_207_3, 6),
        ],
    )
}

/// **1600 … 1699**
#[inline]
fn delta_t_17th_century(year: f64) -> f64 {
    accumulate(
        year - 1_600.0,
        120.0,
        &[Scaled(-0.9808, 1), Scaled(-0.01532, 2), Divided(7_129.0, 3)],
    )
}

/// **1700 … 1799**
#[inline]
fn delta_t_18th_century(year: f64) -> f64 {
    accumulate(
        year - 1_700.0,
        8.83,
        &[
            Scaled(0.1603, 1),
            Scaled(-0.005_928_5, 2),
            Scaled(0.000_133_36, 3),
            Divided(-1_174_000.0, 4),
        ],
    )
}

/// **1800 … 1859**
#[inline]
fn delta_t_early_19th_century(year: f64) -> f64 {
    accumulate(
        year - 1_800.0,
        13.72,
        &[
            Scaled(-0.332_447, 1),
            Scaled(0.006_861_2, 2),
            Scaled(0.004_111_6, 3),
            Scaled(-0.000_374_36, 4),
            Scaled(0.000_012_127_2, 5),
            Scaled(-0.000_000_169_9, 6),
            Scaled(0.000_000_000_875, 7),
        ],
    )
}

/// **1860 … 1899**
#[inline]
fn delta_t_late_19th_century(year: f64) -> f64 {
    accumulate(
        year - 1_860.0,
        7.62,
        &[
            Scaled(0.5737, 1),
            Scaled(-0.251_754, 2),
            Scaled(0.016_806_68, 3),
            Scaled(-0.000_447_362_4, 4),
            Divided(233_174.0, 5),
        ],
    )
}

/// **1900 … 1919**
#[inline]
fn delta_t_1900s(year: f64) -> f64 {
    accumulate(
        year - 1_900.0,
        -2.79,
        &[
            Scaled(1.494_119, 1),
            Scaled(-0.059_893_9, 2),
            Scaled(0.006_196_6, 3),
            Scaled(-0.000_197, 4),
        ],
    )
}

/// **1920 … 1940**
#[inline]
fn delta_t_interwar(year: f64) -> f64 {
    accumulate(
        year - 1_920.0,
        21.20,
        &[Scaled(0.844_93, 1), Scaled(-0.076_100, 2), Scaled(0.002_093_6, 3)],
    )
}

/// **1941 … 1960**
#[inline]
fn delta_t_postwar(year: f64) -> f64 {
    accumulate(
        year - 1_950.0,
        29.07,
        &[Scaled(0.407, 1), Divided(-233.0, 2), Divided(2_547.0, 3)],
    )
}

/// **1961 … 1971**, before the leap-second era.
#[inline]
fn delta_t_pre_leap(year: f64) -> f64 {
    accumulate(
        year - 1_975.0,
        45.45,
        &[Scaled(1.067, 1), Divided(-260.0, 2), Divided(-718.0, 3)],
    )
}

/// From the latest leap entry until 2049.
#[inline]
fn delta_t_near_future(year: f64) -> f64 {
    accumulate(
        year - 2_000.0,
        62.92,
        &[Scaled(0.322_17, 1), Scaled(0.005_589, 2)],
    )
}

/// **2050 … 2150**
#[inline]
fn delta_t_far_future(year: f64) -> f64 {
    delta_t_long_term(year) - 0.5628 * (2_150.0 - year)
}

/// First year of the leap-second era (1972-01-01).
const LEAP_ERA_YEAR: i32 = 1_972;

/// Returns **ΔT = TT − UT1** for a UTC instant.
///
/// Inside the leap-second era the value is `32.184 − (UTC − TAI)` taken from
/// `table`; elsewhere a polynomial in the UTC year is used.
pub fn delta_t(utc: &DateTime<Utc>, table: &LeapSecondTable) -> Seconds {
    let date = utc.date_naive();
    let year = utc.year();
    let y = f64::from(year);

    let seconds = match year {
        yr if yr < -500 => delta_t_long_term(y),
        yr if yr < 500 => delta_t_antiquity(y),
        yr if yr < 1_600 => delta_t_medieval(y),
        yr if yr < 1_700 => delta_t_17th_century(y),
        yr if yr < 1_800 => delta_t_18th_century(y),
        yr if yr < 1_860 => delta_t_early_19th_century(y),
        yr if yr < 1_900 => delta_t_late_19th_century(y),
        yr if yr < 1_920 => delta_t_1900s(y),
        yr if yr < 1_941 => delta_t_interwar(y),
        yr if yr < 1_961 => delta_t_postwar(y),
        yr if yr < LEAP_ERA_YEAR => delta_t_pre_leap(y),
        _ if date < table.latest_date() => {
            return TT_MINUS_TAI - Seconds::new(f64::from(table.utc_minus_tai(utc)));
        }
        yr if yr < 2_050 => delta_t_near_future(y),
        yr if yr <= 2_150 => delta_t_far_future(y),
        _ => delta_t_long_term(y),
    };
    Seconds::new(seconds)
}

#[cfg(test)]
mod tests {
    use super::Term::{Divided, Scaled};
    use super::*;
    use chrono::TimeZone;

    fn table() -> LeapSecondTable {
        LeapSecondTable::bundled().unwrap()
    }

    fn at(year: i32, month: u32, day: u32) -> Seconds {
        let utc = Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap();
        delta_t(&utc, &table())
    }

    fn assert_close(actual: Seconds, expected: f64, tol: f64) {
        assert!(
            (actual.value() - expected).abs() < tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn terms_accumulate_in_order() {
        assert_eq!(accumulate(2.0, 1.0, &[Scaled(2.0, 1), Divided(4.0, 2)]), 1.0 + 4.0 + 1.0);
        assert_eq!(accumulate(5.0, 7.0, &[]), 7.0);
    }

    #[test]
    fn rounding_follows_the_published_term_forms() {
        // Reciprocal coefficients are divisions, not multiplications by 1/d.
        let t: f64 = 50.0;
        let expected = 120.0 - 0.9808 * t - 0.01532 * t.powf(2.0) + t.powf(3.0) / 7_129.0;
        assert_eq!(delta_t_17th_century(1_650.0).to_bits(), expected.to_bits());

        let t: f64 = -9.0;
        let expected = 45.45 + 1.067 * t - t.powf(2.0) / 260.0 - t.powf(3.0) / 718.0;
        assert_eq!(delta_t_pre_leap(1_966.0).to_bits(), expected.to_bits());

        let t: f64 = 2.5;
        let expected = 10_583.6 - 1_014.41 * t + 33.783_11 * t.powf(2.0) - 5.952_053 * t.powf(3.0)
            - 0.179_845_2 * t.powf(4.0)
            + 0.022_174_192 * t.powf(5.0)
            + 0.009_031_652_1 * t.powf(6.0);
        assert_eq!(delta_t_antiquity(250.0).to_bits(), expected.to_bits());
    }

    #[test]
    fn long_term_extremes() {
        assert_close(at(-1000, 6, 1), 25_427.68, 1e-6);
        assert_close(at(2200, 6, 1), 442.08, 1e-6);
    }

    #[test]
    fn ancient_and_medieval() {
        assert_close(at(-600, 1, 1), 18_720.48, 1e-6);
        assert_close(at(0, 1, 1), 10_583.6, 1e-9);
        assert_close(at(250, 1, 1), 8_163.063_847_875_976, 1e-6);
        assert_close(at(1000, 1, 1), 1_574.2, 1e-9);
        assert_close(at(1250, 1, 1), 602.718_998_071_289_1, 1e-6);
    }

    #[test]
    fn telescopic_era() {
        assert_close(at(1650, 1, 1), 50.194_015_991_022_6, 1e-9);
        assert_close(at(1750, 1, 1), 13.370_070_272_572_4, 1e-9);
        assert_close(at(1830, 1, 1), 7.673_38, 1e-9);
        assert_close(at(1880, 1, 1), -5.008_486_988_497_85, 1e-9);
        assert_close(at(1910, 1, 1), 10.3884, 1e-9);
        assert_close(at(1930, 1, 1), 24.1329, 1e-9);
        assert_close(at(1950, 1, 1), 29.07, 1e-12);
    }

    #[test]
    fn cubic_before_leap_era() {
        assert_close(at(1966, 7, 1), 36.550_781_872_723_38, 1e-9);
        let last_day = Utc.with_ymd_and_hms(1971, 12, 31, 23, 59, 59).unwrap();
        assert_close(delta_t(&last_day, &table()), 45.45 + 1.067 * -4.0 - 16.0 / 260.0 + 64.0 / 718.0, 1e-9);
    }

    #[test]
    fn leap_era_uses_table() {
        assert_close(at(1972, 1, 1), 42.184, 1e-12);
        assert_close(at(1975, 1, 1), 46.184, 1e-12);
        let jst_2019 = Utc.with_ymd_and_hms(2018, 12, 31, 15, 0, 0).unwrap();
        assert_close(delta_t(&jst_2019, &table()), 69.184, 1e-12);
    }

    #[test]
    fn leap_era_ends_at_latest_entry() {
        let short: LeapSecondTable = "2017-01-01 = -37\n".parse().unwrap();
        let utc = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
        assert_close(delta_t(&utc, &short), 62.92 + 0.32217 * 19.0 + 0.005589 * 361.0, 1e-9);

        assert_close(at(2030, 1, 1), 77.6152, 1e-9);
    }

    #[test]
    fn far_future_parabola() {
        assert_close(at(2100, 1, 1), 202.74, 1e-9);
        assert_close(at(2150, 12, 31), delta_t_long_term(2150.0), 1e-9);
        assert_close(at(2151, 1, 1), delta_t_long_term(2151.0), 1e-9);
    }
}
