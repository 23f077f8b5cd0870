// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Leap-second table
//!
//! An ordered mapping from the UTC date on which an offset takes effect to
//! **UTC − TAI** in whole seconds (negative since 1972). The table is loaded
//! once, validated eagerly, and read-only afterwards; share it behind an
//! `Arc` (see [`Config`](crate::Config)).
//!
//! ## Resource format
//!
//! ```text
//! ; comment
//! [leap]
//! 1972-01-01 = -10
//! "2017-01-01" = "-37"
//! ```
//!
//! One `YYYY-MM-DD = <seconds>` pair per line. `;` and `#` start comments,
//! `[section]` headers are ignored, and keys/values may be double-quoted.
//! Any malformed line, duplicated date, or an empty table is a
//! configuration error raised at load time.

use chrono::{DateTime, NaiveDate, Utc};
use std::path::Path;
use std::str::FromStr;

use crate::error::{AstroTimeError, Result};

/// UTC − TAI used when an instant predates every entry of the table.
pub const DEFAULT_UTC_TAI: i32 = -37;

/// Table shipped with the crate (IERS Bulletin C, 1972–2017).
const BUNDLED: &str = include_str!("../data/leap_seconds.ini");

/// One row of the table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeapSecond {
    /// UTC date (00:00:00) from which the offset applies.
    pub effective: NaiveDate,
    /// UTC − TAI in seconds.
    pub utc_minus_tai: i32,
}

/// Immutable, date-ordered leap-second table.
///
/// With the `serde` feature it (de)serializes as its list of rows;
/// deserialization applies the same validation as [`new`](Self::new).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<LeapSecond>", into = "Vec<LeapSecond>")
)]
pub struct LeapSecondTable {
    entries: Vec<LeapSecond>,
    latest: NaiveDate,
}

impl LeapSecondTable {
    /// Build a table from `(effective date, UTC − TAI)` pairs in any order.
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NaiveDate, i32)>,
    {
        let mut entries: Vec<LeapSecond> = entries
            .into_iter()
            .map(|(effective, utc_minus_tai)| LeapSecond {
                effective,
                utc_minus_tai,
            })
            .collect();
        entries.sort();

        if let Some(pair) = entries
            .windows(2)
            .find(|pair| pair[0].effective == pair[1].effective)
        {
            return Err(AstroTimeError::LeapTableParse {
                line: 0,
                message: format!("date {} appears more than once", pair[0].effective),
            });
        }

        let latest = entries
            .last()
            .map(|entry| entry.effective)
            .ok_or(AstroTimeError::EmptyLeapTable)?;
        Ok(Self { entries, latest })
    }

    /// The table bundled with the crate.
    pub fn bundled() -> Result<Self> {
        let table = Self::parse(BUNDLED)?;
        tracing::debug!(
            source = "bundled",
            entries = table.len(),
            latest = %table.latest,
            "loaded leap-second table"
        );
        Ok(table)
    }

    /// Read and parse a table file. The file is closed before this returns.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| AstroTimeError::LeapTableIo {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(&text)?;
        tracing::debug!(
            source = %path.display(),
            entries = table.len(),
            latest = %table.latest,
            "loaded leap-second table"
        );
        Ok(table)
    }

    /// Parse the INI-like resource format described in the module docs.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = Vec::new();
        let mut seen = std::collections::HashMap::new();

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let content = raw.split([';', '#']).next().unwrap_or_default().trim();
            if content.is_empty() || (content.starts_with('[') && content.ends_with(']')) {
                continue;
            }

            let (key, value) = content.split_once('=').ok_or_else(|| parse_error(
                line,
                format!("expected `YYYY-MM-DD = seconds`, found `{content}`"),
            ))?;
            let key = unquote(key);
            let value = unquote(value);

            let effective = NaiveDate::parse_from_str(key, "%Y-%m-%d")
                .map_err(|e| parse_error(line, format!("bad date `{key}`: {e}")))?;
            let offset: i32 = value
                .parse()
                .map_err(|e| parse_error(line, format!("bad offset `{value}`: {e}")))?;

            if let Some(first) = seen.insert(effective, line) {
                return Err(parse_error(
                    line,
                    format!("date {effective} already defined on line {first}"),
                ));
            }
            rows.push((effective, offset));
        }

        Self::new(rows)
    }

    /// Rows in ascending date order.
    pub fn entries(&self) -> &[LeapSecond] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Date of the most recent entry.
    pub fn latest_date(&self) -> NaiveDate {
        self.latest
    }

    /// Offset of the most recent entry at or before `utc`, if any.
    pub fn lookup(&self, utc: &DateTime<Utc>) -> Option<i32> {
        let date = utc.date_naive();
        let idx = self.entries.partition_point(|entry| entry.effective <= date);
        idx.checked_sub(1).map(|i| self.entries[i].utc_minus_tai)
    }

    /// UTC − TAI at `utc`, falling back to [`DEFAULT_UTC_TAI`] when `utc`
    /// predates the table. The fallback is expected for historical dates and
    /// is only reported at debug level.
    pub fn utc_minus_tai(&self, utc: &DateTime<Utc>) -> i32 {
        self.lookup(utc).unwrap_or_else(|| {
            tracing::debug!(%utc, default = DEFAULT_UTC_TAI, "instant predates leap-second table");
            DEFAULT_UTC_TAI
        })
    }
}

impl TryFrom<Vec<LeapSecond>> for LeapSecondTable {
    type Error = AstroTimeError;

    fn try_from(rows: Vec<LeapSecond>) -> Result<Self> {
        Self::new(rows.into_iter().map(|row| (row.effective, row.utc_minus_tai)))
    }
}

impl From<LeapSecondTable> for Vec<LeapSecond> {
    fn from(table: LeapSecondTable) -> Self {
        table.entries
    }
}

impl FromStr for LeapSecondTable {
    type Err = AstroTimeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn unquote(s: &str) -> &str {
    s.trim().trim_matches('"').trim()
}

fn parse_error(line: usize, message: String) -> AstroTimeError {
    AstroTimeError::LeapTableParse { line, message }
}
