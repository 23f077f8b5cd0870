// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Explicit conversion context.
//!
//! Everything an [`Instant`](crate::Instant) needs beyond its own date/time
//! lives here and is passed in by the caller: the leap-second table, the
//! observed UT1 − UTC, and the timezone used to read civil fields and decide
//! the calendar system. Nothing is taken from process state.

use chrono::{FixedOffset, Offset, Utc};
use qtty::Seconds;
use std::path::Path;
use std::sync::Arc;

use crate::error::{ensure_finite, Result};
use crate::leap_seconds::LeapSecondTable;

/// Conversion context shared by [`Instant`](crate::Instant)s.
///
/// Cloning is cheap; the leap-second table is behind an [`Arc`].
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    leap_seconds: Arc<LeapSecondTable>,
    delta_ut1: Seconds,
    offset: FixedOffset,
}

impl Config {
    /// ΔUT1 = 0 and UTC as the local timezone.
    pub fn new(leap_seconds: impl Into<Arc<LeapSecondTable>>) -> Self {
        Self {
            leap_seconds: leap_seconds.into(),
            delta_ut1: Seconds::new(0.0),
            offset: Utc.fix(),
        }
    }

    /// Context backed by the leap-second table bundled with the crate.
    pub fn bundled() -> Result<Self> {
        LeapSecondTable::bundled().map(Self::new)
    }

    /// Context backed by a leap-second table read from `path`.
    pub fn from_leap_file(path: impl AsRef<Path>) -> Result<Self> {
        LeapSecondTable::from_path(path).map(Self::new)
    }

    /// Set UT1 − UTC. Rejects NaN and infinities.
    pub fn with_delta_ut1(mut self, delta_ut1: Seconds) -> Result<Self> {
        ensure_finite("ΔUT1", delta_ut1.value())?;
        self.delta_ut1 = delta_ut1;
        Ok(self)
    }

    /// Set the caller's timezone.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn leap_seconds(&self) -> &LeapSecondTable {
        &self.leap_seconds
    }

    /// Shared handle to the leap-second table.
    pub fn leap_seconds_arc(&self) -> Arc<LeapSecondTable> {
        Arc::clone(&self.leap_seconds)
    }

    pub fn delta_ut1(&self) -> Seconds {
        self.delta_ut1
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}
