// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Typed day counts.
//!
//! [`Time<S>`] stores a scalar quantity in [`Days`] whose *meaning* is fixed
//! by the compile-time marker `S: DayScale`: a Julian Day, a Modified Julian
//! Day, and so on. Converting between markers is a constant offset routed
//! through the absolute Julian Day, so `Time<JD>` and `Time<MJD>` can never be
//! mixed up by accident.
//!
//! Unlike a physical time scale, a day scale says nothing about *which* clock
//! the day count was read from; the Julian Day of an [`Instant`](crate::Instant)
//! is on the UTC axis, exactly as produced by the calendar formulas.

use qtty::*;
use std::marker::PhantomData;
use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ═══════════════════════════════════════════════════════════════════════════
// DayScale trait
// ═══════════════════════════════════════════════════════════════════════════

/// Marker trait for day-count scales.
///
/// A scale defines a display **label** and a pair of conversions between
/// its native quantity and the absolute **Julian Day**.
pub trait DayScale: Copy + Clone + std::fmt::Debug + PartialEq + PartialOrd + 'static {
    /// Display label used by [`Time`] formatting.
    const LABEL: &'static str;

    /// Convert a quantity in this scale to an absolute Julian Day.
    fn to_jd(value: Days) -> Days;

    /// Convert an absolute Julian Day back to this scale.
    fn from_jd(jd: Days) -> Days;
}

// ═══════════════════════════════════════════════════════════════════════════
// Time<S>
// ═══════════════════════════════════════════════════════════════════════════

/// A day count on scale `S`.
///
/// `PhantomData` is zero-sized, so `Time<S>` is layout-identical to a single
/// `f64`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Time<S: DayScale> {
    quantity: Days,
    _scale: PhantomData<S>,
}

impl<S: DayScale> Time<S> {
    /// Create from a raw scalar (days since the scale's epoch).
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
            _scale: PhantomData,
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self {
            quantity: days,
            _scale: PhantomData,
        }
    }

    /// The underlying quantity in days.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Absolute Julian Day of this count.
    #[inline]
    pub fn julian_day(&self) -> Days {
        S::to_jd(self.quantity)
    }

    /// Build a count from an absolute Julian Day.
    #[inline]
    pub fn from_julian_day(jd: Days) -> Self {
        Self::from_days(S::from_jd(jd))
    }

    /// Re-express this count on another day scale.
    #[inline]
    pub fn to<T: DayScale>(&self) -> Time<T> {
        Time::<T>::from_julian_day(S::to_jd(self.quantity))
    }
}

impl<S: DayScale> std::fmt::Display for Time<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", S::LABEL, self.quantity)
    }
}

#[cfg(feature = "serde")]
impl<S: DayScale> Serialize for Time<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de, S: DayScale> Deserialize<'de> for Time<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

/// Serialize a [`Seconds`] quantity as a bare `f64`.
#[cfg(feature = "serde")]
pub(crate) mod serde_seconds {
    use qtty::Seconds;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Seconds, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.value())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Seconds, D::Error> {
        f64::deserialize(deserializer).map(Seconds::new)
    }
}

impl<S: DayScale> Add<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl<S: DayScale> Sub<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl<S: DayScale> Sub for Time<S> {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

impl<S: DayScale> From<Days> for Time<S> {
    #[inline]
    fn from(days: Days) -> Self {
        Self::from_days(days)
    }
}

impl<S: DayScale> From<Time<S>> for Days {
    #[inline]
    fn from(time: Time<S>) -> Self {
        time.quantity
    }
}
