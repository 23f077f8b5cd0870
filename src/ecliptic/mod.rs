// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Low-precision ecliptic longitudes of the Sun and the Moon.
//!
//! Both bodies use the same evaluator ([`Series`]): a short sum of cosine
//! terms plus a mean longitude that is linear in time, all in degrees. The
//! argument `t` is Julian centuries since J2000.0. The solar model is fed
//! the UTC-based century and the lunar model the TT-based one (see
//! [`Instant::sun_longitude`](crate::Instant::sun_longitude) and
//! [`Instant::moon_longitude`](crate::Instant::moon_longitude)).
//!
//! Accuracy is of the order of 0.01° for the Sun and 0.1° for the Moon
//! within a few centuries of J2000.

mod moon;
mod series;
mod sun;

pub use moon::{lunar_longitude, MOON};
pub use series::{PeriodicTerm, Series};
pub use sun::{solar_longitude, SUN};
