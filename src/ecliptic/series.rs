// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Periodic-series evaluator.

use qtty::Centuries;

use crate::angle::{degree_cos, normalize_angle};
use crate::error::{ensure_finite, Result};

/// One term `A · cos(k·t + θ)`, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicTerm {
    /// Amplitude `A` in degrees.
    pub amplitude: f64,
    /// Angular rate `k` in degrees per Julian century.
    pub rate: f64,
    /// Phase `θ` in degrees.
    pub phase: f64,
    /// Amplitude is `A · t` instead of `A`.
    pub scales_with_t: bool,
}

impl PeriodicTerm {
    pub const fn new(amplitude: f64, rate: f64, phase: f64) -> Self {
        Self {
            amplitude,
            rate,
            phase,
            scales_with_t: false,
        }
    }

    /// A term whose amplitude grows linearly with `t`.
    pub const fn secular(amplitude: f64, rate: f64, phase: f64) -> Self {
        Self {
            amplitude,
            rate,
            phase,
            scales_with_t: true,
        }
    }

    /// Normalized argument `k·t + θ` in `[0, 360)`.
    #[inline]
    pub fn angle(&self, t: f64) -> f64 {
        normalize_angle(self.rate * t + self.phase)
    }

    /// Contribution of this term at `t`.
    #[inline]
    pub fn evaluate(&self, t: f64) -> f64 {
        let amplitude = if self.scales_with_t {
            self.amplitude * t
        } else {
            self.amplitude
        };
        amplitude * degree_cos(self.angle(t))
    }
}

/// Periodic terms plus the mean longitude `P₂ + P₁·t`.
#[derive(Debug, Clone, Copy)]
pub struct Series {
    pub terms: &'static [PeriodicTerm],
    /// Mean motion `P₁` in degrees per Julian century.
    pub mean_motion: f64,
    /// Mean longitude at J2000.0, `P₂`, in degrees.
    pub mean_longitude: f64,
}

impl Series {
    /// Longitude in degrees, in `[0, 360)`.
    ///
    /// Terms are summed in table order; the mean longitude is reduced in two
    /// steps (`P₁·t`, then `+ P₂`) before being added to the sum.
    pub fn evaluate(&self, t: Centuries) -> Result<f64> {
        let t = ensure_finite("Julian century", t.value())?;

        let periodic: f64 = self.terms.iter().map(|term| term.evaluate(t)).sum();
        let mean = normalize_angle(self.mean_motion * t);
        let mean = normalize_angle(self.mean_longitude + mean);
        Ok(normalize_angle(periodic + mean))
    }
}
