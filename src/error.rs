// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every conversion in the crate.
//!
//! Two families exist:
//!
//! * **Invalid arguments**: non-finite numbers or civil fields that do not
//!   name a real date/time. These surface at the call that received them.
//! * **Configuration errors**: the leap-second resource could not be read or
//!   parsed. These surface when the table is loaded, never mid-conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by time-scale and calendar conversions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AstroTimeError {
    /// A numeric input was NaN or infinite.
    #[error("invalid numeric input for {context}: {value}")]
    NonFinite {
        /// Name of the quantity that was rejected.
        context: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Civil fields, a date string, or a timestamp that does not map to a
    /// representable date/time.
    #[error("invalid date/time: {0}")]
    InvalidDateTime(String),

    /// The leap-second resource could not be read.
    #[error("cannot read leap-second table {}: {source}", path.display())]
    LeapTableIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of the leap-second resource is malformed.
    #[error("leap-second table, line {line}: {message}")]
    LeapTableParse { line: usize, message: String },

    /// The leap-second resource contains no entries.
    #[error("leap-second table has no entries")]
    EmptyLeapTable,
}

impl AstroTimeError {
    /// `true` for errors raised while loading configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::LeapTableIo { .. } | Self::LeapTableParse { .. } | Self::EmptyLeapTable
        )
    }

    pub(crate) fn invalid_date_time(message: impl Into<String>) -> Self {
        Self::InvalidDateTime(message.into())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AstroTimeError>;

/// Rejects NaN and infinities.
#[inline]
pub(crate) fn ensure_finite(context: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AstroTimeError::NonFinite { context, value })
    }
}
