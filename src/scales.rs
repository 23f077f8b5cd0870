// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Day-scale marker types.
//!
//! | Marker | Description | Epoch (JD) |
//! |--------|-------------|------------|
//! | [`JD`] | Julian Day | 0.0 |
//! | [`MJD`] | Modified Julian Day | 2 400 000.5 |

use super::time::DayScale;
use qtty::Days;

/// Julian Day, the identity scale.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JD;

impl DayScale for JD {
    const LABEL: &'static str = "JD";

    #[inline(always)]
    fn to_jd(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_jd(jd: Days) -> Days {
        jd
    }
}

/// Modified Julian Day: JD minus 2 400 000.5.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct MJD;

/// `JD = MJD + MJD_EPOCH`.
pub(crate) const MJD_EPOCH: Days = Days::new(2_400_000.5);

impl DayScale for MJD {
    const LABEL: &'static str = "MJD";

    #[inline(always)]
    fn to_jd(value: Days) -> Days {
        value + MJD_EPOCH
    }

    #[inline(always)]
    fn from_jd(jd: Days) -> Days {
        jd - MJD_EPOCH
    }
}

/// Generate pairwise `From<Time<A>> for Time<B>` implementations.
macro_rules! impl_day_conversions {
    ($single:ty) => {};

    ($first:ty, $($rest:ty),+ $(,)?) => {
        $(
            impl From<super::time::Time<$first>> for super::time::Time<$rest> {
                #[inline]
                fn from(t: super::time::Time<$first>) -> Self {
                    t.to::<$rest>()
                }
            }

            impl From<super::time::Time<$rest>> for super::time::Time<$first> {
                #[inline]
                fn from(t: super::time::Time<$rest>) -> Self {
                    t.to::<$first>()
                }
            }
        )+

        impl_day_conversions!($($rest),+);
    };
}

impl_day_conversions!(JD, MJD);
