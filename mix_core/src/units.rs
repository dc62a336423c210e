//! # Unit Types
//!
//! Type-safe wrappers for the metric units used in a concrete takeoff.
//! Plain f64 newtypes so JSON stays clean (just numbers).
//!
//! Readymix works in metres and cubic metres only; there is no unit
//! conversion.
//!
//! ## Example
//!
//! ```rust
//! use mix_core::units::{CubicMeters, Meters};
//!
//! let volume = Meters(10.0).cube_with(Meters(5.0), Meters(0.2));
//! assert!((volume.0 - 10.0).abs() < 1e-9);
//!
//! let total: CubicMeters = [CubicMeters(1.5), CubicMeters(2.25)].into_iter().sum();
//! assert_eq!(total.0, 3.75);
//! ```

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Sub};

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Volume in cubic metres (m³, "루베" on site)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl Meters {
    /// Volume of a rectangular block with this length and the two other edges.
    pub fn cube_with(self, second: Meters, third: Meters) -> CubicMeters {
        CubicMeters(self.0 * second.0 * third.0)
    }
}

impl CubicMeters {
    /// Round to two decimal places (centi-cubic-metre resolution).
    pub fn rounded(self) -> Self {
        CubicMeters(round_to_hundredths(self.0))
    }
}

impl Sum for CubicMeters {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(CubicMeters(0.0), |acc, v| acc + v)
    }
}

/// Round a value to two decimal places.
///
/// Goes through std's fixed-precision formatting, which rounds the exact
/// binary value half to even (0.125 -> 0.12, 2.675 -> 2.67).
pub fn round_to_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(CubicMeters);
