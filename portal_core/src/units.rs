//! # Unit Types
//!
//! Type-safe wrappers for the unit boundaries the calculators cross. Inputs
//! arrive in the units engineers type into a form (µF, mH, MHz, cm, km) and
//! the formulas work in base SI units.
//!
//! The wrappers are plain `f64` newtypes so JSON stays clean (just numbers).
//!
//! ## Example
//!
//! ```rust
//! use portal_core::units::{Megahertz, Hertz, Centimeters, Meters};
//!
//! let f: Hertz = Megahertz(2400.0).into();
//! assert_eq!(f.0, 2.4e9);
//!
//! let len: Meters = Centimeters(12.5).into();
//! assert_eq!(len.0, 0.125);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Capacitance / Inductance
// ============================================================================

/// Capacitance in farads
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Farads(pub f64);

/// Capacitance in microfarads
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Microfarads(pub f64);

impl From<Microfarads> for Farads {
    fn from(uf: Microfarads) -> Self {
        Farads(uf.0 * 1e-6)
    }
}

/// Inductance in henries
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Henries(pub f64);

/// Inductance in millihenries
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millihenries(pub f64);

impl From<Millihenries> for Henries {
    fn from(mh: Millihenries) -> Self {
        Henries(mh.0 * 1e-3)
    }
}

// ============================================================================
// Frequency
// ============================================================================

/// Frequency in hertz
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hertz(pub f64);

/// Frequency in megahertz
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megahertz(pub f64);

impl From<Megahertz> for Hertz {
    fn from(mhz: Megahertz) -> Self {
        Hertz(mhz.0 * 1e6)
    }
}

impl From<Hertz> for Megahertz {
    fn from(hz: Hertz) -> Self {
        Megahertz(hz.0 / 1e6)
    }
}

// ============================================================================
// Length
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in kilometers
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilometers(pub f64);

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

impl From<Meters> for Centimeters {
    fn from(m: Meters) -> Self {
        Centimeters(m.0 * 100.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

// ============================================================================
// Force
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

impl From<Newtons> for Kilonewtons {
    fn from(n: Newtons) -> Self {
        Kilonewtons(n.0 / 1000.0)
    }
}

impl From<Kilonewtons> for Newtons {
    fn from(kn: Kilonewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
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

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Farads);
impl_arithmetic!(Microfarads);
impl_arithmetic!(Henries);
impl_arithmetic!(Millihenries);
impl_arithmetic!(Hertz);
impl_arithmetic!(Megahertz);
impl_arithmetic!(Meters);
impl_arithmetic!(Centimeters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(Kilometers);
impl_arithmetic!(Newtons);
impl_arithmetic!(Kilonewtons);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_microfarads_to_farads() {
        let f: Farads = Microfarads(10.0).into();
        assert!((f.0 - 1e-5).abs() < 1e-18);
    }

    #[test]
    fn test_millihenries_to_henries() {
        let h: Henries = Millihenries(2.5).into();
        assert!((h.0 - 0.0025).abs() < 1e-15);
    }

    #[test]
    fn test_megahertz_hertz_roundtrip() {
        let hz: Hertz = Megahertz(915.0).into();
        assert_eq!(hz.0, 915e6);
        let mhz: Megahertz = hz.into();
        assert_eq!(mhz.0, 915.0);
    }

    #[test]
    fn test_lengths() {
        let m: Meters = Centimeters(250.0).into();
        assert_eq!(m.0, 2.5);
        let mm: Millimeters = m.into();
        assert_eq!(mm.0, 2500.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Meters(10.0);
        let b = Meters(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_serialization() {
        let f = Megahertz(2400.5);
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(json, "2400.5");
    }
}
