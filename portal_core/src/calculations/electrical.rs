//! # Electrical Calculators
//!
//! Ohm's law, voltage divider, power, reactance and RC time constant.
//!
//! ## Example
//!
//! ```rust
//! use portal_core::calculations::Calculation;
//! use portal_core::calculations::electrical::{OhmsLawInput, OhmsLawTarget};
//!
//! let input = OhmsLawInput {
//!     solve_for: OhmsLawTarget::Resistance,
//!     voltage_v: Some(12.0),
//!     current_a: Some(0.5),
//!     resistance_ohm: None,
//! };
//! let result = input.evaluate().unwrap();
//! assert_eq!(result.resistance_ohm, 24.0);
//! ```

use serde::{Deserialize, Serialize};

use super::{finite, finite_output, nonzero, positive, required, Calculation, Formula};
use crate::equations::electrical as eq;
use crate::errors::PortalResult;
use crate::units::{Farads, Henries, Microfarads, Millihenries};

// ============================================================================
// Ohm's Law
// ============================================================================

/// Which quantity Ohm's law solves for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OhmsLawTarget {
    Voltage,
    Current,
    Resistance,
}

impl OhmsLawTarget {
    /// Parse a selector name (`voltage`, `current`, `resistance`, or `v`/`i`/`r`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "voltage" | "v" => Some(OhmsLawTarget::Voltage),
            "current" | "i" => Some(OhmsLawTarget::Current),
            "resistance" | "r" => Some(OhmsLawTarget::Resistance),
            _ => None,
        }
    }

    /// Infer the target from which two of the three quantities are known.
    pub fn infer(voltage: Option<f64>, current: Option<f64>, resistance: Option<f64>) -> Option<Self> {
        match (voltage.is_some(), current.is_some(), resistance.is_some()) {
            (false, true, true) => Some(OhmsLawTarget::Voltage),
            (true, false, true) => Some(OhmsLawTarget::Current),
            (true, true, false) => Some(OhmsLawTarget::Resistance),
            _ => None,
        }
    }
}

/// Ohm's law: any two of {V, I, R} give the third.
///
/// The field named by `solve_for` is ignored even if present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhmsLawInput {
    /// Quantity to compute
    pub solve_for: OhmsLawTarget,
    /// Voltage in volts
    pub voltage_v: Option<f64>,
    /// Current in amperes
    pub current_a: Option<f64>,
    /// Resistance in ohms
    pub resistance_ohm: Option<f64>,
}

/// All three Ohm's law quantities after solving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhmsLawResult {
    pub solved: OhmsLawTarget,
    pub voltage_v: f64,
    pub current_a: f64,
    pub resistance_ohm: f64,
}

impl OhmsLawInput {
    /// Validate the two inputs the target needs.
    pub fn validate(&self) -> PortalResult<()> {
        match self.solve_for {
            OhmsLawTarget::Voltage => {
                finite("current_a", required("current_a", self.current_a)?)?;
                finite("resistance_ohm", required("resistance_ohm", self.resistance_ohm)?)?;
            }
            OhmsLawTarget::Current => {
                finite("voltage_v", required("voltage_v", self.voltage_v)?)?;
                nonzero("resistance_ohm", required("resistance_ohm", self.resistance_ohm)?)?;
            }
            OhmsLawTarget::Resistance => {
                finite("voltage_v", required("voltage_v", self.voltage_v)?)?;
                nonzero("current_a", required("current_a", self.current_a)?)?;
            }
        }
        Ok(())
    }
}

impl Calculation for OhmsLawInput {
    type Output = OhmsLawResult;

    fn formula(&self) -> Formula {
        Formula::OhmsLaw
    }

    fn calculate(&self) -> PortalResult<OhmsLawResult> {
        self.validate()?;
        let (voltage_v, current_a, resistance_ohm) = match self.solve_for {
            OhmsLawTarget::Voltage => {
                let (i, r) = (required("current_a", self.current_a)?, required("resistance_ohm", self.resistance_ohm)?);
                (eq::ohms_voltage(i, r), i, r)
            }
            OhmsLawTarget::Current => {
                let (v, r) = (required("voltage_v", self.voltage_v)?, required("resistance_ohm", self.resistance_ohm)?);
                (v, eq::ohms_current(v, r), r)
            }
            OhmsLawTarget::Resistance => {
                let (v, i) = (required("voltage_v", self.voltage_v)?, required("current_a", self.current_a)?);
                (v, i, eq::ohms_resistance(v, i))
            }
        };
        Ok(OhmsLawResult {
            solved: self.solve_for,
            voltage_v: finite_output(Formula::OhmsLaw, "voltage_v", voltage_v)?,
            current_a: finite_output(Formula::OhmsLaw, "current_a", current_a)?,
            resistance_ohm: finite_output(Formula::OhmsLaw, "resistance_ohm", resistance_ohm)?,
        })
    }
}

// ============================================================================
// Voltage Divider
// ============================================================================

/// Unloaded two-resistor divider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltageDividerInput {
    /// Input voltage in volts
    pub vin_v: f64,
    /// Top resistor in ohms
    pub r1_ohm: f64,
    /// Bottom resistor (output side) in ohms
    pub r2_ohm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltageDividerResult {
    /// Output voltage across R2 in volts
    pub vout_v: f64,
    /// Vout/Vin
    pub ratio: f64,
}

impl VoltageDividerInput {
    pub fn validate(&self) -> PortalResult<()> {
        finite("vin_v", self.vin_v)?;
        finite("r1_ohm", self.r1_ohm)?;
        finite("r2_ohm", self.r2_ohm)?;
        nonzero("r1_ohm + r2_ohm", self.r1_ohm + self.r2_ohm)?;
        Ok(())
    }
}

impl Calculation for VoltageDividerInput {
    type Output = VoltageDividerResult;

    fn formula(&self) -> Formula {
        Formula::VoltageDivider
    }

    fn calculate(&self) -> PortalResult<VoltageDividerResult> {
        self.validate()?;
        let vout = eq::voltage_divider_output(self.vin_v, self.r1_ohm, self.r2_ohm);
        let ratio = self.r2_ohm / (self.r1_ohm + self.r2_ohm);
        Ok(VoltageDividerResult {
            vout_v: finite_output(Formula::VoltageDivider, "vout_v", vout)?,
            ratio: finite_output(Formula::VoltageDivider, "ratio", ratio)?,
        })
    }
}

// ============================================================================
// Power
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerInput {
    /// Voltage in volts
    pub voltage_v: f64,
    /// Current in amperes
    pub current_a: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerResult {
    /// Dissipated power in watts
    pub power_w: f64,
}

impl Calculation for PowerInput {
    type Output = PowerResult;

    fn formula(&self) -> Formula {
        Formula::Power
    }

    fn calculate(&self) -> PortalResult<PowerResult> {
        finite("voltage_v", self.voltage_v)?;
        finite("current_a", self.current_a)?;
        Ok(PowerResult {
            power_w: finite_output(Formula::Power, "power_w", eq::power(self.voltage_v, self.current_a))?,
        })
    }
}

// ============================================================================
// Reactance
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacitiveReactanceInput {
    /// Capacitance in microfarads
    pub capacitance_uf: f64,
    /// Frequency in hertz
    pub frequency_hz: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacitiveReactanceResult {
    /// Reactance Xc in ohms
    pub reactance_ohm: f64,
}

impl Calculation for CapacitiveReactanceInput {
    type Output = CapacitiveReactanceResult;

    fn formula(&self) -> Formula {
        Formula::CapacitiveReactance
    }

    fn calculate(&self) -> PortalResult<CapacitiveReactanceResult> {
        positive("capacitance_uf", self.capacitance_uf)?;
        positive("frequency_hz", self.frequency_hz)?;
        let c: Farads = Microfarads(self.capacitance_uf).into();
        let xc = eq::capacitive_reactance(c.0, self.frequency_hz);
        Ok(CapacitiveReactanceResult {
            reactance_ohm: finite_output(Formula::CapacitiveReactance, "reactance_ohm", xc)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InductiveReactanceInput {
    /// Inductance in millihenries
    pub inductance_mh: f64,
    /// Frequency in hertz
    pub frequency_hz: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InductiveReactanceResult {
    /// Reactance XL in ohms
    pub reactance_ohm: f64,
}

impl Calculation for InductiveReactanceInput {
    type Output = InductiveReactanceResult;

    fn formula(&self) -> Formula {
        Formula::InductiveReactance
    }

    fn calculate(&self) -> PortalResult<InductiveReactanceResult> {
        positive("inductance_mh", self.inductance_mh)?;
        positive("frequency_hz", self.frequency_hz)?;
        let l: Henries = Millihenries(self.inductance_mh).into();
        let xl = eq::inductive_reactance(l.0, self.frequency_hz);
        Ok(InductiveReactanceResult {
            reactance_ohm: finite_output(Formula::InductiveReactance, "reactance_ohm", xl)?,
        })
    }
}

// ============================================================================
// RC Time Constant
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RcTimeConstantInput {
    /// Resistance in ohms
    pub resistance_ohm: f64,
    /// Capacitance in microfarads
    pub capacitance_uf: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RcTimeConstantResult {
    /// Time constant τ in seconds
    pub tau_s: f64,
    /// -3 dB cutoff frequency in hertz
    pub cutoff_hz: f64,
}

impl Calculation for RcTimeConstantInput {
    type Output = RcTimeConstantResult;

    fn formula(&self) -> Formula {
        Formula::RcTimeConstant
    }

    fn calculate(&self) -> PortalResult<RcTimeConstantResult> {
        // τ ends up in a divisor for fc, so neither factor may be zero
        positive("resistance_ohm", self.resistance_ohm)?;
        positive("capacitance_uf", self.capacitance_uf)?;
        let c: Farads = Microfarads(self.capacitance_uf).into();
        let tau = eq::rc_time_constant(self.resistance_ohm, c.0);
        Ok(RcTimeConstantResult {
            tau_s: finite_output(Formula::RcTimeConstant, "tau_s", tau)?,
            cutoff_hz: finite_output(Formula::RcTimeConstant, "cutoff_hz", eq::rc_cutoff_frequency(tau))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn ohms(solve_for: OhmsLawTarget, v: Option<f64>, i: Option<f64>, r: Option<f64>) -> OhmsLawInput {
        OhmsLawInput {
            solve_for,
            voltage_v: v,
            current_a: i,
            resistance_ohm: r,
        }
    }

    #[test]
    fn test_ohms_law_each_target() {
        let v = ohms(OhmsLawTarget::Voltage, None, Some(2.0), Some(6.0)).evaluate().unwrap();
        assert_eq!(v.voltage_v, 12.0);
        let i = ohms(OhmsLawTarget::Current, Some(12.0), None, Some(6.0)).evaluate().unwrap();
        assert_eq!(i.current_a, 2.0);
        let r = ohms(OhmsLawTarget::Resistance, Some(12.0), Some(2.0), None).evaluate().unwrap();
        assert_eq!(r.resistance_ohm, 6.0);
    }

    #[test]
    fn test_ohms_law_roundtrip_property() {
        for &(v, i) in &[(12.0, 0.5), (5.0, 3.0), (0.7, 1e-3), (-24.0, 2.5), (230.0, 13.0)] {
            let r = ohms(OhmsLawTarget::Resistance, Some(v), Some(i), None)
                .evaluate()
                .unwrap()
                .resistance_ohm;
            let v_back = ohms(OhmsLawTarget::Voltage, None, Some(i), Some(r))
                .evaluate()
                .unwrap()
                .voltage_v;
            assert!(approx_eq(v_back, v, 1e-9 * v.abs()));
        }
    }

    #[test]
    fn test_ohms_law_zero_divisor_rejected() {
        assert!(ohms(OhmsLawTarget::Resistance, Some(12.0), Some(0.0), None).evaluate().is_none());
        assert!(ohms(OhmsLawTarget::Current, Some(12.0), None, Some(0.0)).evaluate().is_none());
        // zero is fine outside a divisor
        assert!(ohms(OhmsLawTarget::Voltage, None, Some(0.0), Some(10.0)).evaluate().is_some());
    }

    #[test]
    fn test_ohms_law_missing_and_nan() {
        assert!(ohms(OhmsLawTarget::Voltage, None, Some(1.0), None).evaluate().is_none());
        assert!(ohms(OhmsLawTarget::Voltage, None, Some(f64::NAN), Some(1.0)).evaluate().is_none());
    }

    #[test]
    fn test_ohms_target_inference() {
        assert_eq!(OhmsLawTarget::infer(None, Some(1.0), Some(2.0)), Some(OhmsLawTarget::Voltage));
        assert_eq!(OhmsLawTarget::infer(Some(1.0), None, Some(2.0)), Some(OhmsLawTarget::Current));
        assert_eq!(OhmsLawTarget::infer(Some(1.0), Some(2.0), None), Some(OhmsLawTarget::Resistance));
        assert_eq!(OhmsLawTarget::infer(Some(1.0), Some(2.0), Some(3.0)), None);
        assert_eq!(OhmsLawTarget::parse(" Current "), Some(OhmsLawTarget::Current));
        assert_eq!(OhmsLawTarget::parse("watts"), None);
    }

    #[test]
    fn test_voltage_divider_exact() {
        let result = VoltageDividerInput { vin_v: 12.0, r1_ohm: 1000.0, r2_ohm: 2000.0 }
            .evaluate()
            .unwrap();
        assert_eq!(result.vout_v, 8.0);
        assert!(approx_eq(result.ratio, 2.0 / 3.0, 1e-15));
    }

    #[test]
    fn test_voltage_divider_zero_total_resistance() {
        let input = VoltageDividerInput { vin_v: 12.0, r1_ohm: 0.0, r2_ohm: 0.0 };
        assert!(input.evaluate().is_none());
        assert_eq!(input.calculate().unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_power() {
        let result = PowerInput { voltage_v: 12.0, current_a: 0.25 }.evaluate().unwrap();
        assert_eq!(result.power_w, 3.0);
        assert!(PowerInput { voltage_v: f64::NAN, current_a: 1.0 }.evaluate().is_none());
    }

    #[test]
    fn test_capacitive_reactance_unit_conversion() {
        // 1 µF at 1 kHz
        let result = CapacitiveReactanceInput { capacitance_uf: 1.0, frequency_hz: 1000.0 }
            .evaluate()
            .unwrap();
        assert!(approx_eq(result.reactance_ohm, 159.154_943, 1e-5));
        assert!(CapacitiveReactanceInput { capacitance_uf: 1.0, frequency_hz: 0.0 }.evaluate().is_none());
    }

    #[test]
    fn test_inductive_reactance_unit_conversion() {
        // 10 mH at 1 kHz
        let result = InductiveReactanceInput { inductance_mh: 10.0, frequency_hz: 1000.0 }
            .evaluate()
            .unwrap();
        assert!(approx_eq(result.reactance_ohm, 62.831_853, 1e-5));
    }

    #[test]
    fn test_rc_time_constant() {
        // 10 kΩ, 1 µF
        let result = RcTimeConstantInput { resistance_ohm: 10_000.0, capacitance_uf: 1.0 }
            .evaluate()
            .unwrap();
        assert!(approx_eq(result.tau_s, 0.01, 1e-15));
        assert!(approx_eq(result.cutoff_hz, 15.915_494, 1e-5));
        assert!(RcTimeConstantInput { resistance_ohm: 0.0, capacitance_uf: 1.0 }.evaluate().is_none());
    }
}
