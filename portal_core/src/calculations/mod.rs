//! # Engineering Calculators
//!
//! Every calculator follows the same pattern:
//!
//! - `*Input` - Named inputs, each field carrying its unit in its name (JSON-serializable)
//! - `*Result` - Named outputs plus a categorical label where the domain has one
//! - [`Calculation::calculate`] - Validate, then evaluate; rich error on rejection
//! - [`Calculation::evaluate`] - The shell-facing form: `Some(result)` or no result
//!
//! A calculator never returns a partial or approximate result. Any missing,
//! non-finite or out-of-domain input (zero divisor, negative square-root
//! argument, non-positive logarithm argument) rejects the whole calculation.
//!
//! ## Available Calculators
//!
//! - [`electrical`] - Ohm's law, voltage divider, power, reactance, RC
//! - [`mechanical`] - Reynolds, pressure drop, stress, buckling, gearing, shafts
//! - [`rf`] - L-network match, VSWR, frequency/wavelength, path loss, SNR, antennas
//! - [`thermal`] - Conduction, convection, fin efficiency
//!
//! ## Example
//!
//! ```rust
//! use portal_core::calculations::{Calculation, electrical::VoltageDividerInput};
//!
//! let input = VoltageDividerInput { vin_v: 12.0, r1_ohm: 1000.0, r2_ohm: 2000.0 };
//! let result = input.evaluate().unwrap();
//! assert_eq!(result.vout_v, 8.0);
//! ```

pub mod electrical;
pub mod fields;
pub mod mechanical;
pub mod registry;
pub mod rf;
pub mod thermal;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{PortalError, PortalResult};

pub use electrical::{
    CapacitiveReactanceInput, CapacitiveReactanceResult, InductiveReactanceInput,
    InductiveReactanceResult, OhmsLawInput, OhmsLawResult, OhmsLawTarget, PowerInput,
    PowerResult, RcTimeConstantInput, RcTimeConstantResult, VoltageDividerInput,
    VoltageDividerResult,
};
pub use fields::FieldMap;
pub use mechanical::{
    AxialStressInput, AxialStressResult, BendingStressInput, BendingStressResult,
    EulerBucklingInput, EulerBucklingResult, GearRatioInput, GearRatioResult, PressureDropInput,
    PressureDropResult, ReynoldsInput, ReynoldsResult, ShaftSizingInput, ShaftSizingResult,
    TorqueTransferInput, TorqueTransferResult, TorsionalStressInput, TorsionalStressResult,
};
pub use registry::{Domain, Formula, FormulaMetadata, Variable};
pub use rf::{
    AntennaLengthInput, AntennaLengthResult, ConversionTarget, FrequencyWavelengthInput,
    FrequencyWavelengthResult, ImpedanceMatchInput, ImpedanceMatchResult, PathLossInput,
    PathLossResult, SnrInput, SnrResult, VswrInput, VswrResult,
};
pub use thermal::{
    ConductionInput, ConductionResult, ConvectionInput, ConvectionResult, FinEfficiencyInput,
    FinEfficiencyResult,
};

/// A single closed-form calculator.
pub trait Calculation {
    /// Named outputs of this calculator
    type Output;

    /// Which registry entry this calculator implements
    fn formula(&self) -> Formula;

    /// Validate inputs and evaluate the formula.
    fn calculate(&self) -> PortalResult<Self::Output>;

    /// Evaluate, collapsing every rejection into "no result".
    fn evaluate(&self) -> Option<Self::Output> {
        match self.calculate() {
            Ok(output) => Some(output),
            Err(err) => {
                debug!(formula = self.formula().id(), error = %err, "calculation produced no result");
                None
            }
        }
    }
}

// ============================================================================
// Shared input checks
// ============================================================================

/// Input must be a finite number.
pub(crate) fn finite(field: &str, value: f64) -> PortalResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PortalError::invalid_input(field, value.to_string(), "Value must be a finite number"))
    }
}

/// Input sits in a divisor position and must be finite and non-zero.
pub(crate) fn nonzero(field: &str, value: f64) -> PortalResult<f64> {
    finite(field, value)?;
    if value == 0.0 {
        return Err(PortalError::invalid_input(field, value.to_string(), "Value must be non-zero"));
    }
    Ok(value)
}

/// Input must be finite and strictly positive (logarithm / square-root domain).
pub(crate) fn positive(field: &str, value: f64) -> PortalResult<f64> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(PortalError::invalid_input(field, value.to_string(), "Value must be positive"));
    }
    Ok(value)
}

/// Optional input with a documented default; a present value must be positive.
pub(crate) fn positive_or(field: &str, value: Option<f64>, default: f64) -> PortalResult<f64> {
    match value {
        Some(v) => positive(field, v),
        None => Ok(default),
    }
}

/// Optional input present, or the selector says it is needed.
pub(crate) fn required(field: &str, value: Option<f64>) -> PortalResult<f64> {
    value.ok_or_else(|| PortalError::missing_field(field))
}

/// Every output must be finite; overflow to ±∞ or NaN is no result.
pub(crate) fn finite_output(formula: Formula, field: &str, value: f64) -> PortalResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PortalError::calculation_failed(
            formula.id(),
            format!("{} evaluated to {}", field, value),
        ))
    }
}

// ============================================================================
// Heterogeneous wrappers
// ============================================================================

/// Enum wrapper for all calculator inputs.
///
/// Serializes with a `"type"` discriminator so a shell can send any
/// calculation as one JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    OhmsLaw(OhmsLawInput),
    VoltageDivider(VoltageDividerInput),
    Power(PowerInput),
    CapacitiveReactance(CapacitiveReactanceInput),
    InductiveReactance(InductiveReactanceInput),
    RcTimeConstant(RcTimeConstantInput),
    Reynolds(ReynoldsInput),
    PressureDrop(PressureDropInput),
    AxialStress(AxialStressInput),
    BendingStress(BendingStressInput),
    TorsionalStress(TorsionalStressInput),
    EulerBuckling(EulerBucklingInput),
    GearRatio(GearRatioInput),
    TorqueTransfer(TorqueTransferInput),
    ShaftSizing(ShaftSizingInput),
    ImpedanceMatch(ImpedanceMatchInput),
    Vswr(VswrInput),
    FrequencyWavelength(FrequencyWavelengthInput),
    PathLoss(PathLossInput),
    Snr(SnrInput),
    AntennaLength(AntennaLengthInput),
    Conduction(ConductionInput),
    Convection(ConvectionInput),
    FinEfficiency(FinEfficiencyInput),
}

/// Enum wrapper for all calculator outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    OhmsLaw(OhmsLawResult),
    VoltageDivider(VoltageDividerResult),
    Power(PowerResult),
    CapacitiveReactance(CapacitiveReactanceResult),
    InductiveReactance(InductiveReactanceResult),
    RcTimeConstant(RcTimeConstantResult),
    Reynolds(ReynoldsResult),
    PressureDrop(PressureDropResult),
    AxialStress(AxialStressResult),
    BendingStress(BendingStressResult),
    TorsionalStress(TorsionalStressResult),
    EulerBuckling(EulerBucklingResult),
    GearRatio(GearRatioResult),
    TorqueTransfer(TorqueTransferResult),
    ShaftSizing(ShaftSizingResult),
    ImpedanceMatch(ImpedanceMatchResult),
    Vswr(VswrResult),
    FrequencyWavelength(FrequencyWavelengthResult),
    PathLoss(PathLossResult),
    Snr(SnrResult),
    AntennaLength(AntennaLengthResult),
    Conduction(ConductionResult),
    Convection(ConvectionResult),
    FinEfficiency(FinEfficiencyResult),
}

/// Dispatch a method over every `CalculationItem` variant, wrapping the
/// output in the matching `CalculationOutput` variant.
macro_rules! dispatch {
    ($item:expr, $input:ident => $body:expr) => {
        match $item {
            CalculationItem::OhmsLaw($input) => $body.map(CalculationOutput::OhmsLaw),
            CalculationItem::VoltageDivider($input) => $body.map(CalculationOutput::VoltageDivider),
            CalculationItem::Power($input) => $body.map(CalculationOutput::Power),
            CalculationItem::CapacitiveReactance($input) => $body.map(CalculationOutput::CapacitiveReactance),
            CalculationItem::InductiveReactance($input) => $body.map(CalculationOutput::InductiveReactance),
            CalculationItem::RcTimeConstant($input) => $body.map(CalculationOutput::RcTimeConstant),
            CalculationItem::Reynolds($input) => $body.map(CalculationOutput::Reynolds),
            CalculationItem::PressureDrop($input) => $body.map(CalculationOutput::PressureDrop),
            CalculationItem::AxialStress($input) => $body.map(CalculationOutput::AxialStress),
            CalculationItem::BendingStress($input) => $body.map(CalculationOutput::BendingStress),
            CalculationItem::TorsionalStress($input) => $body.map(CalculationOutput::TorsionalStress),
            CalculationItem::EulerBuckling($input) => $body.map(CalculationOutput::EulerBuckling),
            CalculationItem::GearRatio($input) => $body.map(CalculationOutput::GearRatio),
            CalculationItem::TorqueTransfer($input) => $body.map(CalculationOutput::TorqueTransfer),
            CalculationItem::ShaftSizing($input) => $body.map(CalculationOutput::ShaftSizing),
            CalculationItem::ImpedanceMatch($input) => $body.map(CalculationOutput::ImpedanceMatch),
            CalculationItem::Vswr($input) => $body.map(CalculationOutput::Vswr),
            CalculationItem::FrequencyWavelength($input) => $body.map(CalculationOutput::FrequencyWavelength),
            CalculationItem::PathLoss($input) => $body.map(CalculationOutput::PathLoss),
            CalculationItem::Snr($input) => $body.map(CalculationOutput::Snr),
            CalculationItem::AntennaLength($input) => $body.map(CalculationOutput::AntennaLength),
            CalculationItem::Conduction($input) => $body.map(CalculationOutput::Conduction),
            CalculationItem::Convection($input) => $body.map(CalculationOutput::Convection),
            CalculationItem::FinEfficiency($input) => $body.map(CalculationOutput::FinEfficiency),
        }
    };
}

impl CalculationItem {
    /// Registry entry for this item
    pub fn formula(&self) -> Formula {
        match self {
            CalculationItem::OhmsLaw(_) => Formula::OhmsLaw,
            CalculationItem::VoltageDivider(_) => Formula::VoltageDivider,
            CalculationItem::Power(_) => Formula::Power,
            CalculationItem::CapacitiveReactance(_) => Formula::CapacitiveReactance,
            CalculationItem::InductiveReactance(_) => Formula::InductiveReactance,
            CalculationItem::RcTimeConstant(_) => Formula::RcTimeConstant,
            CalculationItem::Reynolds(_) => Formula::Reynolds,
            CalculationItem::PressureDrop(_) => Formula::PressureDrop,
            CalculationItem::AxialStress(_) => Formula::AxialStress,
            CalculationItem::BendingStress(_) => Formula::BendingStress,
            CalculationItem::TorsionalStress(_) => Formula::TorsionalStress,
            CalculationItem::EulerBuckling(_) => Formula::EulerBuckling,
            CalculationItem::GearRatio(_) => Formula::GearRatio,
            CalculationItem::TorqueTransfer(_) => Formula::TorqueTransfer,
            CalculationItem::ShaftSizing(_) => Formula::ShaftSizing,
            CalculationItem::ImpedanceMatch(_) => Formula::ImpedanceMatch,
            CalculationItem::Vswr(_) => Formula::Vswr,
            CalculationItem::FrequencyWavelength(_) => Formula::FrequencyWavelength,
            CalculationItem::PathLoss(_) => Formula::PathLoss,
            CalculationItem::Snr(_) => Formula::Snr,
            CalculationItem::AntennaLength(_) => Formula::AntennaLength,
            CalculationItem::Conduction(_) => Formula::Conduction,
            CalculationItem::Convection(_) => Formula::Convection,
            CalculationItem::FinEfficiency(_) => Formula::FinEfficiency,
        }
    }

    /// Validate and evaluate, keeping the rejection reason.
    pub fn calculate(&self) -> PortalResult<CalculationOutput> {
        dispatch!(self, input => input.calculate())
    }

    /// Evaluate with the "no result" contract.
    pub fn evaluate(&self) -> Option<CalculationOutput> {
        dispatch!(self, input => input.evaluate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checks() {
        assert!(finite("x", f64::NAN).is_err());
        assert!(finite("x", f64::INFINITY).is_err());
        assert_eq!(finite("x", -3.0).unwrap(), -3.0);
        assert!(nonzero("x", 0.0).is_err());
        assert!(nonzero("x", -0.0).is_err());
        assert!(positive("x", 0.0).is_err());
        assert!(positive("x", 1e-300).is_ok());
        assert_eq!(required("x", None).unwrap_err().error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_finite_output() {
        let err = finite_output(Formula::Power, "power_w", f64::INFINITY).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_item_dispatch() {
        let item = CalculationItem::VoltageDivider(VoltageDividerInput {
            vin_v: 12.0,
            r1_ohm: 1000.0,
            r2_ohm: 2000.0,
        });
        assert_eq!(item.formula(), Formula::VoltageDivider);
        match item.evaluate() {
            Some(CalculationOutput::VoltageDivider(r)) => assert_eq!(r.vout_v, 8.0),
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[test]
    fn test_item_rejection_is_no_result() {
        let item = CalculationItem::Power(PowerInput {
            voltage_v: f64::NAN,
            current_a: 1.0,
        });
        assert!(item.evaluate().is_none());
        assert_eq!(item.calculate().unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_item_json_tag() {
        let item = CalculationItem::Power(PowerInput {
            voltage_v: 5.0,
            current_a: 0.5,
        });
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"type\":\"Power\""));
        let roundtrip: CalculationItem = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, item);
    }
}
