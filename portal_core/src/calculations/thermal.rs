//! # Thermal Calculators
//!
//! Plane-wall conduction, surface convection and pin-fin efficiency. SI units.

use serde::{Deserialize, Serialize};

use super::{finite, finite_output, nonzero, positive, positive_or, Calculation, Formula};
use crate::equations::thermal::{self as eq, DEFAULT_FIN_CONDUCTIVITY, DEFAULT_FIN_CONVECTION};
use crate::errors::PortalResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConductionInput {
    /// Thermal conductivity k (W/m·K)
    pub conductivity_w_mk: f64,
    /// Wall area A (m²)
    pub area_m2: f64,
    /// Wall thickness t (m)
    pub thickness_m: f64,
    /// Temperature difference across the wall ΔT (K)
    pub temp_diff_k: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConductionResult {
    /// Heat rate Q (W)
    pub heat_rate_w: f64,
}

impl Calculation for ConductionInput {
    type Output = ConductionResult;

    fn formula(&self) -> Formula {
        Formula::Conduction
    }

    fn calculate(&self) -> PortalResult<ConductionResult> {
        finite("conductivity_w_mk", self.conductivity_w_mk)?;
        finite("area_m2", self.area_m2)?;
        nonzero("thickness_m", self.thickness_m)?;
        finite("temp_diff_k", self.temp_diff_k)?;
        let q = eq::conduction_heat_rate(self.conductivity_w_mk, self.area_m2, self.thickness_m, self.temp_diff_k);
        Ok(ConductionResult {
            heat_rate_w: finite_output(Formula::Conduction, "heat_rate_w", q)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvectionInput {
    /// Convection coefficient h (W/m²·K)
    pub convection_w_m2k: f64,
    /// Surface area A (m²)
    pub area_m2: f64,
    /// Surface-to-fluid temperature difference ΔT (K)
    pub temp_diff_k: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvectionResult {
    /// Heat rate Q (W)
    pub heat_rate_w: f64,
}

impl Calculation for ConvectionInput {
    type Output = ConvectionResult;

    fn formula(&self) -> Formula {
        Formula::Convection
    }

    fn calculate(&self) -> PortalResult<ConvectionResult> {
        finite("convection_w_m2k", self.convection_w_m2k)?;
        finite("area_m2", self.area_m2)?;
        finite("temp_diff_k", self.temp_diff_k)?;
        let q = eq::convection_heat_rate(self.convection_w_m2k, self.area_m2, self.temp_diff_k);
        Ok(ConvectionResult {
            heat_rate_w: finite_output(Formula::Convection, "heat_rate_w", q)?,
        })
    }
}

/// Pin fin with adiabatic tip.
///
/// h and k fall back to 25 W/m²·K and 200 W/m·K (aluminium in still air).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinEfficiencyInput {
    /// Fin length L (m)
    pub length_m: f64,
    /// Fin diameter D (m)
    pub diameter_m: f64,
    /// Convection coefficient h (W/m²·K)
    #[serde(default)]
    pub convection_w_m2k: Option<f64>,
    /// Fin conductivity k (W/m·K)
    #[serde(default)]
    pub conductivity_w_mk: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinEfficiencyResult {
    /// Fin parameter m (1/m)
    pub m: f64,
    /// η as a fraction
    pub efficiency: f64,
    /// η in percent
    pub efficiency_percent: f64,
}

impl Calculation for FinEfficiencyInput {
    type Output = FinEfficiencyResult;

    fn formula(&self) -> Formula {
        Formula::FinEfficiency
    }

    fn calculate(&self) -> PortalResult<FinEfficiencyResult> {
        // mL is the divisor of tanh(mL)/(mL)
        positive("length_m", self.length_m)?;
        positive("diameter_m", self.diameter_m)?;
        let h = positive_or("convection_w_m2k", self.convection_w_m2k, DEFAULT_FIN_CONVECTION)?;
        let k = positive_or("conductivity_w_mk", self.conductivity_w_mk, DEFAULT_FIN_CONDUCTIVITY)?;
        let m = finite_output(Formula::FinEfficiency, "m", eq::pin_fin_m(h, k, self.diameter_m))?;
        let efficiency = finite_output(Formula::FinEfficiency, "efficiency", eq::fin_efficiency(m, self.length_m))?;
        Ok(FinEfficiencyResult {
            m,
            efficiency,
            efficiency_percent: efficiency * 100.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_conduction_brick_wall() {
        let result = ConductionInput {
            conductivity_w_mk: 0.72,
            area_m2: 10.0,
            thickness_m: 0.2,
            temp_diff_k: 20.0,
        }
        .evaluate()
        .unwrap();
        assert!(approx_eq(result.heat_rate_w, 720.0, 1e-9));
    }

    #[test]
    fn test_conduction_zero_thickness() {
        let input = ConductionInput {
            conductivity_w_mk: 0.72,
            area_m2: 10.0,
            thickness_m: 0.0,
            temp_diff_k: 20.0,
        };
        assert!(input.evaluate().is_none());
    }

    #[test]
    fn test_convection() {
        let result = ConvectionInput {
            convection_w_m2k: 25.0,
            area_m2: 2.0,
            temp_diff_k: 30.0,
        }
        .evaluate()
        .unwrap();
        assert!(approx_eq(result.heat_rate_w, 1500.0, 1e-12));
    }

    #[test]
    fn test_fin_efficiency_defaults() {
        // D = 5 mm, L = 50 mm: m = √(4·25/(200·0.005)) = 10, mL = 0.5
        let result = FinEfficiencyInput {
            length_m: 0.05,
            diameter_m: 0.005,
            convection_w_m2k: None,
            conductivity_w_mk: None,
        }
        .evaluate()
        .unwrap();
        assert!(approx_eq(result.m, 10.0, 1e-9));
        assert!(approx_eq(result.efficiency, 0.5_f64.tanh() / 0.5, 1e-12));
        assert!(approx_eq(result.efficiency_percent, 92.423, 1e-3));
    }

    #[test]
    fn test_fin_efficiency_rejections() {
        let zero_length = FinEfficiencyInput {
            length_m: 0.0,
            diameter_m: 0.005,
            convection_w_m2k: None,
            conductivity_w_mk: None,
        };
        assert!(zero_length.evaluate().is_none());
        let negative_k = FinEfficiencyInput {
            length_m: 0.05,
            diameter_m: 0.005,
            convection_w_m2k: None,
            conductivity_w_mk: Some(-200.0),
        };
        assert!(negative_k.evaluate().is_none());
    }
}
