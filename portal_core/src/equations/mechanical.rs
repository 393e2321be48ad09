//! # Mechanical Formulas
//!
//! Fluid flow, structural stress and power-transmission relationships.
//!
//! ## Notation
//!
//! - `ρ` = Density (kg/m³)
//! - `v` = Velocity (m/s)
//! - `D` = Diameter (m)
//! - `µ` = Dynamic viscosity (Pa·s)
//! - `F` = Force, `A` = Area, `σ` = Normal stress, `τ` = Shear stress
//! - `M` = Bending moment, `T` = Torque, `I` = Second moment of area
//! - `E` = Elastic modulus, `L` = Length
//!
//! Structural formulas are unit-agnostic; the calculators document the
//! N / mm / MPa convention the portal uses.
//!
//! ## References
//!
//! - Munson, Fundamentals of Fluid Mechanics (Reynolds number, Darcy–Weisbach)
//! - Hibbeler, Mechanics of Materials (stress, torsion, Euler buckling)

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::units::{Meters, Millimeters};

/// Upper bound (exclusive) of laminar pipe flow
pub const LAMINAR_LIMIT: f64 = 2300.0;

/// Lower bound (exclusive) of fully turbulent pipe flow
pub const TURBULENT_LIMIT: f64 = 4000.0;

/// Yield strength assumed when none is given (MPa, mild structural steel)
pub const DEFAULT_YIELD_STRENGTH_MPA: f64 = 250.0;

/// Elastic modulus assumed when none is given (MPa, steel)
pub const DEFAULT_ELASTIC_MODULUS_MPA: f64 = 200_000.0;

/// Fixed Darcy friction factor of the simplified pressure-drop calculator
pub const DEFAULT_FRICTION_FACTOR: f64 = 0.02;

/// Gear mesh efficiency assumed when none is given
pub const DEFAULT_GEAR_EFFICIENCY: f64 = 0.95;

/// Allowable shear stress used for shaft sizing (MPa, steel shaft)
pub const SHAFT_ALLOWABLE_SHEAR_MPA: f64 = 40.0;

// =============================================================================
// FLUID FLOW
// =============================================================================

/// Pipe flow regime derived from the Reynolds number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowRegime {
    Laminar,
    Transitional,
    Turbulent,
}

impl FlowRegime {
    /// Classify a Reynolds number.
    ///
    /// - Re < 2300 → Laminar
    /// - 2300 ≤ Re ≤ 4000 → Transitional (both bounds inclusive)
    /// - Re > 4000 → Turbulent
    pub fn classify(reynolds: f64) -> Self {
        if reynolds < LAMINAR_LIMIT {
            FlowRegime::Laminar
        } else if reynolds > TURBULENT_LIMIT {
            FlowRegime::Turbulent
        } else {
            FlowRegime::Transitional
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            FlowRegime::Laminar => "Laminar",
            FlowRegime::Transitional => "Transitional",
            FlowRegime::Turbulent => "Turbulent",
        }
    }
}

impl std::fmt::Display for FlowRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Reynolds number for pipe flow.
///
/// # Formula
/// Re = ρvD/µ
#[inline]
pub fn reynolds_number(density: f64, velocity: f64, diameter: f64, viscosity: f64) -> f64 {
    density * velocity * diameter / viscosity
}

/// Darcy–Weisbach pressure drop along a straight pipe.
///
/// # Formula
/// ΔP = f·(L/D)·(ρv²/2)
///
/// # Returns
/// Pressure drop in Pa when inputs are SI
#[inline]
pub fn darcy_pressure_drop(friction_factor: f64, length: f64, diameter: f64, density: f64, velocity: f64) -> f64 {
    friction_factor * (length / diameter) * (density * velocity * velocity) / 2.0
}

// =============================================================================
// STRUCTURAL STRESS
// =============================================================================

/// Normal stress under a pure axial load.
///
/// # Formula
/// σ = F/A
#[inline]
pub fn axial_stress(force: f64, area: f64) -> f64 {
    force / area
}

/// Ratio of yield strength to working stress.
///
/// # Formula
/// SF = σy/σ
#[inline]
pub fn safety_factor(yield_strength: f64, stress: f64) -> f64 {
    yield_strength / stress
}

/// Flexural stress at distance c from the neutral axis.
///
/// # Formula
/// σb = M·c/I
#[inline]
pub fn bending_stress(moment: f64, distance: f64, moment_of_inertia: f64) -> f64 {
    moment * distance / moment_of_inertia
}

/// Polar second moment of area of a solid circular shaft.
///
/// # Formula
/// J = πr⁴/2
#[inline]
pub fn solid_shaft_polar_moment(radius: f64) -> f64 {
    PI * radius.powi(4) / 2.0
}

/// Shear stress at the surface of a solid circular shaft under torque.
///
/// # Formula
/// τ = T·r/J, with J = πr⁴/2
#[inline]
pub fn torsional_stress(torque: f64, radius: f64) -> f64 {
    torque * radius / solid_shaft_polar_moment(radius)
}

/// Euler critical buckling load of a pin-ended column.
///
/// # Formula
/// Pcr = π²EI/L²
#[inline]
pub fn euler_buckling_load(elastic_modulus: f64, moment_of_inertia: f64, length: f64) -> f64 {
    PI * PI * elastic_modulus * moment_of_inertia / (length * length)
}

// =============================================================================
// POWER TRANSMISSION
// =============================================================================

/// Speed reduction ratio of a gear pair (driven / driver).
///
/// # Formula
/// ratio = N2/N1
#[inline]
pub fn gear_ratio(teeth_driver: f64, teeth_driven: f64) -> f64 {
    teeth_driven / teeth_driver
}

/// Output speed of a gear pair.
///
/// # Formula
/// rpm_out = rpm_in/ratio
#[inline]
pub fn gear_output_rpm(rpm_in: f64, ratio: f64) -> f64 {
    rpm_in / ratio
}

/// Output torque of a gear pair with mesh losses.
///
/// # Formula
/// T_out = T_in·ratio·η
#[inline]
pub fn gear_output_torque(torque_in: f64, ratio: f64, efficiency: f64) -> f64 {
    torque_in * ratio * efficiency
}

/// Minimum solid shaft diameter for a torque at the fixed allowable shear.
///
/// # Formula
/// d = ∛(16T/(π·τ_allow)) × 1000
///
/// The cube root is read as metres and reported in millimetres, which is the
/// ×1000 scaling of the published shaft-sizing calculator. The 40 MPa
/// allowable is from the same calculator.
#[inline]
pub fn min_shaft_diameter_mm(torque: f64) -> Millimeters {
    Meters(((16.0 * torque) / (PI * SHAFT_ALLOWABLE_SHEAR_MPA)).cbrt()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_reynolds_water_pipe() {
        // Water at 20 °C, 1 m/s in a 50 mm pipe
        let re = reynolds_number(998.0, 1.0, 0.05, 1.002e-3);
        assert!(approx_eq(re, 49_800.4, 0.5));
        assert_eq!(FlowRegime::classify(re), FlowRegime::Turbulent);
    }

    #[test]
    fn test_flow_regime_boundaries() {
        assert_eq!(FlowRegime::classify(2299.999), FlowRegime::Laminar);
        assert_eq!(FlowRegime::classify(2300.0), FlowRegime::Transitional);
        assert_eq!(FlowRegime::classify(2301.0), FlowRegime::Transitional);
        assert_eq!(FlowRegime::classify(4000.0), FlowRegime::Transitional);
        assert_eq!(FlowRegime::classify(4001.0), FlowRegime::Turbulent);
    }

    #[test]
    fn test_pressure_drop() {
        // f=0.02, L/D=100, ρv²/2 = 1000*4/2 = 2000 → 4000 Pa
        let dp = darcy_pressure_drop(0.02, 10.0, 0.1, 1000.0, 2.0);
        assert!(approx_eq(dp, 4000.0, 1e-9));
    }

    #[test]
    fn test_axial_and_safety_factor() {
        let sigma = axial_stress(10_000.0, 100.0);
        assert_eq!(sigma, 100.0);
        assert_eq!(safety_factor(DEFAULT_YIELD_STRENGTH_MPA, sigma), 2.5);
    }

    #[test]
    fn test_bending_stress() {
        assert!(approx_eq(bending_stress(1.0e6, 50.0, 2.0e6), 25.0, 1e-12));
    }

    #[test]
    fn test_torsion_solid_shaft() {
        // τ = T·r/J = 2T/(πr³)
        let t: f64 = 1000.0;
        let r: f64 = 10.0;
        let expected = 2.0 * t / (PI * r.powi(3));
        assert!(approx_eq(torsional_stress(t, r), expected, 1e-12));
    }

    #[test]
    fn test_euler_buckling() {
        let pcr = euler_buckling_load(DEFAULT_ELASTIC_MODULUS_MPA, 1.0e6, 2000.0);
        // π² × 200000 × 1e6 / 4e6 ≈ 493 480 N
        assert!(approx_eq(pcr, 493_480.22, 0.01));
    }

    #[test]
    fn test_gear_train() {
        let ratio = gear_ratio(20.0, 60.0);
        assert_eq!(ratio, 3.0);
        assert_eq!(gear_output_rpm(1800.0, ratio), 600.0);
        assert!(approx_eq(gear_output_torque(10.0, ratio, DEFAULT_GEAR_EFFICIENCY), 28.5, 1e-12));
    }

    #[test]
    fn test_shaft_diameter() {
        // (16·100/(π·40))^(1/3) × 1000 ≈ 2335.09
        let d = min_shaft_diameter_mm(100.0);
        assert!(approx_eq(d.0, 2335.09, 0.01));
        // d scales with ∛T
        assert!(approx_eq(min_shaft_diameter_mm(800.0).0, 2.0 * d.0, 1e-9));
    }
}
