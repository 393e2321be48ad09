//! # Mechanical Calculators
//!
//! Fluid flow, structural stress and power transmission.
//!
//! Structural calculators use the N / mm / MPa convention throughout
//! (1 N/mm² = 1 MPa). Fluid calculators are SI. Torque transfer and shaft
//! sizing take torque in N·m.

use serde::{Deserialize, Serialize};

use super::{finite, finite_output, nonzero, positive, positive_or, Calculation, Formula};
use crate::equations::mechanical::{self as eq, FlowRegime};
use crate::equations::mechanical::{
    DEFAULT_ELASTIC_MODULUS_MPA, DEFAULT_FRICTION_FACTOR, DEFAULT_GEAR_EFFICIENCY,
    DEFAULT_YIELD_STRENGTH_MPA,
};
use crate::errors::PortalResult;
use crate::units::{Kilonewtons, Newtons};

// ============================================================================
// Fluid Flow
// ============================================================================

/// Reynolds number for pipe flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReynoldsInput {
    /// Fluid density ρ (kg/m³)
    pub density_kg_m3: f64,
    /// Mean velocity v (m/s)
    pub velocity_m_s: f64,
    /// Pipe inner diameter D (m)
    pub diameter_m: f64,
    /// Dynamic viscosity µ (Pa·s)
    pub viscosity_pa_s: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReynoldsResult {
    /// Reynolds number (dimensionless)
    pub reynolds: f64,
    /// Laminar / Transitional / Turbulent
    pub regime: FlowRegime,
}

impl ReynoldsInput {
    pub fn validate(&self) -> PortalResult<()> {
        finite("density_kg_m3", self.density_kg_m3)?;
        finite("velocity_m_s", self.velocity_m_s)?;
        finite("diameter_m", self.diameter_m)?;
        nonzero("viscosity_pa_s", self.viscosity_pa_s)?;
        Ok(())
    }
}

impl Calculation for ReynoldsInput {
    type Output = ReynoldsResult;

    fn formula(&self) -> Formula {
        Formula::Reynolds
    }

    fn calculate(&self) -> PortalResult<ReynoldsResult> {
        self.validate()?;
        let re = eq::reynolds_number(
            self.density_kg_m3,
            self.velocity_m_s,
            self.diameter_m,
            self.viscosity_pa_s,
        );
        let reynolds = finite_output(Formula::Reynolds, "reynolds", re)?;
        Ok(ReynoldsResult {
            reynolds,
            regime: FlowRegime::classify(reynolds),
        })
    }
}

/// Straight-pipe pressure drop with a fixed Darcy friction factor.
///
/// Roughness is reported back as relative roughness only; it does not
/// feed the friction factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureDropInput {
    /// Fluid density ρ (kg/m³)
    pub density_kg_m3: f64,
    /// Mean velocity v (m/s)
    pub velocity_m_s: f64,
    /// Pipe length L (m)
    pub length_m: f64,
    /// Pipe inner diameter D (m)
    pub diameter_m: f64,
    /// Absolute wall roughness ε (m)
    pub roughness_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureDropResult {
    /// ΔP (Pa)
    pub pressure_drop_pa: f64,
    /// ΔP (kPa)
    pub pressure_drop_kpa: f64,
    /// Darcy friction factor used
    pub friction_factor: f64,
    /// ε/D
    pub relative_roughness: f64,
}

impl PressureDropInput {
    pub fn validate(&self) -> PortalResult<()> {
        finite("density_kg_m3", self.density_kg_m3)?;
        finite("velocity_m_s", self.velocity_m_s)?;
        finite("length_m", self.length_m)?;
        nonzero("diameter_m", self.diameter_m)?;
        finite("roughness_m", self.roughness_m)?;
        Ok(())
    }
}

impl Calculation for PressureDropInput {
    type Output = PressureDropResult;

    fn formula(&self) -> Formula {
        Formula::PressureDrop
    }

    fn calculate(&self) -> PortalResult<PressureDropResult> {
        self.validate()?;
        let dp = eq::darcy_pressure_drop(
            DEFAULT_FRICTION_FACTOR,
            self.length_m,
            self.diameter_m,
            self.density_kg_m3,
            self.velocity_m_s,
        );
        let pressure_drop_pa = finite_output(Formula::PressureDrop, "pressure_drop_pa", dp)?;
        Ok(PressureDropResult {
            pressure_drop_pa,
            pressure_drop_kpa: pressure_drop_pa / 1000.0,
            friction_factor: DEFAULT_FRICTION_FACTOR,
            relative_roughness: finite_output(
                Formula::PressureDrop,
                "relative_roughness",
                self.roughness_m / self.diameter_m,
            )?,
        })
    }
}

// ============================================================================
// Structural Stress
// ============================================================================

/// Axial stress with safety factor against yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxialStressInput {
    /// Axial force F (N)
    pub force_n: f64,
    /// Cross-section area A (mm²)
    pub area_mm2: f64,
    /// Yield strength σy (MPa), 250 when absent
    #[serde(default)]
    pub yield_strength_mpa: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxialStressResult {
    /// σ (MPa)
    pub stress_mpa: f64,
    /// σy/σ
    pub safety_factor: f64,
    /// Yield strength actually used (MPa)
    pub yield_strength_mpa: f64,
}

impl AxialStressInput {
    pub fn validate(&self) -> PortalResult<()> {
        nonzero("force_n", self.force_n)?;
        nonzero("area_mm2", self.area_mm2)?;
        positive_or("yield_strength_mpa", self.yield_strength_mpa, DEFAULT_YIELD_STRENGTH_MPA)?;
        Ok(())
    }
}

impl Calculation for AxialStressInput {
    type Output = AxialStressResult;

    fn formula(&self) -> Formula {
        Formula::AxialStress
    }

    fn calculate(&self) -> PortalResult<AxialStressResult> {
        // σ is the divisor of the safety factor, so F is non-zero too
        self.validate()?;
        let yield_strength =
            positive_or("yield_strength_mpa", self.yield_strength_mpa, DEFAULT_YIELD_STRENGTH_MPA)?;
        let stress = finite_output(
            Formula::AxialStress,
            "stress_mpa",
            eq::axial_stress(self.force_n, self.area_mm2),
        )?;
        Ok(AxialStressResult {
            stress_mpa: stress,
            safety_factor: finite_output(
                Formula::AxialStress,
                "safety_factor",
                eq::safety_factor(yield_strength, stress),
            )?,
            yield_strength_mpa: yield_strength,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BendingStressInput {
    /// Bending moment M (N·mm)
    pub moment_n_mm: f64,
    /// Distance from neutral axis c (mm)
    pub distance_mm: f64,
    /// Second moment of area I (mm⁴)
    pub moment_of_inertia_mm4: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BendingStressResult {
    /// σb (MPa)
    pub stress_mpa: f64,
}

impl Calculation for BendingStressInput {
    type Output = BendingStressResult;

    fn formula(&self) -> Formula {
        Formula::BendingStress
    }

    fn calculate(&self) -> PortalResult<BendingStressResult> {
        finite("moment_n_mm", self.moment_n_mm)?;
        finite("distance_mm", self.distance_mm)?;
        nonzero("moment_of_inertia_mm4", self.moment_of_inertia_mm4)?;
        let sigma = eq::bending_stress(self.moment_n_mm, self.distance_mm, self.moment_of_inertia_mm4);
        Ok(BendingStressResult {
            stress_mpa: finite_output(Formula::BendingStress, "stress_mpa", sigma)?,
        })
    }
}

/// Torsion of a solid circular shaft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorsionalStressInput {
    /// Torque T (N·mm)
    pub torque_n_mm: f64,
    /// Shaft radius r (mm)
    pub radius_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorsionalStressResult {
    /// J = πr⁴/2 (mm⁴)
    pub polar_moment_mm4: f64,
    /// τ at the surface (MPa)
    pub shear_stress_mpa: f64,
}

impl Calculation for TorsionalStressInput {
    type Output = TorsionalStressResult;

    fn formula(&self) -> Formula {
        Formula::TorsionalStress
    }

    fn calculate(&self) -> PortalResult<TorsionalStressResult> {
        finite("torque_n_mm", self.torque_n_mm)?;
        positive("radius_mm", self.radius_mm)?;
        Ok(TorsionalStressResult {
            polar_moment_mm4: finite_output(
                Formula::TorsionalStress,
                "polar_moment_mm4",
                eq::solid_shaft_polar_moment(self.radius_mm),
            )?,
            shear_stress_mpa: finite_output(
                Formula::TorsionalStress,
                "shear_stress_mpa",
                eq::torsional_stress(self.torque_n_mm, self.radius_mm),
            )?,
        })
    }
}

/// Euler critical load of a pin-ended column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EulerBucklingInput {
    /// Elastic modulus E (MPa), 200 000 when absent
    #[serde(default)]
    pub elastic_modulus_mpa: Option<f64>,
    /// Second moment of area I (mm⁴)
    pub moment_of_inertia_mm4: f64,
    /// Effective length L (mm)
    pub length_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EulerBucklingResult {
    /// Pcr (N)
    pub critical_load_n: f64,
    /// Pcr (kN)
    pub critical_load_kn: f64,
    /// Elastic modulus actually used (MPa)
    pub elastic_modulus_mpa: f64,
}

impl Calculation for EulerBucklingInput {
    type Output = EulerBucklingResult;

    fn formula(&self) -> Formula {
        Formula::EulerBuckling
    }

    fn calculate(&self) -> PortalResult<EulerBucklingResult> {
        let e = positive_or("elastic_modulus_mpa", self.elastic_modulus_mpa, DEFAULT_ELASTIC_MODULUS_MPA)?;
        finite("moment_of_inertia_mm4", self.moment_of_inertia_mm4)?;
        nonzero("length_mm", self.length_mm)?;
        let pcr = finite_output(
            Formula::EulerBuckling,
            "critical_load_n",
            eq::euler_buckling_load(e, self.moment_of_inertia_mm4, self.length_mm),
        )?;
        let kn: Kilonewtons = Newtons(pcr).into();
        Ok(EulerBucklingResult {
            critical_load_n: pcr,
            critical_load_kn: kn.value(),
            elastic_modulus_mpa: e,
        })
    }
}

// ============================================================================
// Power Transmission
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearRatioInput {
    /// Teeth on the driving gear
    pub teeth_driver: f64,
    /// Teeth on the driven gear
    pub teeth_driven: f64,
    /// Input speed (rpm)
    pub rpm_in: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearRatioResult {
    /// driven/driver
    pub ratio: f64,
    /// Output speed (rpm)
    pub rpm_out: f64,
}

impl Calculation for GearRatioInput {
    type Output = GearRatioResult;

    fn formula(&self) -> Formula {
        Formula::GearRatio
    }

    fn calculate(&self) -> PortalResult<GearRatioResult> {
        // ratio is itself a divisor for rpm_out
        positive("teeth_driver", self.teeth_driver)?;
        positive("teeth_driven", self.teeth_driven)?;
        finite("rpm_in", self.rpm_in)?;
        let ratio = finite_output(
            Formula::GearRatio,
            "ratio",
            eq::gear_ratio(self.teeth_driver, self.teeth_driven),
        )?;
        Ok(GearRatioResult {
            ratio,
            rpm_out: finite_output(Formula::GearRatio, "rpm_out", eq::gear_output_rpm(self.rpm_in, ratio))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorqueTransferInput {
    /// Input torque (N·m)
    pub torque_in_n_m: f64,
    /// Teeth on the driving gear
    pub teeth_driver: f64,
    /// Teeth on the driven gear
    pub teeth_driven: f64,
    /// Mesh efficiency η (0..1], 0.95 when absent
    #[serde(default)]
    pub efficiency: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorqueTransferResult {
    pub ratio: f64,
    /// Output torque (N·m)
    pub torque_out_n_m: f64,
    /// Efficiency actually used
    pub efficiency: f64,
}

impl Calculation for TorqueTransferInput {
    type Output = TorqueTransferResult;

    fn formula(&self) -> Formula {
        Formula::TorqueTransfer
    }

    fn calculate(&self) -> PortalResult<TorqueTransferResult> {
        finite("torque_in_n_m", self.torque_in_n_m)?;
        positive("teeth_driver", self.teeth_driver)?;
        positive("teeth_driven", self.teeth_driven)?;
        let efficiency = positive_or("efficiency", self.efficiency, DEFAULT_GEAR_EFFICIENCY)?;
        let ratio = eq::gear_ratio(self.teeth_driver, self.teeth_driven);
        Ok(TorqueTransferResult {
            ratio: finite_output(Formula::TorqueTransfer, "ratio", ratio)?,
            torque_out_n_m: finite_output(
                Formula::TorqueTransfer,
                "torque_out_n_m",
                eq::gear_output_torque(self.torque_in_n_m, ratio, efficiency),
            )?,
            efficiency,
        })
    }
}

/// Minimum solid-shaft diameter at 40 MPa allowable shear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaftSizingInput {
    /// Transmitted torque T (N·m)
    pub torque_n_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaftSizingResult {
    /// Minimum diameter (mm)
    pub min_diameter_mm: f64,
}

impl Calculation for ShaftSizingInput {
    type Output = ShaftSizingResult;

    fn formula(&self) -> Formula {
        Formula::ShaftSizing
    }

    fn calculate(&self) -> PortalResult<ShaftSizingResult> {
        positive("torque_n_m", self.torque_n_m)?;
        Ok(ShaftSizingResult {
            min_diameter_mm: finite_output(
                Formula::ShaftSizing,
                "min_diameter_mm",
                eq::min_shaft_diameter_mm(self.torque_n_m).0,
            )?,
        })
    }
}
