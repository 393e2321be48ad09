//! # Formula Registry
//!
//! Central list of every calculator the portal offers, with the metadata a
//! shell needs to render a form for it: identifier, domain, localized title
//! key, the formula as text, and the named input and output fields.
//!
//! ## Usage
//!
//! ```rust
//! use portal_core::calculations::{FieldMap, Formula};
//!
//! let formula = Formula::from_id("voltage-divider").unwrap();
//! let fields = FieldMap::new()
//!     .with("vin_v", "12")
//!     .with("r1_ohm", "1000")
//!     .with("r2_ohm", "2000");
//! let item = formula.build(&fields).unwrap();
//! assert!(item.evaluate().is_some());
//! ```

use serde::{Deserialize, Serialize};

use super::electrical::{
    CapacitiveReactanceInput, InductiveReactanceInput, OhmsLawInput, OhmsLawTarget, PowerInput,
    RcTimeConstantInput, VoltageDividerInput,
};
use super::fields::FieldMap;
use super::mechanical::{
    AxialStressInput, BendingStressInput, EulerBucklingInput, GearRatioInput, PressureDropInput,
    ReynoldsInput, ShaftSizingInput, TorqueTransferInput, TorsionalStressInput,
};
use super::rf::{
    AntennaLengthInput, ConversionTarget, FrequencyWavelengthInput, ImpedanceMatchInput,
    PathLossInput, SnrInput, VswrInput,
};
use super::thermal::{ConductionInput, ConvectionInput, FinEfficiencyInput};
use super::CalculationItem;
use crate::errors::{PortalError, PortalResult};

// ============================================================================
// Domains
// ============================================================================

/// Engineering sector a calculator belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Electrical,
    Mechanical,
    Rf,
    Thermal,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Electrical => "electrical",
            Domain::Mechanical => "mechanical",
            Domain::Rf => "rf",
            Domain::Thermal => "thermal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "electrical" | "electronics" => Some(Domain::Electrical),
            "mechanical" | "mechanics" => Some(Domain::Mechanical),
            "rf" | "microwave" => Some(Domain::Rf),
            "thermal" => Some(Domain::Thermal),
            _ => None,
        }
    }

    /// Localization key of the sector heading
    pub fn title_key(&self) -> &'static str {
        match self {
            Domain::Electrical => "calculator.electronics.title",
            Domain::Mechanical => "calculator.mechanics.title",
            Domain::Rf => "calculator.rf.title",
            Domain::Thermal => "calculator.thermal.title",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// One named field of a calculator form or result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    /// Field name as used by [`FieldMap`] and the JSON input
    pub name: &'static str,
    /// Symbol (e.g., "Vin", "ρ")
    pub symbol: &'static str,
    /// Unit (empty for dimensionless)
    pub unit: &'static str,
    /// Whether the form must fill it in
    pub required: bool,
}

impl Variable {
    pub const fn new(name: &'static str, symbol: &'static str, unit: &'static str) -> Self {
        Self { name, symbol, unit, required: true }
    }

    /// An input that may be left blank (defaulted or selector-inferred)
    pub const fn optional(name: &'static str, symbol: &'static str, unit: &'static str) -> Self {
        Self { name, symbol, unit, required: false }
    }
}

// ============================================================================
// Formula Metadata
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct FormulaMetadata {
    /// Kebab-case identifier (e.g., "ohms-law")
    pub id: &'static str,
    pub domain: Domain,
    /// Localization key of the calculator card title
    pub title_key: &'static str,
    /// The formula in plain text
    pub expression: &'static str,
    pub inputs: Vec<Variable>,
    pub outputs: Vec<Variable>,
}

// ============================================================================
// Formula Enum
// ============================================================================

/// Every calculator in the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    // Electrical
    OhmsLaw,
    VoltageDivider,
    Power,
    CapacitiveReactance,
    InductiveReactance,
    RcTimeConstant,
    // Mechanical: fluid
    Reynolds,
    PressureDrop,
    // Mechanical: structural
    AxialStress,
    BendingStress,
    TorsionalStress,
    EulerBuckling,
    // Mechanical: gears and shafts
    GearRatio,
    TorqueTransfer,
    ShaftSizing,
    // RF
    ImpedanceMatch,
    Vswr,
    FrequencyWavelength,
    PathLoss,
    Snr,
    AntennaLength,
    // Thermal
    Conduction,
    Convection,
    FinEfficiency,
}

/// All formulas in display order
pub static ALL_FORMULAS: &[Formula] = &[
    Formula::OhmsLaw,
    Formula::VoltageDivider,
    Formula::Power,
    Formula::CapacitiveReactance,
    Formula::InductiveReactance,
    Formula::RcTimeConstant,
    Formula::Reynolds,
    Formula::PressureDrop,
    Formula::AxialStress,
    Formula::BendingStress,
    Formula::TorsionalStress,
    Formula::EulerBuckling,
    Formula::GearRatio,
    Formula::TorqueTransfer,
    Formula::ShaftSizing,
    Formula::ImpedanceMatch,
    Formula::Vswr,
    Formula::FrequencyWavelength,
    Formula::PathLoss,
    Formula::Snr,
    Formula::AntennaLength,
    Formula::Conduction,
    Formula::Convection,
    Formula::FinEfficiency,
];

impl Formula {
    /// Kebab-case identifier
    pub fn id(&self) -> &'static str {
        match self {
            Formula::OhmsLaw => "ohms-law",
            Formula::VoltageDivider => "voltage-divider",
            Formula::Power => "power",
            Formula::CapacitiveReactance => "capacitive-reactance",
            Formula::InductiveReactance => "inductive-reactance",
            Formula::RcTimeConstant => "rc-time-constant",
            Formula::Reynolds => "reynolds",
            Formula::PressureDrop => "pressure-drop",
            Formula::AxialStress => "axial-stress",
            Formula::BendingStress => "bending-stress",
            Formula::TorsionalStress => "torsional-stress",
            Formula::EulerBuckling => "euler-buckling",
            Formula::GearRatio => "gear-ratio",
            Formula::TorqueTransfer => "torque-transfer",
            Formula::ShaftSizing => "shaft-sizing",
            Formula::ImpedanceMatch => "impedance-match",
            Formula::Vswr => "vswr",
            Formula::FrequencyWavelength => "frequency-wavelength",
            Formula::PathLoss => "path-loss",
            Formula::Snr => "snr",
            Formula::AntennaLength => "antenna-length",
            Formula::Conduction => "conduction",
            Formula::Convection => "convection",
            Formula::FinEfficiency => "fin-efficiency",
        }
    }

    /// Look up a formula by identifier (case-insensitive, `_` accepted for `-`)
    pub fn from_id(id: &str) -> Option<Self> {
        let normalized = id.trim().to_ascii_lowercase().replace('_', "-");
        ALL_FORMULAS.iter().copied().find(|f| f.id() == normalized)
    }

    pub fn all() -> &'static [Formula] {
        ALL_FORMULAS
    }

    pub fn in_domain(domain: Domain) -> Vec<Formula> {
        ALL_FORMULAS
            .iter()
            .filter(|f| f.domain() == domain)
            .copied()
            .collect()
    }

    pub fn domain(&self) -> Domain {
        match self {
            Formula::OhmsLaw
            | Formula::VoltageDivider
            | Formula::Power
            | Formula::CapacitiveReactance
            | Formula::InductiveReactance
            | Formula::RcTimeConstant => Domain::Electrical,
            Formula::Reynolds
            | Formula::PressureDrop
            | Formula::AxialStress
            | Formula::BendingStress
            | Formula::TorsionalStress
            | Formula::EulerBuckling
            | Formula::GearRatio
            | Formula::TorqueTransfer
            | Formula::ShaftSizing => Domain::Mechanical,
            Formula::ImpedanceMatch
            | Formula::Vswr
            | Formula::FrequencyWavelength
            | Formula::PathLoss
            | Formula::Snr
            | Formula::AntennaLength => Domain::Rf,
            Formula::Conduction | Formula::Convection | Formula::FinEfficiency => Domain::Thermal,
        }
    }

    /// Get the full metadata for this formula
    pub fn metadata(&self) -> FormulaMetadata {
        let (title_key, expression, inputs, outputs) = match self {
            Formula::OhmsLaw => (
                "calculator.ohm.title",
                "V = I·R, I = V/R, R = V/I",
                vec![
                    Variable::optional("solve_for", "→", "voltage|current|resistance"),
                    Variable::optional("voltage_v", "V", "V"),
                    Variable::optional("current_a", "I", "A"),
                    Variable::optional("resistance_ohm", "R", "Ω"),
                ],
                vec![
                    Variable::new("voltage_v", "V", "V"),
                    Variable::new("current_a", "I", "A"),
                    Variable::new("resistance_ohm", "R", "Ω"),
                ],
            ),
            Formula::VoltageDivider => (
                "calculator.divider.title",
                "Vout = Vin·R2/(R1+R2)",
                vec![
                    Variable::new("vin_v", "Vin", "V"),
                    Variable::new("r1_ohm", "R1", "Ω"),
                    Variable::new("r2_ohm", "R2", "Ω"),
                ],
                vec![Variable::new("vout_v", "Vout", "V"), Variable::new("ratio", "Vout/Vin", "")],
            ),
            Formula::Power => (
                "calculator.power.title",
                "P = V·I",
                vec![Variable::new("voltage_v", "V", "V"), Variable::new("current_a", "I", "A")],
                vec![Variable::new("power_w", "P", "W")],
            ),
            Formula::CapacitiveReactance => (
                "calculator.capacitive.title",
                "Xc = 1/(2πfC)",
                vec![
                    Variable::new("capacitance_uf", "C", "µF"),
                    Variable::new("frequency_hz", "f", "Hz"),
                ],
                vec![Variable::new("reactance_ohm", "Xc", "Ω")],
            ),
            Formula::InductiveReactance => (
                "calculator.inductive.title",
                "XL = 2πfL",
                vec![
                    Variable::new("inductance_mh", "L", "mH"),
                    Variable::new("frequency_hz", "f", "Hz"),
                ],
                vec![Variable::new("reactance_ohm", "XL", "Ω")],
            ),
            Formula::RcTimeConstant => (
                "calculator.rc.title",
                "τ = RC, fc = 1/(2πτ)",
                vec![
                    Variable::new("resistance_ohm", "R", "Ω"),
                    Variable::new("capacitance_uf", "C", "µF"),
                ],
                vec![Variable::new("tau_s", "τ", "s"), Variable::new("cutoff_hz", "fc", "Hz")],
            ),
            Formula::Reynolds => (
                "calculator.fluid.title",
                "Re = ρvD/µ",
                vec![
                    Variable::new("density_kg_m3", "ρ", "kg/m³"),
                    Variable::new("velocity_m_s", "v", "m/s"),
                    Variable::new("diameter_m", "D", "m"),
                    Variable::new("viscosity_pa_s", "µ", "Pa·s"),
                ],
                vec![Variable::new("reynolds", "Re", ""), Variable::new("regime", "regime", "")],
            ),
            Formula::PressureDrop => (
                "calculator.fluid.title",
                "ΔP = f·(L/D)·(ρv²/2), f = 0.02",
                vec![
                    Variable::new("density_kg_m3", "ρ", "kg/m³"),
                    Variable::new("velocity_m_s", "v", "m/s"),
                    Variable::new("length_m", "L", "m"),
                    Variable::new("diameter_m", "D", "m"),
                    Variable::new("roughness_m", "ε", "m"),
                ],
                vec![
                    Variable::new("pressure_drop_pa", "ΔP", "Pa"),
                    Variable::new("pressure_drop_kpa", "ΔP", "kPa"),
                    Variable::new("friction_factor", "f", ""),
                    Variable::new("relative_roughness", "ε/D", ""),
                ],
            ),
            Formula::AxialStress => (
                "calculator.structural.title",
                "σ = F/A, SF = σy/σ",
                vec![
                    Variable::new("force_n", "F", "N"),
                    Variable::new("area_mm2", "A", "mm²"),
                    Variable::optional("yield_strength_mpa", "σy", "MPa"),
                ],
                vec![
                    Variable::new("stress_mpa", "σ", "MPa"),
                    Variable::new("safety_factor", "SF", ""),
                    Variable::new("yield_strength_mpa", "σy", "MPa"),
                ],
            ),
            Formula::BendingStress => (
                "calculator.structural.title",
                "σb = M·c/I",
                vec![
                    Variable::new("moment_n_mm", "M", "N·mm"),
                    Variable::new("distance_mm", "c", "mm"),
                    Variable::new("moment_of_inertia_mm4", "I", "mm⁴"),
                ],
                vec![Variable::new("stress_mpa", "σb", "MPa")],
            ),
            Formula::TorsionalStress => (
                "calculator.structural.title",
                "J = πr⁴/2, τ = T·r/J",
                vec![
                    Variable::new("torque_n_mm", "T", "N·mm"),
                    Variable::new("radius_mm", "r", "mm"),
                ],
                vec![
                    Variable::new("polar_moment_mm4", "J", "mm⁴"),
                    Variable::new("shear_stress_mpa", "τ", "MPa"),
                ],
            ),
            Formula::EulerBuckling => (
                "calculator.structural.title",
                "Pcr = π²EI/L²",
                vec![
                    Variable::optional("elastic_modulus_mpa", "E", "MPa"),
                    Variable::new("moment_of_inertia_mm4", "I", "mm⁴"),
                    Variable::new("length_mm", "L", "mm"),
                ],
                vec![
                    Variable::new("critical_load_n", "Pcr", "N"),
                    Variable::new("critical_load_kn", "Pcr", "kN"),
                    Variable::new("elastic_modulus_mpa", "E", "MPa"),
                ],
            ),
            Formula::GearRatio => (
                "calculator.gear.title",
                "ratio = N2/N1, rpm_out = rpm_in/ratio",
                vec![
                    Variable::new("teeth_driver", "N1", ""),
                    Variable::new("teeth_driven", "N2", ""),
                    Variable::new("rpm_in", "n_in", "rpm"),
                ],
                vec![Variable::new("ratio", "i", ""), Variable::new("rpm_out", "n_out", "rpm")],
            ),
            Formula::TorqueTransfer => (
                "calculator.gear.title",
                "T_out = T_in·(N2/N1)·η",
                vec![
                    Variable::new("torque_in_n_m", "T_in", "N·m"),
                    Variable::new("teeth_driver", "N1", ""),
                    Variable::new("teeth_driven", "N2", ""),
                    Variable::optional("efficiency", "η", ""),
                ],
                vec![
                    Variable::new("ratio", "i", ""),
                    Variable::new("torque_out_n_m", "T_out", "N·m"),
                    Variable::new("efficiency", "η", ""),
                ],
            ),
            Formula::ShaftSizing => (
                "calculator.gear.title",
                "d = ∛(16T/(π·40))·1000",
                vec![Variable::new("torque_n_m", "T", "N·m")],
                vec![Variable::new("min_diameter_mm", "d_min", "mm")],
            ),
            Formula::ImpedanceMatch => (
                "calculator.impedance.title",
                "Q = √(Z2/Z1 − 1), XL = Q·Z1, XC = Z2/Q",
                vec![
                    Variable::new("source_impedance_ohm", "Z1", "Ω"),
                    Variable::new("load_impedance_ohm", "Z2", "Ω"),
                ],
                vec![
                    Variable::new("q", "Q", ""),
                    Variable::new("series_reactance_ohm", "XL", "Ω"),
                    Variable::new("shunt_reactance_ohm", "XC", "Ω"),
                ],
            ),
            Formula::Vswr => (
                "calculator.vswr.title",
                "Γ = √(Pr/Pf), VSWR = (1+Γ)/(1−Γ), RL = −20·log10(Γ)",
                vec![
                    Variable::new("forward_power_w", "Pf", "W"),
                    Variable::new("reflected_power_w", "Pr", "W"),
                ],
                vec![
                    Variable::new("gamma", "Γ", ""),
                    Variable::new("vswr", "VSWR", ""),
                    Variable::new("return_loss_db", "RL", "dB"),
                ],
            ),
            Formula::FrequencyWavelength => (
                "calculator.frequency.title",
                "λ = c/f",
                vec![
                    Variable::optional("target", "→", "wavelength|frequency"),
                    Variable::optional("frequency_mhz", "f", "MHz"),
                    Variable::optional("wavelength_cm", "λ", "cm"),
                ],
                vec![
                    Variable::new("frequency_mhz", "f", "MHz"),
                    Variable::new("frequency_ghz", "f", "GHz"),
                    Variable::new("wavelength_cm", "λ", "cm"),
                    Variable::new("wavelength_m", "λ", "m"),
                ],
            ),
            Formula::PathLoss => (
                "calculator.pathloss.title",
                "FSPL = 32.45 + 20·log10(f) + 20·log10(d)",
                vec![
                    Variable::new("frequency_mhz", "f", "MHz"),
                    Variable::new("distance_km", "d", "km"),
                ],
                vec![Variable::new("path_loss_db", "FSPL", "dB")],
            ),
            Formula::Snr => (
                "calculator.snr.title",
                "SNR = 10·log10(Ps/Pn)",
                vec![
                    Variable::new("signal_power", "Ps", "W"),
                    Variable::new("noise_power", "Pn", "W"),
                ],
                vec![Variable::new("snr_db", "SNR", "dB"), Variable::new("snr_linear", "SNR", "")],
            ),
            Formula::AntennaLength => (
                "calculator.antenna.title",
                "λ = c/f, L = λ/2, λ/4",
                vec![Variable::new("frequency_mhz", "f", "MHz")],
                vec![
                    Variable::new("wavelength_m", "λ", "m"),
                    Variable::new("half_wave_m", "λ/2", "m"),
                    Variable::new("quarter_wave_m", "λ/4", "m"),
                    Variable::new("phase_constant_rad_m", "β", "rad/m"),
                ],
            ),
            Formula::Conduction => (
                "calculator.thermal.title",
                "Q = k·A·ΔT/t",
                vec![
                    Variable::new("conductivity_w_mk", "k", "W/m·K"),
                    Variable::new("area_m2", "A", "m²"),
                    Variable::new("thickness_m", "t", "m"),
                    Variable::new("temp_diff_k", "ΔT", "K"),
                ],
                vec![Variable::new("heat_rate_w", "Q", "W")],
            ),
            Formula::Convection => (
                "calculator.thermal.title",
                "Q = h·A·ΔT",
                vec![
                    Variable::new("convection_w_m2k", "h", "W/m²·K"),
                    Variable::new("area_m2", "A", "m²"),
                    Variable::new("temp_diff_k", "ΔT", "K"),
                ],
                vec![Variable::new("heat_rate_w", "Q", "W")],
            ),
            Formula::FinEfficiency => (
                "calculator.thermal.title",
                "m = √(hP/(kA)), η = tanh(mL)/(mL)",
                vec![
                    Variable::new("length_m", "L", "m"),
                    Variable::new("diameter_m", "D", "m"),
                    Variable::optional("convection_w_m2k", "h", "W/m²·K"),
                    Variable::optional("conductivity_w_mk", "k", "W/m·K"),
                ],
                vec![
                    Variable::new("m", "m", "1/m"),
                    Variable::new("efficiency", "η", ""),
                    Variable::new("efficiency_percent", "η", "%"),
                ],
            ),
        };
        FormulaMetadata {
            id: self.id(),
            domain: self.domain(),
            title_key,
            expression,
            inputs,
            outputs,
        }
    }

    /// Build a typed calculator input from raw form fields.
    ///
    /// Field names are the `inputs` names of [`Formula::metadata`]. Any
    /// field that fails to parse rejects the whole input.
    pub fn build(&self, fields: &FieldMap) -> PortalResult<CalculationItem> {
        let item = match self {
            Formula::OhmsLaw => {
                let voltage_v = fields.parse_optional("voltage_v")?;
                let current_a = fields.parse_optional("current_a")?;
                let resistance_ohm = fields.parse_optional("resistance_ohm")?;
                let solve_for = match fields.text("solve_for") {
                    Some(text) => OhmsLawTarget::parse(text).ok_or_else(|| {
                        PortalError::invalid_input("solve_for", text, "Expected voltage, current or resistance")
                    })?,
                    None => OhmsLawTarget::infer(voltage_v, current_a, resistance_ohm)
                        .ok_or_else(|| PortalError::missing_field("solve_for"))?,
                };
                CalculationItem::OhmsLaw(OhmsLawInput {
                    solve_for,
                    voltage_v,
                    current_a,
                    resistance_ohm,
                })
            }
            Formula::VoltageDivider => CalculationItem::VoltageDivider(VoltageDividerInput {
                vin_v: fields.parse_required("vin_v")?,
                r1_ohm: fields.parse_required("r1_ohm")?,
                r2_ohm: fields.parse_required("r2_ohm")?,
            }),
            Formula::Power => CalculationItem::Power(PowerInput {
                voltage_v: fields.parse_required("voltage_v")?,
                current_a: fields.parse_required("current_a")?,
            }),
            Formula::CapacitiveReactance => CalculationItem::CapacitiveReactance(CapacitiveReactanceInput {
                capacitance_uf: fields.parse_required("capacitance_uf")?,
                frequency_hz: fields.parse_required("frequency_hz")?,
            }),
            Formula::InductiveReactance => CalculationItem::InductiveReactance(InductiveReactanceInput {
                inductance_mh: fields.parse_required("inductance_mh")?,
                frequency_hz: fields.parse_required("frequency_hz")?,
            }),
            Formula::RcTimeConstant => CalculationItem::RcTimeConstant(RcTimeConstantInput {
                resistance_ohm: fields.parse_required("resistance_ohm")?,
                capacitance_uf: fields.parse_required("capacitance_uf")?,
            }),
            Formula::Reynolds => CalculationItem::Reynolds(ReynoldsInput {
                density_kg_m3: fields.parse_required("density_kg_m3")?,
                velocity_m_s: fields.parse_required("velocity_m_s")?,
                diameter_m: fields.parse_required("diameter_m")?,
                viscosity_pa_s: fields.parse_required("viscosity_pa_s")?,
            }),
            Formula::PressureDrop => CalculationItem::PressureDrop(PressureDropInput {
                density_kg_m3: fields.parse_required("density_kg_m3")?,
                velocity_m_s: fields.parse_required("velocity_m_s")?,
                length_m: fields.parse_required("length_m")?,
                diameter_m: fields.parse_required("diameter_m")?,
                roughness_m: fields.parse_required("roughness_m")?,
            }),
            Formula::AxialStress => CalculationItem::AxialStress(AxialStressInput {
                force_n: fields.parse_required("force_n")?,
                area_mm2: fields.parse_required("area_mm2")?,
                yield_strength_mpa: fields.parse_optional("yield_strength_mpa")?,
            }),
            Formula::BendingStress => CalculationItem::BendingStress(BendingStressInput {
                moment_n_mm: fields.parse_required("moment_n_mm")?,
                distance_mm: fields.parse_required("distance_mm")?,
                moment_of_inertia_mm4: fields.parse_required("moment_of_inertia_mm4")?,
            }),
            Formula::TorsionalStress => CalculationItem::TorsionalStress(TorsionalStressInput {
                torque_n_mm: fields.parse_required("torque_n_mm")?,
                radius_mm: fields.parse_required("radius_mm")?,
            }),
            Formula::EulerBuckling => CalculationItem::EulerBuckling(EulerBucklingInput {
                elastic_modulus_mpa: fields.parse_optional("elastic_modulus_mpa")?,
                moment_of_inertia_mm4: fields.parse_required("moment_of_inertia_mm4")?,
                length_mm: fields.parse_required("length_mm")?,
            }),
            Formula::GearRatio => CalculationItem::GearRatio(GearRatioInput {
                teeth_driver: fields.parse_required("teeth_driver")?,
                teeth_driven: fields.parse_required("teeth_driven")?,
                rpm_in: fields.parse_required("rpm_in")?,
            }),
            Formula::TorqueTransfer => CalculationItem::TorqueTransfer(TorqueTransferInput {
                torque_in_n_m: fields.parse_required("torque_in_n_m")?,
                teeth_driver: fields.parse_required("teeth_driver")?,
                teeth_driven: fields.parse_required("teeth_driven")?,
                efficiency: fields.parse_optional("efficiency")?,
            }),
            Formula::ShaftSizing => CalculationItem::ShaftSizing(ShaftSizingInput {
                torque_n_m: fields.parse_required("torque_n_m")?,
            }),
            Formula::ImpedanceMatch => CalculationItem::ImpedanceMatch(ImpedanceMatchInput {
                source_impedance_ohm: fields.parse_required("source_impedance_ohm")?,
                load_impedance_ohm: fields.parse_required("load_impedance_ohm")?,
            }),
            Formula::Vswr => CalculationItem::Vswr(VswrInput {
                forward_power_w: fields.parse_required("forward_power_w")?,
                reflected_power_w: fields.parse_required("reflected_power_w")?,
            }),
            Formula::FrequencyWavelength => {
                let frequency_mhz = fields.parse_optional("frequency_mhz")?;
                let wavelength_cm = fields.parse_optional("wavelength_cm")?;
                let target = match fields.text("target") {
                    Some(text) => ConversionTarget::parse(text).ok_or_else(|| {
                        PortalError::invalid_input("target", text, "Expected wavelength or frequency")
                    })?,
                    None if frequency_mhz.is_some() => ConversionTarget::Wavelength,
                    None if wavelength_cm.is_some() => ConversionTarget::Frequency,
                    None => return Err(PortalError::missing_field("frequency_mhz")),
                };
                CalculationItem::FrequencyWavelength(FrequencyWavelengthInput {
                    target,
                    frequency_mhz,
                    wavelength_cm,
                })
            }
            Formula::PathLoss => CalculationItem::PathLoss(PathLossInput {
                frequency_mhz: fields.parse_required("frequency_mhz")?,
                distance_km: fields.parse_required("distance_km")?,
            }),
            Formula::Snr => CalculationItem::Snr(SnrInput {
                signal_power: fields.parse_required("signal_power")?,
                noise_power: fields.parse_required("noise_power")?,
            }),
            Formula::AntennaLength => CalculationItem::AntennaLength(AntennaLengthInput {
                frequency_mhz: fields.parse_required("frequency_mhz")?,
            }),
            Formula::Conduction => CalculationItem::Conduction(ConductionInput {
                conductivity_w_mk: fields.parse_required("conductivity_w_mk")?,
                area_m2: fields.parse_required("area_m2")?,
                thickness_m: fields.parse_required("thickness_m")?,
                temp_diff_k: fields.parse_required("temp_diff_k")?,
            }),
            Formula::Convection => CalculationItem::Convection(ConvectionInput {
                convection_w_m2k: fields.parse_required("convection_w_m2k")?,
                area_m2: fields.parse_required("area_m2")?,
                temp_diff_k: fields.parse_required("temp_diff_k")?,
            }),
            Formula::FinEfficiency => CalculationItem::FinEfficiency(FinEfficiencyInput {
                length_m: fields.parse_required("length_m")?,
                diameter_m: fields.parse_required("diameter_m")?,
                convection_w_m2k: fields.parse_optional("convection_w_m2k")?,
                conductivity_w_mk: fields.parse_optional("conductivity_w_mk")?,
            }),
        };
        Ok(item)
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::CalculationOutput;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique_and_roundtrip() {
        let mut seen = HashSet::new();
        for formula in Formula::all() {
            assert!(seen.insert(formula.id()), "duplicate id {}", formula.id());
            assert_eq!(Formula::from_id(formula.id()), Some(*formula));
        }
        assert_eq!(seen.len(), 24);
        assert_eq!(Formula::from_id("OHMS_LAW"), Some(Formula::OhmsLaw));
        assert_eq!(Formula::from_id("warp-drive"), None);
    }

    #[test]
    fn test_domains_partition_registry() {
        let total: usize = [Domain::Electrical, Domain::Mechanical, Domain::Rf, Domain::Thermal]
            .iter()
            .map(|d| Formula::in_domain(*d).len())
            .sum();
        assert_eq!(total, ALL_FORMULAS.len());
        assert_eq!(Formula::in_domain(Domain::Rf).len(), 6);
        assert_eq!(Domain::parse("Electronics"), Some(Domain::Electrical));
    }

    #[test]
    fn test_metadata_complete() {
        for formula in Formula::all() {
            let meta = formula.metadata();
            assert_eq!(meta.id, formula.id());
            assert!(meta.title_key.starts_with("calculator."));
            assert!(!meta.inputs.is_empty());
            assert!(!meta.outputs.is_empty());
        }
    }

    #[test]
    fn test_build_voltage_divider() {
        let fields = FieldMap::new()
            .with("vin_v", "12")
            .with("r1_ohm", "1000")
            .with("r2_ohm", "2000");
        let item = Formula::VoltageDivider.build(&fields).unwrap();
        match item.evaluate() {
            Some(CalculationOutput::VoltageDivider(r)) => assert_eq!(r.vout_v, 8.0),
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[test]
    fn test_build_rejects_empty_nan_and_text() {
        for bad in ["", "NaN", "twelve"] {
            let fields = FieldMap::new()
                .with("vin_v", bad)
                .with("r1_ohm", "1000")
                .with("r2_ohm", "2000");
            assert!(Formula::VoltageDivider.build(&fields).is_err(), "{:?} accepted", bad);
        }
    }

    #[test]
    fn test_every_formula_rejects_empty_fields() {
        // An empty form never yields a result
        for formula in Formula::all() {
            let outcome = formula.build(&FieldMap::new()).ok().and_then(|item| item.evaluate());
            assert!(outcome.is_none(), "{} produced a result from an empty form", formula);
        }
    }

    /// Valid form per formula, and the fields that form cannot do without.
    fn valid_forms() -> Vec<(Formula, Vec<(&'static str, &'static str)>, Vec<&'static str>)> {
        vec![
            (
                Formula::OhmsLaw,
                vec![("solve_for", "current"), ("voltage_v", "12"), ("resistance_ohm", "4")],
                vec!["voltage_v", "resistance_ohm"],
            ),
            (
                Formula::VoltageDivider,
                vec![("vin_v", "12"), ("r1_ohm", "1000"), ("r2_ohm", "2000")],
                vec!["vin_v", "r1_ohm", "r2_ohm"],
            ),
            (
                Formula::Power,
                vec![("voltage_v", "12"), ("current_a", "2")],
                vec!["voltage_v", "current_a"],
            ),
            (
                Formula::CapacitiveReactance,
                vec![("capacitance_uf", "10"), ("frequency_hz", "60")],
                vec!["capacitance_uf", "frequency_hz"],
            ),
            (
                Formula::InductiveReactance,
                vec![("inductance_mh", "10"), ("frequency_hz", "60")],
                vec!["inductance_mh", "frequency_hz"],
            ),
            (
                Formula::RcTimeConstant,
                vec![("resistance_ohm", "1000"), ("capacitance_uf", "10")],
                vec!["resistance_ohm", "capacitance_uf"],
            ),
            (
                Formula::Reynolds,
                vec![
                    ("density_kg_m3", "1000"),
                    ("velocity_m_s", "2"),
                    ("diameter_m", "0.05"),
                    ("viscosity_pa_s", "0.001"),
                ],
                vec!["density_kg_m3", "velocity_m_s", "diameter_m", "viscosity_pa_s"],
            ),
            (
                Formula::PressureDrop,
                vec![
                    ("density_kg_m3", "1000"),
                    ("velocity_m_s", "2"),
                    ("length_m", "10"),
                    ("diameter_m", "0.05"),
                    ("roughness_m", "0.000045"),
                ],
                vec!["density_kg_m3", "velocity_m_s", "length_m", "diameter_m", "roughness_m"],
            ),
            (
                Formula::AxialStress,
                vec![("force_n", "10000"), ("area_mm2", "100")],
                vec!["force_n", "area_mm2"],
            ),
            (
                Formula::BendingStress,
                vec![("moment_n_mm", "100000"), ("distance_mm", "25"), ("moment_of_inertia_mm4", "500000")],
                vec!["moment_n_mm", "distance_mm", "moment_of_inertia_mm4"],
            ),
            (
                Formula::TorsionalStress,
                vec![("torque_n_mm", "1000"), ("radius_mm", "10")],
                vec!["torque_n_mm", "radius_mm"],
            ),
            (
                Formula::EulerBuckling,
                vec![("moment_of_inertia_mm4", "10000"), ("length_mm", "1000")],
                vec!["moment_of_inertia_mm4", "length_mm"],
            ),
            (
                Formula::GearRatio,
                vec![("teeth_driver", "20"), ("teeth_driven", "40"), ("rpm_in", "1000")],
                vec!["teeth_driver", "teeth_driven", "rpm_in"],
            ),
            (
                Formula::TorqueTransfer,
                vec![("torque_in_n_m", "10"), ("teeth_driver", "20"), ("teeth_driven", "40")],
                vec!["torque_in_n_m", "teeth_driver", "teeth_driven"],
            ),
            (Formula::ShaftSizing, vec![("torque_n_m", "100")], vec!["torque_n_m"]),
            (
                Formula::ImpedanceMatch,
                vec![("source_impedance_ohm", "50"), ("load_impedance_ohm", "200")],
                vec!["source_impedance_ohm", "load_impedance_ohm"],
            ),
            (
                Formula::Vswr,
                vec![("forward_power_w", "100"), ("reflected_power_w", "10")],
                vec!["forward_power_w", "reflected_power_w"],
            ),
            (
                Formula::FrequencyWavelength,
                vec![("target", "wavelength"), ("frequency_mhz", "100")],
                vec!["frequency_mhz"],
            ),
            (
                Formula::PathLoss,
                vec![("frequency_mhz", "2400"), ("distance_km", "1")],
                vec!["frequency_mhz", "distance_km"],
            ),
            (
                Formula::Snr,
                vec![("signal_power", "100"), ("noise_power", "1")],
                vec!["signal_power", "noise_power"],
            ),
            (Formula::AntennaLength, vec![("frequency_mhz", "146")], vec!["frequency_mhz"]),
            (
                Formula::Conduction,
                vec![
                    ("conductivity_w_mk", "200"),
                    ("area_m2", "1"),
                    ("thickness_m", "0.01"),
                    ("temp_diff_k", "10"),
                ],
                vec!["conductivity_w_mk", "area_m2", "thickness_m", "temp_diff_k"],
            ),
            (
                Formula::Convection,
                vec![("convection_w_m2k", "25"), ("area_m2", "1"), ("temp_diff_k", "10")],
                vec!["convection_w_m2k", "area_m2", "temp_diff_k"],
            ),
            (
                Formula::FinEfficiency,
                vec![("length_m", "0.05"), ("diameter_m", "0.005")],
                vec!["length_m", "diameter_m"],
            ),
        ]
    }

    #[test]
    fn test_each_required_field_blank_or_nan_is_no_result() {
        let forms = valid_forms();
        assert_eq!(forms.len(), ALL_FORMULAS.len());
        for (formula, pairs, required) in forms {
            let valid = FieldMap::from_pairs(pairs.iter().copied());
            let baseline = formula.build(&valid).ok().and_then(|item| item.evaluate());
            assert!(baseline.is_some(), "{} rejected its valid form", formula);

            for name in required {
                for bad in ["", "   ", "NaN"] {
                    let fields = valid.clone().with(name, bad);
                    let outcome = formula.build(&fields).ok().and_then(|item| item.evaluate());
                    assert!(outcome.is_none(), "{} produced a result with {} = {:?}", formula, name, bad);
                }
            }
        }
    }

    #[test]
    fn test_build_ohms_law_infers_target() {
        let fields = FieldMap::new().with("voltage_v", "12").with("current_a", "0.5");
        let item = Formula::OhmsLaw.build(&fields).unwrap();
        match item.evaluate() {
            Some(CalculationOutput::OhmsLaw(r)) => {
                assert_eq!(r.solved, OhmsLawTarget::Resistance);
                assert_eq!(r.resistance_ohm, 24.0);
            }
            other => panic!("unexpected output: {:?}", other),
        }
        let all_three = FieldMap::new()
            .with("voltage_v", "12")
            .with("current_a", "0.5")
            .with("resistance_ohm", "24");
        assert_eq!(
            Formula::OhmsLaw.build(&all_three).unwrap_err().error_code(),
            "MISSING_FIELD"
        );
    }

    #[test]
    fn test_build_frequency_wavelength_infers_target() {
        let fields = FieldMap::new().with("wavelength_cm", "12.5");
        match Formula::FrequencyWavelength.build(&fields).unwrap() {
            CalculationItem::FrequencyWavelength(input) => {
                assert_eq!(input.target, ConversionTarget::Frequency)
            }
            other => panic!("unexpected item: {:?}", other),
        }
    }

    #[test]
    fn test_build_optional_default_blank() {
        let fields = FieldMap::new()
            .with("force_n", "10000")
            .with("area_mm2", "100")
            .with("yield_strength_mpa", "");
        match Formula::AxialStress.build(&fields).unwrap().evaluate() {
            Some(CalculationOutput::AxialStress(r)) => assert_eq!(r.safety_factor, 2.5),
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[test]
    fn test_divisor_zero_rejected_through_build() {
        let cases: &[(Formula, &[(&str, &str)])] = &[
            (Formula::VoltageDivider, &[("vin_v", "5"), ("r1_ohm", "0"), ("r2_ohm", "0")]),
            (Formula::Reynolds, &[
                ("density_kg_m3", "1000"),
                ("velocity_m_s", "1"),
                ("diameter_m", "0.05"),
                ("viscosity_pa_s", "0"),
            ]),
            (Formula::AxialStress, &[("force_n", "1000"), ("area_mm2", "0")]),
            (Formula::GearRatio, &[("teeth_driver", "0"), ("teeth_driven", "40"), ("rpm_in", "100")]),
            (Formula::Snr, &[("signal_power", "1"), ("noise_power", "0")]),
            (Formula::Conduction, &[
                ("conductivity_w_mk", "1"),
                ("area_m2", "1"),
                ("thickness_m", "0"),
                ("temp_diff_k", "10"),
            ]),
        ];
        for (formula, pairs) in cases {
            let fields = FieldMap::from_pairs(pairs.iter().copied());
            let item = formula.build(&fields).unwrap();
            assert!(item.evaluate().is_none(), "{} accepted a zero divisor", formula);
        }
    }
}
