//! # RF / Microwave Calculators
//!
//! L-network matching, VSWR, frequency/wavelength conversion, free-space path
//! loss, SNR and resonant antenna lengths.
//!
//! Path loss is fixed to MHz and km, antenna lengths to MHz in and metres out.

use serde::{Deserialize, Serialize};

use super::{finite_output, positive, required, Calculation, Formula};
use crate::equations::rf as eq;
use crate::errors::{PortalError, PortalResult};
use crate::units::{Centimeters, Kilometers, Megahertz, Meters};

// ============================================================================
// Impedance Matching
// ============================================================================

/// L-network match from a lower source impedance up to a higher load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpedanceMatchInput {
    /// Source impedance Z1 (Ω)
    pub source_impedance_ohm: f64,
    /// Load impedance Z2 (Ω), must exceed Z1
    pub load_impedance_ohm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpedanceMatchResult {
    /// Loaded Q
    pub q: f64,
    /// Series inductive reactance XL (Ω)
    pub series_reactance_ohm: f64,
    /// Shunt capacitive reactance XC (Ω)
    pub shunt_reactance_ohm: f64,
}

impl ImpedanceMatchInput {
    pub fn validate(&self) -> PortalResult<()> {
        let z1 = positive("source_impedance_ohm", self.source_impedance_ohm)?;
        let z2 = positive("load_impedance_ohm", self.load_impedance_ohm)?;
        // Z2 = Z1 gives Q = 0, which is then a divisor for XC
        if z2 <= z1 {
            return Err(PortalError::invalid_input(
                "load_impedance_ohm",
                z2.to_string(),
                "Load impedance must be greater than source impedance",
            ));
        }
        Ok(())
    }
}

impl Calculation for ImpedanceMatchInput {
    type Output = ImpedanceMatchResult;

    fn formula(&self) -> Formula {
        Formula::ImpedanceMatch
    }

    fn calculate(&self) -> PortalResult<ImpedanceMatchResult> {
        self.validate()?;
        let q = eq::l_network_q(self.source_impedance_ohm, self.load_impedance_ohm);
        let (xl, xc) = eq::l_network_reactances(self.source_impedance_ohm, self.load_impedance_ohm, q);
        Ok(ImpedanceMatchResult {
            q: finite_output(Formula::ImpedanceMatch, "q", q)?,
            series_reactance_ohm: finite_output(Formula::ImpedanceMatch, "series_reactance_ohm", xl)?,
            shunt_reactance_ohm: finite_output(Formula::ImpedanceMatch, "shunt_reactance_ohm", xc)?,
        })
    }
}

// ============================================================================
// VSWR / Return Loss
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VswrInput {
    /// Forward power (W)
    pub forward_power_w: f64,
    /// Reflected power (W)
    pub reflected_power_w: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VswrResult {
    /// |Γ|
    pub gamma: f64,
    pub vswr: f64,
    /// Return loss (dB)
    pub return_loss_db: f64,
}

impl VswrInput {
    pub fn validate(&self) -> PortalResult<()> {
        let pf = positive("forward_power_w", self.forward_power_w)?;
        // Pr = 0 puts log10(0) in the return loss; Pr ≥ Pf makes Γ ≥ 1
        let pr = positive("reflected_power_w", self.reflected_power_w)?;
        if pr >= pf {
            return Err(PortalError::invalid_input(
                "reflected_power_w",
                pr.to_string(),
                "Reflected power must be less than forward power",
            ));
        }
        Ok(())
    }
}

impl Calculation for VswrInput {
    type Output = VswrResult;

    fn formula(&self) -> Formula {
        Formula::Vswr
    }

    fn calculate(&self) -> PortalResult<VswrResult> {
        self.validate()?;
        let gamma = eq::reflection_coefficient(self.forward_power_w, self.reflected_power_w);
        Ok(VswrResult {
            gamma: finite_output(Formula::Vswr, "gamma", gamma)?,
            vswr: finite_output(Formula::Vswr, "vswr", eq::vswr(gamma))?,
            return_loss_db: finite_output(Formula::Vswr, "return_loss_db", eq::return_loss_db(gamma))?,
        })
    }
}

// ============================================================================
// Frequency ↔ Wavelength
// ============================================================================

/// Which side of the conversion to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionTarget {
    /// Frequency given, compute wavelength
    Wavelength,
    /// Wavelength given, compute frequency
    Frequency,
}

impl ConversionTarget {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wavelength" | "lambda" => Some(ConversionTarget::Wavelength),
            "frequency" | "freq" => Some(ConversionTarget::Frequency),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyWavelengthInput {
    /// Quantity to compute
    pub target: ConversionTarget,
    /// Frequency (MHz), needed when computing wavelength
    #[serde(default)]
    pub frequency_mhz: Option<f64>,
    /// Wavelength (cm), needed when computing frequency
    #[serde(default)]
    pub wavelength_cm: Option<f64>,
}

/// Both sides of the conversion, in the units the calculator displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyWavelengthResult {
    pub frequency_mhz: f64,
    pub frequency_ghz: f64,
    pub wavelength_cm: f64,
    pub wavelength_m: f64,
}

impl Calculation for FrequencyWavelengthInput {
    type Output = FrequencyWavelengthResult;

    fn formula(&self) -> Formula {
        Formula::FrequencyWavelength
    }

    fn calculate(&self) -> PortalResult<FrequencyWavelengthResult> {
        let (frequency, wavelength) = match self.target {
            ConversionTarget::Wavelength => {
                let f = positive("frequency_mhz", required("frequency_mhz", self.frequency_mhz)?)?;
                (Megahertz(f), eq::wavelength_from_frequency(Megahertz(f)))
            }
            ConversionTarget::Frequency => {
                let l = positive("wavelength_cm", required("wavelength_cm", self.wavelength_cm)?)?;
                (eq::frequency_from_wavelength(Centimeters(l)), Centimeters(l))
            }
        };
        let frequency_mhz = finite_output(Formula::FrequencyWavelength, "frequency_mhz", frequency.0)?;
        let wavelength_cm = finite_output(Formula::FrequencyWavelength, "wavelength_cm", wavelength.0)?;
        let wavelength_m: Meters = Centimeters(wavelength_cm).into();
        Ok(FrequencyWavelengthResult {
            frequency_mhz,
            frequency_ghz: frequency_mhz / 1000.0,
            wavelength_cm,
            wavelength_m: wavelength_m.value(),
        })
    }
}

// ============================================================================
// Propagation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathLossInput {
    /// Frequency (MHz)
    pub frequency_mhz: f64,
    /// Distance (km)
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathLossResult {
    /// FSPL (dB)
    pub path_loss_db: f64,
}

impl Calculation for PathLossInput {
    type Output = PathLossResult;

    fn formula(&self) -> Formula {
        Formula::PathLoss
    }

    fn calculate(&self) -> PortalResult<PathLossResult> {
        positive("frequency_mhz", self.frequency_mhz)?;
        positive("distance_km", self.distance_km)?;
        Ok(PathLossResult {
            path_loss_db: finite_output(
                Formula::PathLoss,
                "path_loss_db",
                eq::free_space_path_loss_db(Megahertz(self.frequency_mhz), Kilometers(self.distance_km)),
            )?,
        })
    }
}

/// Signal-to-noise ratio. Both powers in the same unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnrInput {
    pub signal_power: f64,
    pub noise_power: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnrResult {
    pub snr_db: f64,
    pub snr_linear: f64,
}

impl Calculation for SnrInput {
    type Output = SnrResult;

    fn formula(&self) -> Formula {
        Formula::Snr
    }

    fn calculate(&self) -> PortalResult<SnrResult> {
        positive("signal_power", self.signal_power)?;
        positive("noise_power", self.noise_power)?;
        Ok(SnrResult {
            snr_db: finite_output(Formula::Snr, "snr_db", eq::snr_db(self.signal_power, self.noise_power))?,
            snr_linear: finite_output(
                Formula::Snr,
                "snr_linear",
                eq::snr_linear(self.signal_power, self.noise_power),
            )?,
        })
    }
}

// ============================================================================
// Antennas
// ============================================================================

/// Resonant lengths of simple wire antennas, no velocity factor applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntennaLengthInput {
    /// Operating frequency (MHz)
    pub frequency_mhz: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntennaLengthResult {
    /// Free-space wavelength (m)
    pub wavelength_m: f64,
    /// Half-wave dipole length (m)
    pub half_wave_m: f64,
    /// Quarter-wave monopole length (m)
    pub quarter_wave_m: f64,
    /// Phase constant β (rad/m)
    pub phase_constant_rad_m: f64,
}

impl Calculation for AntennaLengthInput {
    type Output = AntennaLengthResult;

    fn formula(&self) -> Formula {
        Formula::AntennaLength
    }

    fn calculate(&self) -> PortalResult<AntennaLengthResult> {
        let f = Megahertz(positive("frequency_mhz", self.frequency_mhz)?);
        let wavelength: Meters = eq::wavelength_from_frequency(f).into();
        Ok(AntennaLengthResult {
            wavelength_m: finite_output(Formula::AntennaLength, "wavelength_m", wavelength.value())?,
            half_wave_m: finite_output(
                Formula::AntennaLength,
                "half_wave_m",
                eq::half_wave_dipole_length_m(f).value(),
            )?,
            quarter_wave_m: finite_output(
                Formula::AntennaLength,
                "quarter_wave_m",
                eq::quarter_wave_monopole_length_m(f).value(),
            )?,
            phase_constant_rad_m: finite_output(
                Formula::AntennaLength,
                "phase_constant_rad_m",
                eq::phase_constant(wavelength),
            )?,
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
    fn test_impedance_match_50_to_200() {
        let result = ImpedanceMatchInput {
            source_impedance_ohm: 50.0,
            load_impedance_ohm: 200.0,
        }
        .evaluate()
        .unwrap();
        assert!(approx_eq(result.q, 1.732_05, 1e-5));
        assert!(approx_eq(result.series_reactance_ohm, 86.6025, 1e-4));
        assert!(approx_eq(result.shunt_reactance_ohm, 115.4701, 1e-4));
    }

    #[test]
    fn test_impedance_match_requires_step_up() {
        let equal = ImpedanceMatchInput {
            source_impedance_ohm: 50.0,
            load_impedance_ohm: 50.0,
        };
        assert!(equal.evaluate().is_none());
        let down = ImpedanceMatchInput {
            source_impedance_ohm: 200.0,
            load_impedance_ohm: 50.0,
        };
        assert!(down.evaluate().is_none());
        let zero = ImpedanceMatchInput {
            source_impedance_ohm: 0.0,
            load_impedance_ohm: 50.0,
        };
        assert!(zero.evaluate().is_none());
    }

    #[test]
    fn test_vswr_100w_forward_5w_reflected() {
        let result = VswrInput {
            forward_power_w: 100.0,
            reflected_power_w: 5.0,
        }
        .evaluate()
        .unwrap();
        assert!(approx_eq(result.gamma, 0.2236, 1e-4));
        assert!(approx_eq(result.vswr, 1.575, 0.1));
        assert!(approx_eq(result.return_loss_db, 13.0, 0.1));
    }

    #[test]
    fn test_vswr_rejections() {
        let cases = [(0.0, 5.0), (100.0, 0.0), (100.0, 100.0), (100.0, 150.0), (f64::NAN, 1.0)];
        for &(pf, pr) in &cases {
            let input = VswrInput {
                forward_power_w: pf,
                reflected_power_w: pr,
            };
            assert!(input.evaluate().is_none(), "Pf={} Pr={} should have no result", pf, pr);
        }
    }

    #[test]
    fn test_frequency_wavelength_roundtrip() {
        for &f in &[1.0, 144.0, 915.0, 2450.0, 10_500.0] {
            let lambda = FrequencyWavelengthInput {
                target: ConversionTarget::Wavelength,
                frequency_mhz: Some(f),
                wavelength_cm: None,
            }
            .evaluate()
            .unwrap();
            let back = FrequencyWavelengthInput {
                target: ConversionTarget::Frequency,
                frequency_mhz: None,
                wavelength_cm: Some(lambda.wavelength_cm),
            }
            .evaluate()
            .unwrap();
            assert!(approx_eq(back.frequency_mhz, f, f * 1e-12));
        }
    }

    #[test]
    fn test_frequency_wavelength_display_units() {
        let result = FrequencyWavelengthInput {
            target: ConversionTarget::Wavelength,
            frequency_mhz: Some(2400.0),
            wavelength_cm: None,
        }
        .evaluate()
        .unwrap();
        assert!(approx_eq(result.wavelength_cm, 12.491_352, 1e-6));
        assert!(approx_eq(result.wavelength_m, 0.124_913_52, 1e-8));
        assert!(approx_eq(result.frequency_ghz, 2.4, 1e-12));
    }

    #[test]
    fn test_frequency_wavelength_missing_side() {
        let input = FrequencyWavelengthInput {
            target: ConversionTarget::Frequency,
            frequency_mhz: Some(100.0),
            wavelength_cm: None,
        };
        assert_eq!(input.calculate().unwrap_err().error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_path_loss() {
        let result = PathLossInput {
            frequency_mhz: 2400.0,
            distance_km: 1.0,
        }
        .evaluate()
        .unwrap();
        assert!(approx_eq(result.path_loss_db, 100.054, 1e-3));
        let zero = PathLossInput {
            frequency_mhz: 2400.0,
            distance_km: 0.0,
        };
        assert!(zero.evaluate().is_none());
    }

    #[test]
    fn test_snr() {
        let result = SnrInput {
            signal_power: 1.0,
            noise_power: 0.001,
        }
        .evaluate()
        .unwrap();
        assert!(approx_eq(result.snr_db, 30.0, 1e-9));
        assert!(approx_eq(result.snr_linear, 1000.0, 1e-9));
        let zero_noise = SnrInput {
            signal_power: 1.0,
            noise_power: 0.0,
        };
        assert!(zero_noise.evaluate().is_none());
    }

    #[test]
    fn test_antenna_length_146_mhz() {
        let result = AntennaLengthInput { frequency_mhz: 146.0 }.evaluate().unwrap();
        assert!(approx_eq(result.wavelength_m, 2.053_373, 1e-6));
        assert!(approx_eq(result.half_wave_m, 1.026_686, 1e-6));
        assert!(approx_eq(result.quarter_wave_m, 0.513_343, 1e-6));
    }
}
