//! # RF / Microwave Formulas
//!
//! Matching, reflection, propagation and antenna relationships.
//!
//! ## Notation
//!
//! - `Z1` = Source impedance (Ω), `Z2` = Load impedance (Ω)
//! - `Q` = Loaded quality factor of an L-network
//! - `Γ` = Magnitude of the reflection coefficient
//! - `c` = Speed of light in vacuum (m/s)
//!
//! ## Unit conventions
//!
//! Path loss takes frequency in MHz and distance in km (the 32.45 dB constant
//! depends on that pair). Antenna lengths take MHz and return metres. Both are
//! fixed conventions, not configurable.

use std::f64::consts::PI;

use crate::units::{Centimeters, Hertz, Kilometers, Megahertz, Meters};

/// Speed of light in vacuum (m/s, exact)
pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;

/// Free-space path loss constant for f in MHz and d in km (dB)
pub const FSPL_CONSTANT_DB: f64 = 32.45;

// =============================================================================
// IMPEDANCE MATCHING (L-NETWORK)
// =============================================================================

/// Loaded Q of an L-network matching a lower source to a higher load.
///
/// # Formula
/// Q = √(Z2/Z1 − 1)
#[inline]
pub fn l_network_q(z_source: f64, z_load: f64) -> f64 {
    (z_load / z_source - 1.0).sqrt()
}

/// Series and shunt reactances of the L-network for a given Q.
///
/// ```text
///   Z1 ──[XL]──┬── Z2
///              │
///             [XC]
///              │
///             GND
/// ```
///
/// # Formulas
/// - XL = Q·Z1
/// - XC = Z2/Q
///
/// # Returns
/// (XL, XC) in ohms
#[inline]
pub fn l_network_reactances(z_source: f64, z_load: f64, q: f64) -> (f64, f64) {
    (q * z_source, z_load / q)
}

// =============================================================================
// REFLECTION
// =============================================================================

/// Reflection coefficient magnitude from forward and reflected power.
///
/// # Formula
/// Γ = √(Pr/Pf)
#[inline]
pub fn reflection_coefficient(forward_power: f64, reflected_power: f64) -> f64 {
    (reflected_power / forward_power).sqrt()
}

/// Voltage standing wave ratio.
///
/// # Formula
/// VSWR = (1+Γ)/(1−Γ)
#[inline]
pub fn vswr(gamma: f64) -> f64 {
    (1.0 + gamma) / (1.0 - gamma)
}

/// Return loss.
///
/// # Formula
/// RL = −20·log₁₀(Γ)
#[inline]
pub fn return_loss_db(gamma: f64) -> f64 {
    -20.0 * gamma.log10()
}

// =============================================================================
// PROPAGATION
// =============================================================================

/// Free-space wavelength of a frequency.
///
/// # Formula
/// λ = c/f
///
/// # Example
/// ```rust
/// use portal_core::equations::rf::wavelength_from_frequency;
/// use portal_core::units::Megahertz;
///
/// let lambda = wavelength_from_frequency(Megahertz(300.0));
/// assert!((lambda.0 - 99.930819).abs() < 1e-5); // cm
/// ```
#[inline]
pub fn wavelength_from_frequency(frequency: Megahertz) -> Centimeters {
    let hz: Hertz = frequency.into();
    Meters(SPEED_OF_LIGHT_M_S / hz.0).into()
}

/// Frequency whose free-space wavelength is λ.
///
/// # Formula
/// f = c/λ
#[inline]
pub fn frequency_from_wavelength(wavelength: Centimeters) -> Megahertz {
    let meters: Meters = wavelength.into();
    Hertz(SPEED_OF_LIGHT_M_S / meters.0).into()
}

/// Free-space path loss between isotropic antennas.
///
/// # Formula
/// FSPL = 32.45 + 20·log₁₀(f_MHz) + 20·log₁₀(d_km)
#[inline]
pub fn free_space_path_loss_db(frequency: Megahertz, distance: Kilometers) -> f64 {
    FSPL_CONSTANT_DB + 20.0 * frequency.0.log10() + 20.0 * distance.0.log10()
}

/// Signal-to-noise ratio as a plain power ratio.
#[inline]
pub fn snr_linear(signal_power: f64, noise_power: f64) -> f64 {
    signal_power / noise_power
}

/// Signal-to-noise ratio in decibels.
///
/// # Formula
/// SNR_dB = 10·log₁₀(Ps/Pn)
#[inline]
pub fn snr_db(signal_power: f64, noise_power: f64) -> f64 {
    10.0 * snr_linear(signal_power, noise_power).log10()
}

// =============================================================================
// ANTENNAS
// =============================================================================

/// Physical length of a half-wave dipole (no end-effect shortening).
///
/// # Formula
/// L = λ/2 = c/(2f)
#[inline]
pub fn half_wave_dipole_length_m(frequency: Megahertz) -> Meters {
    let hz: Hertz = frequency.into();
    Meters(SPEED_OF_LIGHT_M_S / hz.0 / 2.0)
}

/// Physical length of a quarter-wave monopole (no end-effect shortening).
///
/// # Formula
/// L = λ/4 = c/(4f)
#[inline]
pub fn quarter_wave_monopole_length_m(frequency: Megahertz) -> Meters {
    let hz: Hertz = frequency.into();
    Meters(SPEED_OF_LIGHT_M_S / hz.0 / 4.0)
}

/// Phase constant β = 2π/λ (rad/m), used by the antenna calculator output.
#[inline]
pub fn phase_constant(wavelength: Meters) -> f64 {
    2.0 * PI / wavelength.0
}
