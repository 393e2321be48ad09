//! # Electrical Circuit Formulas
//!
//! DC and single-frequency AC relationships for passive components.
//!
//! ## Notation
//!
//! - `V` = Voltage (V)
//! - `I` = Current (A)
//! - `R` = Resistance (Ω)
//! - `P` = Power (W)
//! - `C` = Capacitance (F)
//! - `L` = Inductance (H)
//! - `f` = Frequency (Hz)
//! - `τ` = Time constant (s)

use std::f64::consts::PI;

// =============================================================================
// OHM'S LAW
// =============================================================================

/// Voltage across a resistance carrying a current.
///
/// # Formula
/// V = I·R
#[inline]
pub fn ohms_voltage(current_a: f64, resistance_ohm: f64) -> f64 {
    current_a * resistance_ohm
}

/// Current through a resistance under a voltage.
///
/// # Formula
/// I = V/R
#[inline]
pub fn ohms_current(voltage_v: f64, resistance_ohm: f64) -> f64 {
    voltage_v / resistance_ohm
}

/// Resistance that passes a current under a voltage.
///
/// # Formula
/// R = V/I
#[inline]
pub fn ohms_resistance(voltage_v: f64, current_a: f64) -> f64 {
    voltage_v / current_a
}

// =============================================================================
// DIVIDERS AND POWER
// =============================================================================

/// Unloaded output of a two-resistor divider, measured across R2.
///
/// ```text
///   Vin ──[R1]──┬── Vout
///               │
///              [R2]
///               │
///              GND
/// ```
///
/// # Formula
/// Vout = Vin·R2/(R1+R2)
///
/// # Example
/// ```rust
/// use portal_core::equations::electrical::voltage_divider_output;
///
/// let vout = voltage_divider_output(12.0, 1000.0, 2000.0);
/// assert_eq!(vout, 8.0);
/// ```
#[inline]
pub fn voltage_divider_output(vin_v: f64, r1_ohm: f64, r2_ohm: f64) -> f64 {
    vin_v * r2_ohm / (r1_ohm + r2_ohm)
}

/// Power dissipated by a load.
///
/// # Formula
/// P = V·I
#[inline]
pub fn power(voltage_v: f64, current_a: f64) -> f64 {
    voltage_v * current_a
}

// =============================================================================
// REACTANCE
// =============================================================================

/// Capacitive reactance.
///
/// # Formula
/// Xc = 1/(2πfC)
#[inline]
pub fn capacitive_reactance(capacitance_f: f64, frequency_hz: f64) -> f64 {
    1.0 / (2.0 * PI * frequency_hz * capacitance_f)
}

/// Inductive reactance.
///
/// # Formula
/// XL = 2πfL
#[inline]
pub fn inductive_reactance(inductance_h: f64, frequency_hz: f64) -> f64 {
    2.0 * PI * frequency_hz * inductance_h
}

// =============================================================================
// RC NETWORKS
// =============================================================================

/// RC time constant.
///
/// # Formula
/// τ = R·C
#[inline]
pub fn rc_time_constant(resistance_ohm: f64, capacitance_f: f64) -> f64 {
    resistance_ohm * capacitance_f
}

/// -3 dB corner of a first-order RC filter.
///
/// # Formula
/// fc = 1/(2πτ)
#[inline]
pub fn rc_cutoff_frequency(tau_s: f64) -> f64 {
    1.0 / (2.0 * PI * tau_s)
}
