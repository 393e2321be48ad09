//! # Engineering Equations
//!
//! Closed-form formulas used by the calculators, kept in one place so each
//! can be checked against its textbook form. Functions here do no validation:
//! they take plain `f64` values in base units and return whatever IEEE-754
//! arithmetic produces. Validation lives in [`crate::calculations`].
//!
//! ## Modules
//!
//! - [`electrical`] - Ohm's law, dividers, reactance, RC networks
//! - [`mechanical`] - Fluid flow, structural stress, gearing
//! - [`rf`] - Matching networks, VSWR, propagation, antennas
//! - [`thermal`] - Conduction, convection, fin efficiency
//!
//! ## Units
//!
//! SI throughout unless a function name says otherwise (`_mhz`, `_km`, `_mm`,
//! `_db`). The RF path-loss and antenna formulas keep the fixed MHz/km/m
//! conventions of the published calculators rather than taking a unit system.

pub mod electrical;
pub mod mechanical;
pub mod rf;
pub mod thermal;

pub use electrical::{
    capacitive_reactance, inductive_reactance, ohms_current, ohms_resistance, ohms_voltage,
    power, rc_cutoff_frequency, rc_time_constant, voltage_divider_output,
};

pub use mechanical::{
    axial_stress, bending_stress, darcy_pressure_drop, euler_buckling_load, gear_output_rpm,
    gear_output_torque, gear_ratio, min_shaft_diameter_mm, reynolds_number, safety_factor,
    solid_shaft_polar_moment, torsional_stress, FlowRegime,
};

pub use rf::{
    free_space_path_loss_db, frequency_from_wavelength, half_wave_dipole_length_m,
    l_network_q, l_network_reactances, quarter_wave_monopole_length_m, reflection_coefficient,
    return_loss_db, snr_db, snr_linear, vswr, wavelength_from_frequency, SPEED_OF_LIGHT_M_S,
};

pub use thermal::{conduction_heat_rate, convection_heat_rate, fin_efficiency, pin_fin_m};
