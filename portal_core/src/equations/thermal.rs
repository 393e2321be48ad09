//! # Thermal Formulas
//!
//! Steady-state heat transfer through walls, from surfaces, and along pin fins.
//!
//! ## Notation
//!
//! - `k` = Thermal conductivity (W/m·K)
//! - `h` = Convection coefficient (W/m²·K)
//! - `A` = Area (m²), `t` = Wall thickness (m), `ΔT` = Temperature difference (K)
//! - `D` = Pin fin diameter (m), `L` = Pin fin length (m)

use std::f64::consts::PI;

/// Convection coefficient assumed for the fin calculator when none is given (W/m²·K)
pub const DEFAULT_FIN_CONVECTION: f64 = 25.0;

/// Conductivity assumed for the fin calculator when none is given (W/m·K, aluminium)
pub const DEFAULT_FIN_CONDUCTIVITY: f64 = 200.0;

/// Heat flow through a plane wall (Fourier's law).
///
/// # Formula
/// Q = k·A·ΔT/t
#[inline]
pub fn conduction_heat_rate(conductivity: f64, area: f64, thickness: f64, temp_diff: f64) -> f64 {
    conductivity * area * temp_diff / thickness
}

/// Heat flow from a surface to a fluid (Newton's law of cooling).
///
/// # Formula
/// Q = h·A·ΔT
#[inline]
pub fn convection_heat_rate(convection: f64, area: f64, temp_diff: f64) -> f64 {
    convection * area * temp_diff
}

/// Fin parameter m of a circular pin fin.
///
/// # Formula
/// m = √(hP/(kA)), with P = πD and A = πD²/4
#[inline]
pub fn pin_fin_m(convection: f64, conductivity: f64, diameter: f64) -> f64 {
    let perimeter = PI * diameter;
    let area = PI * diameter * diameter / 4.0;
    ((convection * perimeter) / (conductivity * area)).sqrt()
}

/// Efficiency of a pin fin with an adiabatic tip.
///
/// # Formula
/// η = tanh(mL)/(mL)
#[inline]
pub fn fin_efficiency(m: f64, length: f64) -> f64 {
    let ml = m * length;
    ml.tanh() / ml
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_conduction() {
        // Brick wall: k=0.72, 10 m², 0.2 m thick, 20 K
        assert!(approx_eq(conduction_heat_rate(0.72, 10.0, 0.2, 20.0), 720.0, 1e-9));
    }

    #[test]
    fn test_convection() {
        assert!(approx_eq(convection_heat_rate(25.0, 2.0, 30.0), 1500.0, 1e-12));
    }

    #[test]
    fn test_pin_fin_m_reduces_to_4h_over_kd() {
        let m = pin_fin_m(25.0, 200.0, 0.01);
        assert!(approx_eq(m, (4.0 * 25.0 / (200.0 * 0.01_f64)).sqrt(), 1e-12));
    }

    #[test]
    fn test_fin_efficiency_bounds() {
        let m = pin_fin_m(DEFAULT_FIN_CONVECTION, DEFAULT_FIN_CONDUCTIVITY, 0.005);
        let short = fin_efficiency(m, 0.001);
        let long = fin_efficiency(m, 0.5);
        assert!(short > 0.99 && short < 1.0);
        assert!(long > 0.0 && long < short);
    }
}
