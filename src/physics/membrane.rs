// ⚡ Membrane Potentials - Goldman-Hodgkin-Katz and Nernst
//
// Concentrations in mM, temperature in °C, results in millivolts.
// Chloride is an anion, so its inside/outside terms swap in the GHK ratio.

use crate::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};

/// Gas constant, J/(mol·K)
pub const GAS_CONSTANT: f64 = 8.314462618;
/// Faraday constant, C/mol
pub const FARADAY: f64 = 96485.33212;
pub const ZERO_CELSIUS_K: f64 = 273.15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IonSpecies {
    /// Relative permeability
    pub permeability: f64,
    pub inside_mm: f64,
    pub outside_mm: f64,
}

impl IonSpecies {
    pub fn new(permeability: f64, inside_mm: f64, outside_mm: f64) -> Self {
        IonSpecies {
            permeability,
            inside_mm,
            outside_mm,
        }
    }
}

/// RT/F in volts
pub fn thermal_voltage(temperature_c: f64) -> f64 {
    GAS_CONSTANT * (temperature_c + ZERO_CELSIUS_K) / FARADAY
}

/// Equilibrium potential of a single ion
pub fn nernst_potential(valence: i32, inside_mm: f64, outside_mm: f64, temperature_c: f64) -> CalcResult<f64> {
    if valence == 0 {
        return Err(CalcError::invalid("valence", "cannot be 0"));
    }
    if inside_mm <= 0.0 || outside_mm <= 0.0 {
        return Err(CalcError::NoSolution(
            "both concentrations must be positive for a Nernst potential".to_string(),
        ));
    }
    let volts = thermal_voltage(temperature_c) / valence as f64 * (outside_mm / inside_mm).ln();
    Ok(volts * 1000.0)
}

/// Reversal potential for K⁺, Na⁺ and Cl⁻
pub fn goldman_potential(
    potassium: &IonSpecies,
    sodium: &IonSpecies,
    chloride: &IonSpecies,
    temperature_c: f64,
) -> CalcResult<f64> {
    let numerator = potassium.permeability * potassium.outside_mm
        + sodium.permeability * sodium.outside_mm
        + chloride.permeability * chloride.inside_mm;
    let denominator = potassium.permeability * potassium.inside_mm
        + sodium.permeability * sodium.inside_mm
        + chloride.permeability * chloride.outside_mm;

    if numerator <= 0.0 || denominator <= 0.0 {
        return Err(CalcError::NoSolution(
            "permeability-weighted concentrations must be positive on both sides".to_string(),
        ));
    }

    Ok(thermal_voltage(temperature_c) * (numerator / denominator).ln() * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resting_neuron() -> (IonSpecies, IonSpecies, IonSpecies) {
        (
            IonSpecies::new(1.0, 140.0, 5.0),
            IonSpecies::new(0.05, 15.0, 145.0),
            IonSpecies::new(0.45, 10.0, 110.0),
        )
    }

    #[test]
    fn test_goldman_resting_potential() {
        let (k, na, cl) = resting_neuron();
        let v = goldman_potential(&k, &na, &cl, 37.0).unwrap();
        assert!((v + 64.95).abs() < 0.05, "got {}", v);
    }

    #[test]
    fn test_goldman_reduces_to_nernst_for_single_ion() {
        let k = IonSpecies::new(1.0, 140.0, 5.0);
        let none = IonSpecies::new(0.0, 10.0, 10.0);
        let ghk = goldman_potential(&k, &none, &none, 20.0).unwrap();
        let nernst = nernst_potential(1, 140.0, 5.0, 20.0).unwrap();
        assert!((ghk - nernst).abs() < 1e-9);
    }

    #[test]
    fn test_nernst_potassium() {
        let v = nernst_potential(1, 140.0, 5.0, 37.0).unwrap();
        assert!((v + 89.06).abs() < 0.05, "got {}", v);
    }

    #[test]
    fn test_nernst_chloride_sign() {
        // Anion: more outside than inside gives a negative potential
        let v = nernst_potential(-1, 10.0, 110.0, 37.0).unwrap();
        assert!(v < 0.0);
    }

    #[test]
    fn test_zero_permeabilities_have_no_solution() {
        let none = IonSpecies::new(0.0, 10.0, 10.0);
        assert!(matches!(
            goldman_potential(&none, &none, &none, 37.0),
            Err(CalcError::NoSolution(_))
        ));
    }
}
