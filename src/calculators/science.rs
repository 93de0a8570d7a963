// 🔬 Science Calculators - Goldman membrane potential, ideal-gas processes

use super::Calculator;
use crate::error::{CalcError, CalcResult};
use crate::export::{fmt2, Report};
use crate::physics::{goldman_potential, nernst_potential, run_process, GasKind, IonSpecies, Process, ProcessResult};
use crate::validate::{require_non_negative, require_range};
use serde::{Deserialize, Serialize};

// ============================================================================
// GOLDMAN EQUATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldmanInput {
    #[serde(default = "default_body_temperature")]
    pub temperature_celsius: f64,
    pub potassium: IonSpecies,
    pub sodium: IonSpecies,
    pub chloride: IonSpecies,
}

fn default_body_temperature() -> f64 {
    37.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldmanOutput {
    pub reversal_potential_mv: f64,
    /// None when an ion has a zero concentration on either side
    pub potassium_nernst_mv: Option<f64>,
    pub sodium_nernst_mv: Option<f64>,
    pub chloride_nernst_mv: Option<f64>,
    pub temperature_celsius: f64,
}

pub struct GoldmanCalculator;

fn check_ion(name: &str, ion: &IonSpecies) -> CalcResult<()> {
    require_non_negative(&format!("{}.permeability", name), ion.permeability)?;
    require_non_negative(&format!("{}.inside_mm", name), ion.inside_mm)?;
    require_non_negative(&format!("{}.outside_mm", name), ion.outside_mm)?;
    Ok(())
}

impl Calculator for GoldmanCalculator {
    const KEY: &'static str = "goldman";
    const TITLE: &'static str = "Goldman Equation Calculator";

    type Input = GoldmanInput;
    type Output = GoldmanOutput;

    fn validate(input: &GoldmanInput) -> CalcResult<()> {
        require_range("temperature_celsius", input.temperature_celsius, -273.15, 1_000.0)?;
        if input.temperature_celsius <= -273.15 {
            return Err(CalcError::invalid("temperature_celsius", "must be above absolute zero"));
        }
        check_ion("potassium", &input.potassium)?;
        check_ion("sodium", &input.sodium)?;
        check_ion("chloride", &input.chloride)?;
        Ok(())
    }

    fn compute(input: &GoldmanInput) -> CalcResult<GoldmanOutput> {
        let t = input.temperature_celsius;
        let reversal = goldman_potential(&input.potassium, &input.sodium, &input.chloride, t)?;
        let nernst = |valence: i32, ion: &IonSpecies| nernst_potential(valence, ion.inside_mm, ion.outside_mm, t).ok();

        Ok(GoldmanOutput {
            reversal_potential_mv: reversal,
            potassium_nernst_mv: nernst(1, &input.potassium),
            sodium_nernst_mv: nernst(1, &input.sodium),
            chloride_nernst_mv: nernst(-1, &input.chloride),
            temperature_celsius: t,
        })
    }
}

impl Report for GoldmanOutput {
    fn summary(&self) -> Vec<(String, String)> {
        let mv = |v: Option<f64>| v.map(|v| format!("{} mV", fmt2(v))).unwrap_or_else(|| "n/a".to_string());
        vec![
            ("Membrane potential".to_string(), mv(Some(self.reversal_potential_mv))),
            ("E(K+)".to_string(), mv(self.potassium_nernst_mv)),
            ("E(Na+)".to_string(), mv(self.sodium_nernst_mv)),
            ("E(Cl-)".to_string(), mv(self.chloride_nernst_mv)),
            ("Temperature".to_string(), format!("{} °C", fmt2(self.temperature_celsius))),
        ]
    }
}

// ============================================================================
// THERMODYNAMIC PROCESS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermoInput {
    pub moles: f64,
    #[serde(default)]
    pub gas: GasKind,
    /// Kelvin
    pub initial_temperature: f64,
    /// Cubic metres
    pub initial_volume: f64,
    pub process: Process,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermoOutput {
    pub process: String,
    #[serde(flatten)]
    pub result: ProcessResult,
}

pub struct ThermoCalculator;

impl Calculator for ThermoCalculator {
    const KEY: &'static str = "thermo";
    const TITLE: &'static str = "Thermodynamics Calculator";

    type Input = ThermoInput;
    type Output = ThermoOutput;

    fn validate(input: &ThermoInput) -> CalcResult<()> {
        // run_process checks ranges; only reject non-finite here
        for (field, v) in [
            ("moles", input.moles),
            ("initial_temperature", input.initial_temperature),
            ("initial_volume", input.initial_volume),
        ] {
            if !v.is_finite() {
                return Err(CalcError::invalid(field, "must be a finite number"));
            }
        }
        Ok(())
    }

    fn compute(input: &ThermoInput) -> CalcResult<ThermoOutput> {
        let result = run_process(
            input.moles,
            input.gas,
            input.initial_temperature,
            input.initial_volume,
            input.process,
        )?;
        Ok(ThermoOutput {
            process: input.process.name().to_string(),
            result,
        })
    }
}

impl Report for ThermoOutput {
    fn summary(&self) -> Vec<(String, String)> {
        let r = &self.result;
        vec![
            ("Process".to_string(), self.process.clone()),
            ("Work by gas (J)".to_string(), fmt2(r.work_by_gas)),
            ("Heat added (J)".to_string(), fmt2(r.heat_added)),
            ("ΔU (J)".to_string(), fmt2(r.internal_energy_change)),
            ("ΔS (J/K)".to_string(), format!("{:.4}", r.entropy_change)),
        ]
    }

    fn headers(&self) -> Vec<String> {
        ["State", "Pressure (Pa)", "Volume (m³)", "Temperature (K)"]
            .iter()
            .map(|h| h.to_string())
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        [("Initial", self.result.initial), ("Final", self.result.final_state)]
            .iter()
            .map(|(label, s)| {
                vec![
                    label.to_string(),
                    fmt2(s.pressure),
                    format!("{:.6}", s.volume),
                    fmt2(s.temperature),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn neuron() -> GoldmanInput {
        GoldmanInput {
            temperature_celsius: 37.0,
            potassium: IonSpecies::new(1.0, 140.0, 5.0),
            sodium: IonSpecies::new(0.05, 15.0, 145.0),
            chloride: IonSpecies::new(0.45, 10.0, 110.0),
        }
    }

    #[test]
    fn test_goldman_with_nernst_breakdown() {
        let out = GoldmanCalculator::calculate(&neuron()).unwrap();
        assert!((out.reversal_potential_mv + 64.95).abs() < 0.05);

        let ek = out.potassium_nernst_mv.unwrap();
        let ena = out.sodium_nernst_mv.unwrap();
        // Resting potential sits between the K and Na equilibria
        assert!(ek < out.reversal_potential_mv && out.reversal_potential_mv < ena);
    }

    #[test]
    fn test_goldman_default_temperature() {
        let input: GoldmanInput = serde_json::from_value(json!({
            "potassium": { "permeability": 1.0, "inside_mm": 140.0, "outside_mm": 5.0 },
            "sodium": { "permeability": 0.05, "inside_mm": 15.0, "outside_mm": 145.0 },
            "chloride": { "permeability": 0.45, "inside_mm": 10.0, "outside_mm": 110.0 }
        }))
        .unwrap();
        assert_eq!(input.temperature_celsius, 37.0);
    }

    #[test]
    fn test_goldman_zero_concentration_skips_nernst() {
        let mut input = neuron();
        input.chloride = IonSpecies::new(0.0, 0.0, 0.0);
        let out = GoldmanCalculator::calculate(&input).unwrap();
        assert_eq!(out.chloride_nernst_mv, None);
        assert!(out.summary().iter().any(|(_, v)| v == "n/a"));
    }

    #[test]
    fn test_goldman_negative_concentration() {
        let mut input = neuron();
        input.sodium.outside_mm = -1.0;
        assert_eq!(
            GoldmanCalculator::calculate(&input).unwrap_err().field(),
            Some("sodium.outside_mm")
        );
    }

    #[test]
    fn test_thermo_from_json() {
        let input: ThermoInput = serde_json::from_value(json!({
            "moles": 1.0,
            "gas": "monatomic",
            "initial_temperature": 300.0,
            "initial_volume": 0.01,
            "process": { "kind": "isothermal", "final_volume": 0.02 }
        }))
        .unwrap();
        let out = ThermoCalculator::calculate(&input).unwrap();

        assert_eq!(out.process, "isothermal");
        assert!((out.result.work_by_gas - 1728.94).abs() < 0.05);
        assert_eq!(out.rows().len(), 2);
    }

    #[test]
    fn test_thermo_rejects_nan() {
        let input = ThermoInput {
            moles: f64::NAN,
            gas: GasKind::Diatomic,
            initial_temperature: 300.0,
            initial_volume: 0.01,
            process: Process::Isochoric { final_temperature: 400.0 },
        };
        assert_eq!(ThermoCalculator::calculate(&input).unwrap_err().field(), Some("moles"));
    }
}
