// 🌡️ Ideal-Gas Processes
//
// SI units throughout (mol, K, m³, Pa, J). W is work done BY the gas and
// the first law reads ΔU = Q − W.

use crate::error::{CalcError, CalcResult};
use crate::physics::membrane::GAS_CONSTANT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GasKind {
    Monatomic,
    Diatomic,
}

impl GasKind {
    /// Molar heat capacity at constant volume
    pub fn cv(&self) -> f64 {
        match self {
            GasKind::Monatomic => 1.5 * GAS_CONSTANT,
            GasKind::Diatomic => 2.5 * GAS_CONSTANT,
        }
    }

    pub fn cp(&self) -> f64 {
        self.cv() + GAS_CONSTANT
    }

    pub fn gamma(&self) -> f64 {
        self.cp() / self.cv()
    }
}

impl Default for GasKind {
    fn default() -> Self {
        GasKind::Monatomic
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Process {
    Isothermal { final_volume: f64 },
    Isobaric { final_volume: f64 },
    Isochoric { final_temperature: f64 },
    Adiabatic { final_volume: f64 },
}

impl Process {
    pub fn name(&self) -> &'static str {
        match self {
            Process::Isothermal { .. } => "isothermal",
            Process::Isobaric { .. } => "isobaric",
            Process::Isochoric { .. } => "isochoric",
            Process::Adiabatic { .. } => "adiabatic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasState {
    pub pressure: f64,
    pub volume: f64,
    pub temperature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub initial: GasState,
    pub final_state: GasState,
    pub work_by_gas: f64,
    pub heat_added: f64,
    pub internal_energy_change: f64,
    pub entropy_change: f64,
}

pub fn run_process(
    moles: f64,
    gas: GasKind,
    initial_temperature: f64,
    initial_volume: f64,
    process: Process,
) -> CalcResult<ProcessResult> {
    if !(moles > 0.0) {
        return Err(CalcError::invalid("moles", "must be greater than 0"));
    }
    if !(initial_temperature > 0.0) {
        return Err(CalcError::invalid("initial_temperature", "must be above absolute zero"));
    }
    if !(initial_volume > 0.0) {
        return Err(CalcError::invalid("initial_volume", "must be greater than 0"));
    }

    let nr = moles * GAS_CONSTANT;
    let t1 = initial_temperature;
    let v1 = initial_volume;
    let p1 = nr * t1 / v1;
    let initial = GasState {
        pressure: p1,
        volume: v1,
        temperature: t1,
    };
    let ncv = moles * gas.cv();
    let ncp = moles * gas.cp();

    let (v2, t2, work, heat, entropy) = match process {
        Process::Isothermal { final_volume: v2 } => {
            check_volume(v2)?;
            let work = nr * t1 * (v2 / v1).ln();
            (v2, t1, work, work, nr * (v2 / v1).ln())
        }
        Process::Isobaric { final_volume: v2 } => {
            check_volume(v2)?;
            let t2 = t1 * v2 / v1;
            (v2, t2, p1 * (v2 - v1), ncp * (t2 - t1), ncp * (t2 / t1).ln())
        }
        Process::Isochoric { final_temperature: t2 } => {
            if !(t2 > 0.0) {
                return Err(CalcError::invalid("final_temperature", "must be above absolute zero"));
            }
            (v1, t2, 0.0, ncv * (t2 - t1), ncv * (t2 / t1).ln())
        }
        Process::Adiabatic { final_volume: v2 } => {
            check_volume(v2)?;
            let t2 = t1 * (v1 / v2).powf(gas.gamma() - 1.0);
            (v2, t2, ncv * (t1 - t2), 0.0, 0.0)
        }
    };

    Ok(ProcessResult {
        initial,
        final_state: GasState {
            pressure: nr * t2 / v2,
            volume: v2,
            temperature: t2,
        },
        work_by_gas: work,
        heat_added: heat,
        internal_energy_change: ncv * (t2 - t1),
        entropy_change: entropy,
    })
}

fn check_volume(v: f64) -> CalcResult<()> {
    if v > 0.0 && v.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid("final_volume", "must be greater than 0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(process: Process, gas: GasKind) -> ProcessResult {
        run_process(1.0, gas, 300.0, 0.01, process).unwrap()
    }

    fn all_processes() -> Vec<Process> {
        vec![
            Process::Isothermal { final_volume: 0.02 },
            Process::Isobaric { final_volume: 0.02 },
            Process::Isochoric { final_temperature: 450.0 },
            Process::Adiabatic { final_volume: 0.02 },
        ]
    }

    #[test]
    fn test_isothermal_expansion() {
        let r = run(Process::Isothermal { final_volume: 0.02 }, GasKind::Monatomic);
        assert!((r.work_by_gas - 1728.94).abs() < 0.05, "got {}", r.work_by_gas);
        assert_eq!(r.internal_energy_change, 0.0);
        assert!((r.final_state.pressure - r.initial.pressure / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_adiabatic_expansion_cools() {
        let r = run(Process::Adiabatic { final_volume: 0.02 }, GasKind::Monatomic);
        assert!((r.final_state.temperature - 188.99).abs() < 0.01);
        assert_eq!(r.heat_added, 0.0);
        assert!(r.work_by_gas > 0.0);
    }

    #[test]
    fn test_first_law_holds_for_every_process() {
        for gas in [GasKind::Monatomic, GasKind::Diatomic] {
            for process in all_processes() {
                let r = run(process, gas);
                let lhs = r.internal_energy_change;
                let rhs = r.heat_added - r.work_by_gas;
                assert!((lhs - rhs).abs() < 1e-6, "{} {:?}", process.name(), gas);
            }
        }
    }

    #[test]
    fn test_ideal_gas_law_at_final_state() {
        for process in all_processes() {
            let r = run(process, GasKind::Diatomic);
            let s = r.final_state;
            assert!((s.pressure * s.volume - GAS_CONSTANT * s.temperature).abs() < 1e-6);
        }
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let err = run_process(0.0, GasKind::Monatomic, 300.0, 0.01, Process::Isothermal { final_volume: 0.02 })
            .unwrap_err();
        assert_eq!(err.field(), Some("moles"));

        let err = run_process(1.0, GasKind::Monatomic, 300.0, 0.01, Process::Adiabatic { final_volume: -1.0 })
            .unwrap_err();
        assert_eq!(err.field(), Some("final_volume"));
    }
}
