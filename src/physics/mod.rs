// Physics formulas: membrane potentials and ideal-gas processes

pub mod membrane;
pub mod thermo;

pub use membrane::{goldman_potential, nernst_potential, thermal_voltage, IonSpecies, FARADAY, GAS_CONSTANT};
pub use thermo::{run_process, GasKind, GasState, Process, ProcessResult};
