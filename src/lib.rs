// Calculator Suite - Core Library
// Shared formulas, calculator widgets, exports, sports listings and storage
// for the CLI, the TUI browser and the API server.

pub mod error;
pub mod validate;
pub mod finance;        // Accrual stepper, closed forms, payoff strategies
pub mod math;           // Number theory, triangle solver
pub mod physics;        // Membrane potentials, ideal-gas processes
pub mod export;         // Report trait, CSV / text exports
pub mod calculators;    // One widget per calculator, dispatch by key
pub mod sports;
pub mod storage;        // SQLite-backed inputs + history
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{CalcError, CalcResult};
pub use calculators::{Calculator, CalculatorKind, Evaluation};
pub use export::{
    csv_string, export_to_file, render_text_report, write_csv,
    ExportFormat, Report,
};
pub use finance::{
    Accrual, AccrualSchedule, Flow, PeriodRow,
    Compounding, Debt, PayoffPlan, PayoffStrategy,
};
pub use sports::{
    country_summary, filter_entries, load_entries, sort_entries,
    CountrySummary, EntryFilter, SortKey, SportsEntry,
};
pub use storage::{HistoryEntry, HistoryStore, Recorded};
pub use config::AppConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
