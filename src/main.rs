// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use std::path::{Path, PathBuf};

use calculator_suite::calculators::{
    load_debts, AnnuityCalculator, AnnuityInput, AnnuityPayoutCalculator, AnnuityPayoutInput, CdCalculator,
    CdInput, CompoundCalculator, CompoundInput, CreditCardCalculator, CreditCardInput, DebtPayoffCalculator,
    DebtPayoffInput, GcfLcmCalculator, GcfLcmInput, GoldmanCalculator, GoldmanInput, IraAccount, IraCalculator,
    IraInput, LeaseCalculator, LeaseInput, LeaseRate, LoanCalculator, LoanInput, ThermoCalculator, ThermoInput,
    TriangleCalculator,
};
use calculator_suite::finance::{Compounding, PayoffStrategy};
use calculator_suite::math::TriangleInput;
use calculator_suite::physics::{GasKind, IonSpecies, Process};
use calculator_suite::sports::{self, EntryFilter, SortKey};
use calculator_suite::validate::parse_cli_amount;
use calculator_suite::{
    export_to_file, logging, render_text_report, AppConfig, Calculator, CalculatorKind, ExportFormat,
    HistoryStore, Recorded,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Financial, math and science calculators with sports listings", long_about = None)]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Loan payment and amortization schedule
    Loan(LoanArgs),
    /// Vehicle lease payment
    Lease(LeaseArgs),
    /// Certificate of deposit growth
    Cd(CdArgs),
    /// Compound interest with periodic contributions
    Compound(CompoundArgs),
    /// Traditional / Roth IRA projection
    Ira(IraArgs),
    /// Annuity accumulation
    Annuity(AnnuityArgs),
    /// Level payout from an annuity
    AnnuityPayout(AnnuityPayoutArgs),
    /// Credit card payoff time or required payment
    CreditCard(CreditCardArgs),
    /// Multi-debt payoff plan (avalanche / snowball)
    DebtPayoff(DebtPayoffArgs),
    /// Greatest common factor and least common multiple
    GcfLcm(GcfLcmArgs),
    /// Solve a triangle from three known values
    Triangle(TriangleArgs),
    /// Goldman-Hodgkin-Katz membrane potential
    Goldman(GoldmanArgs),
    /// Ideal-gas thermodynamic process
    Thermo(ThermoArgs),
    /// List and filter sports entries
    Sports(SportsArgs),
    /// Show or clear saved calculation history
    History(HistoryArgs),
    /// Interactive sports browser
    Browse(BrowseArgs),
}

/// Output options shared by every calculator
#[derive(Args, Debug, Clone)]
struct OutputArgs {
    /// Export the table (or summary) as CSV
    #[arg(long, value_hint = ValueHint::FilePath)]
    csv: Option<PathBuf>,

    /// Export a plain-text report
    #[arg(long, value_hint = ValueHint::FilePath)]
    report: Option<PathBuf>,

    /// Save inputs and record the result in history
    #[arg(long, action = ArgAction::SetTrue)]
    save: bool,

    /// Print the raw output as JSON instead of a report
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Args, Debug)]
struct LoanArgs {
    #[arg(long, value_parser = parse_cli_amount)]
    amount: f64,
    /// Annual rate, percent
    #[arg(long, value_parser = parse_cli_amount)]
    rate: f64,
    #[arg(long)]
    months: u32,
    /// Extra paid every month
    #[arg(long, default_value_t = 0.0, value_parser = parse_cli_amount)]
    extra: f64,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct LeaseArgs {
    #[arg(long, value_parser = parse_cli_amount)]
    price: f64,
    #[arg(long, default_value_t = 0.0, value_parser = parse_cli_amount)]
    down: f64,
    #[arg(long, default_value_t = 0.0, value_parser = parse_cli_amount)]
    trade_in: f64,
    #[arg(long, value_parser = parse_cli_amount)]
    residual: f64,
    #[arg(long, conflicts_with = "apr", required_unless_present = "apr")]
    money_factor: Option<f64>,
    /// Annual rate, percent
    #[arg(long, value_parser = parse_cli_amount)]
    apr: Option<f64>,
    #[arg(long)]
    months: u32,
    /// Sales tax, percent
    #[arg(long, default_value_t = 0.0, value_parser = parse_cli_amount)]
    tax: f64,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum CompoundingOpt {
    Annually,
    Semiannually,
    Quarterly,
    Monthly,
    Daily,
}

impl From<CompoundingOpt> for Compounding {
    fn from(value: CompoundingOpt) -> Self {
        match value {
            CompoundingOpt::Annually => Compounding::Annually,
            CompoundingOpt::Semiannually => Compounding::SemiAnnually,
            CompoundingOpt::Quarterly => Compounding::Quarterly,
            CompoundingOpt::Monthly => Compounding::Monthly,
            CompoundingOpt::Daily => Compounding::Daily,
        }
    }
}

#[derive(Args, Debug)]
struct CdArgs {
    #[arg(long, value_parser = parse_cli_amount)]
    deposit: f64,
    #[arg(long, value_parser = parse_cli_amount)]
    rate: f64,
    #[arg(long)]
    months: u32,
    #[arg(long, value_enum, default_value_t = CompoundingOpt::Monthly)]
    compounding: CompoundingOpt,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct CompoundArgs {
    #[arg(long, default_value_t = 0.0, value_parser = parse_cli_amount)]
    principal: f64,
    #[arg(long, value_parser = parse_cli_amount)]
    rate: f64,
    #[arg(long)]
    years: u32,
    /// Deposit per compounding period
    #[arg(long, default_value_t = 0.0, value_parser = parse_cli_amount)]
    contribution: f64,
    #[arg(long, value_enum, default_value_t = CompoundingOpt::Monthly)]
    compounding: CompoundingOpt,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct IraArgs {
    #[arg(long)]
    age: u32,
    #[arg(long)]
    retirement_age: u32,
    #[arg(long, default_value_t = 0.0, value_parser = parse_cli_amount)]
    balance: f64,
    #[arg(long, value_parser = parse_cli_amount)]
    contribution: f64,
    /// Expected annual return, percent
    #[arg(long, value_parser = parse_cli_amount)]
    rate: f64,
    #[arg(long, action = ArgAction::SetTrue)]
    roth: bool,
    /// Tax rate in retirement, percent
    #[arg(long, default_value_t = 0.0, value_parser = parse_cli_amount)]
    tax: f64,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct AnnuityArgs {
    #[arg(long, default_value_t = 0.0, value_parser = parse_cli_amount)]
    principal: f64,
    #[arg(long, default_value_t = 0.0, value_parser = parse_cli_amount)]
    addition: f64,
    #[arg(long, value_parser = parse_cli_amount)]
    rate: f64,
    #[arg(long)]
    years: u32,
    /// Additions at the start of each year
    #[arg(long, action = ArgAction::SetTrue)]
    due: bool,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct AnnuityPayoutArgs {
    #[arg(long, value_parser = parse_cli_amount)]
    principal: f64,
    #[arg(long, value_parser = parse_cli_amount)]
    rate: f64,
    #[arg(long)]
    years: u32,
    #[arg(long, default_value_t = 12)]
    per_year: u32,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct CreditCardArgs {
    #[arg(long, value_parser = parse_cli_amount)]
    balance: f64,
    #[arg(long, value_parser = parse_cli_amount)]
    apr: f64,
    #[arg(long, value_parser = parse_cli_amount)]
    payment: Option<f64>,
    /// Target months to pay off
    #[arg(long)]
    months: Option<u32>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum StrategyOpt {
    Avalanche,
    Snowball,
}

impl From<StrategyOpt> for PayoffStrategy {
    fn from(value: StrategyOpt) -> Self {
        match value {
            StrategyOpt::Avalanche => PayoffStrategy::Avalanche,
            StrategyOpt::Snowball => PayoffStrategy::Snowball,
        }
    }
}

#[derive(Args, Debug)]
struct DebtPayoffArgs {
    /// CSV with name,balance,apr_percent,minimum_payment
    #[arg(value_hint = ValueHint::FilePath)]
    debts: PathBuf,
    #[arg(long, value_parser = parse_cli_amount)]
    budget: f64,
    #[arg(long, value_enum, default_value_t = StrategyOpt::Avalanche)]
    strategy: StrategyOpt,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct GcfLcmArgs {
    #[arg(required = true, num_args = 2..)]
    numbers: Vec<u64>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct TriangleArgs {
    #[arg(short = 'a', long = "side-a")]
    a: Option<f64>,
    #[arg(short = 'b', long = "side-b")]
    b: Option<f64>,
    #[arg(short = 'c', long = "side-c")]
    c: Option<f64>,
    /// Angle A, degrees
    #[arg(long = "angle-a")]
    angle_a: Option<f64>,
    #[arg(long = "angle-b")]
    angle_b: Option<f64>,
    #[arg(long = "angle-c")]
    angle_c: Option<f64>,
    #[command(flatten)]
    output: OutputArgs,
}

/// Defaults are a typical mammalian neuron
#[derive(Args, Debug)]
struct GoldmanArgs {
    #[arg(long, default_value_t = 37.0)]
    temperature: f64,
    #[arg(long, default_value_t = 1.0)]
    p_k: f64,
    #[arg(long, default_value_t = 140.0)]
    k_in: f64,
    #[arg(long, default_value_t = 5.0)]
    k_out: f64,
    #[arg(long, default_value_t = 0.05)]
    p_na: f64,
    #[arg(long, default_value_t = 15.0)]
    na_in: f64,
    #[arg(long, default_value_t = 145.0)]
    na_out: f64,
    #[arg(long, default_value_t = 0.45)]
    p_cl: f64,
    #[arg(long, default_value_t = 10.0)]
    cl_in: f64,
    #[arg(long, default_value_t = 110.0)]
    cl_out: f64,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum GasOpt {
    Monatomic,
    Diatomic,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ProcessOpt {
    Isothermal,
    Isobaric,
    Isochoric,
    Adiabatic,
}

#[derive(Args, Debug)]
struct ThermoArgs {
    #[arg(long, default_value_t = 1.0)]
    moles: f64,
    #[arg(long, value_enum, default_value_t = GasOpt::Monatomic)]
    gas: GasOpt,
    /// Initial temperature, K
    #[arg(long)]
    temperature: f64,
    /// Initial volume, m³
    #[arg(long)]
    volume: f64,
    #[arg(long, value_enum)]
    process: ProcessOpt,
    /// Final volume, m³ (isothermal, isobaric, adiabatic)
    #[arg(long)]
    final_volume: Option<f64>,
    /// Final temperature, K (isochoric)
    #[arg(long)]
    final_temperature: Option<f64>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SortOpt {
    Rank,
    Name,
    Country,
    Score,
}

impl From<SortOpt> for SortKey {
    fn from(value: SortOpt) -> Self {
        match value {
            SortOpt::Rank => SortKey::Rank,
            SortOpt::Name => SortKey::Name,
            SortOpt::Country => SortKey::Country,
            SortOpt::Score => SortKey::Score,
        }
    }
}

#[derive(Args, Debug)]
struct SportsArgs {
    /// Roster file (CSV or JSON); defaults to the configured one
    #[arg(value_hint = ValueHint::FilePath)]
    file: Option<PathBuf>,
    /// Country filter, repeatable
    #[arg(long = "country")]
    countries: Vec<String>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    sport: Option<String>,
    #[arg(long, value_enum, default_value_t = SortOpt::Rank)]
    sort: SortOpt,
    /// Per-country summary instead of the entry list
    #[arg(long, action = ArgAction::SetTrue)]
    summary: bool,
}

#[derive(Args, Debug)]
struct HistoryArgs {
    /// Calculator key, e.g. loan or credit-card
    key: String,
    #[arg(long, default_value_t = 20)]
    limit: usize,
    /// Delete the history of this calculator
    #[arg(long, action = ArgAction::SetTrue)]
    clear: bool,
}

#[derive(Args, Debug)]
struct BrowseArgs {
    #[arg(value_hint = ValueHint::FilePath)]
    file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("❌ {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init(&logging::level_for(cli.verbose, &config.log_level));
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Command::Loan(args) => run_widget::<LoanCalculator>(
            LoanInput {
                amount: args.amount,
                annual_rate_percent: args.rate,
                term_months: args.months,
                extra_payment: args.extra,
            },
            &args.output,
            &config,
        ),
        Command::Lease(args) => {
            let rate = match (args.money_factor, args.apr) {
                (Some(mf), _) => LeaseRate::MoneyFactor(mf),
                (None, Some(apr)) => LeaseRate::Apr(apr),
                (None, None) => bail!("either --money-factor or --apr is required"),
            };
            run_widget::<LeaseCalculator>(
                LeaseInput {
                    vehicle_price: args.price,
                    down_payment: args.down,
                    trade_in: args.trade_in,
                    residual_value: args.residual,
                    rate,
                    term_months: args.months,
                    sales_tax_percent: args.tax,
                },
                &args.output,
                &config,
            )
        }
        Command::Cd(args) => run_widget::<CdCalculator>(
            CdInput {
                deposit: args.deposit,
                annual_rate_percent: args.rate,
                compounding: args.compounding.into(),
                term_months: args.months,
            },
            &args.output,
            &config,
        ),
        Command::Compound(args) => run_widget::<CompoundCalculator>(
            CompoundInput {
                principal: args.principal,
                annual_rate_percent: args.rate,
                compounding: args.compounding.into(),
                years: args.years,
                contribution_per_period: args.contribution,
            },
            &args.output,
            &config,
        ),
        Command::Ira(args) => run_widget::<IraCalculator>(
            IraInput {
                current_age: args.age,
                retirement_age: args.retirement_age,
                current_balance: args.balance,
                annual_contribution: args.contribution,
                annual_return_percent: args.rate,
                account: if args.roth { IraAccount::Roth } else { IraAccount::Traditional },
                retirement_tax_rate_percent: args.tax,
            },
            &args.output,
            &config,
        ),
        Command::Annuity(args) => run_widget::<AnnuityCalculator>(
            AnnuityInput {
                principal: args.principal,
                annual_addition: args.addition,
                annual_rate_percent: args.rate,
                years: args.years,
                additions_at_start: args.due,
            },
            &args.output,
            &config,
        ),
        Command::AnnuityPayout(args) => run_widget::<AnnuityPayoutCalculator>(
            AnnuityPayoutInput {
                principal: args.principal,
                annual_rate_percent: args.rate,
                years: args.years,
                payments_per_year: args.per_year,
            },
            &args.output,
            &config,
        ),
        Command::CreditCard(args) => run_widget::<CreditCardCalculator>(
            CreditCardInput {
                balance: args.balance,
                apr_percent: args.apr,
                monthly_payment: args.payment,
                payoff_months: args.months,
            },
            &args.output,
            &config,
        ),
        Command::DebtPayoff(args) => {
            let debts = load_debts(&args.debts)?;
            run_widget::<DebtPayoffCalculator>(
                DebtPayoffInput {
                    debts,
                    monthly_budget: args.budget,
                    strategy: args.strategy.into(),
                },
                &args.output,
                &config,
            )
        }
        Command::GcfLcm(args) => run_widget::<GcfLcmCalculator>(
            GcfLcmInput { numbers: args.numbers },
            &args.output,
            &config,
        ),
        Command::Triangle(args) => run_widget::<TriangleCalculator>(
            TriangleInput {
                a: args.a,
                b: args.b,
                c: args.c,
                angle_a: args.angle_a,
                angle_b: args.angle_b,
                angle_c: args.angle_c,
            },
            &args.output,
            &config,
        ),
        Command::Goldman(args) => run_widget::<GoldmanCalculator>(
            GoldmanInput {
                temperature_celsius: args.temperature,
                potassium: IonSpecies::new(args.p_k, args.k_in, args.k_out),
                sodium: IonSpecies::new(args.p_na, args.na_in, args.na_out),
                chloride: IonSpecies::new(args.p_cl, args.cl_in, args.cl_out),
            },
            &args.output,
            &config,
        ),
        Command::Thermo(args) => {
            let process = thermo_process(&args)?;
            run_widget::<ThermoCalculator>(
                ThermoInput {
                    moles: args.moles,
                    gas: match args.gas {
                        GasOpt::Monatomic => GasKind::Monatomic,
                        GasOpt::Diatomic => GasKind::Diatomic,
                    },
                    initial_temperature: args.temperature,
                    initial_volume: args.volume,
                    process,
                },
                &args.output,
                &config,
            )
        }
        Command::Sports(args) => run_sports(args, &config),
        Command::History(args) => run_history(args, &config),
        Command::Browse(args) => run_browse(args, &config),
    }
}

fn thermo_process(args: &ThermoArgs) -> Result<Process> {
    let need_volume = || match args.final_volume {
        Some(v) => Ok(v),
        None => bail!("--final-volume is required for a {:?} process", args.process),
    };
    Ok(match args.process {
        ProcessOpt::Isothermal => Process::Isothermal { final_volume: need_volume()? },
        ProcessOpt::Isobaric => Process::Isobaric { final_volume: need_volume()? },
        ProcessOpt::Adiabatic => Process::Adiabatic { final_volume: need_volume()? },
        ProcessOpt::Isochoric => match args.final_temperature {
            Some(t) => Process::Isochoric { final_temperature: t },
            None => bail!("--final-temperature is required for an isochoric process"),
        },
    })
}

/// Bare file names land in the configured export directory
fn export_path(path: &Path, config: &AppConfig) -> PathBuf {
    let bare = path.parent().map_or(true, |p| p.as_os_str().is_empty());
    if path.is_absolute() || !bare {
        path.to_path_buf()
    } else {
        config.export_dir.join(path)
    }
}

fn run_widget<C: Calculator>(input: C::Input, output_args: &OutputArgs, config: &AppConfig) -> Result<()> {
    let output = C::calculate(&input)?;

    if output_args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_text_report(C::TITLE, &output));
    }

    if let Some(path) = &output_args.csv {
        let path = export_path(path, config);
        export_to_file(&path, ExportFormat::Csv, C::TITLE, &output)?;
        println!("\n✓ CSV written to {}", path.display());
    }
    if let Some(path) = &output_args.report {
        let path = export_path(path, config);
        export_to_file(&path, ExportFormat::Text, C::TITLE, &output)?;
        println!("✓ Report written to {}", path.display());
    }

    if output_args.save {
        let store = HistoryStore::open(&config.database_path)?;
        store.save_inputs(C::KEY, &input)?;
        match store.record::<C>(&input, &output)? {
            Recorded::Appended(id) => println!("✓ Saved to history ({})", id),
            Recorded::Duplicate(_) => println!("✓ Inputs saved (same as the last history entry)"),
        }
    }

    Ok(())
}

fn sports_file(explicit: Option<PathBuf>, config: &AppConfig) -> Result<PathBuf> {
    match explicit.or_else(|| config.sports_data.clone()) {
        Some(path) => Ok(path),
        None => bail!("no sports file given and sports_data is not configured"),
    }
}

fn run_sports(args: SportsArgs, config: &AppConfig) -> Result<()> {
    let path = sports_file(args.file, config)?;
    let entries = sports::load_entries(&path)?;

    let filter = EntryFilter {
        countries: args.countries,
        name: args.name,
        sport: args.sport,
    };
    let mut found = sports::filter_entries(&entries, &filter);

    if args.summary {
        println!("{:<24} {:>8} {:>10}", "Country", "Entries", "Best rank");
        println!("{}", "-".repeat(44));
        for s in sports::country_summary(&found) {
            let best = s.best_rank.map_or("-".to_string(), |r| r.to_string());
            println!("{:<24} {:>8} {:>10}", s.country, s.entries, best);
        }
        return Ok(());
    }

    sports::sort_entries(&mut found, args.sort.into());
    println!(
        "{:>4}  {:<24} {:<18} {:<16} {:<18} {:>8}",
        "Rank", "Name", "Country", "Sport", "Team", "Score"
    );
    println!("{}", "-".repeat(94));
    for e in &found {
        let rank = if e.rank == 0 { "-".to_string() } else { e.rank.to_string() };
        println!(
            "{:>4}  {:<24} {:<18} {:<16} {:<18} {:>8.2}",
            rank, e.name, e.country, e.sport, e.team, e.score
        );
    }
    println!("\n{} of {} entries", found.len(), entries.len());
    Ok(())
}

fn run_history(args: HistoryArgs, config: &AppConfig) -> Result<()> {
    let kind = CalculatorKind::from_key(&args.key)?;
    let store = HistoryStore::open(&config.database_path)?;

    if args.clear {
        let removed = store.clear_history(kind.key())?;
        println!("✓ Removed {} {} entries", removed, kind.key());
        return Ok(());
    }

    let entries = store.history(kind.key())?;
    if entries.is_empty() {
        println!("No history for {}", kind.title());
        return Ok(());
    }

    println!("📜 {} history ({} entries)", kind.title(), entries.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for entry in entries.iter().take(args.limit) {
        println!("{}  {}", entry.recorded_at.format("%Y-%m-%d %H:%M:%S"), entry.input);
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn run_browse(args: BrowseArgs, config: &AppConfig) -> Result<()> {
    let path = sports_file(args.file, config)?;
    let entries = sports::load_entries(&path)?;
    if entries.is_empty() {
        bail!("{} has no entries", path.display());
    }

    let mut app = ui::App::new(entries);
    ui::run_ui(&mut app)?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_browse(_args: BrowseArgs, _config: &AppConfig) -> Result<()> {
    bail!("TUI mode not available; rebuild with --features tui")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_loan() {
        let cli = Cli::try_parse_from([
            "calculator-suite", "loan", "--amount", "$200,000", "--rate", "6%", "--months", "360", "--save",
        ])
        .unwrap();
        match cli.command {
            Command::Loan(args) => {
                assert_eq!(args.amount, 200_000.0);
                assert_eq!(args.rate, 6.0);
                assert!(args.output.save);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_cd_compounding() {
        let cli = Cli::try_parse_from([
            "calculator-suite", "cd", "--deposit", "10000", "--rate", "4.5", "--months", "24",
            "--compounding", "semiannually",
        ])
        .unwrap();
        match cli.command {
            Command::Cd(args) => {
                assert_eq!(Compounding::from(args.compounding), Compounding::SemiAnnually);
                assert_eq!(args.months, 24);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_lease_needs_a_rate() {
        let parsed = Cli::try_parse_from([
            "calculator-suite", "lease", "--price", "30000", "--residual", "18000", "--months", "36",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_gcf_needs_two_numbers() {
        assert!(Cli::try_parse_from(["calculator-suite", "gcf-lcm", "12"]).is_err());
        assert!(Cli::try_parse_from(["calculator-suite", "gcf-lcm", "12", "18"]).is_ok());
    }

    #[test]
    fn test_export_path_uses_export_dir_for_bare_names() {
        let config = AppConfig::default();
        assert_eq!(export_path(Path::new("loan.csv"), &config), config.export_dir.join("loan.csv"));
        assert_eq!(export_path(Path::new("out/loan.csv"), &config), PathBuf::from("out/loan.csv"));
    }
}
