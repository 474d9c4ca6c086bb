//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::adapters::config_market_adapter::ConfigMarketAdapter;
use crate::adapters::csv_adapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::typst_report::tables::fmt_currency;
use crate::adapters::typst_report::TypstReportAdapter;
use crate::domain::config_validation::{validate_forecast_config, validate_market_config};
use crate::domain::error::LendsimError;
use crate::domain::interest::{simple_yearly_interest, Forecast};
use crate::domain::portfolio::{format_health_factor, Portfolio};
use crate::domain::position::Position;
use crate::domain::rates::{resolve_rate, RateQuote};
use crate::domain::session::run_session;
use crate::domain::token::{find_token, Direction, Token, SUPPORTED_TOKENS};
use crate::ports::config_port::ConfigPort;
use crate::ports::market_port::MarketPort;
use crate::ports::report_port::ReportPort;

/// Projection horizon when neither the command line nor `[forecast] days` set one.
pub const DEFAULT_DAYS: u32 = 365;

#[derive(Parser, Debug)]
#[command(name = "lendsim", about = "DeFi lending and borrowing interest simulator")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Forecast the balance of a single supply or borrow position
    Forecast {
        #[arg(short, long)]
        token: String,
        #[arg(short, long)]
        amount: f64,
        #[arg(short, long)]
        days: Option<u32>,
        #[arg(long)]
        direction: Option<Direction>,
        /// Annual rate in percent, overriding configured and fallback rates
        #[arg(short, long)]
        rate: Option<f64>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the daily balance series as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write a Typst report
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Calendar date of day 0 in the report (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },
    /// Run a CSV of supply/borrow actions through a mock portfolio
    Simulate {
        #[arg(short, long)]
        actions: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Projection horizon for earnings and interest owed
        #[arg(short, long)]
        days: Option<u32>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List supply and borrow rates per token
    Rates {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Install the global tracing subscriber. `-v` forces debug output,
/// otherwise `RUST_LOG` applies, defaulting to warnings only.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("lendsim=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Forecast {
            token,
            amount,
            days,
            direction,
            rate,
            config,
            csv,
            output,
            start_date,
        } => run_forecast(&ForecastArgs {
            token,
            amount,
            days,
            direction,
            rate,
            config,
            csv,
            output,
            start_date,
        }),
        Command::Simulate {
            actions,
            config,
            days,
            output,
        } => run_simulate(&actions, config.as_ref(), days, output.as_ref()),
        Command::Rates { config } => run_rates(config.as_ref()),
        Command::Validate { config } => run_validate(&config),
    }
}

/// Arguments of the `forecast` command.
#[derive(Debug, Clone, Default)]
pub struct ForecastArgs {
    pub token: String,
    pub amount: f64,
    pub days: Option<u32>,
    pub direction: Option<Direction>,
    pub rate: Option<f64>,
    pub config: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub start_date: Option<NaiveDate>,
}

fn fail(err: LendsimError) -> ExitCode {
    eprintln!("error: {err}");
    (&err).into()
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(fail)
}

/// Load `path` when given, otherwise an empty configuration.
pub fn load_optional_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, ExitCode> {
    match path {
        Some(p) => {
            eprintln!("Loading config from {}", p.display());
            load_config(p)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

/// Projection days: explicit value, then `[forecast] days`, then [`DEFAULT_DAYS`].
pub fn resolve_days(days: Option<u32>, config: &dyn ConfigPort) -> Result<u32, LendsimError> {
    if let Some(d) = days {
        return Ok(d);
    }
    let configured = config.get_int("forecast", "days", i64::from(DEFAULT_DAYS));
    u32::try_from(configured).map_err(|_| LendsimError::ConfigInvalid {
        section: "forecast".into(),
        key: "days".into(),
        reason: "days must be a non-negative integer".into(),
    })
}

/// Direction: explicit value, then `[forecast] direction`, then supply.
pub fn resolve_direction(
    direction: Option<Direction>,
    config: &dyn ConfigPort,
) -> Result<Direction, LendsimError> {
    if let Some(d) = direction {
        return Ok(d);
    }
    match config.get_string("forecast", "direction") {
        Some(raw) => raw.parse().map_err(|reason| LendsimError::ConfigInvalid {
            section: "forecast".into(),
            key: "direction".into(),
            reason,
        }),
        None => Ok(Direction::Supply),
    }
}

/// An explicit rate wins over the market port and its fallback.
pub fn resolve_forecast_rate(
    market: &dyn MarketPort,
    token: &Token,
    direction: Direction,
    rate_override: Option<f64>,
) -> RateQuote {
    match rate_override {
        Some(percent) => RateQuote::overridden(percent),
        None => resolve_rate(market, token, direction),
    }
}

pub fn build_forecast(config: &dyn ConfigPort, args: &ForecastArgs) -> Result<Forecast, LendsimError> {
    let token = find_token(&args.token).ok_or_else(|| LendsimError::UnknownToken {
        symbol: args.token.clone(),
    })?;
    if !args.amount.is_finite() || args.amount <= 0.0 {
        return Err(LendsimError::InvalidAmount {
            symbol: token.symbol.to_string(),
            amount: args.amount,
        });
    }

    let direction = resolve_direction(args.direction, config)?;
    let days = resolve_days(args.days, config)?;
    let market = ConfigMarketAdapter::new(config);
    let rate = resolve_forecast_rate(&market, token, direction, args.rate);

    Ok(Forecast::compute(token.symbol, direction, args.amount, days, rate))
}

/// Report adapter honouring `[report] template_path`.
pub fn build_report_adapter(
    config: &dyn ConfigPort,
    start_date: Option<NaiveDate>,
) -> Result<TypstReportAdapter, LendsimError> {
    let mut adapter = TypstReportAdapter::new();
    if let Some(path) = config.get_string("report", "template_path") {
        let template = fs::read_to_string(&path).map_err(|e| LendsimError::ConfigInvalid {
            section: "report".into(),
            key: "template_path".into(),
            reason: format!("failed to read template {}: {}", path, e),
        })?;
        adapter = adapter.with_template(template);
    }
    if let Some(date) = start_date {
        adapter = adapter.with_start_date(date);
    }
    Ok(adapter)
}

pub fn run_forecast(args: &ForecastArgs) -> ExitCode {
    let config = match load_optional_config(args.config.as_ref()) {
        Ok(c) => c,
        Err(code) => return code,
    };
    if let Err(e) = validate_market_config(&config).and_then(|()| validate_forecast_config(&config)) {
        return fail(e);
    }

    let forecast = match build_forecast(&config, args) {
        Ok(f) => f,
        Err(e) => return fail(e),
    };
    print_forecast(&forecast, &config);

    if let Some(path) = &args.csv {
        if let Err(e) = csv_adapter::write_series(path, &forecast.series) {
            return fail(e);
        }
        eprintln!("Series written to: {}", path.display());
    }

    if let Some(path) = &args.output {
        let written = build_report_adapter(&config, args.start_date)
            .and_then(|adapter| adapter.write_forecast(&forecast, &path.to_string_lossy()));
        if let Err(e) = written {
            return fail(e);
        }
        eprintln!("Report written to: {}", path.display());
    }

    ExitCode::SUCCESS
}

fn print_forecast(forecast: &Forecast, config: &dyn ConfigPort) {
    let (name, unit_price) = match find_token(&forecast.symbol) {
        Some(t) => {
            let market = ConfigMarketAdapter::new(config);
            (t.name, market.unit_price(t.symbol).unwrap_or(t.unit_price))
        }
        None => ("Unknown token", 0.0),
    };
    let (rate_label, interest_label) = match forecast.direction {
        Direction::Supply => ("Supply APY", "Interest Earned"),
        Direction::Borrow => ("Borrow APR", "Interest Owed"),
    };

    eprintln!("\n=== Forecast ===");
    eprintln!("Token:            {} ({})", forecast.symbol, name);
    eprintln!("Direction:        {}", forecast.direction);
    eprintln!(
        "Initial Amount:   {:.2} {} ({})",
        forecast.principal,
        forecast.symbol,
        fmt_currency(forecast.principal * unit_price)
    );
    eprintln!("Time Period:      {} days", forecast.days);
    eprintln!(
        "{:<18}{:.3}% ({})",
        format!("{}:", rate_label),
        forecast.rate.percent,
        forecast.rate.source
    );
    eprintln!(
        "Final Balance:    {:.2} {}",
        forecast.final_balance, forecast.symbol
    );
    eprintln!(
        "{:<18}{:.2} {}",
        format!("{}:", interest_label),
        forecast.interest(),
        forecast.symbol
    );
    eprintln!(
        "Yearly (simple):  {:.2} {}",
        simple_yearly_interest(forecast.principal, forecast.rate.percent),
        forecast.symbol
    );
}

pub fn run_simulate(
    actions_path: &Path,
    config_path: Option<&PathBuf>,
    days: Option<u32>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    if let Err(e) = validate_market_config(&config).and_then(|()| validate_forecast_config(&config)) {
        return fail(e);
    }
    let days = match resolve_days(days, &config) {
        Ok(d) => d,
        Err(e) => return fail(e),
    };

    eprintln!("Reading actions from {}", actions_path.display());
    let actions = match csv_adapter::read_actions(actions_path) {
        Ok(a) => a,
        Err(e) => return fail(e),
    };

    let market = ConfigMarketAdapter::new(&config);
    let outcome = run_session(&actions, &market);
    for skipped in &outcome.skipped {
        eprintln!(
            "warning: skipping action {} ({} {} {}): {}",
            skipped.index + 1,
            skipped.action.direction,
            skipped.action.amount,
            skipped.action.symbol,
            skipped.error
        );
    }
    eprintln!(
        "Applied {} of {} actions",
        outcome.applied,
        actions.len()
    );

    print_portfolio(&outcome.portfolio, days);

    if let Some(path) = output_path {
        let written = build_report_adapter(&config, None).and_then(|adapter| {
            adapter.write_portfolio(&outcome.portfolio, days, &path.to_string_lossy())
        });
        if let Err(e) = written {
            return fail(e);
        }
        eprintln!("\nReport written to: {}", path.display());
    }

    ExitCode::SUCCESS
}

fn print_portfolio(portfolio: &Portfolio, days: u32) {
    eprintln!("\n=== Portfolio ===");
    if portfolio.is_empty() {
        eprintln!("No positions yet. Supply or borrow assets to populate the portfolio.");
        return;
    }

    eprintln!("Total Supplied:   {}", fmt_currency(portfolio.total_supplied()));
    eprintln!("Total Borrowed:   {}", fmt_currency(portfolio.total_borrowed()));
    eprintln!("Net Worth:        {}", fmt_currency(portfolio.net_worth()));
    eprintln!(
        "Health Factor:    {} ({})",
        format_health_factor(portfolio.health_factor()),
        portfolio.health_status()
    );
    eprintln!(
        "Projected Earnings ({} days):      {}",
        days,
        fmt_currency(portfolio.projected_earnings(days))
    );
    eprintln!(
        "Projected Interest Owed ({} days): {}",
        days,
        fmt_currency(portfolio.projected_interest_owed(days))
    );

    if portfolio.supplied_count() > 0 {
        eprintln!("\n=== Supplied ===");
        for pos in portfolio.supplied() {
            print_position(pos, "APY");
        }
    }
    if portfolio.borrowed_count() > 0 {
        eprintln!("\n=== Borrowed ===");
        for pos in portfolio.borrowed() {
            print_position(pos, "APR");
        }
    }
}

fn print_position(pos: &Position, rate_label: &str) {
    eprintln!(
        "  {}:  {} {}, {} @ {:.2}% {}, {}/year",
        pos.symbol,
        pos.amount,
        pos.symbol,
        fmt_currency(pos.value),
        pos.rate,
        rate_label,
        fmt_currency(pos.yearly_interest())
    );
}

fn run_rates(config_path: Option<&PathBuf>) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    if let Err(e) = validate_market_config(&config) {
        return fail(e);
    }

    let market = ConfigMarketAdapter::new(&config);
    println!("{:<6} {:<8} {:>9}  SOURCE", "TOKEN", "SIDE", "RATE");
    for token in SUPPORTED_TOKENS.iter() {
        for direction in [Direction::Supply, Direction::Borrow] {
            let quote = resolve_rate(&market, token, direction);
            println!(
                "{:<6} {:<8} {:>8.3}%  {}",
                token.symbol, direction, quote.percent, quote.source
            );
        }
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_market_config(&config) {
        return fail(e);
    }
    if let Err(e) = validate_forecast_config(&config) {
        return fail(e);
    }
    if let Err(e) = build_report_adapter(&config, None) {
        return fail(e);
    }

    let market = ConfigMarketAdapter::new(&config);
    for token in SUPPORTED_TOKENS.iter() {
        for direction in [Direction::Supply, Direction::Borrow] {
            if market.rate(token.symbol, direction).is_err() {
                eprintln!(
                    "  note: {} {} rate not configured, fallback {:.2}% applies",
                    token.symbol,
                    direction,
                    token.fallback_rate(direction)
                );
            }
        }
    }

    if let Some(source) = config.source() {
        eprintln!("\n{} is valid.", source.display());
    }
    ExitCode::SUCCESS
}
