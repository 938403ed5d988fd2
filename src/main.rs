//! Financial Forecast CLI
//!
//! Command-line shell for running twelve-month forecasts

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use financial_forecast::assumptions::ForecastInputs;
use financial_forecast::config::ShellConfig;
use financial_forecast::forecast::ForecastResult;
use financial_forecast::scenario::{ScenarioRunner, SweepAxis};
use financial_forecast::shell::{CurrencyFormatter, FileCounterStore, ForecastSession, InputChange, UsageCounter};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "forecast")]
#[command(about = "Twelve-month revenue, expense, cash flow and headcount forecast")]
#[command(version)]
struct Cli {
    /// JSON shell config
    #[arg(long, global = true, default_value = "forecast.json")]
    config: PathBuf,

    /// Override the usage counter state file
    #[arg(long, global = true)]
    counter: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone, Copy)]
struct InputArgs {
    /// Monthly operating spend
    #[arg(long, default_value_t = 50_000.0, allow_negative_numbers = true)]
    spending: f64,

    /// Monthly price per customer
    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
    price: f64,

    /// Initial headcount
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    headcount: i64,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the monthly table and summary
    Show {
        #[command(flatten)]
        inputs: InputArgs,
    },

    /// Write monthly records as CSV
    Csv {
        #[command(flatten)]
        inputs: InputArgs,

        #[arg(long, default_value = "forecast_output.csv")]
        output: PathBuf,
    },

    /// Print the forecast as JSON
    Json {
        #[command(flatten)]
        inputs: InputArgs,
    },

    /// Export the chart panel as PNG
    Export {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output directory (defaults to the configured export dir)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Summaries across one input's full range
    Sweep {
        #[command(flatten)]
        inputs: InputArgs,

        #[arg(long, value_enum)]
        axis: SweepAxis,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read input changes from stdin
    Interactive,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = ShellConfig::load(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    if let Some(counter) = cli.counter {
        config.state_path = counter;
    }
    let formatter = config.formatter();

    match cli.command {
        Commands::Show { inputs } => {
            let session = session_with(&config, inputs);
            print_forecast(session.result(), &formatter);
            println!("\nInput changes recorded: {}", session.usage_count());
        }
        Commands::Csv { inputs, output } => {
            let session = session_with(&config, inputs);
            write_csv(session.result(), &output)?;
            println!("Forecast written to: {}", output.display());
        }
        Commands::Json { inputs } => {
            let session = session_with(&config, inputs);
            println!("{}", serde_json::to_string_pretty(session.result())?);
        }
        Commands::Export { inputs, dir } => {
            let session = session_with(&config, inputs);
            let dir = dir.unwrap_or_else(|| config.export_dir.clone());
            match session.export_chart(&dir, Local::now().date_naive()) {
                Some(path) => println!("Chart written to: {}", path.display()),
                None => eprintln!("Chart export failed; see log for details"),
            }
        }
        Commands::Sweep { inputs, axis, json } => {
            let runner = ScenarioRunner::new();
            let base = to_inputs(inputs);
            let points = runner.sweep(axis, axis.default_range(), &base);
            if json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                println!("{:>14} {:>16} {:>16} {:>16} {:>14}", "Value", "Revenue", "Expenses", "Net", "Burn");
                println!("{}", "-".repeat(80));
                for p in &points {
                    let value = match axis {
                        SweepAxis::Spending => p.inputs.monthly_spending,
                        SweepAxis::Price => p.inputs.price_per_customer,
                        SweepAxis::Headcount => p.inputs.initial_headcount as f64,
                    };
                    println!("{:>14} {:>16} {:>16} {:>16} {:>14}",
                        value,
                        formatter.format(p.summary.total_revenue),
                        formatter.format(p.summary.total_expenses),
                        formatter.format(p.summary.net_cash_flow),
                        formatter.format(p.summary.burn_rate),
                    );
                }
            }
        }
        Commands::Interactive => run_interactive(&config, &formatter)?,
    }

    Ok(())
}

fn to_inputs(args: InputArgs) -> ForecastInputs {
    ForecastInputs::new(args.spending, args.price, args.headcount)
}

/// Start from the reference defaults and apply the flags as input changes
fn session_with(config: &ShellConfig, args: InputArgs) -> ForecastSession {
    let counter = UsageCounter::load(Box::new(FileCounterStore::new(&config.state_path)));
    let mut session = ForecastSession::new(ForecastInputs::default(), counter, config.exporter());
    session.on_input_changed(InputChange::MonthlySpending(args.spending));
    session.on_input_changed(InputChange::PricePerCustomer(args.price));
    session.on_input_changed(InputChange::InitialHeadcount(args.headcount));
    session
}

fn print_forecast(result: &ForecastResult, formatter: &CurrencyFormatter) {
    println!("{:>5} {:>14} {:>14} {:>14} {:>9}", "Month", "Revenue", "Expenses", "CashFlow", "Headcount");
    println!("{}", "-".repeat(60));
    for row in &result.records {
        println!("{:>5} {:>14} {:>14} {:>14} {:>9}",
            row.month,
            formatter.format(row.revenue),
            formatter.format(row.expenses),
            formatter.format(row.cash_flow),
            row.headcount,
        );
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Annual Revenue:  {}", formatter.format(summary.total_revenue));
    println!("  Annual Expenses: {}", formatter.format(summary.total_expenses));
    println!("  Net Cash Flow:   {}", formatter.format(summary.net_cash_flow));
    println!("  Monthly Burn:    {}", formatter.format(summary.burn_rate));
}

fn write_csv(result: &ForecastResult, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in &result.records {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// One line of interactive input
#[derive(Debug, Clone, Copy, PartialEq)]
enum ShellCommand {
    Quit,
    Show,
    Export,
    Change(InputChange),
}

fn parse_change(command: &str, value: &str) -> Result<InputChange> {
    let change = match command {
        "spending" => InputChange::MonthlySpending(value.parse().context("spending must be a number")?),
        "price" => InputChange::PricePerCustomer(value.parse().context("price must be a number")?),
        "headcount" => InputChange::InitialHeadcount(value.parse().context("headcount must be an integer")?),
        other => bail!("unknown input '{}'", other),
    };
    Ok(change)
}

/// Parse a stdin line; blank lines yield `None`
fn parse_command(line: &str) -> Result<Option<ShellCommand>> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else { return Ok(None) };

    let parsed = match (command, parts.next()) {
        ("quit", _) | ("exit", _) => ShellCommand::Quit,
        ("show", _) => ShellCommand::Show,
        ("export", _) => ShellCommand::Export,
        (name, Some(value)) => ShellCommand::Change(parse_change(name, value)?),
        (name, None) => bail!("'{}' needs a value", name),
    };
    Ok(Some(parsed))
}

fn run_interactive(config: &ShellConfig, formatter: &CurrencyFormatter) -> Result<()> {
    let counter = UsageCounter::load(Box::new(FileCounterStore::new(&config.state_path)));
    let mut session = ForecastSession::new(ForecastInputs::default(), counter, config.exporter());

    println!("Commands: spending <n> | price <n> | headcount <n> | show | export | quit");
    print_forecast(session.result(), formatter);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{:#}", e);
                continue;
            }
        };

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Show => print_forecast(session.result(), formatter),
            ShellCommand::Export => match session.export_chart(&config.export_dir, Local::now().date_naive()) {
                Some(path) => println!("Chart written to: {}", path.display()),
                None => println!("Chart export failed"),
            },
            ShellCommand::Change(change) => {
                if session.on_input_changed(change) {
                    let s = session.result().summary();
                    println!("Net {} | Burn {} | changes {}",
                        formatter.format(s.net_cash_flow),
                        formatter.format(s.burn_rate),
                        session.usage_count(),
                    );
                } else {
                    println!("Unchanged");
                }
            }
        }
    }

    Ok(())
}
