//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `toolbox` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use toolbox::config::{DEFAULT_SNIFF_HOST, LogFormat, LogLevel};
use toolbox::extractor::{
    ChromeExtractor, ExtractResult, ExtractorConfig, HistoryRecord, HistoryStore, LoginRequest,
};
use toolbox::initialization::init_logger_with;
use toolbox::profit::{ProfitLedger, ProfitStore};
use toolbox::weight::{WeightStore, WeightTracker};

#[derive(Debug, Parser)]
#[command(
    name = "toolbox",
    about = "Personal toolbox: auth-token extraction, weight tracking, profit sharing."
)]
struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value = "info", global = true)]
    log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value = "plain", global = true)]
    log_format: LogFormat,

    /// Directory holding the JSON stores
    #[arg(long, default_value = ".", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log into a portal and capture the auth headers its requests carry
    Extract {
        /// Login username (account or email)
        #[arg(long)]
        username: String,

        /// Login password
        #[arg(long)]
        password: String,

        /// HTTPS login page of the target portal
        #[arg(long)]
        target_url: String,

        /// Hostname substring selecting which outbound requests to sniff
        #[arg(long, default_value = DEFAULT_SNIFF_HOST)]
        sniff_host: String,

        /// Skip writing the redacted history record
        #[arg(long)]
        no_history: bool,
    },

    /// Show or clear past extraction sessions
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Track weight records
    Weight {
        #[command(subcommand)]
        action: WeightAction,
    },

    /// Manage investors and monthly profit sharing
    Profit {
        #[command(subcommand)]
        action: ProfitAction,
    },
}

#[derive(Debug, Subcommand)]
enum HistoryAction {
    /// List past sessions, most recent first
    List {
        /// Maximum entries to show (0 = all)
        #[arg(long, default_value_t = 0)]
        limit: usize,
    },
    /// Delete the whole history file
    Clear,
}

#[derive(Debug, Subcommand)]
enum WeightAction {
    /// Record a new weight measurement
    Add {
        /// Weight in kilograms
        weight: f64,
    },
    /// List all records, most recent first
    List,
    /// Show aggregate statistics
    Stats,
}

#[derive(Debug, Subcommand)]
enum ProfitAction {
    /// Add an investor
    AddInvestor {
        name: String,
        /// Investment amount
        amount: f64,
    },
    /// Remove an investor (past distributions are kept)
    RemoveInvestor {
        id: Uuid,
    },
    /// List investors with their aggregate stats
    Investors,
    /// Record one month's profit, split across the current investors
    Record {
        /// Total profit (negative for a loss)
        amount: f64,

        /// Profit date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Remove a profit record
    RemoveRecord {
        id: Uuid,
    },
    /// List profit records
    Records,
    /// Show book-level totals
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(cli).await {
        eprintln!("toolbox error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Extract {
            username,
            password,
            target_url,
            sniff_host,
            no_history,
        } => {
            run_extract(
                &cli.data_dir,
                LoginRequest {
                    username,
                    password,
                    target_url,
                },
                sniff_host,
                no_history,
            )
            .await
        }
        Command::History { action } => run_history(&cli.data_dir, action),
        Command::Weight { action } => run_weight(&cli.data_dir, action),
        Command::Profit { action } => run_profit(&cli.data_dir, action),
    }
}

async fn run_extract(
    data_dir: &std::path::Path,
    req: LoginRequest,
    sniff_host: String,
    no_history: bool,
) -> Result<()> {
    let extractor = ChromeExtractor::with_config(ExtractorConfig { sniff_host });

    let result = match extractor.extract(&req).await {
        Ok(result) => result,
        Err(e) => {
            // the displayable failure shape mirrors what the error carries
            let failure = ExtractResult::failure(&e);
            bail!(
                "extraction failed at {}: {}",
                failure.timestamp.format("%Y-%m-%d %H:%M:%S"),
                e
            );
        }
    };

    println!(
        "✅ Extraction succeeded ({}) - captured {} header{}",
        result.timestamp.format("%Y-%m-%d %H:%M:%S"),
        result.headers.len(),
        if result.headers.len() == 1 { "" } else { "s" }
    );
    for header in &result.headers {
        let marker = if header.is_key { "🔑" } else { "  " };
        println!("{} {}: {}", marker, header.name, header.value);
    }

    if !no_history {
        let store = HistoryStore::open_in(data_dir);
        store
            .save(HistoryRecord::from_result(&req.username, &result))
            .context("Failed to write extraction history")?;
    }

    Ok(())
}

fn run_history(data_dir: &std::path::Path, action: HistoryAction) -> Result<()> {
    let store = HistoryStore::open_in(data_dir);

    match action {
        HistoryAction::List { limit } => {
            let records = store
                .history(limit)
                .context("Failed to read extraction history")?;
            if records.is_empty() {
                println!("No extraction history.");
                return Ok(());
            }
            for record in records {
                let status = if record.success { "✅" } else { "❌" };
                println!(
                    "{} {} {} ({})",
                    status,
                    record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    record.username,
                    record.id
                );
                for (name, value) in &record.key_headers {
                    println!("    {name}: {value}");
                }
            }
        }
        HistoryAction::Clear => {
            store.clear().context("Failed to clear extraction history")?;
            println!("Extraction history cleared.");
        }
    }

    Ok(())
}

fn run_weight(data_dir: &std::path::Path, action: WeightAction) -> Result<()> {
    let mut tracker = WeightTracker::open(WeightStore::open_in(data_dir))
        .context("Failed to load weight records")?;

    match action {
        WeightAction::Add { weight } => {
            let record = tracker.add(weight)?;
            println!(
                "✅ Recorded {:.1} kg ({})",
                record.weight,
                record.change_label()
            );
        }
        WeightAction::List => {
            if tracker.records().is_empty() {
                println!("No weight records.");
                return Ok(());
            }
            for record in tracker.records() {
                println!(
                    "{}  {:6.1} kg  {}",
                    record.date_label(),
                    record.weight,
                    record.change_label()
                );
            }
        }
        WeightAction::Stats => {
            let stats = tracker.stats();
            if stats.total_records == 0 {
                println!("No weight records.");
                return Ok(());
            }
            println!("Records:       {}", stats.total_records);
            println!("Current:       {:.1} kg", stats.current_weight);
            println!("Start:         {:.1} kg", stats.start_weight);
            println!("Total change:  {:+.1} kg", stats.total_change);
            println!("Highest:       {:.1} kg", stats.highest_weight);
            println!("Lowest:        {:.1} kg", stats.lowest_weight);
        }
    }

    Ok(())
}

fn run_profit(data_dir: &std::path::Path, action: ProfitAction) -> Result<()> {
    let mut ledger =
        ProfitLedger::open(ProfitStore::open_in(data_dir)).context("Failed to load profit book")?;

    match action {
        ProfitAction::AddInvestor { name, amount } => {
            let investor = ledger.add_investor(&name, amount)?;
            println!("✅ Added investor {} ({})", investor.name, investor.id);
        }
        ProfitAction::RemoveInvestor { id } => {
            let removed = ledger.remove_investor(id)?;
            println!(
                "✅ Removed investor {} (past distributions kept for audit)",
                removed.name
            );
        }
        ProfitAction::Investors => {
            if ledger.investors().is_empty() {
                println!("No investors.");
                return Ok(());
            }
            for investor in ledger.investors() {
                let stats = ledger.investor_stats(investor.id);
                println!(
                    "{}  {}  invested {:.2} ({:.1}%)  profit {:.2}  final {:.2}",
                    investor.id,
                    investor.name,
                    stats.investment_amount,
                    stats.investment_ratio * 100.0,
                    stats.total_profit,
                    stats.final_amount
                );
            }
        }
        ProfitAction::Record { amount, date } => {
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            let record = ledger.record_profit(date, amount)?;
            println!(
                "✅ Recorded {:.2} for {} across {} investor{}",
                record.total_profit,
                record.date,
                record.distributions.len(),
                if record.distributions.len() == 1 { "" } else { "s" }
            );
        }
        ProfitAction::RemoveRecord { id } => {
            ledger.remove_profit(id)?;
            println!("✅ Removed profit record {id}");
        }
        ProfitAction::Records => {
            if ledger.profits().is_empty() {
                println!("No profit records.");
                return Ok(());
            }
            for record in ledger.profits() {
                println!(
                    "{}  {}  total {:.2}  ({} distributions)",
                    record.id,
                    record.date,
                    record.total_profit,
                    record.distributions.len()
                );
            }
        }
        ProfitAction::Stats => {
            let stats = ledger.overall_stats();
            println!("Investors:        {}", stats.investor_count);
            println!("Profit records:   {}", stats.profit_record_count);
            println!("Total investment: {:.2}", stats.total_investment);
            println!("Total profit:     {:.2}", stats.total_profit);
        }
    }

    Ok(())
}
