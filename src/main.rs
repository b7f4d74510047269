use clap::{ArgAction, Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;
use warikan::application::engine::SettlementService;
use warikan::domain::currency::{CurrencyCode, RateTable};
use warikan::domain::ports::LedgerStoreBox;
use warikan::infrastructure::in_memory::InMemoryLedgerStore;
use warikan::interfaces::csv::expense_reader::ExpenseReader;
use warikan::interfaces::csv::participant_reader::ParticipantReader;
use warikan::interfaces::csv::rate_reader::RateReader;
use warikan::interfaces::csv::settlement_writer::SettlementWriter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Csv,
    Text,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Participants CSV file (`id,name`)
    #[arg(long)]
    participants: Option<PathBuf>,

    /// Expenses CSV file (`id,payer,beneficiaries,description,currency,amount`)
    #[arg(long)]
    expenses: Option<PathBuf>,

    /// Currency the settlement is expressed in
    #[arg(long, default_value = "JPY")]
    currency: String,

    /// Exchange rates CSV file (`currency,rate`), rates per one unit of --currency
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let store: LedgerStoreBox = Box::new(InMemoryLedgerStore::new());
    let service = SettlementService::new(store);

    let mut participants = Vec::new();
    if let Some(path) = &cli.participants {
        let file = File::open(path).into_diagnostic()?;
        for result in ParticipantReader::new(file).participants() {
            match result {
                Ok(participant) => participants.push(participant),
                Err(e) => error!("Error reading participant: {}", e),
            }
        }
    }

    let mut expenses = Vec::new();
    if let Some(path) = &cli.expenses {
        let file = File::open(path).into_diagnostic()?;
        for result in ExpenseReader::new(file).expenses() {
            match result {
                Ok(expense) => expenses.push(expense),
                Err(e) => error!("Error reading expense: {}", e),
            }
        }
    }

    let rates = match &cli.rates {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            RateReader::new(file).into_table(|e| error!("Error reading rate: {}", e))
        }
        None => RateTable::new(),
    };

    let summary = service.import(participants, expenses).await.into_diagnostic()?;
    if summary.rejected > 0 {
        warn!("{} ledger entries were rejected", summary.rejected);
    }

    let currency = CurrencyCode::from(cli.currency);
    let report = service.settle(&currency, &rates).await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = SettlementWriter::new(stdout.lock());
    match cli.format {
        OutputFormat::Csv => writer.write_csv(&report),
        OutputFormat::Text => writer.write_text(&report),
        OutputFormat::Json => writer.write_json(&report),
    }
    .into_diagnostic()?;

    Ok(())
}
