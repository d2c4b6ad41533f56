use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use qarbank::ledger::Amount;
use qarbank::rules::{Receipt, RulesError, TransactionEngine};
use qarbank::session::ConsoleSession;
use qarbank::statement::Statement;
use qarbank::storage::{JsonFileStore, StoreConfig};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Banco QAR - single-account banking shell
#[derive(Parser)]
#[command(name = "bank", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding saldo.json and transacoes.json
    #[arg(short, long, global = true, env = "BANK_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current balance
    Balance,

    /// Deposit an amount
    Deposit {
        /// Amount in reais, e.g. 150 or 99.90
        amount: String,
    },

    /// Withdraw an amount (max 3 per day, R$500.00 each)
    Withdraw {
        /// Amount in reais, e.g. 150 or 99.90
        amount: String,
    },

    /// Print the transaction history
    Statement {
        /// Only show transactions of this day (DD/MM/YYYY)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Replay the history and compare it with the stored balance
    Check,

    /// Start the interactive banking shell
    Shell,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%d/%m/%Y").map_err(|e| format!("expected DD/MM/YYYY: {}", e))
}

fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let store = match JsonFileStore::open_with(&StoreConfig::in_dir(&cli.data_dir)) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut engine = TransactionEngine::new(store);

    match cli.command {
        Commands::Balance => {
            println!("{}", engine.balance().to_currency_string());
            ExitCode::SUCCESS
        }
        Commands::Deposit { amount } => {
            report(parse_amount(&amount).and_then(|a| engine.deposit(a)))
        }
        Commands::Withdraw { amount } => {
            report(parse_amount(&amount).and_then(|a| engine.withdraw(a)))
        }
        Commands::Statement { date } => {
            let ledger = engine.ledger();
            let statement = match date {
                Some(date) => Statement::for_date(&ledger, date),
                None => Statement::from_ledger(&ledger),
            };
            print!("{}", statement.render());
            ExitCode::SUCCESS
        }
        Commands::Check => {
            let ledger = engine.ledger();
            if ledger.is_consistent() {
                println!(
                    "OK: {} transactions replay to {}",
                    ledger.transaction_count(),
                    ledger.balance().to_currency_string()
                );
                ExitCode::SUCCESS
            } else {
                println!(
                    "MISMATCH: stored balance {}, history replays to R$ {:.2}",
                    ledger.balance().to_currency_string(),
                    ledger.replayed_balance()
                );
                ExitCode::FAILURE
            }
        }
        Commands::Shell => {
            let stdin = io::stdin();
            let mut session = ConsoleSession::new(&mut engine, stdin.lock(), io::stdout());
            match session.run() {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn parse_amount(raw: &str) -> Result<Amount, RulesError> {
    raw.parse::<Amount>().map_err(RulesError::from)
}

fn report(outcome: Result<Receipt, RulesError>) -> ExitCode {
    match outcome {
        Ok(receipt) => {
            println!(
                "{} {} at {} {}. Balance: {}",
                receipt.transaction().kind(),
                receipt.transaction().amount().to_currency_string(),
                receipt.transaction().formatted_date(),
                receipt.transaction().formatted_time(),
                receipt.balance().to_currency_string()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
