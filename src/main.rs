use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bizledger::cli::{
    format_status, handle_account_command, handle_bill_command, handle_budget_command,
    handle_customer_command, handle_import_command, handle_invoice_command, handle_order_command,
    handle_record_command, handle_report_command, handle_tick_command, handle_transaction_command,
    handle_vendor_command,
};
use bizledger::clock::SystemClock;
use bizledger::config::{paths::DATA_DIR_ENV, LedgerPaths, Settings};
use bizledger::storage::JsonFileStore;
use bizledger::{EntityKind, Ledger};

#[derive(Parser)]
#[command(
    name = "bizledger",
    author = "Kaylee Beyene",
    version,
    about = "Local ledger for a small business",
    long_about = "bizledger keeps a small business's accounts, transactions, customers, \
                  vendors, orders, invoices, bills and recurring billing in a local JSON \
                  ledger. Recurring profiles are brought up to date on every run."
)]
struct Cli {
    /// Directory holding config.json and data/ledger.json
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current configuration and paths, optionally changing settings
    Config {
        /// Currency symbol used in listings
        #[arg(long)]
        currency: Option<String>,
        /// Date format for listings (strftime)
        #[arg(long)]
        date_format: Option<String>,
        /// Default seconds between ticks for `tick --watch`
        #[arg(long)]
        tick_interval: Option<u64>,
    },

    /// Summary of balances, receivables and payables
    Status,

    /// Run the recurrence scheduler
    Tick(bizledger::cli::TickArgs),

    /// Replace the whole ledger with the default data
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Account management commands
    #[command(subcommand)]
    Account(bizledger::cli::AccountCommands),

    /// Transaction commands
    #[command(subcommand, alias = "transaction")]
    Txn(bizledger::cli::TransactionCommands),

    /// Budget category commands
    #[command(subcommand)]
    Budget(bizledger::cli::BudgetCommands),

    /// Customer commands
    #[command(subcommand)]
    Customer(bizledger::cli::CustomerCommands),

    /// Vendor commands
    #[command(subcommand)]
    Vendor(bizledger::cli::VendorCommands),

    /// Invoice commands
    #[command(subcommand)]
    Invoice(bizledger::cli::InvoiceCommands),

    /// Bill commands
    #[command(subcommand)]
    Bill(bizledger::cli::BillCommands),

    /// Sales and purchase order commands
    #[command(subcommand)]
    Order(bizledger::cli::OrderCommands),

    /// Generic JSON access to any collection
    #[command(subcommand)]
    Record(bizledger::cli::RecordCommands),

    /// Reports
    #[command(subcommand)]
    Report(bizledger::cli::ReportCommands),

    /// Import records from a CSV file (transactions, customers, vendors)
    Import {
        /// Target collection
        kind: EntityKind,
        /// Path to the CSV file
        file: PathBuf,
    },
}

fn print_config(paths: &LedgerPaths, settings: &Settings) {
    println!("bizledger Configuration");
    println!("=======================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Ledger file:    {}", paths.ledger_file().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Date format:     {}", settings.date_format);
    println!("  Tick interval:   {}s", settings.tick_interval_secs);
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::resolve(cli.data_dir)?;
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("bizledger - local ledger for a small business");
        println!();
        println!("Run 'bizledger --help' for usage information.");
        return Ok(());
    };

    let store = JsonFileStore::from_paths(&paths)?;
    let mut ledger = Ledger::open(Box::new(store), Box::new(SystemClock));

    // Bring recurring profiles and due dates up to date before anything reads state
    if !matches!(command, Commands::Config { .. } | Commands::Tick(_) | Commands::Reset { .. }) {
        ledger.refresh();
    }

    match command {
        Commands::Config {
            currency,
            date_format,
            tick_interval,
        } => {
            let mut settings = settings;
            let mut changed = false;
            if let Some(currency) = currency {
                settings.currency_symbol = currency;
                changed = true;
            }
            if let Some(date_format) = date_format {
                settings.set_date_format(date_format)?;
                changed = true;
            }
            if let Some(secs) = tick_interval {
                settings.tick_interval_secs = secs;
                changed = true;
            }
            if changed {
                settings.save(&paths)?;
            }
            print_config(&paths, &settings);
        }
        Commands::Status => print!("{}", format_status(&ledger, &settings)),
        Commands::Tick(args) => handle_tick_command(&mut ledger, &settings, args)?,
        Commands::Reset { yes } => {
            if !yes {
                anyhow::bail!("Refusing to reset without --yes; this deletes every record");
            }
            ledger.reset_all();
            println!("Ledger reset to defaults.");
        }
        Commands::Account(cmd) => handle_account_command(&mut ledger, cmd)?,
        Commands::Txn(cmd) => handle_transaction_command(&mut ledger, &settings, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&mut ledger, cmd)?,
        Commands::Customer(cmd) => handle_customer_command(&mut ledger, cmd)?,
        Commands::Vendor(cmd) => handle_vendor_command(&mut ledger, cmd)?,
        Commands::Invoice(cmd) => handle_invoice_command(&mut ledger, cmd)?,
        Commands::Bill(cmd) => handle_bill_command(&mut ledger, cmd)?,
        Commands::Order(cmd) => handle_order_command(&mut ledger, cmd)?,
        Commands::Record(cmd) => handle_record_command(&mut ledger, cmd)?,
        Commands::Report(cmd) => handle_report_command(&ledger, cmd)?,
        Commands::Import { kind, file } => handle_import_command(&mut ledger, kind, &file)?,
    }

    Ok(())
}
