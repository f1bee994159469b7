//! Scheduler CLI command
//!
//! A plain `tick` runs one scheduler pass. `--catch-up` keeps ticking until
//! every missed occurrence exists. `--watch` keeps the process alive and
//! ticks on a fixed interval.

use std::thread;
use std::time::Duration;

use chrono::Local;
use clap::Args;
use tracing::info;

use crate::config::Settings;
use crate::error::LedgerResult;
use crate::ledger::Ledger;
use crate::scheduler::TickReport;

#[derive(Args)]
pub struct TickArgs {
    /// Keep running and tick on a fixed interval
    #[arg(short, long)]
    pub watch: bool,
    /// Seconds between ticks when watching (defaults to the configured interval)
    #[arg(short, long)]
    pub interval: Option<u64>,
    /// Stop watching after this many ticks
    #[arg(long)]
    pub ticks: Option<usize>,
    /// Tick repeatedly until nothing more is due
    #[arg(long, conflicts_with = "watch")]
    pub catch_up: bool,
}

fn print_report(report: &TickReport) {
    if report.is_empty() {
        println!("Nothing due.");
    } else {
        println!("{}", report);
    }
}

pub fn handle_tick_command(ledger: &mut Ledger, settings: &Settings, args: TickArgs) -> LedgerResult<()> {
    if !args.watch {
        let report = if args.catch_up {
            ledger.catch_up()
        } else {
            ledger.refresh().unwrap_or_default()
        };
        print_report(&report);
        return Ok(());
    }

    let interval = Duration::from_secs(args.interval.unwrap_or(settings.tick_interval_secs));
    info!(interval_secs = interval.as_secs(), "watching recurring profiles");

    let mut done = 0;
    loop {
        if let Some(report) = ledger.refresh() {
            println!("[{}] {}", Local::now().format("%Y-%m-%d %H:%M:%S"), report);
        }
        done += 1;
        if args.ticks.is_some_and(|limit| done >= limit) {
            break;
        }
        thread::sleep(interval);
    }

    Ok(())
}
