mod render;

use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use clap::{Args, Parser, Subcommand};
use render::{ColorMode, RenderOptions, Renderer};
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tally_core::{Amount, Entry, Ledger, LoadWarning, ReportKind};

/// tally — personal finance ledger
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    color: ColorMode,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record incoming money
    Deposit(EntryArgs),
    /// Record outgoing money; the amount is entered positive and stored negated
    Payment(EntryArgs),
    /// Show recorded entries in the order they were recorded
    Ledger {
        /// Only deposits
        #[arg(long, conflicts_with = "payments")]
        deposits: bool,
        /// Only payments
        #[arg(long)]
        payments: bool,
    },
    /// Run a calendar report relative to today
    Report {
        /// One of: month-to-date, previous-month, year-to-date, previous-year
        kind: String,
    },
    /// Find entries by vendor (case-insensitive exact match)
    Search { vendor: String },
    /// Print the ledger file location
    Path,
}

#[derive(Args, Debug)]
struct EntryArgs {
    /// Transaction date (YYYY-MM-DD); today when omitted
    #[arg(long)]
    date: Option<String>,
    /// Time of day (HH:MM:SS); now when omitted
    #[arg(long)]
    time: Option<String>,
    /// What the money was for
    #[arg(long, short)]
    description: String,
    /// Counterparty name
    #[arg(long, short)]
    vendor: String,
    /// Positive amount, e.g. 12.50
    amount: String,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tally: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ledger = Ledger::new()?;

    let use_color = match cli.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            if std::env::var_os("NO_COLOR").is_some() {
                false
            } else {
                io::stdout().is_terminal()
            }
        }
    };
    let renderer = Renderer::new(RenderOptions {
        date_format: ledger.config.date_format.clone(),
        use_color,
    });

    match cli.command {
        Command::Deposit(args) => {
            let (date, time, amount) = parse_entry_args(&args)?;
            let entry = ledger.add_deposit(
                date,
                time,
                args.description.trim().to_string(),
                args.vendor.trim().to_string(),
                amount,
            )?;
            renderer.print_info(&format!("Recorded deposit of {amount}."));
            renderer.print_entry_line(entry);
        }
        Command::Payment(args) => {
            let (date, time, amount) = parse_entry_args(&args)?;
            let entry = ledger.add_payment(
                date,
                time,
                args.description.trim().to_string(),
                args.vendor.trim().to_string(),
                amount,
            )?;
            renderer.print_info(&format!("Recorded payment of {amount}."));
            renderer.print_entry_line(entry);
        }
        Command::Ledger { deposits, payments } => {
            let entries: Vec<&Entry> = if deposits {
                ledger.deposits().collect()
            } else if payments {
                ledger.payments().collect()
            } else {
                ledger.entries().iter().collect()
            };
            if entries.is_empty() {
                renderer.print_info("No entries recorded.");
            } else {
                renderer.print_info(&format!("{} entries.", entries.len()));
                renderer.print_entries(&entries);
            }
        }
        Command::Report { kind } => {
            let kind: ReportKind = kind.parse().map_err(|_| {
                anyhow!(
                    "unknown report `{kind}`; expected one of: \
                     month-to-date, previous-month, year-to-date, previous-year"
                )
            })?;
            let today = Local::now().date_naive();
            let window = kind.window(today);
            let start = window.start.format(&ledger.config.date_format);
            let end = window.end.format(&ledger.config.date_format);
            let matches: Vec<&Entry> = ledger.report(kind, today).collect();
            if matches.is_empty() {
                renderer.print_info(&format!("No entries between {start} and {end}."));
            } else {
                renderer.print_info(&format!(
                    "{} entries between {start} and {end}.",
                    matches.len()
                ));
                renderer.print_entries(&matches);
            }
        }
        Command::Search { vendor } => {
            let matches: Vec<&Entry> = ledger.search_vendor(&vendor).collect();
            if matches.is_empty() {
                renderer.print_info(&format!("No entries found for vendor {vendor}."));
            } else {
                renderer.print_info(&format!("{} entries for vendor {vendor}.", matches.len()));
                renderer.print_entries(&matches);
            }
        }
        Command::Path => {
            renderer.print_info(&format!("{}", ledger.config.ledger_file.display()));
        }
    }

    print_warnings(&renderer, ledger.warnings());
    Ok(())
}

fn print_warnings(renderer: &Renderer, warnings: &[LoadWarning]) {
    if warnings.is_empty() {
        return;
    }
    renderer.print_md("\n# Skipped lines:");
    for warning in warnings {
        renderer.print_md(&format!("* line {}: {}", warning.line, warning.reason));
    }
}

fn parse_entry_args(args: &EntryArgs) -> Result<(NaiveDate, NaiveTime, Amount)> {
    let date = match args.date.as_deref() {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| anyhow!("invalid date `{s}`, expected YYYY-MM-DD"))?,
        None => Local::now().date_naive(),
    };
    let time = match args.time.as_deref() {
        Some(s) => NaiveTime::parse_from_str(s.trim(), "%H:%M:%S")
            .map_err(|_| anyhow!("invalid time `{s}`, expected HH:MM:SS"))?,
        // Stored lines carry second precision only.
        None => Local::now().time().with_nanosecond(0).expect("valid time"),
    };
    let amount: Amount = args.amount.trim().parse()?;
    Ok((date, time, amount))
}
