//! Guest list command line.
//!
//! Each invocation loads the list from a JSON file, applies one command and
//! prints the result. Notices go to stderr, the list to stdout.

use anyhow::Context;
use clap::{Parser, Subcommand};
use guest_list::repositories::JsonFileGuestRepository;
use guest_list::validation::parse_ticket_count;
use guest_list::{Guest, GuestList, GuestListConfig, GuestListSummary, Notice, Notifier};
use guest_list_core::environment::SystemClock;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(author, version, about = "Manage an event's guest list", long_about = None)]
struct Cli {
    /// Guest list file (overrides GUEST_LIST_DATA_FILE).
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Ticket capacity (overrides GUEST_LIST_CAPACITY).
    #[arg(long, global = true)]
    capacity: Option<u32>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show guests and remaining tickets
    List,

    /// Add a guest
    Add {
        /// Guest email
        email: String,
        /// Number of tickets
        #[arg(allow_hyphen_values = true)]
        tickets: String,
    },

    /// Replace the guest at a position (1-based, as shown by `list`)
    Edit {
        /// Position of the guest
        #[arg(value_parser = clap::value_parser!(u16).range(1..))]
        position: u16,
        /// New email
        email: String,
        /// New number of tickets
        #[arg(allow_hyphen_values = true)]
        tickets: String,
    },

    /// Remove the guest at a position (1-based, as shown by `list`)
    Remove {
        /// Position of the guest
        #[arg(value_parser = clap::value_parser!(u16).range(1..))]
        position: u16,
    },

    /// Delete every guest
    Reset,
}

/// Prints notices to stderr.
#[derive(Debug, Clone, Copy)]
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        eprintln!("{}: {}", notice.level, notice.message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = GuestListConfig::from_env();
    if let Some(file) = cli.file.clone() {
        config = config.with_data_file(file);
    }
    if let Some(capacity) = cli.capacity.filter(|&capacity| capacity > 0) {
        config = config.with_capacity(capacity);
    }

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter.clone().into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(
        data_file = %config.data_file.display(),
        capacity = config.capacity,
        "Configuration loaded"
    );

    let list = GuestList::new(
        JsonFileGuestRepository::new(&config.data_file),
        ConsoleNotifier,
        SystemClock,
        &config,
    );
    list.load_guests()
        .await
        .with_context(|| format!("reading {}", config.data_file.display()))?;

    let outcome = match cli.command {
        Commands::List => Ok(()),
        Commands::Add { email, tickets } => match parse_ticket_count(&tickets) {
            Ok(tickets) => list.add_guest(Guest::new(email, tickets)).await,
            Err(error) => Err(error),
        },
        Commands::Edit {
            position,
            email,
            tickets,
        } => match parse_ticket_count(&tickets) {
            Ok(tickets) => {
                list.update_guest(index_of(position), Guest::new(email, tickets))
                    .await
            },
            Err(error) => Err(error),
        },
        Commands::Remove { position } => list.remove_guest(index_of(position)).await,
        Commands::Reset => list.reset_guest_list().await,
    };

    let summary = list.summary().await;
    list.dispose();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(exit_code(outcome))
}

/// 0 on success, 1 for rejected input, 2 when storage failed
fn exit_code(outcome: guest_list::Result<()>) -> ExitCode {
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            // Rejections by the list were already reported as notices
            if matches!(error, guest_list::GuestListError::InvalidTicketCount { .. }) {
                eprintln!("error: {error}");
            }
            if error.is_validation() {
                ExitCode::from(1)
            } else {
                ExitCode::from(2)
            }
        },
    }
}

/// Zero-based index of a position shown by `list`
fn index_of(position: u16) -> usize {
    usize::from(position.saturating_sub(1))
}

fn print_summary(summary: &GuestListSummary) {
    if summary.guests.is_empty() {
        println!("No guests yet.");
    }
    for (position, guest) in summary.guests.iter().enumerate() {
        println!("{:>3}. {} ({})", position + 1, guest.email, guest.tickets);
    }
    println!(
        "Tickets: {}/{} ({} remaining){}",
        summary.total_tickets,
        summary.capacity,
        summary.remaining_tickets,
        if summary.is_event_full { ", event full" } else { "" }
    );
}
