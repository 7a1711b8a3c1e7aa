use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Format;

#[derive(Parser)]
#[command(name = "authorize")]
#[command(version, about = "Permission set validation and query CLI", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a permission file
    Check {
        /// Path to the permission file (.toml or .json)
        file: String,
    },
    /// Resolve an action against a target
    Can {
        /// Path to the permission file (.toml or .json)
        file: String,
        /// Action kind: create, read, update, delete, share, manage or custom:<name>
        action: String,
        /// Target: `Type` or `Type#instance-key`
        target: String,
        /// Print the rule that decided
        #[arg(long)]
        explain: bool,
    },
    /// Convert a permission file between formats
    Convert {
        /// Path to the permission file (.toml or .json)
        file: String,
        /// Output format
        #[arg(long, value_enum)]
        to: Format,
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { file } => {
            commands::permissions::check(&file)?;
        }
        Commands::Can {
            file,
            action,
            target,
            explain,
        } => {
            let decision = commands::permissions::can(&file, &action, &target, explain)?;
            return Ok(commands::permissions::exit_code(decision));
        }
        Commands::Convert { file, to, output } => {
            commands::permissions::convert(&file, to, output.as_deref())?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
