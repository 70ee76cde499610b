use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod check;
pub mod config;
pub mod draw;
pub mod init_config;
pub mod input;
pub mod logging;
pub mod raffle;
pub mod validate;
pub mod version;

use config::SantaConfig;

#[derive(Parser)]
#[command(name = "secret-santa")]
#[command(author = "Secret Santa Project")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Operator CLI for Secret Santa gift assignments", long_about = None)]
pub struct Cli {
    /// Path to config file (default: ~/.config/secret-santa/config.toml if present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute a giver → receiver assignment for a problem file
    Draw {
        /// Problem JSON: {"participants": [...], "restrictions": [...]}
        #[arg(long)]
        input: String,

        /// Seed for a reproducible draw (random if not specified)
        #[arg(long)]
        seed: Option<u64>,

        /// Write the assignment here instead of stdout
        #[arg(long)]
        output: Option<String>,
    },

    /// Verify a stored assignment against its problem file
    Validate {
        /// Problem JSON the assignment was drawn from
        #[arg(long)]
        input: String,

        /// Assignment JSON: {"giver": "receiver", ...}
        #[arg(long)]
        assignment: String,
    },

    /// Report whether any valid assignment exists
    Check {
        /// Problem JSON to analyze
        #[arg(long)]
        input: String,
    },

    /// Run the one-time raffle for a group file
    Raffle {
        /// Group JSON with members, restrictions, deadline and raffled flag
        #[arg(long)]
        input: String,

        /// Current time in unix seconds (defaults to the system clock)
        #[arg(long)]
        now: Option<u64>,

        /// Organizer override: ignore the deadline
        #[arg(long)]
        manual: bool,

        /// Seed for a reproducible raffle (random if not specified)
        #[arg(long)]
        seed: Option<u64>,

        /// Write the outcome here instead of stdout
        #[arg(long)]
        output: Option<String>,
    },

    /// Write a commented default config file
    InitConfig {
        /// Destination (default: ~/.config/secret-santa/config.toml)
        #[arg(long)]
        output: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display version information
    Version,
}

pub fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::InitConfig { output, force } => return init_config::execute(output, force),
        Commands::Version => {
            version::execute();
            return Ok(());
        }
        _ => {}
    }

    let config = SantaConfig::resolve(cli.config.map(PathBuf::from).as_deref())?;
    logging::init_tracing(&config.logging)?;

    match cli.command {
        Commands::Draw {
            input,
            seed,
            output,
        } => draw::execute(&config, input, seed, output),
        Commands::Validate { input, assignment } => validate::execute(input, assignment),
        Commands::Check { input } => check::execute(input),
        Commands::Raffle {
            input,
            now,
            manual,
            seed,
            output,
        } => raffle::execute(&config, input, now, manual, seed, output),
        Commands::InitConfig { .. } | Commands::Version => Ok(()),
    }
}
