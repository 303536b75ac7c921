//! metagen CLI - SDK metadata generator
//!
//! Commands:
//! - `metagen generate` - Render every node reachable from the configured roots
//! - `metagen inspect` - Print the node built for a single type
//! - `metagen check` - Validate a metagen.toml and its type model

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod generate;
mod logging;
mod render;
mod roots;

#[derive(Parser)]
#[command(name = "metagen")]
#[command(author, version, about = "SDK metadata generator", long_about = None)]
struct Cli {
    /// Log filter, e.g. `debug` or `metagen_runtime=trace` (default: RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate node files for the configured roots
    Generate {
        /// Path to metagen.toml (default: ./metagen.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Target language (typescript, dart, java)
        #[arg(short, long)]
        lang: Option<String>,

        /// Type model JSON file
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Output directory for node files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Root type; repeat for more. Replaces the configured roots.
        #[arg(short, long = "root")]
        roots: Vec<String>,
    },

    /// Print the node built for one type as JSON
    Inspect {
        /// Qualified name of the type
        name: String,

        /// Path to metagen.toml (default: ./metagen.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Target language (typescript, dart, java)
        #[arg(short, long)]
        lang: Option<String>,

        /// Type model JSON file
        #[arg(short, long)]
        model: Option<PathBuf>,
    },

    /// Validate a metagen.toml and the roots it selects
    Check {
        /// Path to metagen.toml (default: ./metagen.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());

    match cli.command {
        Commands::Generate {
            config,
            lang,
            model,
            output,
            roots,
        } => {
            let overrides = generate::Overrides {
                lang,
                model,
                output,
                roots,
            };
            generate::run(config, overrides)?;
        }
        Commands::Inspect {
            name,
            config,
            lang,
            model,
        } => {
            let overrides = generate::Overrides {
                lang,
                model,
                ..Default::default()
            };
            generate::inspect(&name, config, overrides)?;
        }
        Commands::Check { config } => {
            config::check(config)?;
        }
    }

    Ok(())
}
