//! crdsample CLI - sample documents and property trees from Kubernetes CRDs

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod error;
mod exit_codes;

use commands::OptionFlags;

#[derive(Parser)]
#[command(name = "crdsample")]
#[command(version)]
#[command(about = "Generate sample YAML and property trees from Kubernetes CRDs", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a sample document for every version of every CRD
    Generate {
        /// CRD file, or `-` for stdin
        input: PathBuf,

        /// Output file (if not set, outputs to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write field descriptions as comments
        #[arg(long)]
        comments: bool,

        /// Only emit required fields
        #[arg(long)]
        minimal: bool,

        /// Do not generate values from patterns
        #[arg(long)]
        no_random: bool,

        /// Seed for pattern-generated values
        #[arg(long)]
        seed: Option<u64>,

        /// YAML options file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show the property tree of every version of every CRD
    Tree {
        /// CRD file, or `-` for stdin
        input: PathBuf,

        /// Output version records as JSON
        #[arg(long)]
        json: bool,

        /// Show field descriptions
        #[arg(long)]
        comments: bool,

        /// Seed for pattern-generated values in the JSON samples
        #[arg(long)]
        seed: Option<u64>,

        /// YAML options file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> error::Result<()> {
    match cli.command {
        Commands::Generate {
            input,
            output,
            comments,
            minimal,
            no_random,
            seed,
            config,
        } => {
            let options = OptionFlags {
                config: config.as_deref(),
                comments,
                minimal,
                no_random,
                seed,
            }
            .resolve()?;
            commands::generate::run(&input, output.as_deref(), &options)
        }

        Commands::Tree {
            input,
            json,
            comments,
            seed,
            config,
        } => {
            let options = OptionFlags {
                config: config.as_deref(),
                comments,
                seed,
                ..Default::default()
            }
            .resolve()?;
            commands::tree::run(&input, json, &options)
        }
    }
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
