//! ZoneForge - headless screen layout editor
//!
//! Command-line front end for browsing the component catalog, placing zones
//! in layout files and validating the result.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zoneforge::branding::{APP_BINARY_NAME, APP_DESCRIPTION};
use zoneforge::cli::{
    CliResult, ComponentArgs, ComponentsArgs, ConfigArgs, ExitCode, NewArgs, ValidateArgs,
    ZoneArgs,
};

/// ZoneForge - screen layout editor for POS and KDS terminals
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about = APP_DESCRIPTION, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new, empty layout file
    New(NewArgs),
    /// List available components
    Components(ComponentsArgs),
    /// Show one component definition
    Component(ComponentArgs),
    /// Place and arrange zones in a layout
    Zone(ZoneArgs),
    /// Validate a layout file
    Validate(ValidateArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

impl Commands {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::New(args) => args.execute(),
            Self::Components(args) => args.execute(),
            Self::Component(args) => args.execute(),
            Self::Zone(args) => args.execute(),
            Self::Validate(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so JSON on stdout stays parseable
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = cli.command.execute() {
        eprintln!("Error: {err}");
        std::process::exit(err.code.code());
    }

    std::process::exit(ExitCode::Success.code());
}
