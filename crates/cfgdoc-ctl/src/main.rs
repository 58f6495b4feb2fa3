//! cfgdoc
//!
//! Generates AsciiDoc configuration reference pages from `config-metadata.json`
//! documents. All resolution and rendering lives in `cfgdoc-tooling`; this binary
//! parses arguments, merges them with the CLI config file, and reports results.

mod cli_config;
mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use cfgdoc_tooling::registry::RegistryKey;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "cfgdoc",
    version,
    about = "Configuration reference documentation generator",
    styles = output::clap_styles()
)]
pub(crate) struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Generate one AsciiDoc page per configured type
    Generate(GenerateArgs),
    /// Print the fully resolved options of a single type
    Inspect(InspectArgs),
}

/// Options shared by every command that loads metadata.
#[derive(Debug, Args)]
pub(crate) struct MetadataArgs {
    /// File or directory to search for config-metadata.json (repeatable)
    #[arg(short, long = "metadata", value_name = "PATH")]
    pub metadata: Vec<PathBuf>,

    /// Namespace whose types are documented and cross-referenced
    #[arg(long, value_name = "NS")]
    pub root_namespace: Option<String>,

    /// Identity types are registered under: annotated-type or type
    #[arg(long, value_name = "KEY")]
    pub registry_key: Option<RegistryKey>,
}

#[derive(Debug, Args)]
pub(crate) struct GenerateArgs {
    /// Module to document, `*` for all modules
    pub module: String,

    /// Existing directory the pages are written to
    pub target_dir: PathBuf,

    /// Prefix of cross-reference targets
    pub relative_path: Option<String>,

    #[command(flatten)]
    pub metadata: MetadataArgs,

    /// Tera template replacing the built-in page template
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub(crate) struct InspectArgs {
    /// Canonical or annotated type name
    #[arg(value_name = "TYPE")]
    pub type_name: String,

    #[command(flatten)]
    pub metadata: MetadataArgs,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `cfgdoc` also matches the `cfgdoc_tooling` target
    let directive = if cli.verbose { "cfgdoc=debug" } else { "cfgdoc=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = cli_config::load_cli_config();

    match cli.command {
        Commands::Generate(args) => commands::handle_generate_command(args, &config),
        Commands::Inspect(args) => commands::handle_inspect_command(args, &config),
    }
}
