#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::needless_pass_by_value)]

mod commands;
mod logging;

use clap::Parser;
use miette::Result;
use std::path::PathBuf;
use viteconf_core::paths::DEFAULT_OUT_DIR;
use viteconf_core::Settings;

#[derive(Parser, Debug)]
#[command(name = "viteconf")]
#[command(author, version, about = "Inspect, validate and apply a Vite build config", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Print the loaded build config
    Show {
        /// Path to config file, relative to the working directory (overrides auto-discovery)
        #[arg(long, short = 'c', value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Validate the build config against the project
    Check {
        /// Path to config file, relative to the working directory (overrides auto-discovery)
        #[arg(long, short = 'c', value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Print the tags that load the entry, from the dev server or the build manifest
    Entry {
        /// Path to config file, relative to the working directory (overrides auto-discovery)
        #[arg(long, short = 'c', value_name = "FILE")]
        config: Option<PathBuf>,

        /// Build output directory containing `.vite/manifest.json`
        #[arg(long, default_value = DEFAULT_OUT_DIR, value_name = "DIR")]
        out_dir: PathBuf,

        /// Skip the dev-server check and use the manifest
        #[arg(long)]
        no_probe: bool,
    },

    /// Write the default vite.config.js
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let mut settings = Settings::new(cwd.clone())
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json);

    logging::init(settings.verbosity, settings.json_logs);

    let span = tracing::info_span!("viteconf", cwd = %cwd.display());
    let _guard = span.enter();

    match cli.command {
        Some(Commands::Version) | None => commands::version::run(),
        Some(Commands::Show { config }) => commands::show::run(&settings, config.as_deref(), cli.json),
        Some(Commands::Check { config }) => {
            commands::check::run(&settings, config.as_deref(), cli.json)
        }
        Some(Commands::Entry {
            config,
            out_dir,
            no_probe,
        }) => {
            settings = settings.with_out_dir(out_dir);
            commands::entry::run(&settings, config.as_deref(), !no_probe, cli.json)
        }
        Some(Commands::Init { force }) => commands::init::run(&settings, force, cli.json),
    }
}
