// SPDX-FileCopyrightText: 2026 Lectern Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lectern - an extensible presentation host.
//!
//! This is the binary entry point. It loads configuration, assembles the
//! capability registry from the configured extension modules, and runs one
//! subcommand.

mod extensions;
mod scripture;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lectern_config::LecternConfig;
use lectern_core::LecternError;

/// Lectern - an extensible presentation host.
#[derive(Parser, Debug)]
#[command(name = "lectern", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Load the configured extension modules and list their implementations.
    Extensions {
        /// Only list implementations declaring this extension point.
        /// Repeat to require several.
        #[arg(long = "capability", value_name = "POINT")]
        capabilities: Vec<String>,
        /// Output JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// Print the menu bar and toolbar assembled from loaded extensions.
    Menus,
    /// Normalize verse markup read from a file or stdin.
    Normalize {
        /// Markup file; reads stdin when omitted.
        file: Option<PathBuf>,
    },
    /// Normalize a JSON-lines file of verse records.
    Verses {
        /// One `{"book", "chapter", "verse", "text"}` object per line.
        file: PathBuf,
        /// Output JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => lectern_config::load_and_validate_path(path),
        None => lectern_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            lectern_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);

    if let Err(err) = run(cli, &config) {
        eprintln!("lectern: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: &LecternConfig) -> Result<(), LecternError> {
    let use_color = extensions::use_color(cli.plain);
    match cli.command {
        Some(Commands::Extensions { capabilities, json }) => {
            extensions::run_extensions(config, &capabilities, json, use_color)
        }
        Some(Commands::Menus) => extensions::run_menus(config, use_color),
        Some(Commands::Normalize { file }) => scripture::run_normalize(file.as_deref()),
        Some(Commands::Verses { file, json }) => scripture::run_verses(&file, json),
        Some(Commands::Config) => print_config(config),
        None => {
            println!("lectern: use --help for available commands");
            Ok(())
        }
    }
}

fn print_config(config: &LecternConfig) -> Result<(), LecternError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| LecternError::Config(format!("failed to serialize configuration: {e}")))?;
    print!("{rendered}");
    Ok(())
}

/// Initialize the tracing subscriber with an env filter.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies to the
/// Lectern crates and everything else logs at `warn`. Output goes to stderr
/// so command output on stdout stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

/// Filter directives applying `log_level` to every Lectern crate.
fn filter_directives(log_level: &str) -> String {
    let level = log_level.trim().to_ascii_lowercase();
    [
        "lectern",
        "lectern_core",
        "lectern_plugin",
        "lectern_scripture",
        "lectern_config",
    ]
    .iter()
    .map(|target| format!("{target}={level}"))
    .chain(std::iter::once("warn".to_string()))
    .collect::<Vec<_>>()
    .join(",")
}
