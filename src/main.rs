mod engine;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use config::{ConfigLoader, PacmanConfig, SigLevel, Uname};
use engine::DryRunEngine;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// pacconf - inspect pacman.conf-style configuration
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Configuration file to read
    #[clap(
        short,
        long,
        global = true,
        env = "PACCONF_CONFIG",
        default_value = config::SYSTEM_CONFIG_PATH
    )]
    config: PathBuf,

    /// Maximum nesting of Include directives
    #[clap(long, global = true, default_value = "32")]
    max_include_depth: usize,

    /// Increase log verbosity (repeatable)
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[clap(short, long, global = true)]
    quiet: bool,

    /// Subcommand to execute
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse the configuration and print it
    Dump {
        /// Output format
        #[clap(short, long, value_enum, default_value = "json")]
        format: Format,
    },
    /// Show the repositories a package engine would register
    Repos {
        /// Print JSON instead of text
        #[clap(long)]
        json: bool,
    },
    /// Resolve signature level tokens, e.g. `Required DatabaseOptional`
    Siglevel {
        /// Tokens, applied left to right
        tokens: Vec<String>,
    },
    /// Generate shell completions
    Completions {
        #[clap(value_enum)]
        shell: Shell,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
    Conf,
}

fn init_logging(verbose: u8, quiet: bool) {
    let filter = match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load(args: &Args) -> Result<PacmanConfig> {
    tracing::info!("Reading {}", args.config.display());
    ConfigLoader::new(&args.config)
        .max_include_depth(args.max_include_depth)
        .load()
        .with_context(|| format!("Failed to load {}", args.config.display()))
}

fn render(conf: &PacmanConfig, format: Format) -> Result<String> {
    Ok(match format {
        Format::Json => serde_json::to_string_pretty(conf).context("Failed to encode JSON")?,
        Format::Toml => toml::to_string_pretty(conf).context("Failed to encode TOML")?,
        Format::Conf => conf.to_conf_string(),
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    match &args.command {
        Commands::Dump { format } => {
            let conf = load(&args)?;
            println!("{}", render(&conf, *format)?.trim_end());
        }
        Commands::Repos { json } => {
            let mut conf = load(&args)?;
            let engine: DryRunEngine = conf
                .create_handle(&Uname)
                .context("Failed to apply configuration")?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&engine.to_json())?);
            } else {
                print!("{}", engine.summary());
            }
        }
        Commands::Siglevel { tokens } => {
            let level = SigLevel::resolve(SigLevel::USE_DEFAULT, tokens)
                .context("Failed to resolve signature level")?;
            println!("{:?}", level);
            println!("bits: {:#010x}", level.bits());
        }
        Commands::Completions { shell } => {
            let mut cmd = Args::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut std::io::stdout());
        }
    }

    Ok(())
}
