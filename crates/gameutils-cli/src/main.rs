//! `gameutils` -- CLI binary for the gameutils sprite tooling.
//!
//! Provides the following subcommands:
//!
//! - `gameutils build` -- Build a sprite archive from a descriptor file.
//! - `gameutils blocks` -- Print the extension's block palette.
//! - `gameutils config` -- Show the resolved configuration.

use clap::{Parser, Subcommand};

mod commands;

/// gameutils sprite archive CLI.
#[derive(Parser)]
#[command(name = "gameutils", about = "gameutils sprite archive CLI", version)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Build a sprite archive from a sprite descriptor JSON file.
    Build(commands::build::BuildArgs),

    /// Print the extension's block metadata as JSON.
    Blocks,

    /// Show resolved configuration.
    Config {
        /// Config file path (overrides auto-discovery).
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    match cli.command {
        Commands::Build(args) => commands::build::run(args).await?,
        Commands::Blocks => commands::blocks::run()?,
        Commands::Config { config } => {
            let config = commands::load_config(config.as_deref()).await?;
            commands::config_cmd::config_show(&config)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_without_error() {
        Cli::command().debug_assert();
    }

    #[test]
    fn build_parses_output_and_config() {
        let cli = Cli::try_parse_from([
            "gameutils", "build", "cat.json", "-o", "out.sprite3", "-c", "cfg.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.descriptor, "cat.json");
                assert_eq!(args.output.as_deref(), Some("out.sprite3"));
                assert_eq!(args.config.as_deref(), Some("cfg.json"));
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["gameutils", "blocks", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Blocks));
    }

    #[test]
    fn build_requires_descriptor() {
        assert!(Cli::try_parse_from(["gameutils", "build"]).is_err());
    }
}
