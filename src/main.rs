//! `bootstrap`: patch genesis files for a private alonzo testnet.

mod cli;
mod commands;

use std::process;

use anyhow::{Context, Result};
use bootstrap_config::Config;
use clap::Parser;

use cli::{Cli, Commands};
use commands::home_dir;

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(cli.command) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Replace {
            params,
            file,
            in_place,
        } => {
            let config = params
                .to_config()
                .with_context(|| format!("failed to parse params for {}", file.display()))?;
            commands::replace::run(commands::replace::Args {
                config,
                file,
                in_place,
            })
        }

        Commands::Mkfiles {
            params,
            file,
            dry,
            magic,
            root,
            src,
            alonzo_del,
            alonzo_set,
        } => {
            let home = home_dir();
            let common = params.to_config().context("failed to parse options")?;
            let alonzo = Config::parse(&alonzo_del, &[], &[], &alonzo_set)
                .context("failed to parse alonzo options")?;

            commands::mkfiles::run(commands::mkfiles::Args {
                common,
                alonzo,
                file: file.unwrap_or_else(|| {
                    home.join("src/cardano-node/scripts/byron-to-alonzo/mkfiles.sh")
                }),
                root: root.unwrap_or_else(|| home.join("alonzo-testnet")),
                src: src.unwrap_or_else(|| home.join("src/cardano-node")),
                magic,
                bootstrap_bin: home.join("bin/bootstrap"),
                dry,
            })
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
