use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use bootstrap_config::{Config, ParamError};

#[derive(Parser)]
#[command(
    name = "bootstrap",
    about = "Generate configuration and keys for a private alonzo testnet",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Param flags shared by every subcommand. Each flag is repeatable and keeps
/// its input order.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Delete every key whose path ends with PATH
    #[arg(long = "del", value_name = "PATH")]
    pub del: Vec<String>,

    /// Replace numeric value in shelley genesis
    #[arg(short = 'n', long = "num", value_name = "PATH=VALUE")]
    pub numbers: Vec<String>,

    /// Replace string value in shelley genesis
    #[arg(short = 's', long = "string", value_name = "PATH=VALUE")]
    pub strings: Vec<String>,

    /// Set path; requires full path (no partials)
    #[arg(long = "set", value_name = "PATH=VALUE")]
    pub set: Vec<String>,
}

impl ParamArgs {
    pub fn to_config(&self) -> Result<Config, ParamError> {
        Config::parse(&self.del, &self.numbers, &self.strings, &self.set)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite and execute mkfiles.sh, then patch the alonzo genesis
    Mkfiles {
        #[command(flatten)]
        params: ParamArgs,

        /// Path to cardano-node:scripts/byron-to-alonzo/mkfiles.sh
        /// [default: $HOME/src/cardano-node/scripts/byron-to-alonzo/mkfiles.sh]
        #[arg(short = 'f', long = "file")]
        file: Option<PathBuf>,

        /// Dry run; do not execute script
        #[arg(long)]
        dry: bool,

        /// Assign testnet-magic
        #[arg(short = 'm', long = "magic", default_value = "42")]
        magic: String,

        /// Root directory for alonzo data files [default: $HOME/alonzo-testnet]
        #[arg(short = 'r', long)]
        root: Option<PathBuf>,

        /// Path to cardano-node source [default: $HOME/src/cardano-node]
        #[arg(long)]
        src: Option<PathBuf>,

        /// Delete path in the alonzo genesis
        #[arg(long = "alonzo-del", value_name = "PATH")]
        alonzo_del: Vec<String>,

        /// Set full path in the alonzo genesis
        #[arg(long = "alonzo-set", value_name = "PATH=VALUE")]
        alonzo_set: Vec<String>,
    },

    /// Replace parameters in json file
    Replace {
        #[command(flatten)]
        params: ParamArgs,

        /// JSON file to patch
        #[arg(short = 'f', long = "file")]
        file: PathBuf,

        /// Overwrite existing file
        #[arg(short = 'i')]
        in_place: bool,
    },
}
