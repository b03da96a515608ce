use std::fs;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};
use tracing::info;

use bootstrap_config::script_rewrite::rewrite_script;
use bootstrap_config::Config;

use super::replace::replace_file;

pub struct Args {
    pub common: Config,
    pub alonzo: Config,
    pub file: PathBuf,
    pub root: PathBuf,
    pub src: PathBuf,
    pub magic: String,
    pub bootstrap_bin: PathBuf,
    pub dry: bool,
}

pub fn run(args: Args) -> Result<()> {
    let script = fs::read_to_string(&args.file)
        .with_context(|| format!("mkfiles failed: unable to read {}", args.file.display()))?;

    let rewritten = rewrite_script(
        &script,
        &args.root.display().to_string(),
        &args.magic,
        &args.common,
        &args.bootstrap_bin.display().to_string(),
    );

    let mut target = args.file.clone().into_os_string();
    target.push(".bootstrap");
    let target = PathBuf::from(target);
    fs::write(&target, &rewritten)
        .with_context(|| format!("failed to rewrite {}", args.file.display()))?;
    info!(script = %target.display(), "wrote bootstrap script");

    if args.dry {
        println!("{rewritten}");
        return Ok(());
    }

    let status = Command::new("/bin/bash")
        .arg(&target)
        .arg("alonzo")
        .current_dir(&args.src)
        .status()
        .with_context(|| format!("failed to execute script, {}", target.display()))?;
    if !status.success() {
        bail!("failed to execute script, {}: {status}", target.display());
    }

    let alonzo_file = args.root.join("shelley/genesis.alonzo.json");
    replace_file(&args.common.merge(args.alonzo), &alonzo_file, true)
        .context("failed to update alonzo configuration")?;

    println!();
    println!();
    println!("To start the alonzo testnet:");
    println!();
    println!(
        "    (nohup \"{}\" 2>&1) > /dev/null &",
        args.root.join("run/all.sh").display()
    );
    println!();
    println!();

    Ok(())
}
