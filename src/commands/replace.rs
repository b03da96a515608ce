use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing::{debug, info};

use bootstrap_config::{replace_document, Config, OutputMode};

pub struct Args {
    pub config: Config,
    pub file: PathBuf,
    pub in_place: bool,
}

pub fn run(args: Args) -> Result<()> {
    replace_file(&args.config, &args.file, args.in_place)
}

/// Patches `path` with `config`. With `write_in_place` the file is replaced
/// atomically; otherwise the result goes to stdout and the file is untouched.
pub fn replace_file(config: &Config, path: &Path, write_in_place: bool) -> Result<()> {
    let data = fs::read(path).with_context(|| format!("failed to read file, {}", path.display()))?;
    debug!(
        file = %path.display(),
        config = %serde_json::to_string(config).unwrap_or_default(),
        "replacing"
    );

    let source_id = path.display().to_string();
    let mode = if write_in_place {
        OutputMode::File
    } else {
        OutputMode::Stream
    };
    let out = replace_document(config, &data, &source_id, mode)?;

    if !write_in_place {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&out).context("failed to write to stdout")?;
        return stdout.flush().context("failed to write to stdout");
    }

    write_atomic(path, &out)?;
    info!(file = %path.display(), bytes = out.len(), "wrote file");
    Ok(())
}

/// Writes through a uniquely named sibling and renames it over `path`. The
/// temp file takes the target's permissions before the rename.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let permissions = fs::metadata(path)
        .with_context(|| format!("failed to stat file, {}", path.display()))?
        .permissions();
    let tmp = tmp_write_path(path);
    let mut file = File::create_new(&tmp)
        .with_context(|| format!("failed to create file, {}", tmp.display()))?;

    let write_result = (|| -> Result<()> {
        file.write_all(data)
            .with_context(|| format!("failed to write file, {}", tmp.display()))?;
        file.sync_all()
            .with_context(|| format!("failed to sync file, {}", tmp.display()))?;
        fs::set_permissions(&tmp, permissions)
            .with_context(|| format!("failed to set permissions, {}", tmp.display()))?;
        fs::rename(&tmp, path).with_context(|| {
            format!("failed to write file, {} -> {}", tmp.display(), path.display())
        })
    })();

    if write_result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    write_result
}

fn tmp_write_path(path: &Path) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut tmp: OsString = path.as_os_str().to_os_string();
    tmp.push(format!(".tmp.{}.{}", std::process::id(), unique));
    PathBuf::from(tmp)
}
