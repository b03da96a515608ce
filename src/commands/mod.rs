pub mod mkfiles;
pub mod replace;

use std::env;
use std::path::PathBuf;

/// `$HOME`, falling back to the working directory when unset.
pub fn home_dir() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}
