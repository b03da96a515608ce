//! Rewrites the cardano-node `mkfiles.sh` bootstrap script so that it patches
//! the generated shelley genesis with this tool.

use std::fmt::Write as _;
use std::sync::OnceLock;

use regex::Regex;

use crate::config_types::Config;
use crate::config_value::Param;

fn bootstrap_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^(?:bootstrap\s|"[^"]*bootstrap"\s)"#).expect("bootstrap regex must compile")
    })
}

fn empty_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*$").expect("empty-line regex must compile"))
}

fn root_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ROOT=\S+").expect("root regex must compile"))
}

fn shelley_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"sed\s.*shelley/genesis.spec.json").expect("shelley regex must compile")
    })
}

fn network_magic_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^NETWORK_MAGIC=\S+").expect("network-magic regex must compile")
    })
}

/// Tracks where we are relative to the `sed ... shelley/genesis.spec.json`
/// block; the replace command goes at the first blank line after it.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ShelleyBlock {
    Before,
    Inside,
    Done,
}

/// Builds the `replace -i` invocation that reproduces `config` when its flags
/// are parsed again. Flag order: `--del`, `-n`, `--set`, `-s`.
///
/// ```text
/// "/home/me/bin/bootstrap" replace -i --del "staking" -n "epochLength=500" -f shelley/genesis.spec.json
/// ```
pub fn make_cli(config: &Config, bootstrap_bin: &str, filename: &str) -> String {
    let mut out = format!("{} replace -i", shell_quote(bootstrap_bin));

    let groups: [(&str, &[Param]); 4] = [
        ("--del", config.del.as_slice()),
        ("-n", config.numbers.as_slice()),
        ("--set", config.set.as_slice()),
        ("-s", config.strings.as_slice()),
    ];
    for (flag, params) in groups {
        for p in params {
            let _ = write!(out, " {flag} {}", shell_quote(&p.raw));
        }
    }

    let _ = write!(out, " -f {filename}");
    out
}

/// Double-quotes `s` for a POSIX shell.
pub fn shell_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Rewrites the script text:
/// - `ROOT=...` becomes `ROOT="<root>"` (left alone when `root` is empty)
/// - `NETWORK_MAGIC=...` becomes `NETWORK_MAGIC="<network_magic>"`
/// - previously injected `bootstrap ...` lines (bare or quoted) are dropped
/// - a `replace` invocation is inserted at the first blank line after the
///   shelley genesis `sed` command
pub fn rewrite_script(
    script: &str,
    root: &str,
    network_magic: &str,
    config: &Config,
    bootstrap_bin: &str,
) -> String {
    let mut out = String::with_capacity(script.len() + 256);
    let mut shelley = ShelleyBlock::Before;

    for line in script.trim_matches('\n').split('\n') {
        if !root.is_empty() && root_re().is_match(line) {
            let _ = writeln!(out, "ROOT=\"{root}\"");
            continue;
        }
        if network_magic_re().is_match(line) {
            let _ = writeln!(out, "NETWORK_MAGIC=\"{network_magic}\"");
            continue;
        }
        if bootstrap_re().is_match(line) {
            continue;
        }

        if shelley == ShelleyBlock::Before && shelley_re().is_match(line) {
            shelley = ShelleyBlock::Inside;
        } else if shelley == ShelleyBlock::Inside && empty_line_re().is_match(line) {
            shelley = ShelleyBlock::Done;
            out.push('\n');
            out.push_str(&make_cli(config, bootstrap_bin, "shelley/genesis.spec.json"));
            out.push_str("\n\n");
        }

        out.push_str(line);
        out.push('\n');
    }

    out
}
