//! CLI subcommands — interactive light session, hardware probe, settings.

mod config_cmd;
mod probe;
mod run;
mod units;

use std::path::Path;

use clap::Subcommand;
use serde::Serialize;

pub(super) use crate::RUNNING;
pub(super) use latorcia_lib::activity::LightActivity;
pub(super) use latorcia_lib::color;
pub(super) use latorcia_lib::config::Config;
pub(super) use latorcia_lib::error::Result;
pub(super) use latorcia_lib::flash::{self, FlashProvider, FlashUnit, TorchProvider};
pub(super) use latorcia_lib::screen::{Backlight, TerminalScreen};

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Load config from `custom_path` if given, else the default location.
/// Parse problems and validation errors are logged, never fatal.
pub(super) fn load_config(custom_path: Option<&Path>) -> Config {
    let (config, warnings) = match custom_path {
        Some(p) => Config::load_from(p),
        None => Config::load_with_warnings(),
    };
    for w in &warnings {
        log::warn!("{w}");
    }
    if let Err(errors) = config.validate() {
        for e in &errors {
            log::warn!("[config] {e}");
        }
    }
    config
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct ProbeOutput {
    pub backend: String,
    pub provider: String,
    pub has_flash: bool,
    pub unit: Option<String>,
    pub error: Option<String>,
}

#[derive(Serialize)]
pub(super) struct UnitsOutput {
    pub led_root: String,
    pub count: usize,
    pub units: Vec<FlashUnit>,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
}

#[derive(Subcommand)]
pub enum Command {
    /// Turn the light on and keep it under your control (Enter switches, q leaves)
    Run,

    /// Probe for a controllable flash unit
    Probe,

    /// List flash-capable LED units
    Units,

    /// Show current configuration and file path
    Config {
        /// Write the effective settings to the config file if it does not exist yet
        #[arg(long)]
        init: bool,
    },
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, json: bool, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        Command::Run => {
            if json {
                warn_json_unsupported("run");
            }
            run::cmd_run(config_path)
        }
        Command::Probe => probe::cmd_probe(json, config_path),
        Command::Units => units::cmd_units(json, config_path),
        Command::Config { init } => config_cmd::cmd_config(json, init, config_path),
    }
}

#[cfg(test)]
mod format_tests {
    use super::*;

    #[test]
    fn kv_width_top_only() {
        let w = kv_width(&["Short:", "Longer key:"], &[]);
        // "Longer key:" = 11 + PADDING = 13
        assert_eq!(w, 13);
    }

    #[test]
    fn kv_width_indent_drives_width() {
        let w = kv_width(&["A:"], &["Very long indent key:"]);
        // 21 + PADDING + 2 = 25
        assert_eq!(w, 25);
    }

    #[test]
    fn kv_width_empty_both() {
        assert_eq!(kv_width(&[], &[]), 0);
    }

    #[test]
    fn values_align_across_levels() {
        let w = kv_width(&["Top:"], &["Indent:"]);
        let top = format_kv("Top:", "V", w);
        let indent = format!("  {:<width$}{}", "Indent:", "V", width = w - 2);
        assert_eq!(top.find('V'), indent.find('V'));
    }

    #[test]
    fn format_kv_exact_width() {
        // Longer than the width: no padding added
        assert_eq!(format_kv("ExactWidth:", "val", 10), "ExactWidth:val");
    }
}

#[cfg(test)]
mod load_config_tests {
    use super::*;

    #[test]
    fn custom_path_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "backend = \"screen\"\nlabel_on = \"Accendi\"\n").unwrap();
        let config = load_config(Some(&path));
        assert_eq!(config.backend, "screen");
        assert_eq!(config.label_on, "Accendi");
    }

    #[test]
    fn missing_custom_path_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("absent.toml")));
        assert_eq!(config.backend, "auto");
    }
}
