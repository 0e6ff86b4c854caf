//! `config` subcommand — show current configuration and file path, or write
//! a starter file.

use std::path::Path;

use latorcia_lib::LatorciaError;

use super::{Config, ConfigOutput, Result, color, kv, kv_indent, kv_width, load_config};

pub(super) fn cmd_config(json: bool, init: bool, custom_path: Option<&Path>) -> Result<()> {
    let config = load_config(custom_path);
    let config_path = custom_path.map(|p| p.to_path_buf()).or_else(Config::path);

    if init {
        let Some(path) = &config_path else {
            return Err(LatorciaError::Config("no config directory".into()));
        };
        if path.exists() {
            return Err(LatorciaError::Config(format!(
                "{} already exists",
                path.display()
            )));
        }
        config.save_to(path)?;
        log::info!("[config] wrote {}", path.display());
    }

    let config_exists = config_path.as_ref().map(|p| p.exists()).unwrap_or(false);

    if json {
        let output = ConfigOutput {
            config_file: config_path.as_ref().map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            settings: config,
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return Ok(());
    }

    let w = kv_width(
        &["Config file:"],
        &[
            "backend:",
            "led_root:",
            "unit:",
            "legacy_device:",
            "backlight:",
            "on_color:",
            "off_color:",
            "start_on:",
            "label_on:",
            "label_off:",
        ],
    );

    match &config_path {
        Some(p) => {
            if config_exists {
                kv("Config file:", format_args!("{} (loaded)", p.display()), w);
            } else {
                kv(
                    "Config file:",
                    format_args!("{} (not found, using defaults)", p.display()),
                    w,
                );
            }
        }
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    let or_none = |s: &str| {
        if s.trim().is_empty() {
            "(none)".to_string()
        } else {
            s.to_string()
        }
    };
    let color_display = |s: &str| match color::parse_color(s) {
        Ok(val) => format!("{s} -> {}", color::format_color(val)),
        Err(_) => format!("{s} (invalid)"),
    };

    println!("Settings:");
    kv_indent("backend:", config.backend(), w);
    kv_indent("led_root:", &config.led_root, w);
    kv_indent("unit:", or_none(&config.unit), w);
    kv_indent("legacy_device:", or_none(&config.legacy_device), w);
    kv_indent("backlight:", or_none(&config.backlight), w);
    kv_indent("on_color:", color_display(&config.on_color), w);
    kv_indent("off_color:", color_display(&config.off_color), w);
    kv_indent("start_on:", config.start_on, w);
    kv_indent("label_on:", &config.label_on, w);
    kv_indent("label_off:", &config.label_off, w);

    Ok(())
}
