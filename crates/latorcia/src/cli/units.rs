//! `units` subcommand — list flash-capable LED units.

use std::path::Path;

use super::{Result, TorchProvider, UnitsOutput, load_config};

pub(super) fn cmd_units(json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let provider = TorchProvider::new(&config.led_root, None);

    let units = match provider.list_capable_units() {
        Ok(units) => units,
        Err(e) => {
            log::debug!("[flash] {}: {e}", config.led_root);
            Vec::new()
        }
    };

    if json {
        let output = UnitsOutput {
            led_root: config.led_root.clone(),
            count: units.len(),
            units,
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return Ok(());
    }

    if units.is_empty() {
        println!("No flash units found under {}.", config.led_root);
        return Ok(());
    }

    println!(
        "Found {} flash unit{}:",
        units.len(),
        if units.len() == 1 { "" } else { "s" }
    );
    println!();

    for (i, unit) in units.iter().enumerate() {
        println!("  [{}] {}", i + 1, unit.id);
        println!("      Path: {}", unit.path);
        println!("      Max brightness: {}", unit.max_brightness);
    }

    Ok(())
}
