//! `probe` subcommand — look for a controllable flash unit and let it go again.

use std::path::Path;

use super::{FlashProvider, ProbeOutput, Result, flash, kv, kv_width, load_config};

pub(super) fn cmd_probe(json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let mut provider = flash::select_provider(&config);

    let (unit, error) = match provider.probe() {
        Ok(handle) => {
            let unit = handle.unit().to_string();
            if let Err(e) = provider.release(handle) {
                log::warn!("[flash] release {unit}: {e}");
            }
            (Some(unit), None)
        }
        Err(e) => (None, Some(e.to_string())),
    };

    if json {
        let output = ProbeOutput {
            backend: config.backend().to_string(),
            provider: provider.name().to_string(),
            has_flash: unit.is_some(),
            unit,
            error,
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return Ok(());
    }

    let w = kv_width(&["Backend:", "Provider:", "Flash:", "Unit:", "Reason:"], &[]);
    kv("Backend:", config.backend(), w);
    kv("Provider:", provider.name(), w);
    match (&unit, &error) {
        (Some(unit), _) => {
            kv("Flash:", "available", w);
            kv("Unit:", unit, w);
        }
        (None, reason) => {
            kv("Flash:", "not available (screen fill will be used)", w);
            if let Some(reason) = reason {
                kv("Reason:", reason, w);
            }
        }
    }
    Ok(())
}
