//! LED class backend — torch mode via per-unit `brightness` writes.
//!
//! Stateless between calls: every command opens the unit's attribute, writes,
//! and closes it again. Nothing stays held between activations.

use std::path::{Path, PathBuf};

use super::{FlashError, FlashHandle, FlashProvider, FlashUnit, Result};
use crate::sysfs;

/// Torch-mode control of LED class devices under a root such as `/sys/class/leds`.
#[derive(Debug)]
pub struct TorchProvider {
    root: PathBuf,
    preferred: Option<String>,
}

/// Whether an LED directory looks like a flash or torch unit.
fn is_flash_capable(id: &str, dir: &Path) -> bool {
    let id = id.to_lowercase();
    (id.contains("flash") || id.contains("torch") || dir.join("flash_brightness").exists())
        && dir.join("brightness").exists()
}

impl TorchProvider {
    pub fn new(root: impl Into<PathBuf>, preferred: Option<String>) -> Self {
        Self {
            root: root.into(),
            preferred,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Enumerate flash-capable units, sorted by id.
    pub fn list_capable_units(&self) -> Result<Vec<FlashUnit>> {
        let entries =
            std::fs::read_dir(&self.root).map_err(|e| FlashError::from_io(&self.root, e))?;

        let mut units = Vec::new();
        for entry in entries.flatten() {
            let id = entry.file_name().to_string_lossy().to_string();
            let dir = entry.path();
            if !is_flash_capable(&id, &dir) {
                continue;
            }
            let max_brightness = sysfs::read_u32(&dir.join("max_brightness")).unwrap_or(1);
            units.push(FlashUnit {
                id,
                path: dir.display().to_string(),
                max_brightness,
            });
        }
        units.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(units)
    }

    /// Command a unit into (or out of) torch mode.
    pub fn set_torch_mode(&self, unit_id: &str, on: bool) -> Result<()> {
        let dir = self.root.join(unit_id);
        let value = if on {
            sysfs::read_u32(&dir.join("max_brightness"))
                .unwrap_or(1)
                .max(1)
        } else {
            0
        };
        let brightness = dir.join("brightness");
        sysfs::write_u32(&brightness, value).map_err(|e| FlashError::from_io(&brightness, e))
    }
}

impl FlashProvider for TorchProvider {
    fn name(&self) -> &'static str {
        "torch"
    }

    /// Picks the configured unit if present, otherwise the last one enumerated.
    fn probe(&mut self) -> Result<FlashHandle> {
        let units = self.list_capable_units()?;
        let chosen = match &self.preferred {
            Some(want) => match units.iter().find(|u| &u.id == want) {
                Some(u) => Some(u),
                None => {
                    log::warn!("[flash] unit {want} not found, picking another");
                    units.last()
                }
            },
            None => units.last(),
        };
        let unit = chosen.ok_or(FlashError::NotFound)?;

        // Fail the probe now rather than on the first toggle
        let brightness = Path::new(&unit.path).join("brightness");
        std::fs::OpenOptions::new()
            .write(true)
            .open(&brightness)
            .map_err(|e| FlashError::from_io(&brightness, e))?;

        log::debug!("[flash] using {} (max {})", unit.id, unit.max_brightness);
        Ok(FlashHandle::new(unit.id.clone()))
    }

    fn set_torch(&mut self, handle: &FlashHandle, on: bool) -> Result<()> {
        self.set_torch_mode(handle.unit(), on)
    }

    fn release(&mut self, handle: FlashHandle) -> Result<()> {
        self.set_torch_mode(handle.unit(), false)
    }
}
