//! Legacy backend — a single control file opened once and held for the session.
//!
//! Mirrors the open / configure / release discipline of older camera flash
//! drivers: the unit is exclusively ours between [`HandleProvider::open_unit`]
//! and [`HandleProvider::release_unit`]. Values written are `1` and `0`.

use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::PathBuf;

use super::{FlashError, FlashHandle, FlashProvider, Result};

#[derive(Debug)]
pub struct HandleProvider {
    path: PathBuf,
    open: Option<File>,
}

impl HandleProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            open: None,
        }
    }

    /// Whether the control file is currently held.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Open the control file for exclusive use.
    pub fn open_unit(&mut self) -> Result<()> {
        if self.open.is_some() {
            return Err(FlashError::Busy(self.path.display().to_string()));
        }
        let file = std::fs::OpenOptions::new()
            .write(true)
            .open(&self.path)
            .map_err(|e| FlashError::from_io(&self.path, e))?;
        self.open = Some(file);
        Ok(())
    }

    /// Write the torch state through the held file.
    pub fn configure(&mut self, on: bool) -> Result<()> {
        let Some(file) = self.open.as_mut() else {
            return Err(FlashError::Io(format!(
                "{}: unit not open",
                self.path.display()
            )));
        };
        let value: &[u8] = if on { b"1" } else { b"0" };
        let write = |file: &mut File| -> std::io::Result<()> {
            // Device nodes cannot be truncated; plain files keep stale bytes otherwise
            if file.metadata()?.is_file() {
                file.set_len(0)?;
            }
            file.seek(SeekFrom::Start(0))?;
            file.write_all(value)?;
            file.flush()
        };
        write(file).map_err(|e| FlashError::from_io(&self.path, e))
    }

    /// Switch off and close the control file. A no-op when nothing is held.
    pub fn release_unit(&mut self) -> Result<()> {
        if self.open.is_none() {
            return Ok(());
        }
        let result = self.configure(false);
        self.open = None;
        result
    }
}

impl FlashProvider for HandleProvider {
    fn name(&self) -> &'static str {
        "handle"
    }

    fn probe(&mut self) -> Result<FlashHandle> {
        self.open_unit()?;
        let unit = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string());
        log::debug!("[flash] holding {}", self.path.display());
        Ok(FlashHandle::new(unit))
    }

    fn set_torch(&mut self, _handle: &FlashHandle, on: bool) -> Result<()> {
        self.configure(on)
    }

    fn release(&mut self, _handle: FlashHandle) -> Result<()> {
        self.release_unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control_file() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flash_light");
        std::fs::write(&path, "0").unwrap();
        (dir, path)
    }

    #[test]
    fn open_configure_release_cycle() {
        let (_dir, path) = control_file();
        let mut p = HandleProvider::new(&path);

        let handle = p.probe().unwrap();
        assert_eq!(handle.unit(), "flash_light");
        assert!(p.is_open());

        p.set_torch(&handle, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1");

        p.release(handle).unwrap();
        assert!(!p.is_open());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0");
    }

    #[test]
    fn configure_replaces_longer_contents() {
        let (_dir, path) = control_file();
        std::fs::write(&path, "255").unwrap();
        let mut p = HandleProvider::new(&path);
        p.open_unit().unwrap();
        p.configure(true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1");
        p.configure(false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0");
    }

    #[test]
    fn second_open_is_busy() {
        let (_dir, path) = control_file();
        let mut p = HandleProvider::new(&path);
        p.open_unit().unwrap();
        assert!(matches!(p.open_unit(), Err(FlashError::Busy(_))));
    }

    #[test]
    fn configure_without_open_fails() {
        let (_dir, path) = control_file();
        let mut p = HandleProvider::new(&path);
        let err = p.configure(true).unwrap_err();
        assert!(err.to_string().contains("unit not open"));
    }

    #[test]
    fn release_without_open_is_noop() {
        let (_dir, path) = control_file();
        let mut p = HandleProvider::new(&path);
        assert!(p.release_unit().is_ok());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0");
    }

    #[test]
    fn probe_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = HandleProvider::new(dir.path().join("nothing"));
        assert!(matches!(p.probe(), Err(FlashError::NotFound)));
        assert!(!p.is_open());
    }

    #[test]
    fn reopen_after_release() {
        let (_dir, path) = control_file();
        let mut p = HandleProvider::new(&path);
        let h = p.probe().unwrap();
        p.release(h).unwrap();
        assert!(p.probe().is_ok());
    }
}
