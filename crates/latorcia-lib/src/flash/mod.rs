//! Flash unit access — provider trait, torch (LED class) and handle backends.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::config::{Backend, Config};

mod handle;
pub mod mock;
mod torch;

pub use handle::HandleProvider;
pub use torch::TorchProvider;

// ── Error type ──

/// Flash unit access errors.
///
/// String payloads name the unit or file involved, optionally followed by
/// `": details"`.
#[derive(Debug)]
pub enum FlashError {
    NotFound,
    AccessDenied(String),
    Busy(String),
    Io(String),
}

impl fmt::Display for FlashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlashError::NotFound => write!(f, "No flash-capable unit found"),
            FlashError::AccessDenied(e) => write!(f, "Flash access denied: {e}"),
            FlashError::Busy(e) => write!(f, "Flash unit busy: {e}"),
            FlashError::Io(e) => write!(f, "Flash I/O error: {e}"),
        }
    }
}

impl std::error::Error for FlashError {}

impl FlashError {
    /// Classify an I/O error raised while touching `what`.
    pub(crate) fn from_io(what: &Path, e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => FlashError::NotFound,
            std::io::ErrorKind::PermissionDenied => {
                FlashError::AccessDenied(what.display().to_string())
            }
            std::io::ErrorKind::ResourceBusy => FlashError::Busy(what.display().to_string()),
            _ => FlashError::Io(format!("{}: {e}", what.display())),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlashError>;

// ── Handle + unit info ──

/// Capability handle returned by a successful probe.
///
/// Not `Clone`: [`FlashProvider::release`] consumes it, so a handle is
/// released at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct FlashHandle {
    unit: String,
}

impl FlashHandle {
    pub(crate) fn new(unit: impl Into<String>) -> Self {
        Self { unit: unit.into() }
    }

    /// Identifier of the unit this handle controls.
    pub fn unit(&self) -> &str {
        &self.unit
    }
}

/// A flash-capable LED discovered under the LED class root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlashUnit {
    /// Directory name, e.g. `"white:flash"`.
    pub id: String,
    pub path: String,
    pub max_brightness: u32,
}

// ── Trait ──

/// Source of a controllable flash unit.
pub trait FlashProvider {
    /// Short backend name for logs and status output.
    fn name(&self) -> &'static str;

    /// Look for a flash unit and acquire it.
    fn probe(&mut self) -> Result<FlashHandle>;

    /// Switch torch mode on or off.
    fn set_torch(&mut self, handle: &FlashHandle, on: bool) -> Result<()>;

    /// Turn the unit off and give it back.
    fn release(&mut self, handle: FlashHandle) -> Result<()>;
}

// ── Platform selection ──

/// The flash backend chosen at startup.
#[derive(Debug)]
pub enum PlatformFlash {
    Torch(TorchProvider),
    Handle(HandleProvider),
    /// No usable hardware; every probe fails.
    Unavailable,
}

impl FlashProvider for PlatformFlash {
    fn name(&self) -> &'static str {
        match self {
            PlatformFlash::Torch(p) => p.name(),
            PlatformFlash::Handle(p) => p.name(),
            PlatformFlash::Unavailable => "none",
        }
    }

    fn probe(&mut self) -> Result<FlashHandle> {
        match self {
            PlatformFlash::Torch(p) => p.probe(),
            PlatformFlash::Handle(p) => p.probe(),
            PlatformFlash::Unavailable => Err(FlashError::NotFound),
        }
    }

    fn set_torch(&mut self, handle: &FlashHandle, on: bool) -> Result<()> {
        match self {
            PlatformFlash::Torch(p) => p.set_torch(handle, on),
            PlatformFlash::Handle(p) => p.set_torch(handle, on),
            PlatformFlash::Unavailable => Err(FlashError::NotFound),
        }
    }

    fn release(&mut self, handle: FlashHandle) -> Result<()> {
        match self {
            PlatformFlash::Torch(p) => p.release(handle),
            PlatformFlash::Handle(p) => p.release(handle),
            PlatformFlash::Unavailable => Ok(()),
        }
    }
}

/// Pick the flash backend for this host.
///
/// `auto` prefers the LED class (torch mode), then a configured legacy
/// control file, then no flash at all.
pub fn select_provider(config: &Config) -> PlatformFlash {
    let led_root = Path::new(&config.led_root);
    let legacy = config.legacy_device.trim();
    let unit = Some(config.unit.trim())
        .filter(|u| !u.is_empty())
        .map(str::to_string);

    let selected = match config.backend() {
        Backend::Screen => PlatformFlash::Unavailable,
        Backend::Torch => PlatformFlash::Torch(TorchProvider::new(led_root, unit)),
        Backend::Handle if legacy.is_empty() => PlatformFlash::Unavailable,
        Backend::Handle => PlatformFlash::Handle(HandleProvider::new(legacy)),
        Backend::Auto => {
            if led_root.is_dir() {
                PlatformFlash::Torch(TorchProvider::new(led_root, unit))
            } else if !legacy.is_empty() && Path::new(legacy).exists() {
                PlatformFlash::Handle(HandleProvider::new(legacy))
            } else {
                PlatformFlash::Unavailable
            }
        }
    };
    log::debug!(
        "[flash] backend {} -> {}",
        config.backend(),
        selected.name()
    );
    selected
}
