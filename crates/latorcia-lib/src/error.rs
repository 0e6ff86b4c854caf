//! Unified error type for the latorcia-lib crate.
//!
//! [`LatorciaError`] wraps module-specific errors (`FlashError`, `ScreenError`)
//! and domain-specific error kinds (`Config`, `Color`).
//! `From` impls allow `?` to propagate across module boundaries seamlessly.

use std::fmt;

use crate::flash::FlashError;
use crate::screen::ScreenError;

/// Unified error type for latorcia-lib operations.
#[derive(Debug)]
pub enum LatorciaError {
    /// Flash unit access error (probe, torch command, release).
    Flash(FlashError),
    /// Screen fallback error (terminal write, backlight).
    Screen(ScreenError),
    /// Standard I/O error (file read/write, config persistence).
    Io(std::io::Error),
    /// Configuration validation error.
    Config(String),
    /// Color parsing error.
    Color(String),
}

impl fmt::Display for LatorciaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatorciaError::Flash(e) => write!(f, "{e}"),
            LatorciaError::Screen(e) => write!(f, "{e}"),
            LatorciaError::Io(e) => write!(f, "I/O error: {e}"),
            LatorciaError::Config(e) => write!(f, "Config error: {e}"),
            LatorciaError::Color(e) => write!(f, "Color error: {e}"),
        }
    }
}

impl std::error::Error for LatorciaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LatorciaError::Flash(e) => Some(e),
            LatorciaError::Screen(e) => Some(e),
            LatorciaError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FlashError> for LatorciaError {
    fn from(e: FlashError) -> Self {
        LatorciaError::Flash(e)
    }
}

impl From<ScreenError> for LatorciaError {
    fn from(e: ScreenError) -> Self {
        LatorciaError::Screen(e)
    }
}

impl From<std::io::Error> for LatorciaError {
    fn from(e: std::io::Error) -> Self {
        LatorciaError::Io(e)
    }
}

/// Crate-level Result alias using [`LatorciaError`].
pub type Result<T> = std::result::Result<T, LatorciaError>;
