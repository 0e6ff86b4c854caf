//! La Torcia — flashlight control with a torch LED and a screen-fill fallback.

pub mod activity;
pub mod color;
pub mod config;
pub mod controller;
pub mod screen;
pub mod error;
pub mod flash;
mod sysfs;

pub use error::LatorciaError;
