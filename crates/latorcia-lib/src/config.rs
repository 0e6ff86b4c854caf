//! Application configuration — TOML-based, platform-aware paths.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str =
    "# La Torcia configuration — changes made outside the app may be overwritten.\n\n";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Flash backend. Values: "auto", "torch", "handle", "screen". Default: "auto".
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Root of the LED class devices scanned by the torch backend.
    #[serde(default = "default_led_root")]
    pub led_root: String,

    /// Preferred LED unit name (e.g. "white:flash"). Empty = auto-select.
    #[serde(default)]
    pub unit: String,

    /// Control file opened by the handle backend. Empty = disabled.
    #[serde(default)]
    pub legacy_device: String,

    /// Backlight device directory driven by the screen fill. Empty = disabled.
    #[serde(default)]
    pub backlight: String,

    /// Screen fill while the light is on (hex or name). Default: "#FFFFFF".
    #[serde(default = "default_on_color")]
    pub on_color: String,

    /// Screen fill while the light is off (hex or name). Default: "#444444".
    #[serde(default = "default_off_color")]
    pub off_color: String,

    /// Turn the light on as soon as a session starts.
    #[serde(default = "default_true")]
    pub start_on: bool,

    /// Button label offering to turn the light on.
    #[serde(default = "default_label_on")]
    pub label_on: String,

    /// Button label offering to turn the light off.
    #[serde(default = "default_label_off")]
    pub label_off: String,
}

fn default_backend() -> String {
    "auto".into()
}
fn default_led_root() -> String {
    "/sys/class/leds".into()
}
fn default_on_color() -> String {
    "#FFFFFF".into()
}
fn default_off_color() -> String {
    "#444444".into()
}
fn default_label_on() -> String {
    "ON".into()
}
fn default_label_off() -> String {
    "OFF".into()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend: default_backend(),
            led_root: default_led_root(),
            unit: String::new(),
            legacy_device: String::new(),
            backlight: String::new(),
            on_color: default_on_color(),
            off_color: default_off_color(),
            start_on: true,
            label_on: default_label_on(),
            label_off: default_label_off(),
        }
    }
}

/// Parsed flash backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Detect at startup: torch, then handle, then screen only.
    Auto,
    /// LED class torch mode, one write per command.
    Torch,
    /// Single control file held open for the session.
    Handle,
    /// Never touch flash hardware.
    Screen,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Auto => write!(f, "auto"),
            Backend::Torch => write!(f, "torch"),
            Backend::Handle => write!(f, "handle"),
            Backend::Screen => write!(f, "screen"),
        }
    }
}

impl Backend {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "auto" => Some(Backend::Auto),
            "torch" => Some(Backend::Torch),
            "handle" | "legacy" => Some(Backend::Handle),
            "screen" | "none" => Some(Backend::Screen),
            _ => None,
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The `backend` field names no known backend.
    UnknownBackend(String),
    /// A color field could not be parsed (`field` is `"on_color"` or `"off_color"`).
    InvalidColor { field: &'static str, reason: String },
    /// A label is empty or whitespace-only.
    EmptyLabel(&'static str),
    /// The handle backend was forced without a control file.
    MissingLegacyDevice,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnknownBackend(b) => {
                write!(f, "Unknown backend: {b} (use auto, torch, handle or screen)")
            }
            ValidationError::InvalidColor { field, reason } => {
                write!(f, "Invalid {field}: {reason}")
            }
            ValidationError::EmptyLabel(field) => write!(f, "{field} cannot be empty"),
            ValidationError::MissingLegacyDevice => {
                write!(f, "backend \"handle\" requires legacy_device")
            }
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("latorcia"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Save config to an arbitrary path atomically (write to temp file, then rename).
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Parse the `backend` field. Unknown values fall back to [`Backend::Auto`].
    pub fn backend(&self) -> Backend {
        Backend::parse(&self.backend).unwrap_or(Backend::Auto)
    }

    /// Screen fill color while lit, falling back to white on a bad value.
    pub fn on_color_or_default(&self) -> u32 {
        crate::color::parse_color(&self.on_color).unwrap_or(0xFFFFFF)
    }

    /// Screen fill color while dark, falling back to dark gray on a bad value.
    pub fn off_color_or_default(&self) -> u32 {
        crate::color::parse_color(&self.off_color).unwrap_or(0x444444)
    }

    /// Validate the entire config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let backend = Backend::parse(&self.backend);
        if backend.is_none() {
            errors.push(ValidationError::UnknownBackend(self.backend.clone()));
        }
        if backend == Some(Backend::Handle) && self.legacy_device.trim().is_empty() {
            errors.push(ValidationError::MissingLegacyDevice);
        }

        for (field, value) in [("on_color", &self.on_color), ("off_color", &self.off_color)] {
            if let Err(e) = crate::color::parse_color(value) {
                errors.push(ValidationError::InvalidColor {
                    field,
                    reason: e.to_string(),
                });
            }
        }

        if self.label_on.trim().is_empty() {
            errors.push(ValidationError::EmptyLabel("label_on"));
        }
        if self.label_off.trim().is_empty() {
            errors.push(ValidationError::EmptyLabel("label_off"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.backend, "auto");
        assert_eq!(c.led_root, "/sys/class/leds");
        assert_eq!(c.on_color, "#FFFFFF");
        assert_eq!(c.off_color, "#444444");
        assert!(c.start_on);
        assert_eq!(c.label_on, "ON");
        assert_eq!(c.label_off, "OFF");
        assert!(c.unit.is_empty());
        assert!(c.legacy_device.is_empty());
        assert!(c.backlight.is_empty());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c: Config = toml::from_str("backend = \"screen\"\nstart_on = false\n").unwrap();
        assert_eq!(c.backend(), Backend::Screen);
        assert!(!c.start_on);
        assert_eq!(c.on_color, "#FFFFFF");
        assert_eq!(c.led_root, "/sys/class/leds");
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let c: Config = toml::from_str("").unwrap();
        assert_eq!(c.backend(), Backend::Auto);
        assert!(c.start_on);
    }

    #[test]
    fn load_from_missing_file_gives_defaults_without_warning() {
        let dir = tempfile::tempdir().unwrap();
        let (c, warnings) = Config::load_from(&dir.path().join("nope.toml"));
        assert!(warnings.is_empty());
        assert_eq!(c.backend, "auto");
    }

    #[test]
    fn load_from_malformed_file_warns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "start_on = \"maybe\"\n[[[").unwrap();
        let (c, warnings) = Config::load_from(&path);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("config parse error"));
        assert!(c.start_on);
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let c = Config {
            backend: "torch".into(),
            unit: "white:flash".into(),
            start_on: false,
            ..Config::default()
        };
        c.save_to(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# La Torcia configuration"));
        assert!(!path.with_extension("toml.tmp").exists());

        let (loaded, warnings) = Config::load_from(&path);
        assert!(warnings.is_empty());
        assert_eq!(loaded.backend(), Backend::Torch);
        assert_eq!(loaded.unit, "white:flash");
        assert!(!loaded.start_on);
    }

    #[test]
    fn config_path_ends_with_toml() {
        if let Some(p) = Config::path() {
            assert!(p.ends_with("latorcia/config.toml"));
        }
    }

    #[test]
    fn backend_parsing() {
        let with = |b: &str| Config {
            backend: b.into(),
            ..Config::default()
        };
        assert_eq!(with("auto").backend(), Backend::Auto);
        assert_eq!(with("").backend(), Backend::Auto);
        assert_eq!(with("TORCH").backend(), Backend::Torch);
        assert_eq!(with("legacy").backend(), Backend::Handle);
        assert_eq!(with("none").backend(), Backend::Screen);
        assert_eq!(with("laser").backend(), Backend::Auto);
    }

    #[test]
    fn backend_display() {
        assert_eq!(Backend::Handle.to_string(), "handle");
        assert_eq!(Backend::Screen.to_string(), "screen");
    }

    #[test]
    fn colors_fall_back_on_bad_values() {
        let c = Config {
            on_color: "sparkly".into(),
            off_color: "#000000".into(),
            ..Config::default()
        };
        assert_eq!(c.on_color_or_default(), 0xFFFFFF);
        assert_eq!(c.off_color_or_default(), 0x000000);
    }

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_collects_all_errors() {
        let c = Config {
            backend: "laser".into(),
            on_color: "nope".into(),
            label_off: "  ".into(),
            ..Config::default()
        };
        let errors = c.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], ValidationError::UnknownBackend(_)));
        assert!(matches!(
            errors[1],
            ValidationError::InvalidColor {
                field: "on_color",
                ..
            }
        ));
        assert_eq!(errors[2], ValidationError::EmptyLabel("label_off"));
    }

    #[test]
    fn validate_handle_requires_legacy_device() {
        let c = Config {
            backend: "handle".into(),
            ..Config::default()
        };
        assert_eq!(
            c.validate().unwrap_err(),
            vec![ValidationError::MissingLegacyDevice]
        );
    }

    #[test]
    fn validation_error_display() {
        let e = ValidationError::InvalidColor {
            field: "off_color",
            reason: "bad".into(),
        };
        assert_eq!(e.to_string(), "Invalid off_color: bad");
        assert_eq!(
            ValidationError::EmptyLabel("label_on").to_string(),
            "label_on cannot be empty"
        );
    }
}
