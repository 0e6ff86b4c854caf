//! Light controller — the on/off state and where it is shown.
//!
//! With a flash handle the light is the torch; without one it is the screen
//! fill. The two are never lit at the same time. Hardware and screen failures
//! are logged and swallowed: the light is best-effort.

use crate::flash::{FlashHandle, FlashProvider};
use crate::screen::{Fill, Screen};

/// Snapshot of the controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightState {
    pub is_on: bool,
    pub has_flash: bool,
}

/// Owns the light state, the flash provider, and the screen.
///
/// Dropping the controller shuts the light off and releases the flash unit.
pub struct LightController<F: FlashProvider, S: Screen> {
    flash: F,
    screen: S,
    handle: Option<FlashHandle>,
    /// Outcome of the probe for the current activation, if one ran.
    probed: Option<bool>,
    is_on: bool,
    on_color: u32,
    off_color: u32,
}

impl<F: FlashProvider, S: Screen> LightController<F, S> {
    /// Create a controller in the OFF state with white / dark gray fills.
    pub fn new(flash: F, screen: S) -> Self {
        Self {
            flash,
            screen,
            handle: None,
            probed: None,
            is_on: false,
            on_color: 0xFFFFFF,
            off_color: 0x444444,
        }
    }

    /// Override the screen fill colors.
    pub fn with_colors(mut self, on_color: u32, off_color: u32) -> Self {
        self.on_color = on_color;
        self.off_color = off_color;
        self
    }

    /// Look for a flash unit. Returns whether one is held.
    ///
    /// The hardware is asked once per activation; later calls return the
    /// first answer until [`shutdown`](Self::shutdown) ends the activation.
    pub fn probe_capability(&mut self) -> bool {
        if let Some(found) = self.probed {
            return found;
        }
        let found = match self.flash.probe() {
            Ok(handle) => {
                log::info!(
                    "[flash] {} unit {} acquired",
                    self.flash.name(),
                    handle.unit()
                );
                self.handle = Some(handle);
                true
            }
            Err(e) => {
                log::warn!("[flash] {e}; using the screen instead");
                false
            }
        };
        self.probed = Some(found);
        found
    }

    /// Show the light on or off through the active mechanism.
    pub fn set_light(&mut self, on: bool) {
        match &self.handle {
            Some(handle) => {
                if let Err(e) = self.flash.set_torch(handle, on) {
                    log::warn!("[flash] torch {}: {e}", if on { "on" } else { "off" });
                }
            }
            None => self.paint(on),
        }
    }

    /// Flip the light. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.is_on = !self.is_on;
        self.set_light(self.is_on);
        self.is_on
    }

    /// Force the light off, reset the screen, and release the flash unit.
    ///
    /// Safe to call any number of times; the unit is released once. The next
    /// [`probe_capability`](Self::probe_capability) asks the hardware again.
    pub fn shutdown(&mut self) {
        self.is_on = false;
        self.probed = None;
        if self.handle.is_some() {
            self.set_light(false);
        }
        self.paint(false);
        if let Some(handle) = self.handle.take() {
            let unit = handle.unit().to_string();
            match self.flash.release(handle) {
                Ok(()) => log::info!("[flash] unit {unit} released"),
                Err(e) => log::warn!("[flash] release {unit}: {e}"),
            }
        }
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn has_flash(&self) -> bool {
        self.handle.is_some()
    }

    pub fn state(&self) -> LightState {
        LightState {
            is_on: self.is_on,
            has_flash: self.has_flash(),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.flash.name()
    }

    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    fn paint(&mut self, on: bool) {
        let fill = if on {
            Fill::lit(self.on_color)
        } else {
            Fill::dark(self.off_color)
        };
        if let Err(e) = self.screen.fill(fill) {
            log::warn!("[screen] {e}");
        }
    }
}

impl<F: FlashProvider, S: Screen> Drop for LightController<F, S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
