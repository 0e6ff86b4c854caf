//! Host lifecycle adapter — maps start / interaction / exit callbacks onto the
//! [`LightController`].
//!
//! The host (an interactive terminal session in the CLI) calls `on_start`
//! when the light comes to the front and one of `on_pause`, `on_destroy`,
//! `on_back` when it leaves. Any number of exit callbacks may fire; the flash
//! unit is released once per activation.

use crate::config::Config;
use crate::controller::LightController;
use crate::flash::FlashProvider;
use crate::screen::Screen;

/// Button captions. The button always offers the next action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// Shown while the light is off.
    pub on: String,
    /// Shown while the light is on.
    pub off: String,
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            on: "ON".into(),
            off: "OFF".into(),
        }
    }
}

pub struct LightActivity<F: FlashProvider, S: Screen> {
    controller: LightController<F, S>,
    labels: Labels,
    start_on: bool,
    active: bool,
}

impl<F: FlashProvider, S: Screen> LightActivity<F, S> {
    pub fn new(controller: LightController<F, S>, labels: Labels, start_on: bool) -> Self {
        Self {
            controller,
            labels,
            start_on,
            active: false,
        }
    }

    /// Build the controller and activity from the user's settings.
    pub fn from_config(flash: F, screen: S, config: &Config) -> Self {
        let controller = LightController::new(flash, screen)
            .with_colors(config.on_color_or_default(), config.off_color_or_default());
        let labels = Labels {
            on: config.label_on.clone(),
            off: config.label_off.clone(),
        };
        Self::new(controller, labels, config.start_on)
    }

    /// The light came to the front: probe hardware and light up if configured.
    pub fn on_start(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        self.keep_awake(true);
        self.controller.shutdown();

        let has_flash = self.controller.probe_capability();
        if self.start_on && !self.controller.is_on() {
            self.controller.toggle();
        } else {
            self.controller.set_light(self.controller.is_on());
        }
        log::info!(
            "[activity] started via {}: {:?}",
            if has_flash { self.controller.provider_name() } else { "screen" },
            self.controller.state()
        );
        self.refresh_label();
    }

    /// The button was pressed. Returns the new light state.
    pub fn on_button(&mut self) -> bool {
        let on = self.controller.toggle();
        self.refresh_label();
        on
    }

    /// The screen was tapped. Same as the button.
    pub fn on_tap(&mut self) -> bool {
        self.on_button()
    }

    pub fn on_pause(&mut self) {
        self.deactivate("paused");
    }

    pub fn on_destroy(&mut self) {
        self.deactivate("destroyed");
    }

    /// Back navigation: let the screen blank again and leave.
    pub fn on_back(&mut self) {
        self.keep_awake(false);
        self.deactivate("back");
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Caption the button currently shows.
    pub fn label(&self) -> &str {
        if self.controller.is_on() {
            &self.labels.off
        } else {
            &self.labels.on
        }
    }

    pub fn controller(&self) -> &LightController<F, S> {
        &self.controller
    }

    pub fn screen_mut(&mut self) -> &mut S {
        self.controller.screen_mut()
    }

    fn deactivate(&mut self, why: &str) {
        self.controller.shutdown();
        self.refresh_label();
        if self.active {
            log::info!("[activity] {why}");
        }
        self.active = false;
    }

    fn refresh_label(&mut self) {
        let label = self.label().to_string();
        if let Err(e) = self.controller.screen_mut().set_label(&label) {
            log::warn!("[screen] {e}");
        }
    }

    fn keep_awake(&mut self, on: bool) {
        if let Err(e) = self.controller.screen_mut().set_keep_awake(on) {
            log::warn!("[screen] {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flash::mock::MockFlash;
    use crate::screen::Fill;
    use crate::screen::mock::MockScreen;

    fn activity(flash: MockFlash, screen: MockScreen) -> LightActivity<MockFlash, MockScreen> {
        LightActivity::new(
            LightController::new(flash, screen),
            Labels::default(),
            true,
        )
    }

    #[test]
    fn start_lights_up_by_default() {
        let flash = MockFlash::new();
        let log = flash.log();
        let mut a = activity(flash, MockScreen::new());
        a.on_start();
        assert!(a.controller().is_on());
        assert_eq!(log.borrow().torch, vec![true]);
        assert_eq!(a.label(), "OFF");
    }

    #[test]
    fn start_on_false_applies_dark_state() {
        let flash = MockFlash::new();
        let log = flash.log();
        let mut a = LightActivity::new(
            LightController::new(flash, MockScreen::new()),
            Labels::default(),
            false,
        );
        a.on_start();
        assert!(!a.controller().is_on());
        assert_eq!(log.borrow().torch, vec![false]);
        assert_eq!(a.label(), "ON");
    }

    #[test]
    fn start_on_false_without_flash_paints_dark() {
        let screen = MockScreen::new();
        let log = screen.log();
        let mut a = LightActivity::new(
            LightController::new(MockFlash::without_hardware(), screen),
            Labels::default(),
            false,
        );
        a.on_start();
        assert_eq!(log.borrow().last_fill(), Some(Fill::dark(0x444444)));
        assert!(!a.controller().state().is_on);
    }

    #[test]
    fn start_paints_dark_fill_before_lighting() {
        let screen = MockScreen::new();
        let log = screen.log();
        let mut a = activity(MockFlash::without_hardware(), screen);
        a.on_start();
        let log = log.borrow();
        let fills = &log.fills;
        assert_eq!(fills.first(), Some(&Fill::dark(0x444444)));
        assert_eq!(fills.last(), Some(&Fill::lit(0xFFFFFF)));
    }

    #[test]
    fn label_names_next_action() {
        let screen = MockScreen::new();
        let log = screen.log();
        let mut a = activity(MockFlash::without_hardware(), screen);
        a.on_start();
        assert_eq!(log.borrow().last_label(), Some("OFF"));
        assert!(!a.on_button());
        assert_eq!(log.borrow().last_label(), Some("ON"));
        assert!(a.on_tap());
        assert_eq!(log.borrow().last_label(), Some("OFF"));
    }

    #[test]
    fn every_exit_path_releases_once() {
        let flash = MockFlash::new();
        let log = flash.log();
        let mut a = activity(flash, MockScreen::new());
        a.on_start();
        a.on_pause();
        a.on_destroy();
        a.on_back();
        assert_eq!(log.borrow().releases.len(), 1);
        assert!(!a.controller().is_on());
        assert_eq!(a.label(), "ON");
    }

    #[test]
    fn back_clears_keep_awake() {
        let screen = MockScreen::new();
        let log = screen.log();
        let mut a = activity(MockFlash::new(), screen);
        a.on_start();
        a.on_back();
        assert_eq!(log.borrow().keep_awake, vec![true, false]);
        assert!(!a.is_active());
    }

    #[test]
    fn pause_keeps_keep_awake() {
        let screen = MockScreen::new();
        let log = screen.log();
        let mut a = activity(MockFlash::new(), screen);
        a.on_start();
        a.on_pause();
        assert_eq!(log.borrow().keep_awake, vec![true]);
    }

    #[test]
    fn restart_after_pause_probes_again() {
        let flash = MockFlash::new();
        let log = flash.log();
        let mut a = activity(flash, MockScreen::new());
        a.on_start();
        a.on_pause();
        a.on_start();
        assert_eq!(log.borrow().probes, 2);
        assert!(a.controller().is_on());
        assert!(a.controller().has_flash());
    }

    #[test]
    fn repeated_start_is_ignored() {
        let flash = MockFlash::new();
        let log = flash.log();
        let mut a = activity(flash, MockScreen::new());
        a.on_start();
        a.on_start();
        assert_eq!(log.borrow().probes, 1);
        assert!(a.controller().is_on());
    }

    #[test]
    fn from_config_applies_colors_and_labels() {
        let screen = MockScreen::new();
        let log = screen.log();
        let config = Config {
            on_color: "#FFCC00".into(),
            label_on: "Accendi".into(),
            label_off: "Spegni".into(),
            ..Config::default()
        };
        let mut a = LightActivity::from_config(MockFlash::without_hardware(), screen, &config);
        a.on_start();
        assert_eq!(log.borrow().last_fill(), Some(Fill::lit(0xFFCC00)));
        assert_eq!(a.label(), "Spegni");
        a.on_button();
        assert_eq!(a.label(), "Accendi");
    }
}
