//! `run` subcommand — interactive light session in the terminal.
//!
//! Input lines are read on a background thread and forwarded over a channel;
//! every light operation happens on the session thread.

use std::path::Path;
use std::sync::atomic::Ordering;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use super::{Backlight, Config, LightActivity, RUNNING, Result, TerminalScreen, flash, load_config};

const HINT: &str = "Enter: switch  t: tap  p: pause  r: resume  q: back";

/// Session tick: how often the Ctrl+C flag is checked while idle.
const TICK: Duration = Duration::from_millis(250);

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Input {
    Button,
    Tap,
    Pause,
    Resume,
    Back,
}

pub(super) fn parse_input(line: &str) -> Option<Input> {
    match line.trim().to_lowercase().as_str() {
        "" => Some(Input::Button),
        "t" | "tap" => Some(Input::Tap),
        "p" | "pause" => Some(Input::Pause),
        "r" | "resume" => Some(Input::Resume),
        "q" | "quit" | "back" => Some(Input::Back),
        _ => None,
    }
}

fn open_backlight(config: &Config) -> Option<Backlight> {
    let dir = config.backlight.trim();
    if dir.is_empty() {
        return None;
    }
    match Backlight::open(dir) {
        Ok(bl) => Some(bl),
        Err(e) => {
            log::warn!("[screen] {e}; brightness stays as is");
            None
        }
    }
}

pub(super) fn cmd_run(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);

    let instance = single_instance::SingleInstance::new("latorcia-run")
        .map_err(|e| latorcia_lib::LatorciaError::Config(format!("instance lock: {e}")))?;
    if !instance.is_single() {
        return Err(latorcia_lib::LatorciaError::Config(
            "another latorcia session is already running".into(),
        ));
    }

    let provider = flash::select_provider(&config);
    let screen = TerminalScreen::new(std::io::stdout(), open_backlight(&config)).with_hint(HINT);
    let mut activity = LightActivity::from_config(provider, screen, &config);

    // Background stdin reader; EOF counts as back navigation
    let (tx, rx) = mpsc::channel::<Input>();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        loop {
            let mut buf = String::new();
            match stdin.read_line(&mut buf) {
                Ok(0) | Err(_) => {
                    let _ = tx.send(Input::Back);
                    break;
                }
                Ok(_) => match parse_input(&buf) {
                    Some(input) => {
                        if tx.send(input).is_err() {
                            break;
                        }
                    }
                    None => log::debug!("[input] ignored {:?}", buf.trim()),
                },
            }
        }
    });

    activity.on_start();

    loop {
        if !RUNNING.load(Ordering::SeqCst) {
            activity.on_destroy();
            break;
        }
        match rx.recv_timeout(TICK) {
            Ok(Input::Button) | Ok(Input::Tap) if !activity.is_active() => {
                log::info!("[input] paused; press r to resume");
            }
            Ok(Input::Button) => {
                activity.on_button();
            }
            Ok(Input::Tap) => {
                activity.on_tap();
            }
            Ok(Input::Pause) => activity.on_pause(),
            Ok(Input::Resume) => activity.on_start(),
            Ok(Input::Back) | Err(RecvTimeoutError::Disconnected) => {
                activity.on_back();
                break;
            }
            Err(RecvTimeoutError::Timeout) => {}
        }
    }

    if let Err(e) = activity.screen_mut().reset() {
        log::warn!("[screen] {e}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_is_button() {
        assert_eq!(parse_input("\n"), Some(Input::Button));
        assert_eq!(parse_input("   "), Some(Input::Button));
    }

    #[test]
    fn letters_map_to_inputs() {
        assert_eq!(parse_input("t\n"), Some(Input::Tap));
        assert_eq!(parse_input("P"), Some(Input::Pause));
        assert_eq!(parse_input("resume"), Some(Input::Resume));
        assert_eq!(parse_input("q\n"), Some(Input::Back));
    }

    #[test]
    fn unknown_input_is_ignored() {
        assert_eq!(parse_input("x"), None);
    }

    #[test]
    fn empty_backlight_setting_is_disabled() {
        assert!(open_backlight(&Config::default()).is_none());
    }

    #[test]
    fn broken_backlight_setting_is_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            backlight: dir.path().display().to_string(),
            ..Config::default()
        };
        assert!(open_backlight(&config).is_none());
    }
}
