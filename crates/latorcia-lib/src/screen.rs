//! Screen fallback — full-screen color fill, button label, optional backlight.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use crate::color;
use crate::sysfs;

// ── Error type ──

#[derive(Debug)]
pub enum ScreenError {
    WriteFailed(String),
    Backlight(String),
}

impl fmt::Display for ScreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenError::WriteFailed(e) => write!(f, "Screen write failed: {e}"),
            ScreenError::Backlight(e) => write!(f, "Backlight error: {e}"),
        }
    }
}

impl std::error::Error for ScreenError {}

impl From<std::io::Error> for ScreenError {
    fn from(e: std::io::Error) -> Self {
        ScreenError::WriteFailed(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScreenError>;

// ── Fill ──

/// What the whole screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    /// `0xRRGGBB`.
    pub color: u32,
    /// Full brightness when true, system default otherwise.
    pub bright: bool,
}

impl Fill {
    pub fn lit(color: u32) -> Self {
        Fill {
            color,
            bright: true,
        }
    }

    pub fn dark(color: u32) -> Self {
        Fill {
            color,
            bright: false,
        }
    }
}

// ── Trait ──

/// Visible surface of the application.
pub trait Screen {
    /// Paint the whole screen.
    fn fill(&mut self, fill: Fill) -> Result<()>;

    /// Show the button label.
    fn set_label(&mut self, label: &str) -> Result<()>;

    /// Keep the screen from blanking while the session is in front.
    fn set_keep_awake(&mut self, _on: bool) -> Result<()> {
        Ok(())
    }
}

// ── Backlight ──

/// Backlight device under `/sys/class/backlight/<name>`.
///
/// Raising saves the current level; restoring writes it back.
#[derive(Debug)]
pub struct Backlight {
    dir: PathBuf,
    saved: Option<u32>,
}

impl Backlight {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        for attr in ["brightness", "max_brightness"] {
            if !dir.join(attr).exists() {
                return Err(ScreenError::Backlight(format!(
                    "{}: missing {attr}",
                    dir.display()
                )));
            }
        }
        Ok(Self { dir, saved: None })
    }

    /// Jump to maximum brightness, remembering the previous level.
    pub fn raise(&mut self) -> Result<()> {
        let current = self.read("brightness")?;
        let max = self.read("max_brightness")?;
        if self.saved.is_none() {
            self.saved = Some(current);
        }
        self.write(max)
    }

    /// Put back the level saved by [`raise`](Self::raise), if any.
    pub fn restore(&mut self) -> Result<()> {
        match self.saved.take() {
            Some(level) => self.write(level),
            None => Ok(()),
        }
    }

    fn read(&self, attr: &str) -> Result<u32> {
        sysfs::read_u32(&self.dir.join(attr)).map_err(|e| ScreenError::Backlight(e.to_string()))
    }

    fn write(&self, value: u32) -> Result<()> {
        sysfs::write_u32(&self.dir.join("brightness"), value)
            .map_err(|e| ScreenError::Backlight(e.to_string()))
    }
}

// ── Terminal ──

/// Paints a terminal with 24-bit ANSI background colors.
pub struct TerminalScreen<W: Write> {
    out: W,
    fill: Fill,
    label: String,
    hint: String,
    backlight: Option<Backlight>,
    restored: bool,
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(out: W, backlight: Option<Backlight>) -> Self {
        Self {
            out,
            fill: Fill::dark(0x444444),
            label: String::new(),
            hint: String::new(),
            backlight,
            restored: false,
        }
    }

    /// Help line shown under the button label.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    /// Reset colors, clear, and show the cursor again.
    ///
    /// Later drawing is ignored; the backlight is still restored.
    pub fn reset(&mut self) -> Result<()> {
        self.restored = true;
        write!(self.out, "\x1b[0m\x1b[2J\x1b[H\x1b[?25h")?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn redraw(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        let (r, g, b) = color::rgb(self.fill.color);
        // Dark text on light fills
        let luma = (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000;
        let fg = if luma > 128 { "0;0;0" } else { "255;255;255" };
        write!(
            self.out,
            "\x1b[48;2;{r};{g};{b}m\x1b[38;2;{fg}m\x1b[2J\x1b[H\r\n  [ {} ]\r\n",
            self.label
        )?;
        if !self.hint.is_empty() {
            write!(self.out, "\r\n  {}\r\n", self.hint)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Screen for TerminalScreen<W> {
    fn fill(&mut self, fill: Fill) -> Result<()> {
        self.fill = fill;
        self.redraw()?;
        if let Some(backlight) = self.backlight.as_mut() {
            if fill.bright {
                backlight.raise()?;
            } else {
                backlight.restore()?;
            }
        }
        Ok(())
    }

    fn set_label(&mut self, label: &str) -> Result<()> {
        self.label = label.to_string();
        self.redraw()
    }

    fn set_keep_awake(&mut self, on: bool) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        let seq = if on { "\x1b[?25l" } else { "\x1b[?25h" };
        self.out.write_all(seq.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

pub mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Calls recorded by a [`MockScreen`].
    #[derive(Debug, Default)]
    pub struct MockScreenLog {
        pub fills: Vec<Fill>,
        pub labels: Vec<String>,
        pub keep_awake: Vec<bool>,
    }

    impl MockScreenLog {
        pub fn last_fill(&self) -> Option<Fill> {
            self.fills.last().copied()
        }

        pub fn last_label(&self) -> Option<&str> {
            self.labels.last().map(String::as_str)
        }
    }

    /// Screen that records every call in a shared log.
    #[derive(Default)]
    pub struct MockScreen {
        log: Rc<RefCell<MockScreenLog>>,
        /// If true, `fill` returns an error.
        pub fail_fill: bool,
    }

    impl MockScreen {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn log(&self) -> Rc<RefCell<MockScreenLog>> {
            Rc::clone(&self.log)
        }
    }

    impl Screen for MockScreen {
        fn fill(&mut self, fill: Fill) -> Result<()> {
            self.log.borrow_mut().fills.push(fill);
            if self.fail_fill {
                return Err(ScreenError::WriteFailed("mock: fill failure injected".into()));
            }
            Ok(())
        }

        fn set_label(&mut self, label: &str) -> Result<()> {
            self.log.borrow_mut().labels.push(label.to_string());
            Ok(())
        }

        fn set_keep_awake(&mut self, on: bool) -> Result<()> {
            self.log.borrow_mut().keep_awake.push(on);
            Ok(())
        }
    }
}
