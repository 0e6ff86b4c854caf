//! In-memory flash provider for tests.

use std::cell::RefCell;
use std::rc::Rc;

use super::{FlashError, FlashHandle, FlashProvider, Result};

/// Calls recorded by a [`MockFlash`].
#[derive(Debug, Default)]
pub struct MockFlashLog {
    /// Number of `probe` calls.
    pub probes: usize,
    /// Every torch command, in order.
    pub torch: Vec<bool>,
    /// Units released, in order.
    pub releases: Vec<String>,
}

impl MockFlashLog {
    /// Total provider calls of any kind.
    pub fn calls(&self) -> usize {
        self.probes + self.torch.len() + self.releases.len()
    }
}

/// Flash provider that records every call. The log is shared so it stays
/// readable after the provider has been moved into (or dropped with) a
/// controller.
pub struct MockFlash {
    log: Rc<RefCell<MockFlashLog>>,
    /// If true, `probe` returns `AccessDenied`.
    pub fail_probe: bool,
    /// If true, `set_torch` returns `Busy`.
    pub fail_torch: bool,
}

impl Default for MockFlash {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFlash {
    pub fn new() -> Self {
        MockFlash {
            log: Rc::new(RefCell::new(MockFlashLog::default())),
            fail_probe: false,
            fail_torch: false,
        }
    }

    /// A provider whose probe always fails.
    pub fn without_hardware() -> Self {
        MockFlash {
            fail_probe: true,
            ..Self::new()
        }
    }

    pub fn log(&self) -> Rc<RefCell<MockFlashLog>> {
        Rc::clone(&self.log)
    }
}

impl FlashProvider for MockFlash {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn probe(&mut self) -> Result<FlashHandle> {
        self.log.borrow_mut().probes += 1;
        if self.fail_probe {
            return Err(FlashError::AccessDenied("mock: probe failure injected".into()));
        }
        Ok(FlashHandle::new("mock:flash"))
    }

    fn set_torch(&mut self, _handle: &FlashHandle, on: bool) -> Result<()> {
        self.log.borrow_mut().torch.push(on);
        if self.fail_torch {
            return Err(FlashError::Busy("mock: torch failure injected".into()));
        }
        Ok(())
    }

    fn release(&mut self, handle: FlashHandle) -> Result<()> {
        self.log
            .borrow_mut()
            .releases
            .push(handle.unit().to_string());
        Ok(())
    }
}
