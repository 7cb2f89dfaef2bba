//! warning reporting for a conversion pass

use std::cell::RefCell;

/// A sink for warnings raised while converting.
///
/// Repairs that do not abort a conversion (replaced characters, truncated
/// strings, missing name-table entries) are reported here; the warning is
/// the only observable signal besides the adjusted output. The sink for a
/// pass is chosen by the caller, so tests can capture warnings without
/// intercepting global logging state.
pub trait WarningSink {
    /// Record one warning.
    fn warn(&self, message: String);
}

/// Forwards warnings to the `log` crate at warn level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl WarningSink for LogSink {
    fn warn(&self, message: String) {
        log::warn!("{message}");
    }
}

/// Collects warnings in memory so they can be asserted on.
#[derive(Debug, Default)]
pub struct CapturedWarnings {
    messages: RefCell<Vec<String>>,
}

impl CapturedWarnings {
    pub fn new() -> Self {
        Default::default()
    }

    /// The warnings recorded so far, in emission order.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    /// `true` if no warnings have been recorded.
    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl WarningSink for CapturedWarnings {
    fn warn(&self, message: String) {
        self.messages.borrow_mut().push(message);
    }
}
