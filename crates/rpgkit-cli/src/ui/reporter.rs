use rpgkit_config::{ErrorCode, ErrorReporter};

use crate::ui;

/// Prints coded errors to the terminal and mirrors them to tracing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalReporter;

impl ErrorReporter for TerminalReporter {
    fn report(&self, code: ErrorCode, error: &(dyn std::error::Error + 'static)) {
        tracing::debug!(code = %code, "{error}");
        ui::error(&format!("[{code}] {error}"));
        ui::hint(code.hint());
    }
}
