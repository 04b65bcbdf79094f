//! Terminal output: status messages and the error reporter used by commands.
//!
//! Everything goes to stderr so stdout stays clean for JSON output.

mod messages;
mod reporter;

pub use messages::{error, hint, info, success, warning};
pub use reporter::TerminalReporter;

/// Whether color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR, then checks whether stderr is a
/// terminal.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

/// Apply the color decision to every status message.
///
/// Call early in `main`; `--no-color` always wins.
pub fn init_colors(no_color: bool) {
    owo_colors::set_override(!no_color && should_use_color());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn no_color_disables_colors() {
        unsafe {
            std::env::set_var("NO_COLOR", "1");
        }
        assert!(!should_use_color());
        unsafe {
            std::env::remove_var("NO_COLOR");
        }
    }

    #[test]
    #[serial]
    fn force_color_enables_colors() {
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(should_use_color());
        unsafe {
            std::env::remove_var("FORCE_COLOR");
        }
    }
}
