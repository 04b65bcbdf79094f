//! Status message functions for terminal output.

use owo_colors::{OwoColorize, Stream::Stderr, Style};

/// Print a success message to stderr.
///
/// ```no_run
/// use rpgkit_cli::ui::success;
///
/// success("Configuration composed");
/// ```
pub fn success(message: &str) {
    let mark = "✓".if_supports_color(Stderr, |t| t.style(Style::new().green().bold()));
    eprintln!("{mark} {message}");
}

pub fn info(message: &str) {
    let mark = "ℹ".if_supports_color(Stderr, |t| t.style(Style::new().blue().bold()));
    eprintln!("{mark} {message}");
}

pub fn warning(message: &str) {
    let mark = "⚠".if_supports_color(Stderr, |t| t.style(Style::new().yellow().bold()));
    let message = message.if_supports_color(Stderr, |t| t.yellow());
    eprintln!("{mark} {message}");
}

pub fn error(message: &str) {
    let mark = "✗".if_supports_color(Stderr, |t| t.style(Style::new().red().bold()));
    let message = message.if_supports_color(Stderr, |t| t.red());
    eprintln!("{mark} {message}");
}

/// Indented follow-up line under an error or warning
pub fn hint(message: &str) {
    let label = "hint:".if_supports_color(Stderr, |t| t.cyan());
    let message = message.if_supports_color(Stderr, |t| t.dimmed());
    eprintln!("  {label} {message}");
}
