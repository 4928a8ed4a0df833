//! Cargo-style terminal output on stderr.

use std::io::Write;
use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// Width the status label is right-aligned to.
const LABEL_WIDTH: usize = 12;

fn emit(style: Style, label: &str, message: &str) {
    let _ = writeln!(
        std::io::stderr().lock(),
        "{:>width$} {message}",
        style.apply_to(label),
        width = LABEL_WIDTH,
    );
}

/// An action that happened: `    Resolved 12 dependencies`.
pub fn status(label: &str, message: &str) {
    emit(Style::new().green().bold(), label, message);
}

/// Supplementary detail, such as an arbitration decision.
pub fn status_info(label: &str, message: &str) {
    emit(Style::new().cyan().bold(), label, message);
}

pub fn status_warn(label: &str, message: &str) {
    emit(Style::new().yellow().bold(), label, message);
}

/// A ticking spinner for work of unknown length. Hidden when stderr is not
/// a terminal; call [`ProgressBar::finish_and_clear`] when done.
pub fn spinner(message: &str) -> ProgressBar {
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .expect("static spinner template");
    let pb = ProgressBar::new_spinner()
        .with_style(style)
        .with_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
