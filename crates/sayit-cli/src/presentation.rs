//! Status rendering helpers shared by the one-shot and compose modes.

use crossterm::style::Color;
use sayit_core::StatusKind;

/// Foreground color for a status kind, per display mode.
#[must_use]
pub const fn status_color(kind: StatusKind, dark_mode: bool) -> Color {
    match kind {
        StatusKind::Neutral => {
            if dark_mode {
                Color::Grey
            } else {
                Color::DarkGrey
            }
        }
        StatusKind::Active => Color::Cyan,
        StatusKind::Success => Color::Green,
        StatusKind::Error => Color::Red,
    }
}

/// Plain-text tag for a status kind (one-shot output, logs).
#[must_use]
pub const fn status_tag(kind: StatusKind) -> &'static str {
    match kind {
        StatusKind::Neutral => " - ",
        StatusKind::Active => "...",
        StatusKind::Success => " ok",
        StatusKind::Error => "err",
    }
}
