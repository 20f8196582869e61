//! Interactive compose mode - the full client surface in a terminal.
//!
//! A crossterm raw-mode event loop: printable keys edit the text
//! buffer (live character counter, debounced language detection),
//! Ctrl+Enter or F5 speaks, Esc stops, Ctrl+P toggles pause, Ctrl+Up
//! and Ctrl+Down step the speed, Ctrl+L cycles the language selector,
//! Ctrl+D and Ctrl+B toggle dark mode and compact layout, Ctrl+C
//! exits.
//!
//! The loop multiplexes three sources: terminal key events, UI events
//! from the controller, and deferred controller signals (debounce
//! firings, playback completion).

use std::io::Write;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{
    Clear, ClearType, disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement,
};
use crossterm::{cursor, execute, queue};
use futures_util::StreamExt;
use sayit_core::{
    ControlStates, ControllerSignal, DisplayPreferences, LANGUAGES, LanguageSelection, PauseLabel,
    PreferencesService, SelectionOrigin, SpeechController, StatusKind, UiEvent,
};
use tokio::sync::mpsc;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::status_color;

// ── UI state ───────────────────────────────────────────────────────

struct ComposeUi {
    buffer: String,
    char_count: usize,
    status: (String, StatusKind),
    banner: Option<String>,
    selection: LanguageSelection,
    speed_label: String,
    speed_at_min: bool,
    speed_at_max: bool,
    controls: ControlStates,
    prefs: DisplayPreferences,
}

impl ComposeUi {
    fn new(prefs: DisplayPreferences) -> Self {
        Self {
            buffer: String::new(),
            char_count: 0,
            status: ("Ready".to_owned(), StatusKind::Neutral),
            banner: None,
            selection: LanguageSelection::Auto,
            speed_label: "1x".to_owned(),
            speed_at_min: false,
            speed_at_max: false,
            controls: ControlStates::for_phase(sayit_core::PlaybackPhase::Idle),
            prefs,
        }
    }

    fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::ControlsChanged(controls) => self.controls = controls,
            UiEvent::Status { message, kind } => self.status = (message, kind),
            UiEvent::Banner(banner) => self.banner = banner,
            UiEvent::SelectionChanged { selection, .. } => self.selection = selection,
            UiEvent::SpeedChanged {
                label,
                at_min,
                at_max,
                ..
            } => {
                self.speed_label = label;
                self.speed_at_min = at_min;
                self.speed_at_max = at_max;
            }
            UiEvent::CharCount(count) => self.char_count = count,
            // Alerts duplicate the status line; phase changes are
            // reflected through ControlsChanged.
            UiEvent::Alert(_) | UiEvent::PhaseChanged(_) => {}
        }
    }
}

// ── Entry point ────────────────────────────────────────────────────

pub async fn run(ctx: CliContext) -> Result<(), CliError> {
    let CliContext {
        mut controller,
        mut events,
        mut signals,
        mut preferences,
    } = ctx;

    controller.announce();
    let mut ui = ComposeUi::new(preferences.current());

    enable_raw_mode()?;

    // Where the terminal supports it, disambiguated escape codes let
    // Ctrl+Enter arrive as its own key (F5 stays as the fallback
    // shortcut everywhere else).
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        let _ = execute!(
            std::io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        );
    }

    let result = event_loop(
        &mut controller,
        &mut events,
        &mut signals,
        &mut preferences,
        &mut ui,
    )
    .await;

    if enhanced {
        let _ = execute!(std::io::stdout(), PopKeyboardEnhancementFlags);
    }
    let _ = disable_raw_mode();
    println!();

    result
}

async fn event_loop(
    controller: &mut SpeechController,
    events: &mut mpsc::UnboundedReceiver<UiEvent>,
    signals: &mut mpsc::UnboundedReceiver<ControllerSignal>,
    preferences: &mut PreferencesService,
    ui: &mut ComposeUi,
) -> Result<(), CliError> {
    let mut keys = EventStream::new();

    loop {
        // Coalesce everything already queued before redrawing once.
        while let Ok(event) = events.try_recv() {
            ui.apply(event);
        }
        render(ui)?;

        tokio::select! {
            maybe_key = keys.next() => {
                let Some(key_event) = maybe_key else { break };
                if let Event::Key(key) = key_event? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if !handle_key(controller, preferences, ui, key).await {
                        break;
                    }
                }
            }
            Some(event) = events.recv() => ui.apply(event),
            Some(signal) = signals.recv() => controller.handle_signal(signal).await,
        }
    }

    Ok(())
}

/// Handle one key press. Returns `false` to exit the loop.
async fn handle_key(
    controller: &mut SpeechController,
    preferences: &mut PreferencesService,
    ui: &mut ComposeUi,
    key: KeyEvent,
) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match (key.code, ctrl) {
        (KeyCode::Char('c'), true) => return false,

        // Speak shortcut. Errors are already reported through the
        // status events; the session stays controllable either way.
        (KeyCode::Enter, true) | (KeyCode::F(5), _) => {
            let text = ui.buffer.clone();
            let _ = controller.speak(&text).await;
        }

        (KeyCode::Esc, _) => {
            if ui.controls.stop {
                controller.stop();
            }
        }

        (KeyCode::Char('p'), true) => controller.toggle_pause(),

        (KeyCode::Up, true) => controller.increase_speed(),
        (KeyCode::Down, true) => controller.decrease_speed(),

        (KeyCode::Char('l'), true) => {
            if ui.controls.language {
                controller.select_language(next_language(&ui.selection), SelectionOrigin::User);
            }
        }

        (KeyCode::Char('d'), true) => ui.prefs = preferences.toggle_dark_mode().await,
        (KeyCode::Char('b'), true) => ui.prefs = preferences.toggle_compact().await,

        // Text editing.
        (KeyCode::Enter, false) => {
            ui.buffer.push('\n');
            controller.handle_input(&ui.buffer);
        }
        (KeyCode::Backspace, _) => {
            ui.buffer.pop();
            controller.handle_input(&ui.buffer);
        }
        (KeyCode::Char(c), false) if !key.modifiers.contains(KeyModifiers::ALT) => {
            ui.buffer.push(c);
            controller.handle_input(&ui.buffer);
        }

        _ => {}
    }

    true
}

/// Cycle auto -> catalog order -> auto.
fn next_language(current: &LanguageSelection) -> LanguageSelection {
    match current {
        LanguageSelection::Auto => LanguageSelection::Code(LANGUAGES[0].0.to_owned()),
        LanguageSelection::Code(code) => {
            let position = LANGUAGES.iter().position(|(c, _)| *c == code.as_str());
            match position {
                Some(i) if i + 1 < LANGUAGES.len() => {
                    LanguageSelection::Code(LANGUAGES[i + 1].0.to_owned())
                }
                _ => LanguageSelection::Auto,
            }
        }
    }
}

// ── Rendering ──────────────────────────────────────────────────────

fn render(ui: &ComposeUi) -> Result<(), CliError> {
    let dark = ui.prefs.dark_mode;
    let dim = if dark { Color::DarkGrey } else { Color::Grey };
    let text = if dark { Color::White } else { Color::Reset };

    let mut out = std::io::stdout();
    queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;

    if !ui.prefs.compact_layout {
        queue!(
            out,
            SetForegroundColor(Color::Cyan),
            Print("sayit - read text aloud\r\n"),
            SetForegroundColor(dim),
            Print(
                "Ctrl+Enter speak | Esc stop | Ctrl+P pause | Ctrl+Up/Down speed | \
                 Ctrl+L language | Ctrl+D dark | Ctrl+B compact | Ctrl+C quit\r\n\r\n"
            ),
            ResetColor,
        )?;
    }

    // Input buffer with live character counter.
    queue!(
        out,
        SetForegroundColor(dim),
        Print(format!(
            "Text ({} character{}):\r\n",
            ui.char_count,
            if ui.char_count == 1 { "" } else { "s" }
        )),
        SetForegroundColor(text),
    )?;
    for line in ui.buffer.split('\n') {
        queue!(out, Print(format!("  {line}\r\n")))?;
    }

    // Selector row: language, speed with boundary markers, pause label.
    let minus = if ui.speed_at_min { " " } else { "-" };
    let plus = if ui.speed_at_max { " " } else { "+" };
    let pause_label = match ui.controls.pause_label {
        PauseLabel::Pause => "Pause",
        PauseLabel::Resume => "Resume",
    };
    queue!(
        out,
        SetForegroundColor(dim),
        Print(format!(
            "\r\nLanguage: {}{}   Speed: [{minus}] {} [{plus}]   {}\r\n",
            ui.selection.label(),
            if ui.controls.language { "" } else { " (locked)" },
            ui.speed_label,
            if ui.controls.pause { pause_label } else { "" },
        )),
        ResetColor,
    )?;

    // Detection banner.
    if let Some(ref banner) = ui.banner {
        queue!(
            out,
            SetForegroundColor(Color::Yellow),
            Print(format!("{banner}\r\n")),
            ResetColor,
        )?;
    }

    // Status line.
    queue!(
        out,
        SetForegroundColor(status_color(ui.status.1, dark)),
        Print(format!("\r\n{}\r\n", ui.status.0)),
        ResetColor,
    )?;

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_cycle_walks_the_catalog_and_wraps() {
        let mut selection = LanguageSelection::Auto;
        selection = next_language(&selection);
        assert_eq!(selection, LanguageSelection::Code("en".to_owned()));

        for _ in 0..LANGUAGES.len() - 1 {
            selection = next_language(&selection);
        }
        assert_eq!(selection, LanguageSelection::Code("ur".to_owned()));

        selection = next_language(&selection);
        assert_eq!(selection, LanguageSelection::Auto);
    }

    #[test]
    fn ui_applies_controller_events() {
        let mut ui = ComposeUi::new(DisplayPreferences {
            dark_mode: false,
            compact_layout: false,
        });

        ui.apply(UiEvent::CharCount(42));
        assert_eq!(ui.char_count, 42);

        ui.apply(UiEvent::Status {
            message: "Reading text...".to_owned(),
            kind: StatusKind::Active,
        });
        assert_eq!(ui.status.1, StatusKind::Active);

        ui.apply(UiEvent::Banner(Some("Auto-detected: French (fr)".to_owned())));
        assert!(ui.banner.is_some());
    }
}
