//! `sayit speak` - run one speech session to completion.

use std::io::Read;

use sayit_core::{
    LanguageSelection, PlaybackPhase, SelectionOrigin, SpeedSelector, UiEvent, is_selectable,
};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::status_tag;

pub async fn run(
    mut ctx: CliContext,
    text: Option<String>,
    lang: Option<String>,
    speed: Option<f32>,
) -> Result<(), CliError> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    if let Some(code) = lang {
        if code != "auto" && !is_selectable(&code) {
            return Err(CliError::Arguments(format!(
                "unknown language '{code}' (see `sayit languages`)"
            )));
        }
        ctx.controller
            .select_language(LanguageSelection::from_code(&code), SelectionOrigin::User);
    }

    if let Some(multiplier) = speed {
        let target = SpeedSelector::from_multiplier(multiplier).ok_or_else(|| {
            CliError::Arguments(
                "speed must be one of 0.5, 0.75, 1.0, 1.25, 1.5, 1.75 or 2.0".to_owned(),
            )
        })?;
        while ctx.controller.session().speed.index() < target.index() {
            ctx.controller.increase_speed();
        }
        while ctx.controller.session().speed.index() > target.index() {
            ctx.controller.decrease_speed();
        }
    }

    ctx.controller.speak(&text).await?;
    drain_print(&mut ctx.events);

    // Degraded mode: the output device refused to start, so there is
    // no completion to wait for here.
    if ctx.controller.session().phase == PlaybackPhase::Paused {
        return Ok(());
    }

    // Wait for natural end of playback (or anything that returns the
    // session to Idle).
    while ctx.controller.session().phase != PlaybackPhase::Idle {
        tokio::select! {
            Some(signal) = ctx.signals.recv() => ctx.controller.handle_signal(signal).await,
            Some(event) = ctx.events.recv() => print_event(&event),
        }
    }
    drain_print(&mut ctx.events);

    Ok(())
}

fn drain_print(events: &mut tokio::sync::mpsc::UnboundedReceiver<UiEvent>) {
    while let Ok(event) = events.try_recv() {
        print_event(&event);
    }
}

fn print_event(event: &UiEvent) {
    match event {
        UiEvent::Status { message, kind } => eprintln!("[{}] {message}", status_tag(*kind)),
        UiEvent::Banner(Some(banner)) => eprintln!("[ i ] {banner}"),
        // Alerts duplicate the status message; phases, controls, and
        // counters have no one-shot rendering.
        _ => {}
    }
}
