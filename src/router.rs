//! Classification and dispatch of decoded recognition events.
//!
//! The router is pure state manipulation: it mutates field focus and content
//! through [`FormAccessor`] and reports what happened as an [`Outcome`]. It
//! performs no I/O; in particular a completion command is only *reported*,
//! and the session controller decides what saving means.

use crate::form::FormAccessor;
use crate::registry::FieldRegistry;
use crate::types::{RecognitionEvent, VoiceCommand};

/// What dispatching one event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Dictated text was appended to the active field.
    TextAppended,
    /// Navigation or a field selector moved the focus.
    FocusMoved,
    /// The completion command was recognized; the caller should save.
    CompletionRequested,
    /// Nothing changed (unknown command, unmatched selector, clamped move).
    Ignored,
}

/// Dispatch one event against the registry and form.
pub fn route(
    event: RecognitionEvent,
    registry: &mut FieldRegistry,
    form: &mut dyn FormAccessor,
) -> Outcome {
    match event {
        RecognitionEvent::Dictation { text } => {
            form.append_text(registry.active_field().name(), &text);
            Outcome::TextAppended
        }
        RecognitionEvent::Command(command) => route_command(command, registry, form),
    }
}

fn route_command(
    command: VoiceCommand,
    registry: &mut FieldRegistry,
    form: &mut dyn FormAccessor,
) -> Outcome {
    match command {
        VoiceCommand::NextField => refocus(registry, form, FieldRegistry::next),
        VoiceCommand::PreviousField => refocus(registry, form, FieldRegistry::previous),
        VoiceCommand::Complete => Outcome::CompletionRequested,
        VoiceCommand::SelectField { fragment } => refocus(registry, form, |registry| {
            registry.set_active_by_name(&fragment);
        }),
        VoiceCommand::Unknown(raw) => {
            // Forward compatibility: an evolving backend vocabulary must not
            // end the session.
            tracing::warn!("ignoring unrecognized voice command: {raw}");
            Outcome::Ignored
        }
    }
}

fn refocus(
    registry: &mut FieldRegistry,
    form: &mut dyn FormAccessor,
    advance: impl FnOnce(&mut FieldRegistry),
) -> Outcome {
    let before = registry.active_field().name().to_string();
    advance(registry);
    let after = registry.active_field().name();
    if before == after {
        return Outcome::Ignored;
    }
    form.mark_active(&before, false);
    form.mark_active(after, true);
    Outcome::FocusMoved
}
