//! The start/stop/save lifecycle around one recognition run.

use crate::channel::{ChannelHandle, CommandChannel};
use crate::control::{RecognitionControl, ReportStore};
use crate::error::VoiceError;
use crate::form::FormAccessor;
use crate::registry::FieldRegistry;
use crate::router::{self, Outcome};
use crate::types::{RecognitionEvent, SavedReport};

enum SessionState {
    Idle,
    Listening(ChannelHandle),
}

/// Owns the registry, the form, and the session's collaborators.
///
/// At most one channel is open at a time: `start` while Listening and `stop`
/// while Idle are both no-ops. Completion saves the report and resets the
/// form but deliberately leaves the channel open; stopping the listening
/// session is its own user action.
pub struct SessionController<N, C, S> {
    channel: N,
    control: C,
    store: S,
    registry: FieldRegistry,
    form: Box<dyn FormAccessor + Send>,
    state: SessionState,
}

impl<N, C, S> SessionController<N, C, S>
where
    N: CommandChannel,
    C: RecognitionControl,
    S: ReportStore,
{
    pub fn new(
        channel: N,
        control: C,
        store: S,
        registry: FieldRegistry,
        mut form: Box<dyn FormAccessor + Send>,
    ) -> Self {
        form.mark_active(registry.active_field().name(), true);
        Self {
            channel,
            control,
            store,
            registry,
            form,
            state: SessionState::Idle,
        }
    }

    pub fn is_listening(&self) -> bool {
        matches!(self.state, SessionState::Listening(_))
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn form(&self) -> &dyn FormAccessor {
        self.form.as_ref()
    }

    /// Begin a listening session: start continuous recognition on the
    /// backend, then open the command channel. No-op while already Listening.
    pub async fn start(&mut self) -> Result<(), VoiceError> {
        if self.is_listening() {
            tracing::warn!("recognition already running");
            return Ok(());
        }
        self.control.start_continuous().await?;
        let handle = self.channel.open().await?;
        self.state = SessionState::Listening(handle);
        tracing::info!("listening session started");
        Ok(())
    }

    /// End the listening session. The channel is closed before the control
    /// call so no event can be dispatched after this returns, even if the
    /// backend's stop fails. No-op while Idle.
    pub async fn stop(&mut self) -> Result<(), VoiceError> {
        let state = std::mem::replace(&mut self.state, SessionState::Idle);
        let SessionState::Listening(mut handle) = state else {
            return Ok(());
        };
        handle.close();
        self.control.stop_continuous().await?;
        tracing::info!("listening session stopped");
        Ok(())
    }

    /// Snapshot the form and persist it. Field values are untouched either
    /// way, so a failed save can be retried without redictating.
    pub async fn save(&mut self) -> Result<SavedReport, VoiceError> {
        let report = self.registry.snapshot(self.form.as_ref());
        self.store.save_report(&report).await
    }

    /// Dispatch one event. A completion outcome triggers exactly one save;
    /// on success the form is cleared and the cursor rewound, on failure the
    /// values stay in place and the error is only logged (the session must
    /// outlive a flaky save).
    pub async fn handle_event(&mut self, event: RecognitionEvent) -> Outcome {
        let outcome = router::route(event, &mut self.registry, self.form.as_mut());
        if outcome == Outcome::CompletionRequested {
            match self.save().await {
                Ok(saved) => {
                    tracing::info!("report saved, id={}", saved.report_id());
                    self.registry.reset_all(self.form.as_mut());
                }
                Err(e) => {
                    tracing::error!("failed to save completed report: {e}");
                }
            }
        }
        outcome
    }

    /// Next event from the open channel, in arrival order. Pends forever
    /// while Idle, which makes it safe to poll from a select loop; `None`
    /// means the connection ended and the session has returned to Idle.
    pub async fn next_event(&mut self) -> Option<RecognitionEvent> {
        let event = match &mut self.state {
            SessionState::Listening(handle) => handle.next_event().await,
            SessionState::Idle => std::future::pending().await,
        };
        if event.is_none() {
            tracing::warn!("command channel closed");
            self.state = SessionState::Idle;
        }
        event
    }

    /// Drain and dispatch events until the session stops listening.
    pub async fn pump(&mut self) {
        while self.is_listening() {
            match self.next_event().await {
                Some(event) => {
                    self.handle_event(event).await;
                }
                None => return,
            }
        }
    }
}
