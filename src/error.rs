/// Failures surfaced by user-invoked actions (start, stop, save).
///
/// Router-level conditions (unknown commands, unmatched selector fragments)
/// are logged and ignored, never raised as errors; a bad event must not end
/// the session.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    /// The command channel failed to open or the connection broke.
    #[error("command channel transport failed: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    /// The recognition control endpoint rejected a start/stop call.
    #[error("recognition control call failed: {0}")]
    Control(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The persistence endpoint rejected the report. In-memory field values
    /// are kept so the save can be retried without redictating.
    #[error("report save failed: {0}")]
    Save(#[source] Box<dyn std::error::Error + Send + Sync>),
}
