//! Clients for the recognition control and persistence endpoints.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::VoiceError;
use crate::types::{Report, SavedReport};

// These traits are the seam between the session lifecycle and the backend's
// REST surface. The session controller depends on the abstractions, so tests
// drive it with `mockall` doubles instead of a live backend.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait RecognitionControl {
    async fn start_continuous(&self) -> Result<(), VoiceError>;

    async fn stop_continuous(&self) -> Result<(), VoiceError>;
}

#[async_trait]
#[cfg_attr(test, automock)]
pub trait ReportStore {
    async fn save_report(&self, report: &Report) -> Result<SavedReport, VoiceError>;
}

/// reqwest client for the backend's voice API.
#[derive(Debug, Clone)]
pub struct VoiceApi {
    client: reqwest::Client,
    base_url: String,
}

impl VoiceApi {
    /// `base_url` is the voice API root, e.g. `http://localhost:8080/api/test/voice`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl RecognitionControl for VoiceApi {
    async fn start_continuous(&self) -> Result<(), VoiceError> {
        self.client
            .post(format!("{}/start-continuous", self.base_url))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| VoiceError::Control(e.into()))?;
        tracing::info!("continuous recognition started");
        Ok(())
    }

    async fn stop_continuous(&self) -> Result<(), VoiceError> {
        self.client
            .post(format!("{}/stop-continuous", self.base_url))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| VoiceError::Control(e.into()))?;
        tracing::info!("continuous recognition stopped");
        Ok(())
    }
}

#[async_trait]
impl ReportStore for VoiceApi {
    async fn save_report(&self, report: &Report) -> Result<SavedReport, VoiceError> {
        let response = self
            .client
            .post(format!("{}/save-report", self.base_url))
            .json(report)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| VoiceError::Save(e.into()))?;

        response
            .json::<SavedReport>()
            .await
            .map_err(|e| VoiceError::Save(e.into()))
    }
}
