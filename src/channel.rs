//! The sustained connection that delivers recognition events.

use async_trait::async_trait;
use futures_util::StreamExt;
#[cfg(test)]
use mockall::automock;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

use crate::error::VoiceError;
use crate::types::{RecognitionEvent, RecognitionResult};

/// Default buffer for decoded events awaiting dispatch.
pub const EVENT_BUFFER: usize = 256;

/// An open command channel: decoded events in arrival order, plus the reader
/// task feeding them.
pub struct ChannelHandle {
    events: mpsc::Receiver<RecognitionEvent>,
    reader: Option<JoinHandle<()>>,
}

impl ChannelHandle {
    pub fn new(events: mpsc::Receiver<RecognitionEvent>, reader: Option<JoinHandle<()>>) -> Self {
        Self {
            events,
            reader,
        }
    }

    /// The next event in arrival order, or `None` once the channel is closed
    /// or the connection has ended.
    pub async fn next_event(&mut self) -> Option<RecognitionEvent> {
        self.events.recv().await
    }

    /// Close the channel. Nothing is delivered afterwards: the reader task is
    /// aborted and events already buffered are discarded, so a message in
    /// flight at the network layer never reaches the router.
    pub fn close(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
        self.events.close();
        while self.events.try_recv().is_ok() {}
    }
}

impl Drop for ChannelHandle {
    fn drop(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}

#[async_trait]
#[cfg_attr(test, automock)]
pub trait CommandChannel {
    async fn open(&self) -> Result<ChannelHandle, VoiceError>;
}

/// WebSocket command channel against the recognition backend.
///
/// Each text frame is one JSON [`RecognitionResult`]; it is decoded into a
/// [`RecognitionEvent`] here, once, so everything downstream works with the
/// tagged vocabulary. Unparsable payloads are logged and skipped.
pub struct WsCommandChannel {
    url: String,
    capacity: usize,
}

impl WsCommandChannel {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            capacity: EVENT_BUFFER,
        }
    }

    pub fn with_capacity(url: impl Into<String>, capacity: usize) -> Self {
        Self {
            url: url.into(),
            capacity,
        }
    }
}

#[async_trait]
impl CommandChannel for WsCommandChannel {
    async fn open(&self) -> Result<ChannelHandle, VoiceError> {
        let (ws_stream, _) = tokio_tungstenite::connect_async(self.url.as_str()).await?;
        tracing::info!("command channel connected: {}", self.url);

        let (_write, mut read) = ws_stream.split();
        let (tx, rx) = mpsc::channel(self.capacity);

        let reader = tokio::spawn(async move {
            while let Some(message) = read.next().await {
                let message = match message {
                    Ok(message) => message,
                    Err(e) => {
                        tracing::error!("failed to read message: {}", e);
                        break;
                    }
                };
                match message {
                    Message::Text(text) => {
                        match serde_json::from_str::<RecognitionResult>(&text) {
                            Ok(result) => {
                                let event = RecognitionEvent::from(result);
                                if tx.send(event).await.is_err() {
                                    // Receiver closed; the session is done with us.
                                    break;
                                }
                            }
                            Err(e) => {
                                tracing::warn!("ignoring unparsable recognition payload: {}", e);
                            }
                        }
                    }
                    Message::Binary(bin) => {
                        tracing::warn!("unexpected binary message: {} bytes", bin.len());
                    }
                    Message::Close(reason) => {
                        tracing::info!("connection closed: {:?}", reason);
                        break;
                    }
                    _ => {}
                }
            }
        });

        Ok(ChannelHandle::new(rx, Some(reader)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VoiceCommand;

    fn dictation(text: &str) -> RecognitionEvent {
        RecognitionEvent::Dictation {
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn events_arrive_in_order() {
        let (tx, rx) = mpsc::channel(8);
        let mut handle = ChannelHandle::new(rx, None);

        tx.send(dictation("first")).await.unwrap();
        tx.send(RecognitionEvent::Command(VoiceCommand::NextField))
            .await
            .unwrap();
        tx.send(dictation("second")).await.unwrap();

        assert_eq!(handle.next_event().await, Some(dictation("first")));
        assert_eq!(
            handle.next_event().await,
            Some(RecognitionEvent::Command(VoiceCommand::NextField))
        );
        assert_eq!(handle.next_event().await, Some(dictation("second")));
    }

    #[tokio::test]
    async fn nothing_is_delivered_after_close() {
        let (tx, rx) = mpsc::channel(8);
        let mut handle = ChannelHandle::new(rx, None);

        tx.send(dictation("buffered before close")).await.unwrap();
        handle.close();

        assert_eq!(handle.next_event().await, None);
        assert!(tx.send(dictation("after close")).await.is_err());
    }
}
