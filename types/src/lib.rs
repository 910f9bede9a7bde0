pub mod events;
pub mod report;

pub use events::{RecognitionEvent, RecognitionResult, VoiceCommand};
pub use report::{Report, SavedReport};
