//! Wire-level recognition results and their decoded form.
//!
//! The recognition backend pushes one JSON `RecognitionResult` per utterance
//! over the voice WebSocket. The record is decoded into a [`RecognitionEvent`]
//! exactly once, at the channel boundary; everything downstream dispatches on
//! the tagged variants and never re-inspects command strings.

const FIELD_PREFIX: &str = "FIELD_";
const FIELD_SUFFIX: &str = "FIELD";

/// One recognition result as delivered by the backend.
///
/// Field names must match the backend's JSON exactly.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RecognitionResult {
    /// The transcribed utterance.
    text: String,

    /// Whether the backend classified the utterance as a command.
    #[serde(rename = "isCommand")]
    is_command: bool,

    /// Command name, e.g. `NEXT_FIELD` or `FIELD_PATIENTFIELD`. Empty for dictation.
    #[serde(rename = "recognizedCommand", default)]
    recognized_command: String,

    /// Backend confidence estimate in `[0, 1]`.
    #[serde(default)]
    confidence: f64,

    #[serde(rename = "processingTimeMs", default)]
    processing_time_ms: u64,
}

impl RecognitionResult {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_command(&self) -> bool {
        self.is_command
    }

    pub fn recognized_command(&self) -> &str {
        &self.recognized_command
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn processing_time_ms(&self) -> u64 {
        self.processing_time_ms
    }
}

/// The closed command vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceCommand {
    /// Move focus to the next field.
    NextField,
    /// Move focus to the previous field.
    PreviousField,
    /// The report is finished and should be saved.
    Complete,
    /// Focus the field whose name contains `fragment` (already extracted
    /// and lower-cased at decode time).
    SelectField { fragment: String },
    /// Anything the vocabulary does not cover. Carried so the router can
    /// log it; never acted on.
    Unknown(String),
}

/// One decoded message from the command channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Free-form transcribed text for the active field.
    Dictation { text: String },
    Command(VoiceCommand),
}

impl From<RecognitionResult> for RecognitionEvent {
    fn from(result: RecognitionResult) -> Self {
        tracing::debug!(
            confidence = result.confidence,
            processing_time_ms = result.processing_time_ms,
            "decoding recognition result"
        );
        if !result.is_command {
            return RecognitionEvent::Dictation { text: result.text };
        }
        RecognitionEvent::Command(parse_command(&result.recognized_command))
    }
}

fn parse_command(raw: &str) -> VoiceCommand {
    match raw {
        "NEXT_FIELD" => VoiceCommand::NextField,
        "PREVIOUS_FIELD" => VoiceCommand::PreviousField,
        "COMPLETE" => VoiceCommand::Complete,
        _ => match raw.strip_prefix(FIELD_PREFIX) {
            Some(rest) => {
                // The backend appends a redundant literal "FIELD" to selector
                // names (FIELD_PATIENTFIELD); strip it along with the prefix.
                let fragment = rest.strip_suffix(FIELD_SUFFIX).unwrap_or(rest);
                VoiceCommand::SelectField {
                    fragment: fragment.to_lowercase(),
                }
            }
            None => VoiceCommand::Unknown(raw.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(text: &str, is_command: bool, command: &str) -> RecognitionResult {
        RecognitionResult {
            text: text.to_string(),
            is_command,
            recognized_command: command.to_string(),
            confidence: 0.9,
            processing_time_ms: 120,
        }
    }

    #[test]
    fn dictation_ignores_command_field() {
        let event = RecognitionEvent::from(result("Острый аппендицит", false, "UNKNOWN"));
        assert_eq!(
            event,
            RecognitionEvent::Dictation {
                text: "Острый аппендицит".to_string()
            }
        );
    }

    #[test]
    fn navigation_and_completion_commands() {
        assert_eq!(
            RecognitionEvent::from(result("следующее поле", true, "NEXT_FIELD")),
            RecognitionEvent::Command(VoiceCommand::NextField)
        );
        assert_eq!(
            RecognitionEvent::from(result("предыдущее поле", true, "PREVIOUS_FIELD")),
            RecognitionEvent::Command(VoiceCommand::PreviousField)
        );
        assert_eq!(
            RecognitionEvent::from(result("готово", true, "COMPLETE")),
            RecognitionEvent::Command(VoiceCommand::Complete)
        );
    }

    #[test]
    fn selector_strips_prefix_and_redundant_suffix() {
        assert_eq!(
            RecognitionEvent::from(result("поле пациент", true, "FIELD_PATIENTFIELD")),
            RecognitionEvent::Command(VoiceCommand::SelectField {
                fragment: "patient".to_string()
            })
        );
        assert_eq!(
            RecognitionEvent::from(result("табельный", true, "FIELD_PERSONALNUMBERFIELD")),
            RecognitionEvent::Command(VoiceCommand::SelectField {
                fragment: "personalnumber".to_string()
            })
        );
        // No trailing suffix to strip.
        assert_eq!(
            RecognitionEvent::from(result("диагноз", true, "FIELD_DIAGNOSIS")),
            RecognitionEvent::Command(VoiceCommand::SelectField {
                fragment: "diagnosis".to_string()
            })
        );
    }

    #[test]
    fn unrecognized_command_survives_as_unknown() {
        assert_eq!(
            RecognitionEvent::from(result("создать pdf", true, "GENERATE_PDF")),
            RecognitionEvent::Command(VoiceCommand::Unknown("GENERATE_PDF".to_string()))
        );
    }

    #[test]
    fn wire_names_match_backend_json() {
        let json = r#"{
            "text": "следующее поле",
            "isCommand": true,
            "recognizedCommand": "NEXT_FIELD",
            "confidence": 0.75,
            "processingTimeMs": 80
        }"#;
        let result: RecognitionResult = serde_json::from_str(json).expect("valid wire payload");
        assert_eq!(result.text(), "следующее поле");
        assert!(result.is_command());
        assert_eq!(result.recognized_command(), "NEXT_FIELD");
        assert_eq!(
            RecognitionEvent::from(result),
            RecognitionEvent::Command(VoiceCommand::NextField)
        );
    }
}
