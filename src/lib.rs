pub use voice_report_types as types;

pub mod channel;
pub mod config;
pub mod control;
pub mod error;
pub mod form;
pub mod registry;
pub mod router;
pub mod session;

pub use channel::{ChannelHandle, CommandChannel, WsCommandChannel};
pub use control::{RecognitionControl, ReportStore, VoiceApi};
pub use error::VoiceError;
pub use form::{FormAccessor, HeadlessForm};
pub use registry::{Field, FieldRegistry};
pub use router::{route, Outcome};
pub use session::SessionController;
