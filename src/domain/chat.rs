/// A single inbound chat message; ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub message: String,
    pub stream_requested: bool,
}

/// One discrete unit of a streamed chat reply. A stream is a sequence of
/// `Content` frames terminated by the first `Done` or `Error` frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatFrame {
    Content(String),
    Done { full_content: String },
    Error(String),
}
