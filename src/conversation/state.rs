/// The single authoritative UI state of the conversation screen.
///
/// Exactly one variant holds at any time; the recording/loading/speaking
/// combinations that the flag-per-concern approach allowed are
/// unrepresentable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    /// Waiting for the user to press the microphone
    Idle,
    /// Microphone session is live
    Recording,
    /// Transcription or completion request in flight
    Loading,
    /// Reply is being spoken aloud
    Speaking,
    /// Reply shown, regenerate/replay available
    ReplyReady,
}

/// A blocking modal message for the user. Surfaced once, then consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// What the presentation layer renders: current state plus displayed text.
#[derive(Debug, Clone)]
pub struct ConversationSnapshot {
    pub state: ConversationState,
    pub text: String,
}

impl ConversationSnapshot {
    /// Whether the speaking animation should be running.
    pub fn is_speaking(&self) -> bool {
        self.state == ConversationState::Speaking
    }
}
