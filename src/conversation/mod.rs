mod controller;
mod state;

pub use controller::ConversationController;
pub use state::{Alert, ConversationSnapshot, ConversationState};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Audio error: {0}")]
    Audio(#[from] crate::audio::AudioError),
    #[error("Transcription error: {0}")]
    Stt(#[from] crate::stt::SttError),
    #[error("Completion error: {0}")]
    Chat(#[from] crate::llm::ChatError),
    #[error("Speech error: {0}")]
    Speech(#[from] crate::speech::SpeechError),
}
