use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Nothing to speak")]
    EmptyText,
    #[error("Synthesizer error: {0}")]
    Synthesizer(String),
}

/// 语音播报服务 trait
///
/// `speak` resolves exactly once, when playback has finished. There is no
/// separate completion callback; transition out of the speaking state is
/// driven purely by this future resolving.
#[async_trait]
pub trait SpeechPlayer: Send + Sync {
    async fn speak(&self, text: &str) -> Result<(), SpeechError>;
}
