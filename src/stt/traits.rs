use async_trait::async_trait;

use crate::audio::AudioClip;

#[derive(Debug, thiserror::Error)]
pub enum SttError {
    #[error("API error: {0}")]
    Api(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// 语音识别服务 trait
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Convert one finished recording into plain text. Single attempt,
    /// no retry; the caller decides what a failure means.
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, SttError>;
}
