mod traits;
mod whisper;

pub use traits::{SttError, Transcriber};
pub use whisper::WhisperClient;

use crate::config::SttConfig;

/// 根据配置创建语音识别服务
pub fn create_transcriber(config: &SttConfig) -> Result<Box<dyn Transcriber>, SttError> {
    if config.api_key.is_empty() {
        return Err(SttError::Config("Transcription API key missing".to_string()));
    }
    Ok(Box::new(WhisperClient::new(
        config.api_key.clone(),
        config.model.clone(),
        config.endpoint.clone(),
    )))
}
