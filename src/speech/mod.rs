mod system;
mod traits;

pub use system::SystemSpeech;
pub use traits::{SpeechError, SpeechPlayer};

use crate::config::VoiceConfig;

/// 根据配置创建语音播报服务
pub fn create_speech_player(config: &VoiceConfig) -> Box<dyn SpeechPlayer> {
    Box::new(SystemSpeech::new(config.clone()))
}
