use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub stt: SttConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stt: SttConfig::default(),
            chat: ChatConfig::default(),
            voice: VoiceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Fill empty API keys from the `OPENAI_API_KEY` environment variable.
    /// Secrets come from the build environment, never from runtime flags.
    pub fn with_env_keys(mut self) -> Self {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if self.stt.api_key.is_empty() {
                self.stt.api_key = key.clone();
            }
            if self.chat.api_key.is_empty() {
                self.chat.api_key = key;
            }
        }
        self
    }
}

/// 语音识别配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SttConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_whisper_model")]
    pub model: String,
    #[serde(default = "default_stt_endpoint")]
    pub endpoint: String,
}

fn default_whisper_model() -> String {
    "whisper-1".to_string()
}

fn default_stt_endpoint() -> String {
    "https://api.openai.com/v1/audio/transcriptions".to_string()
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_whisper_model(),
            endpoint: default_stt_endpoint(),
        }
    }
}

/// 对话补全配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_chat_model")]
    pub model: String,
    #[serde(default = "default_chat_endpoint")]
    pub endpoint: String,
}

fn default_chat_model() -> String {
    "gpt-4".to_string()
}

fn default_chat_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_chat_model(),
            endpoint: default_chat_endpoint(),
        }
    }
}

/// 语音播报配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_pitch")]
    pub pitch: f32,
    #[serde(default = "default_rate")]
    pub rate: f32,
}

fn default_voice() -> String {
    "com.apple.ttsbundle.Yelda-compact".to_string()
}

fn default_language() -> String {
    "tr-TR".to_string()
}

fn default_pitch() -> f32 {
    1.0
}

fn default_rate() -> f32 {
    1.06
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            voice: default_voice(),
            language: default_language(),
            pitch: default_pitch(),
            rate: default_rate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_fixed_models() {
        let config = AppConfig::default();
        assert_eq!(config.stt.model, "whisper-1");
        assert_eq!(config.chat.model, "gpt-4");
        assert_eq!(config.voice.language, "tr-TR");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"chat": {"api_key": "sk-test"}}"#).unwrap();
        assert_eq!(config.chat.api_key, "sk-test");
        assert_eq!(config.chat.model, "gpt-4");
        assert_eq!(config.stt.endpoint, default_stt_endpoint());
    }
}
