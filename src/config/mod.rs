pub mod settings;
pub mod storage;

pub use settings::{AppConfig, ChatConfig, SttConfig, VoiceConfig};
pub use storage::{load_config, save_config, ConfigError, ConfigStore};
