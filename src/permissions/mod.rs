use serde::Serialize;

/// State of the microphone permission
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum PermissionState {
    /// Permission has been granted
    Granted,
    /// Permission has been explicitly denied
    Denied,
}

/// Check microphone permission by probing the default input device
pub fn check_microphone() -> PermissionState {
    use cpal::traits::HostTrait;

    let host = cpal::default_host();
    match host.default_input_device() {
        Some(_) => PermissionState::Granted,
        None => PermissionState::Denied,
    }
}

/// Request microphone permission.
///
/// Returns the current grant. On macOS a denial also opens the privacy
/// settings pane so the user can fix it; there is no programmatic prompt
/// once the system dialog has been dismissed.
pub async fn request_microphone() -> bool {
    if check_microphone() == PermissionState::Granted {
        return true;
    }
    open_microphone_settings();
    false
}

/// Open System Settings > Privacy & Security > Microphone
pub fn open_microphone_settings() {
    #[cfg(target_os = "macos")]
    {
        let _ = std::process::Command::new("open")
            .arg("x-apple.systempreferences:com.apple.preference.security?Privacy_Microphone")
            .spawn();
    }
}
