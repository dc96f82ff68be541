use thiserror::Error;

/// Failures reported by an [`AudioPlatform`](crate::audio::AudioPlatform).
///
/// None of these ever reach the calling application: the controller logs
/// them and falls back to the safe branch.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("capability unavailable: {0}")]
    Unavailable(String),

    #[error("native plugin invocation failed: {0}")]
    Invoke(String),

    #[error("audio device error: {0}")]
    Device(String),
}

impl PlatformError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, PlatformError::PermissionDenied(_))
    }
}

#[cfg(target_os = "android")]
impl From<tauri::plugin::mobile::PluginInvokeError> for PlatformError {
    fn from(error: tauri::plugin::mobile::PluginInvokeError) -> Self {
        let message = error.to_string();
        if message.to_lowercase().contains("permission") {
            PlatformError::PermissionDenied(message)
        } else {
            PlatformError::Invoke(message)
        }
    }
}

#[cfg(not(target_os = "android"))]
impl From<cpal::DevicesError> for PlatformError {
    fn from(error: cpal::DevicesError) -> Self {
        PlatformError::Device(error.to_string())
    }
}

pub type PlatformResult<T> = std::result::Result<T, PlatformError>;
