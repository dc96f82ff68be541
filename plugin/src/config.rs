use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
const MIN_POLL_INTERVAL_MS: u64 = 100;

/// Settings read from the `plugins > audio-route` section of the Tauri config
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    /// Poll output devices for headset plug/unplug on hosts without push events
    #[serde(default = "default_monitor_hotplug")]
    pub monitor_hotplug: bool,

    /// Hot-plug polling interval in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub hotplug_poll_interval_ms: u64,
}

fn default_monitor_hotplug() -> bool {
    true
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            monitor_hotplug: default_monitor_hotplug(),
            hotplug_poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl PluginConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.hotplug_poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: PluginConfig = serde_json::from_str("{}").unwrap();
        assert!(config.monitor_hotplug);
        assert_eq!(config.poll_interval(), Duration::from_secs(2));
    }

    #[test]
    fn test_camel_case_fields() {
        let config: PluginConfig =
            serde_json::from_str(r#"{"monitorHotplug": false, "hotplugPollIntervalMs": 500}"#)
                .unwrap();
        assert!(!config.monitor_hotplug);
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_interval_is_clamped() {
        let config = PluginConfig {
            hotplug_poll_interval_ms: 1,
            ..PluginConfig::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
    }
}
