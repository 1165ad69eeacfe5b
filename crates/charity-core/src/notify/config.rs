use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::NotificationKind;

/// Default display time for success/info toasts (milliseconds)
const DEFAULT_DURATION_MS: u64 = 3000;

/// Error toasts stay up longer so the message can be read
const ERROR_DURATION_MS: u64 = 5000;

const DEFAULT_MAX_VISIBLE: usize = 5;

#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    TopLeft,
    TopCenter,
    #[default]
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// Presentation settings shared by every toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub position: ToastPosition,
    pub default_duration_ms: u64,
    pub success_duration_ms: Option<u64>,
    pub error_duration_ms: Option<u64>,
    pub max_visible: usize,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            position: ToastPosition::TopRight,
            default_duration_ms: DEFAULT_DURATION_MS,
            success_duration_ms: None,
            error_duration_ms: Some(ERROR_DURATION_MS),
            max_visible: DEFAULT_MAX_VISIBLE,
        }
    }
}

impl ToastConfig {
    pub fn duration_for(&self, kind: NotificationKind) -> Duration {
        let ms = match kind {
            NotificationKind::Success => self.success_duration_ms,
            NotificationKind::Error => self.error_duration_ms,
            NotificationKind::Info | NotificationKind::Warning => None,
        }
        .unwrap_or(self.default_duration_ms);
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_overrides() {
        let config = ToastConfig::default();
        assert_eq!(config.duration_for(NotificationKind::Error), Duration::from_millis(5000));
        assert_eq!(config.duration_for(NotificationKind::Success), Duration::from_millis(3000));
        assert_eq!(config.duration_for(NotificationKind::Info), Duration::from_millis(3000));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: ToastConfig =
            serde_json::from_str(r#"{"position": "bottom-center", "max_visible": 3}"#).unwrap();
        assert_eq!(config.position, ToastPosition::BottomCenter);
        assert_eq!(config.max_visible, 3);
        assert_eq!(config.default_duration_ms, DEFAULT_DURATION_MS);
    }
}
