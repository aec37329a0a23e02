use serde::{Deserialize, Serialize};

/// Ordering strategy for the model-module search path.
///
/// `UseBundled` consults the configured `path` entries before the workspace
/// cwd; `FromEnvironment` consults the cwd first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum ImportStrategy {
    #[default]
    #[serde(rename = "useBundled")]
    UseBundled,
    #[serde(rename = "fromEnvironment")]
    FromEnvironment,
}

/// Verbosity of `window/showMessage` notifications raised alongside the
/// always-on `window/logMessage` output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum NotificationLevel {
    #[default]
    #[serde(rename = "off")]
    Off,
    #[serde(rename = "onError")]
    OnError,
    #[serde(rename = "onWarning")]
    OnWarning,
    #[serde(rename = "always")]
    Always,
}

impl NotificationLevel {
    /// Whether errors should be shown as client notifications.
    pub fn shows_errors(self) -> bool {
        self >= NotificationLevel::OnError
    }

    /// Whether warnings should be shown as client notifications.
    pub fn shows_warnings(self) -> bool {
        self >= NotificationLevel::OnWarning
    }

    /// Whether informational messages should be shown as client notifications.
    pub fn shows_info(self) -> bool {
        self >= NotificationLevel::Always
    }

    /// Parse the `LS_SHOW_NOTIFICATION` environment variable, used as a
    /// fallback when no settings layer provides a value.
    pub fn from_env() -> Option<Self> {
        match std::env::var("LS_SHOW_NOTIFICATION").ok()?.as_str() {
            "off" => Some(NotificationLevel::Off),
            "onError" => Some(NotificationLevel::OnError),
            "onWarning" => Some(NotificationLevel::OnWarning),
            "always" => Some(NotificationLevel::Always),
            _ => None,
        }
    }
}

/// Server settings as they appear on the wire (camelCase) in
/// `initializationOptions.globalSettings`, per-workspace entries, and
/// `voyager-ls.toml`. All fields optional so layers can be merged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoyagerSettings {
    pub path: Option<Vec<String>>,
    pub interpreter: Option<Vec<String>>,
    pub args: Option<Vec<String>>,
    pub import_strategy: Option<ImportStrategy>,
    pub show_notifications: Option<NotificationLevel>,
}

/// One element of the `initializationOptions.settings` array: settings scoped
/// to a single workspace, identified by its URI.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSettingsEntry {
    /// Workspace URI as sent by the client.
    pub workspace: String,
    #[serde(flatten)]
    pub settings: VoyagerSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_deserialize_camel_case() {
        let json = serde_json::json!({
            "path": ["/opt/libs"],
            "interpreter": ["/usr/bin/python3"],
            "args": ["~/models/schema.py"],
            "importStrategy": "fromEnvironment",
            "showNotifications": "onWarning"
        });
        let settings: VoyagerSettings = serde_json::from_value(json).unwrap();
        assert_eq!(settings.path, Some(vec!["/opt/libs".to_string()]));
        assert_eq!(settings.args, Some(vec!["~/models/schema.py".to_string()]));
        assert_eq!(settings.import_strategy, Some(ImportStrategy::FromEnvironment));
        assert_eq!(
            settings.show_notifications,
            Some(NotificationLevel::OnWarning)
        );
    }

    #[test]
    fn test_workspace_entry_flattens_settings() {
        let json = serde_json::json!({
            "workspace": "file:///home/user/project",
            "args": ["models.py"],
            "showNotifications": "always"
        });
        let entry: WorkspaceSettingsEntry = serde_json::from_value(json).unwrap();
        assert_eq!(entry.workspace, "file:///home/user/project");
        assert_eq!(entry.settings.args, Some(vec!["models.py".to_string()]));
        assert_eq!(
            entry.settings.show_notifications,
            Some(NotificationLevel::Always)
        );
    }

    #[test]
    #[serial_test::serial(ls_show_notification_env)]
    fn test_notification_level_from_env() {
        use std::env;

        let original = env::var("LS_SHOW_NOTIFICATION").ok();

        // SAFETY: #[serial] prevents concurrent modification of LS_SHOW_NOTIFICATION
        unsafe {
            env::set_var("LS_SHOW_NOTIFICATION", "onWarning");
        }
        let from_env = NotificationLevel::from_env();

        unsafe {
            env::set_var("LS_SHOW_NOTIFICATION", "garbage");
        }
        let from_garbage = NotificationLevel::from_env();

        // SAFETY: restoring original env state under the same serial guard
        unsafe {
            match original {
                Some(val) => env::set_var("LS_SHOW_NOTIFICATION", val),
                None => env::remove_var("LS_SHOW_NOTIFICATION"),
            }
        }

        assert_eq!(from_env, Some(NotificationLevel::OnWarning));
        assert_eq!(from_garbage, None);
    }

    #[test]
    fn test_notification_level_thresholds() {
        assert!(!NotificationLevel::Off.shows_errors());
        assert!(NotificationLevel::OnError.shows_errors());
        assert!(!NotificationLevel::OnError.shows_warnings());
        assert!(NotificationLevel::OnWarning.shows_warnings());
        assert!(!NotificationLevel::OnWarning.shows_info());
        assert!(NotificationLevel::Always.shows_info());
    }
}
