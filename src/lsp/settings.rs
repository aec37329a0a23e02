use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::config::{VoyagerSettings, WorkspaceSettingsEntry, defaults::default_settings, merge_all};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsEventKind {
    Info,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsEvent {
    pub kind: SettingsEventKind,
    pub message: String,
}

impl SettingsEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: SettingsEventKind::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: SettingsEventKind::Warning,
            message: message.into(),
        }
    }
}

/// Shape of the client's `initializationOptions`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct InitializationOptions {
    global_settings: VoyagerSettings,
    settings: Vec<WorkspaceSettingsEntry>,
}

#[derive(Default, Debug)]
pub struct SettingsLoadOutcome {
    /// Merged global settings: defaults < project toml < initialization options.
    pub global: VoyagerSettings,
    /// Per-workspace entries as sent by the client, unresolved.
    pub workspaces: Vec<WorkspaceSettingsEntry>,
    pub events: Vec<SettingsEvent>,
}

/// Load settings from all layers.
///
/// Precedence for the global record (later overrides earlier):
/// 1. Programmed defaults
/// 2. `voyager-ls.toml` in the workspace root
/// 3. `initializationOptions.globalSettings`
pub fn load_settings(
    root_path: Option<&Path>,
    initialization_options: Option<Value>,
) -> SettingsLoadOutcome {
    let mut events = Vec::new();

    let defaults = Some(default_settings());
    let project_settings = load_toml_settings(root_path, &mut events);
    let (client_global, workspaces) =
        parse_initialization_options(initialization_options, &mut events);

    let global = merge_all(&[defaults, project_settings, client_global]).unwrap_or_default();

    SettingsLoadOutcome {
        global,
        workspaces,
        events,
    }
}

fn load_toml_settings(
    root_path: Option<&Path>,
    events: &mut Vec<SettingsEvent>,
) -> Option<VoyagerSettings> {
    let root = root_path?;
    let config_path = root.join("voyager-ls.toml");
    if !config_path.exists() {
        return None;
    }

    events.push(SettingsEvent::info(format!(
        "Found config file: {}",
        config_path.display()
    )));

    match fs::read_to_string(&config_path) {
        Ok(contents) => match toml::from_str::<VoyagerSettings>(&contents) {
            Ok(settings) => {
                events.push(SettingsEvent::info("Successfully loaded voyager-ls.toml"));
                Some(settings)
            }
            Err(err) => {
                events.push(SettingsEvent::warning(format!(
                    "Failed to parse voyager-ls.toml: {}",
                    err
                )));
                None
            }
        },
        Err(err) => {
            events.push(SettingsEvent::warning(format!(
                "Failed to read voyager-ls.toml: {}",
                err
            )));
            None
        }
    }
}

fn parse_initialization_options(
    value: Option<Value>,
    events: &mut Vec<SettingsEvent>,
) -> (Option<VoyagerSettings>, Vec<WorkspaceSettingsEntry>) {
    let Some(value) = value else {
        return (None, Vec::new());
    };

    match serde_json::from_value::<InitializationOptions>(value) {
        Ok(options) => {
            events.push(SettingsEvent::info(format!(
                "Parsed initialization options ({} workspace settings)",
                options.settings.len()
            )));
            (Some(options.global_settings), options.settings)
        }
        Err(err) => {
            events.push(SettingsEvent::warning(format!(
                "Failed to parse initialization options: {}",
                err
            )));
            (None, Vec::new())
        }
    }
}
