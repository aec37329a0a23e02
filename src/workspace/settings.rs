//! Process-wide settings storage keyed by workspace path.
//!
//! Populated once at `initialize` from the client's initialization options
//! and read on every request. Resolution for a document walks its ancestor
//! chain looking for a registered workspace root; documents outside every
//! workspace get a record synthesized from the global defaults.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::Serialize;
use tower_lsp::lsp_types::Url;

use crate::config::{
    ImportStrategy, NotificationLevel, VoyagerSettings, WorkspaceSettingsEntry,
};

/// Fully-resolved settings for one workspace (or one synthesized scope).
///
/// Every optional field of the wire settings is filled in here, with values
/// inherited from the global settings and programmed defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSettings {
    pub cwd: PathBuf,
    #[serde(rename = "workspaceFS")]
    pub workspace_fs: PathBuf,
    /// Workspace URI as known to the client.
    pub workspace: String,
    pub path: Vec<String>,
    pub interpreter: Vec<String>,
    pub args: Vec<String>,
    pub import_strategy: ImportStrategy,
    pub show_notifications: NotificationLevel,
}

fn resolve(
    key: PathBuf,
    workspace_uri: String,
    entry: &VoyagerSettings,
    global: &VoyagerSettings,
) -> ResolvedSettings {
    let pick_list = |e: &Option<Vec<String>>, g: &Option<Vec<String>>| {
        e.clone().or_else(|| g.clone()).unwrap_or_default()
    };

    ResolvedSettings {
        cwd: key.clone(),
        workspace_fs: key,
        workspace: workspace_uri,
        path: pick_list(&entry.path, &global.path),
        interpreter: pick_list(&entry.interpreter, &global.interpreter),
        args: pick_list(&entry.args, &global.args),
        import_strategy: entry
            .import_strategy
            .or(global.import_strategy)
            .unwrap_or_default(),
        show_notifications: entry
            .show_notifications
            .or(global.show_notifications)
            .or_else(NotificationLevel::from_env)
            .unwrap_or_default(),
    }
}

/// Stores the global settings record and the per-workspace settings map.
pub struct SettingsStore {
    global: RwLock<VoyagerSettings>,
    /// Insertion-ordered so "fall back to the first workspace" is stable.
    workspaces: RwLock<Vec<ResolvedSettings>>,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self {
            global: RwLock::new(VoyagerSettings::default()),
            workspaces: RwLock::new(Vec::new()),
        }
    }
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the global settings record.
    pub fn set_global(&self, global: VoyagerSettings) {
        *self.global.write().expect("global settings lock") = global;
    }

    pub fn global(&self) -> VoyagerSettings {
        self.global.read().expect("global settings lock").clone()
    }

    /// The notification verbosity resolved from the global settings, with
    /// the `LS_SHOW_NOTIFICATION` environment variable as fallback.
    pub fn notification_level(&self) -> NotificationLevel {
        self.global()
            .show_notifications
            .or_else(NotificationLevel::from_env)
            .unwrap_or_default()
    }

    /// Global settings resolved for the process working directory.
    pub fn global_defaults(&self) -> ResolvedSettings {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        self.synthesize_for_dir(&cwd)
    }

    /// Build a resolved record for a directory outside every workspace,
    /// inheriting everything from the global settings.
    fn synthesize_for_dir(&self, dir: &Path) -> ResolvedSettings {
        let global = self.global();
        let uri = Url::from_file_path(dir)
            .map(|u| u.to_string())
            .unwrap_or_default();
        resolve(dir.to_path_buf(), uri, &VoyagerSettings::default(), &global)
    }

    /// Populate the workspace map from the client's per-workspace settings.
    ///
    /// An empty list registers a single record for the process working
    /// directory so later lookups always have a fallback.
    pub fn update_workspace_settings(&self, entries: &[WorkspaceSettingsEntry]) {
        let mut records = Vec::with_capacity(entries.len().max(1));

        if entries.is_empty() {
            records.push(self.global_defaults());
        } else {
            let global = self.global();
            for entry in entries {
                let Some(key) = Url::parse(&entry.workspace)
                    .ok()
                    .and_then(|u| u.to_file_path().ok())
                else {
                    log::warn!(
                        "Ignoring workspace settings with non-file workspace URI: {}",
                        entry.workspace
                    );
                    continue;
                };
                records.push(resolve(
                    key,
                    entry.workspace.clone(),
                    &entry.settings,
                    &global,
                ));
            }
        }

        *self.workspaces.write().expect("workspace settings lock") = records;
    }

    /// Find the workspace record whose root contains `path`, walking the
    /// ancestor chain from the innermost directory outward.
    pub fn settings_for_path(&self, path: &Path) -> Option<ResolvedSettings> {
        let workspaces = self.workspaces.read().expect("workspace settings lock");

        let mut current = Some(path);
        while let Some(candidate) = current {
            if let Some(record) = workspaces.iter().find(|r| r.workspace_fs == candidate) {
                return Some(record.clone());
            }
            current = candidate.parent();
        }
        None
    }

    /// Settings for a request's document.
    ///
    /// - No document path: the first registered workspace record.
    /// - Document inside a workspace: that workspace's record.
    /// - Document outside every workspace: a record synthesized for the
    ///   document's parent directory from the global defaults.
    pub fn settings_for_document(&self, document_path: Option<&Path>) -> ResolvedSettings {
        let Some(path) = document_path else {
            let workspaces = self.workspaces.read().expect("workspace settings lock");
            return workspaces
                .first()
                .cloned()
                .unwrap_or_else(|| self.global_defaults());
        };

        if let Some(record) = self.settings_for_path(path) {
            return record;
        }

        let dir = path.parent().unwrap_or(path);
        self.synthesize_for_dir(dir)
    }

    /// Settings used to locate the model module for a request.
    ///
    /// `cwd` and the search `path` come from the document's record, but
    /// `args` (whose first element is the module path) always come from the
    /// global record.
    pub fn module_settings_for_document(&self, document_path: Option<&Path>) -> ResolvedSettings {
        let mut resolved = self.settings_for_document(document_path);
        resolved.args = self.global().args.unwrap_or_default();
        resolved
    }

    /// All registered workspace records, in registration order.
    pub fn snapshot(&self) -> Vec<ResolvedSettings> {
        self.workspaces
            .read()
            .expect("workspace settings lock")
            .clone()
    }
}
