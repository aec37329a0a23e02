pub mod defaults;
pub mod settings;

pub use settings::{ImportStrategy, NotificationLevel, VoyagerSettings, WorkspaceSettingsEntry};

/// Merge two settings layers, preferring values from `primary` over `fallback`.
pub fn merge_settings(
    fallback: Option<VoyagerSettings>,
    primary: Option<VoyagerSettings>,
) -> Option<VoyagerSettings> {
    match (fallback, primary) {
        (None, None) => None,
        (Some(settings), None) => Some(settings),
        (None, Some(settings)) => Some(settings),
        (Some(fallback), Some(primary)) => Some(VoyagerSettings {
            path: primary.path.or(fallback.path),
            interpreter: primary.interpreter.or(fallback.interpreter),
            args: primary.args.or(fallback.args),
            import_strategy: primary.import_strategy.or(fallback.import_strategy),
            show_notifications: primary.show_notifications.or(fallback.show_notifications),
        }),
    }
}

/// Merge an ordered list of settings layers; later layers override earlier.
pub fn merge_all(layers: &[Option<VoyagerSettings>]) -> Option<VoyagerSettings> {
    layers
        .iter()
        .cloned()
        .fold(None, |merged, layer| merge_settings(merged, layer))
}
