//! Programmed default settings, the lowest-precedence configuration layer.

use super::settings::{ImportStrategy, VoyagerSettings};

/// Settings every session starts from before user layers are merged on top.
///
/// `show_notifications` is deliberately left unset so the
/// `LS_SHOW_NOTIFICATION` environment variable can act as a fallback when no
/// configuration layer provides a value.
pub fn default_settings() -> VoyagerSettings {
    VoyagerSettings {
        path: Some(Vec::new()),
        interpreter: Some(Vec::new()),
        args: Some(Vec::new()),
        import_strategy: Some(ImportStrategy::UseBundled),
        show_notifications: None,
    }
}
