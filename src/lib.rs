pub mod analysis;
pub mod config;
pub mod error;
pub mod lsp;
pub mod text;
pub mod workspace;

pub use config::{ImportStrategy, NotificationLevel, VoyagerSettings, WorkspaceSettingsEntry};
pub use error::{ServerError, ServerResult};
pub use workspace::{DocumentStore, ResolvedSettings, SettingsStore};

// Re-export the main server implementation
pub use lsp::VoyagerLs;
