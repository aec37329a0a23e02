pub mod documents;
pub mod settings;

pub use documents::{Document, DocumentStore};
pub use settings::{ResolvedSettings, SettingsStore};
