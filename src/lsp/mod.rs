mod client;
mod lsp_impl;
mod settings;

pub use lsp_impl::VoyagerLs;
pub use settings::{SettingsEvent, SettingsEventKind, SettingsLoadOutcome, load_settings};
