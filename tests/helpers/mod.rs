//! Shared helpers for integration tests.

pub mod lsp_client;

#[allow(unused_imports)]
pub use lsp_client::LspClient;
