use std::path::PathBuf;
use std::sync::Arc;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::analysis::{completion_items, load_model_module, parse_completion_query};
use crate::error::ServerError;
use crate::lsp::client::ClientNotifier;
use crate::lsp::settings::load_settings;
use crate::workspace::{DocumentStore, SettingsStore};

/// The Voyager code completion language server backend.
pub struct VoyagerLs {
    notifier: ClientNotifier,
    settings: Arc<SettingsStore>,
    documents: DocumentStore,
}

impl std::fmt::Debug for VoyagerLs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoyagerLs")
            .field("documents", &"DocumentStore")
            .finish_non_exhaustive()
    }
}

impl VoyagerLs {
    pub fn new(client: Client) -> Self {
        Self {
            notifier: ClientNotifier::new(client),
            settings: Arc::new(SettingsStore::new()),
            documents: DocumentStore::new(),
        }
    }

    fn empty_response() -> CompletionResponse {
        CompletionResponse::List(CompletionList {
            is_incomplete: false,
            items: Vec::new(),
        })
    }
}

fn internal_error(err: ServerError) -> tower_lsp::jsonrpc::Error {
    let mut error = tower_lsp::jsonrpc::Error::internal_error();
    error.message = err.to_string().into();
    error
}

#[tower_lsp::async_trait]
impl LanguageServer for VoyagerLs {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        // Get root path from workspace folders, root_uri, or current directory
        let root_path = if let Some(folders) = &params.workspace_folders {
            folders
                .first()
                .and_then(|folder| folder.uri.to_file_path().ok())
        } else if let Some(root_uri) = &params.root_uri {
            root_uri.to_file_path().ok()
        } else {
            #[allow(deprecated)] // Support for older LSP clients
            if let Some(root_path) = &params.root_path {
                Some(PathBuf::from(root_path))
            } else {
                std::env::current_dir().ok()
            }
        };

        let outcome = load_settings(root_path.as_deref(), params.initialization_options);
        self.settings.set_global(outcome.global);
        self.settings.update_workspace_settings(&outcome.workspaces);

        let level = self.settings.notification_level();
        self.notifier.log_settings_events(&outcome.events, level).await;

        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        self.notifier
            .log_to_output(format!("CWD Server: {}", cwd.display()))
            .await;

        if let Ok(json) = serde_json::to_string_pretty(&self.settings.snapshot()) {
            self.notifier
                .log_to_output(format!("Settings used to run Server:\r\n{}\r\n", json))
                .await;
        }
        if let Ok(json) = serde_json::to_string_pretty(&self.settings.global()) {
            self.notifier
                .log_to_output(format!("Global settings:\r\n{}\r\n", json))
                .await;
        }

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "Voyager code completion".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::INCREMENTAL,
                )),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec![".".to_string()]),
                    resolve_provider: Some(false),
                    ..Default::default()
                }),
                ..Default::default()
            },
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        let level = self.settings.notification_level();
        self.notifier
            .log_always("Voyager code completion server initialized", level)
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.documents
            .insert(params.text_document.uri, params.text_document.text);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        self.documents
            .apply_changes(&params.text_document.uri, params.content_changes);
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.remove(&params.text_document.uri);
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let Some(line) = self.documents.line_at(&uri, position.line) else {
            log::debug!("completion: no document or line for {}", uri);
            return Ok(Some(Self::empty_response()));
        };
        let current_line = line.trim();

        let Some(query) = parse_completion_query(current_line) else {
            return Ok(Some(Self::empty_response()));
        };

        let document_path = uri.to_file_path().ok();
        let settings = self
            .settings
            .module_settings_for_document(document_path.as_deref());

        let module = match load_model_module(&settings) {
            Ok(module) => module,
            Err(err) => {
                // Unknown class/attribute never reaches this point; anything
                // else propagates to the framework after being logged.
                self.notifier
                    .log_error(
                        format!("Failed to load model module: {}", err),
                        settings.show_notifications,
                    )
                    .await;
                return Err(internal_error(err));
            }
        };

        let items = completion_items(&query, &module);
        Ok(Some(CompletionResponse::List(CompletionList {
            is_incomplete: false,
            items,
        })))
    }
}
