use dashmap::DashMap;
use tower_lsp::lsp_types::{TextDocumentContentChangeEvent, Url};

use crate::text::{PositionMapper, apply_content_changes};

/// An open text document tracked via LSP synchronization.
pub struct Document {
    text: String,
}

impl Document {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text of the given zero-based line, without its line terminator.
    pub fn line_text(&self, line: u32) -> Option<String> {
        PositionMapper::new(&self.text)
            .line_text(line)
            .map(|s| s.to_string())
    }
}

// The central store for all open documents.
pub struct DocumentStore {
    documents: DashMap<Url, Document>,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, uri: Url, text: String) {
        self.documents.insert(uri, Document::new(text));
    }

    /// Apply didChange content changes to the stored document.
    ///
    /// Unknown URIs with a full-sync change are inserted fresh; incremental
    /// changes for unknown URIs are dropped.
    pub fn apply_changes(&self, uri: &Url, changes: Vec<TextDocumentContentChangeEvent>) {
        if let Some(mut doc) = self.documents.get_mut(uri) {
            doc.text = apply_content_changes(&doc.text, changes);
        } else if let Some(change) = changes.into_iter().find(|c| c.range.is_none()) {
            self.documents.insert(uri.clone(), Document::new(change.text));
        }
    }

    pub fn get_document_text(&self, uri: &Url) -> Option<String> {
        self.documents.get(uri).map(|doc| doc.text().to_string())
    }

    /// The current text of `line` in the document at `uri`.
    pub fn line_at(&self, uri: &Url, line: u32) -> Option<String> {
        self.documents.get(uri).and_then(|doc| doc.line_text(line))
    }

    pub fn remove(&self, uri: &Url) -> Option<Document> {
        self.documents.remove(uri).map(|(_, doc)| doc)
    }
}
