//! Text synchronization utilities for LSP didChange handling.
//!
//! The LSP protocol supports two text synchronization modes:
//! - Incremental: the client sends only the changed ranges
//! - Full: the client sends the entire document content
//!
//! This module applies both kinds of change events to a document's text.

use tower_lsp::lsp_types::TextDocumentContentChangeEvent;

use super::position::PositionMapper;

/// Apply LSP content changes to a document's text.
///
/// Changes with a range replace that range; changes without a range replace
/// the whole document. Ranges are interpreted against the text as updated by
/// the preceding changes in the same batch, per the LSP specification.
pub fn apply_content_changes(
    old_text: &str,
    content_changes: Vec<TextDocumentContentChangeEvent>,
) -> String {
    let mut text = old_text.to_string();

    for change in content_changes {
        if let Some(range) = change.range {
            let mapper = PositionMapper::new(&text);
            let start_offset = mapper.position_to_byte(range.start).unwrap_or(text.len());
            let end_offset = mapper.position_to_byte(range.end).unwrap_or(text.len());
            text.replace_range(start_offset..end_offset, &change.text);
        } else {
            text = change.text;
        }
    }

    text
}
