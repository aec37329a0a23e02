use tower_lsp::lsp_types::Position;

/// Maps between LSP positions (UTF-16 line/character) and byte offsets.
pub struct PositionMapper<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> PositionMapper<'a> {
    /// Create a new mapper with pre-computed line starts.
    pub fn new(text: &'a str) -> Self {
        let line_starts = compute_line_starts(text);
        Self { text, line_starts }
    }

    fn get_line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Convert an LSP position to a byte offset in the document.
    ///
    /// Positions beyond the end of a line clamp to the line end.
    pub fn position_to_byte(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        let character = position.character as usize;

        let line_start = self.get_line_start(line)?;
        let line_end = if line + 1 < self.line_starts.len() {
            self.line_starts[line + 1] - 1 // Exclude the newline
        } else {
            self.text.len()
        };

        let line_text = &self.text[line_start..line_end];

        match convert_utf16_to_byte_in_line(line_text, character) {
            Some(byte_offset) => Some(line_start + byte_offset),
            None => Some(line_start + line_text.len()),
        }
    }

    /// The text of the given zero-based line, without its trailing newline.
    pub fn line_text(&self, line: u32) -> Option<&'a str> {
        let line = line as usize;
        let line_start = self.get_line_start(line)?;
        let line_end = if line + 1 < self.line_starts.len() {
            self.line_starts[line + 1] - 1
        } else {
            self.text.len()
        };
        let mut text = &self.text[line_start..line_end];
        if let Some(stripped) = text.strip_suffix('\r') {
            text = stripped;
        }
        Some(text)
    }
}

/// Compute line start offsets for efficient position mapping
pub fn compute_line_starts(text: &str) -> Vec<usize> {
    let mut line_starts = vec![0];
    let mut offset = 0;

    for ch in text.chars() {
        offset += ch.len_utf8();
        if ch == '\n' {
            line_starts.push(offset);
        }
    }

    line_starts
}

/// Convert UTF-16 position to byte position within a line.
/// Returns None if the UTF-16 position is beyond the end of the line.
#[inline(always)]
pub fn convert_utf16_to_byte_in_line(line_text: &str, utf16_pos: usize) -> Option<usize> {
    let mut byte_offset = 0;
    let mut utf16_offset = 0;

    for ch in line_text.chars() {
        if utf16_offset >= utf16_pos {
            return Some(byte_offset);
        }
        utf16_offset += ch.len_utf16();
        byte_offset += ch.len_utf8();
    }

    if utf16_offset == utf16_pos {
        Some(byte_offset)
    } else {
        None
    }
}
