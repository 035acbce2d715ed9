//! Byte-offset to (line, column) conversion.
//!
//! `rustpython-parser` hands back byte ranges (`TextRange`); the rest of the
//! crate — diagnostics, schema extraction, the interpreter — works in
//! 1-based `(line, column)` pairs, so every node is converted once here.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Span {
    /// Used for synthetic diagnostics (internal parse/IO failures) that
    /// have no real source location.
    pub const START: Span = Span {
        start_line: 1,
        start_col: 1,
        end_line: 1,
        end_col: 1,
    };
}

/// A node paired with its source span.
#[derive(Debug, Clone)]
pub struct Located<T> {
    pub node: T,
    pub span: Span,
}

/// Maps byte offsets into a source string to 1-based `(line, column)` pairs.
pub struct LineIndex {
    /// Byte offset of the start of each line, line 0 first.
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (idx, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(idx + 1);
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset to a 1-based `(line, column)` pair. Column is
    /// measured in UTF-8 bytes from the start of the line, 1-based; close
    /// enough for diagnostic display and stable regardless of multi-byte
    /// characters appearing earlier in the line.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line_idx).copied().unwrap_or(0);
        (line_idx + 1, offset.saturating_sub(line_start) + 1)
    }

    pub fn span(&self, start_offset: usize, end_offset: usize) -> Span {
        let (start_line, start_col) = self.line_col(start_offset);
        let (end_line, end_col) = self.line_col(end_offset.max(start_offset));
        Span {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }
}
