//! Row — one line of text.
//!
//! Rows hold raw bytes with the line ending stripped. No encoding is
//! assumed: a column is a byte offset, and what the terminal makes of
//! multi-byte sequences is its business.

/// A single line of the buffer, without its trailing newline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    chars: Vec<u8>,
}

impl Row {
    /// Create a row holding a copy of `bytes`.
    #[must_use]
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            chars: bytes.to_vec(),
        }
    }

    /// Length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// True for a blank line.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The row's bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.chars
    }

    /// The part of the row visible through a window starting at
    /// `col_offset` and `width` bytes wide.
    ///
    /// Empty when the row ends before `col_offset`.
    #[must_use]
    pub fn visible(&self, col_offset: usize, width: usize) -> &[u8] {
        let start = col_offset.min(self.chars.len());
        let end = start.saturating_add(width).min(self.chars.len());
        &self.chars[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_copies_bytes() {
        let source = b"hello".to_vec();
        let row = Row::new(&source);
        drop(source);
        assert_eq!(row.as_bytes(), b"hello");
        assert_eq!(row.len(), 5);
        assert!(!row.is_empty());
    }

    #[test]
    fn empty_row() {
        let row = Row::new(b"");
        assert!(row.is_empty());
        assert_eq!(row.len(), 0);
        assert_eq!(Row::default(), row);
    }

    #[test]
    fn visible_whole_row() {
        let row = Row::new(b"hello");
        assert_eq!(row.visible(0, 80), b"hello");
    }

    #[test]
    fn visible_clipped_to_width() {
        let row = Row::new(b"hello world");
        assert_eq!(row.visible(0, 5), b"hello");
    }

    #[test]
    fn visible_from_offset() {
        let row = Row::new(b"hello world");
        assert_eq!(row.visible(6, 80), b"world");
        assert_eq!(row.visible(6, 3), b"wor");
    }

    #[test]
    fn visible_offset_at_end_is_empty() {
        let row = Row::new(b"hello");
        assert_eq!(row.visible(5, 80), b"");
    }

    #[test]
    fn visible_offset_past_end_is_empty() {
        let row = Row::new(b"hello");
        assert_eq!(row.visible(50, 80), b"");
    }

    #[test]
    fn visible_huge_width_does_not_overflow() {
        let row = Row::new(b"hello");
        assert_eq!(row.visible(2, usize::MAX), b"llo");
    }

    #[test]
    fn bytes_are_opaque() {
        let row = Row::new(&[0xFF, 0x00, b'\t', 0xC3]);
        assert_eq!(row.len(), 4);
        assert_eq!(row.visible(1, 2), &[0x00, b'\t']);
    }
}
