//! Text buffer — the file as an ordered list of rows.
//!
//! A `TextBuffer` is filled once at startup from a line source and then
//! only read while the editor runs. Row index = line number (0-indexed).
//!
//! # Design choices
//!
//! - **Bytes, not text.** Rows are `Vec<u8>`. Files with invalid UTF-8 or
//!   stray control bytes load and display without complaint; there are no
//!   encoding errors to report.
//!
//! - **Line endings are stripped on load.** `\n`, `\r\n` and stray trailing
//!   `\r` all vanish, so a row's length is exactly the number of visible
//!   bytes. Nothing is written back, so the original ending isn't recorded.
//!
//! - **A trailing newline does not create an empty last row.** `"a\nb\n"`
//!   is two rows, the way `getline` sees it.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::row::Row;

/// An append-only sequence of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    rows: Vec<Row>,
}

impl TextBuffer {
    // -- Construction -------------------------------------------------------

    /// Create an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Build a buffer from any line source.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from `reader` fails.
    pub fn from_reader(reader: impl BufRead) -> io::Result<Self> {
        let mut buf = Self::new();
        buf.load_from_lines(reader)?;
        Ok(buf)
    }

    /// Load a buffer from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let buf = Self::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), rows = buf.row_count(), "loaded file");
        Ok(buf)
    }

    // -- Mutation -----------------------------------------------------------

    /// Append a copy of `bytes` as a new last row.
    pub fn append_row(&mut self, bytes: &[u8]) {
        self.rows.push(Row::new(bytes));
    }

    /// Append every line of `reader`, stripping trailing `\n`/`\r`.
    ///
    /// A last line without a newline still becomes a row.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from `reader` fails. Rows read before
    /// the failure stay in the buffer.
    pub fn load_from_lines(&mut self, mut reader: impl BufRead) -> io::Result<()> {
        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(());
            }
            self.append_row(strip_line_ending(&line));
        }
    }

    // -- Access -------------------------------------------------------------

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the buffer has no rows at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row at `index`, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Length of the row at `index`, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn row_len(&self, index: usize) -> Option<usize> {
        self.row(index).map(Row::len)
    }

    /// All rows in file order.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// Drop every trailing `\n` and `\r`.
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let end = line
        .iter()
        .rposition(|&b| b != b'\n' && b != b'\r')
        .map_or(0, |i| i + 1);
    &line[..end]
}
