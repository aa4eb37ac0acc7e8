//! View — the bridge from text buffer to terminal.
//!
//! A `View` maps a window of the [`TextBuffer`] onto the screen. It holds
//! the scroll offsets and the screen size, nothing else; the buffer and
//! cursor are passed to [`refresh`](View::refresh) each frame.
//!
//! Every frame is a full redraw:
//!
//! ```text
//! hide cursor, home
//! for each screen row:
//!     buffer row slice | welcome banner | "~"
//!     erase to end of line
//!     "\r\n" (not after the last row)
//! place cursor, show cursor
//! ```
//!
//! The frame is built in an [`OutputBuffer`] and written in one call, and
//! the cursor stays hidden while the rows are drawn, so the terminal never
//! shows a half-painted screen. Erasing each line after drawing it (instead
//! of clearing the whole screen first) avoids a blank flash between frames.
//!
//! The last row gets no trailing `"\r\n"`: on the bottom line it would
//! scroll the terminal by one.
//!
//! Columns are bytes. There is no tab expansion, wide-character handling,
//! or wrapping; a long row is clipped at the right edge and revealed by
//! scrolling horizontally.

use std::io::{self, Write};

use tilde_term::ansi;
use tilde_term::output::OutputBuffer;
use tilde_term::terminal::Size;

use crate::buffer::TextBuffer;
use crate::cursor::Cursor;

/// Shown centered a third of the way down when no file content is loaded.
pub const WELCOME: &str = concat!("Tilde editor -- version ", env!("CARGO_PKG_VERSION"));

/// A scrolling window onto a text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// First visible buffer row.
    row_offset: usize,
    /// First visible byte column.
    col_offset: usize,
    screen_rows: usize,
    screen_cols: usize,
}

impl View {
    /// A view covering the whole terminal, scrolled to the top-left.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self::with_dimensions(usize::from(size.rows), usize::from(size.cols))
    }

    /// A view of `rows × cols` cells. Zero dimensions are raised to 1.
    #[must_use]
    pub fn with_dimensions(rows: usize, cols: usize) -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
            screen_rows: rows.max(1),
            screen_cols: cols.max(1),
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn row_offset(&self) -> usize {
        self.row_offset
    }

    #[inline]
    #[must_use]
    pub const fn col_offset(&self) -> usize {
        self.col_offset
    }

    #[inline]
    #[must_use]
    pub const fn screen_rows(&self) -> usize {
        self.screen_rows
    }

    #[inline]
    #[must_use]
    pub const fn screen_cols(&self) -> usize {
        self.screen_cols
    }

    // -- Scrolling ----------------------------------------------------------

    /// Adjust the offsets so the cursor is inside the window.
    ///
    /// Scrolls the minimum amount: a cursor above the window becomes the
    /// top row, one below it becomes the bottom row. Same for columns.
    pub const fn scroll(&mut self, cursor: &Cursor) {
        let (row, col) = (cursor.row(), cursor.col());

        if row < self.row_offset {
            self.row_offset = row;
        }
        if row >= self.row_offset + self.screen_rows {
            self.row_offset = row - self.screen_rows + 1;
        }

        if col < self.col_offset {
            self.col_offset = col;
        }
        if col >= self.col_offset + self.screen_cols {
            self.col_offset = col - self.screen_cols + 1;
        }
    }

    // -- Rendering ----------------------------------------------------------

    /// Scroll to the cursor, then redraw the whole screen into `w` with a
    /// single write.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn refresh(&mut self, buf: &TextBuffer, cursor: &Cursor, w: &mut impl Write) -> io::Result<()> {
        self.scroll(cursor);

        let mut frame = OutputBuffer::new();
        self.compose(buf, cursor, &mut frame)?;
        frame.flush_to(w)
    }

    /// Build one frame for the current offsets.
    ///
    /// # Errors
    ///
    /// Only fails if writing into `out` fails, which an [`OutputBuffer`]
    /// never does.
    pub fn compose(&self, buf: &TextBuffer, cursor: &Cursor, out: &mut OutputBuffer) -> io::Result<()> {
        ansi::cursor_hide(out)?;
        ansi::cursor_home(out)?;

        for y in 0..self.screen_rows {
            match buf.row(y + self.row_offset) {
                Some(row) => out.append(row.visible(self.col_offset, self.screen_cols)),
                None if buf.is_empty() && y == self.screen_rows / 3 => self.draw_welcome(out),
                None => out.append(b"~"),
            }

            ansi::erase_line(out)?;
            if y + 1 < self.screen_rows {
                out.append(b"\r\n");
            }
        }

        ansi::cursor_to(
            out,
            cursor.col().saturating_sub(self.col_offset),
            cursor.row().saturating_sub(self.row_offset),
        )?;
        ansi::cursor_show(out)
    }

    /// The welcome banner, truncated to the screen and centered. The
    /// left margin starts with the usual `~` so the column stays intact.
    fn draw_welcome(&self, out: &mut OutputBuffer) {
        let len = WELCOME.len().min(self.screen_cols);
        let mut padding = (self.screen_cols - len) / 2;
        if padding > 0 {
            out.append(b"~");
            padding -= 1;
        }
        out.append_repeated(b' ', padding);
        out.append(&WELCOME.as_bytes()[..len]);
    }
}
