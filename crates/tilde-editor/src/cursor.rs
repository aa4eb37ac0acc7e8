//! Cursor — logical position with buffer-aware movement.
//!
//! The cursor is a `(col, row)` pair into the [`TextBuffer`], both
//! 0-indexed byte/row offsets. Rows range over `0..=row_count`: the extra
//! position one past the last row is where the cursor sits to append, and
//! on it the column is always 0.
//!
//! Movement never fails; it clamps. After every motion the column is pulled
//! back to the length of whatever row the cursor landed on, so moving down
//! from the end of a long line onto a short one ends on the short line's
//! end.
//!
//! Left at column 0 wraps to the end of the previous row, and Right at the
//! end of a row wraps to the start of the next. End goes to the end of the
//! row's text, not the edge of the screen.

use tilde_term::input::Key;

use crate::buffer::TextBuffer;

/// A cursor movement command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    /// Column 0.
    LineStart,
    /// Just past the last byte of the row.
    LineEnd,
    /// `Up`, once per screen row.
    PageUp,
    /// `Down`, once per screen row.
    PageDown,
}

impl Motion {
    /// The motion bound to `key`, if any.
    #[must_use]
    pub const fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Left => Some(Self::Left),
            Key::Right => Some(Self::Right),
            Key::Up => Some(Self::Up),
            Key::Down => Some(Self::Down),
            Key::Home => Some(Self::LineStart),
            Key::End => Some(Self::LineEnd),
            Key::PageUp => Some(Self::PageUp),
            Key::PageDown => Some(Self::PageDown),
            Key::Char(_) | Key::Escape | Key::Delete => None,
        }
    }
}

/// A position in a text buffer.
///
/// Lightweight value type. Does not own or reference the buffer; the buffer
/// is passed to [`apply`](Self::apply) as a parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    col: usize,
    row: usize,
}

impl Cursor {
    /// A cursor at the top-left of the buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { col: 0, row: 0 }
    }

    /// A cursor at a specific position. No clamping is applied.
    #[must_use]
    pub const fn at(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Current column (byte offset into the row).
    #[inline]
    #[must_use]
    pub const fn col(&self) -> usize {
        self.col
    }

    /// Current row (0-indexed; `row_count` means past the last row).
    #[inline]
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Move by `motion`, then clamp the column to the current row.
    ///
    /// `page` is the number of rows a `PageUp`/`PageDown` covers, normally
    /// the screen height.
    pub fn apply(&mut self, motion: Motion, buf: &TextBuffer, page: usize) {
        match motion {
            Motion::Left => self.move_left(buf),
            Motion::Right => self.move_right(buf),
            Motion::Up => self.row = self.row.saturating_sub(1),
            Motion::Down => {
                if self.row < buf.row_count() {
                    self.row += 1;
                }
            }
            Motion::LineStart => self.col = 0,
            Motion::LineEnd => self.col = buf.row_len(self.row).unwrap_or(0),
            Motion::PageUp => (0..page).for_each(|_| self.apply(Motion::Up, buf, page)),
            Motion::PageDown => (0..page).for_each(|_| self.apply(Motion::Down, buf, page)),
        }

        self.clamp(buf);
    }

    fn move_left(&mut self, buf: &TextBuffer) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = buf.row_len(self.row).unwrap_or(0);
        }
    }

    fn move_right(&mut self, buf: &TextBuffer) {
        // Past the last row there is nothing to move across.
        let Some(len) = buf.row_len(self.row) else {
            return;
        };
        if self.col < len {
            self.col += 1;
        } else {
            self.row += 1;
            self.col = 0;
        }
    }

    /// Pull the row into `0..=row_count` and the column into the row.
    pub fn clamp(&mut self, buf: &TextBuffer) {
        self.row = self.row.min(buf.row_count());
        self.col = self.col.min(buf.row_len(self.row).unwrap_or(0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4 rows: "hello" (5), "hi" (2), "" (0), "goodbye" (7).
    fn sample_buffer() -> TextBuffer {
        TextBuffer::from_reader(&b"hello\nhi\n\ngoodbye\n"[..]).unwrap()
    }

    fn three_lines() -> TextBuffer {
        TextBuffer::from_reader(&b"one\ntwo\nthree\n"[..]).unwrap()
    }

    /// Apply motions with a 24-row page.
    fn run(cursor: &mut Cursor, buf: &TextBuffer, motions: &[Motion]) {
        for &m in motions {
            cursor.apply(m, buf, 24);
        }
    }

    fn assert_clamped(cursor: Cursor, buf: &TextBuffer) {
        assert!(cursor.row() <= buf.row_count(), "{cursor:?}");
        assert!(cursor.col() <= buf.row_len(cursor.row()).unwrap_or(0), "{cursor:?}");
    }

    // -- Key mapping --------------------------------------------------------

    #[test]
    fn keys_map_to_motions() {
        assert_eq!(Motion::from_key(Key::Up), Some(Motion::Up));
        assert_eq!(Motion::from_key(Key::Home), Some(Motion::LineStart));
        assert_eq!(Motion::from_key(Key::End), Some(Motion::LineEnd));
        assert_eq!(Motion::from_key(Key::PageDown), Some(Motion::PageDown));
    }

    #[test]
    fn other_keys_do_not_move() {
        assert_eq!(Motion::from_key(Key::Char(b'h')), None);
        assert_eq!(Motion::from_key(Key::Escape), None);
        assert_eq!(Motion::from_key(Key::Delete), None);
    }

    // -- Vertical -----------------------------------------------------------

    #[test]
    fn down_stops_one_past_last_row() {
        let buf = three_lines();
        let mut c = Cursor::new();
        run(&mut c, &buf, &[Motion::Down; 4]);
        assert_eq!(c.row(), 3);
        assert_eq!(c.col(), 0);
    }

    #[test]
    fn up_stops_at_top() {
        let buf = three_lines();
        let mut c = Cursor::at(0, 1);
        run(&mut c, &buf, &[Motion::Up, Motion::Up, Motion::Up]);
        assert_eq!(c.row(), 0);
    }

    #[test]
    fn vertical_move_clamps_column() {
        let buf = sample_buffer();
        let mut c = Cursor::new();
        c.apply(Motion::LineEnd, &buf, 24);
        assert_eq!(c.col(), 5);
        c.apply(Motion::Down, &buf, 24);
        assert_eq!((c.col(), c.row()), (2, 1));
        c.apply(Motion::Down, &buf, 24);
        assert_eq!((c.col(), c.row()), (0, 2));
    }

    #[test]
    fn column_is_zero_past_last_row() {
        let buf = sample_buffer();
        let mut c = Cursor::at(0, 3);
        c.apply(Motion::LineEnd, &buf, 24);
        assert_eq!(c.col(), 7);
        c.apply(Motion::Down, &buf, 24);
        assert_eq!((c.col(), c.row()), (0, 4));
    }

    // -- Horizontal ---------------------------------------------------------

    #[test]
    fn right_moves_within_row() {
        let buf = sample_buffer();
        let mut c = Cursor::new();
        run(&mut c, &buf, &[Motion::Right, Motion::Right]);
        assert_eq!((c.col(), c.row()), (2, 0));
    }

    #[test]
    fn right_at_end_wraps_to_next_row() {
        let buf = sample_buffer();
        let mut c = Cursor::at(5, 0);
        c.apply(Motion::Right, &buf, 24);
        assert_eq!((c.col(), c.row()), (0, 1));
    }

    #[test]
    fn right_on_last_row_end_goes_past_end() {
        let buf = sample_buffer();
        let mut c = Cursor::at(7, 3);
        c.apply(Motion::Right, &buf, 24);
        assert_eq!((c.col(), c.row()), (0, 4));
        c.apply(Motion::Right, &buf, 24);
        assert_eq!((c.col(), c.row()), (0, 4), "nothing to the right");
    }

    #[test]
    fn left_moves_within_row() {
        let buf = sample_buffer();
        let mut c = Cursor::at(3, 0);
        c.apply(Motion::Left, &buf, 24);
        assert_eq!((c.col(), c.row()), (2, 0));
    }

    #[test]
    fn left_at_start_wraps_to_previous_row_end() {
        let buf = sample_buffer();
        let mut c = Cursor::at(0, 1);
        c.apply(Motion::Left, &buf, 24);
        assert_eq!((c.col(), c.row()), (5, 0));
    }

    #[test]
    fn left_at_origin_stays() {
        let buf = sample_buffer();
        let mut c = Cursor::new();
        c.apply(Motion::Left, &buf, 24);
        assert_eq!(c, Cursor::new());
    }

    #[test]
    fn left_from_past_end_lands_on_last_row_end() {
        let buf = sample_buffer();
        let mut c = Cursor::at(0, 4);
        c.apply(Motion::Left, &buf, 24);
        assert_eq!((c.col(), c.row()), (7, 3));
    }

    // -- Home / End ---------------------------------------------------------

    #[test]
    fn home_and_end() {
        let buf = sample_buffer();
        let mut c = Cursor::at(2, 3);
        c.apply(Motion::LineEnd, &buf, 24);
        assert_eq!(c.col(), 7);
        c.apply(Motion::LineStart, &buf, 24);
        assert_eq!(c.col(), 0);
    }

    #[test]
    fn end_uses_row_length_not_screen_width() {
        let buf = three_lines();
        let mut c = Cursor::new();
        c.apply(Motion::LineEnd, &buf, 24);
        assert_eq!(c.col(), 3);
    }

    // -- Paging -------------------------------------------------------------

    #[test]
    fn page_down_moves_a_screen() {
        let text: String = (0..100).map(|i| format!("line {i}\n")).collect();
        let buf = TextBuffer::from_reader(text.as_bytes()).unwrap();
        let mut c = Cursor::new();
        c.apply(Motion::PageDown, &buf, 24);
        assert_eq!(c.row(), 24);
        c.apply(Motion::PageUp, &buf, 10);
        assert_eq!(c.row(), 14);
    }

    #[test]
    fn page_down_clamps_to_past_end() {
        let buf = three_lines();
        let mut c = Cursor::new();
        c.apply(Motion::PageDown, &buf, 24);
        assert_eq!(c.row(), 3);
        c.apply(Motion::PageUp, &buf, 24);
        assert_eq!(c.row(), 0);
    }

    // -- Empty buffer -------------------------------------------------------

    #[test]
    fn empty_buffer_pins_cursor() {
        let buf = TextBuffer::new();
        let mut c = Cursor::new();
        run(
            &mut c,
            &buf,
            &[Motion::Right, Motion::Down, Motion::Down, Motion::LineEnd],
        );
        assert_eq!(c, Cursor::new());
    }

    // -- Invariant ----------------------------------------------------------

    #[test]
    fn every_motion_sequence_stays_clamped() {
        let buf = sample_buffer();
        let all = [
            Motion::Left,
            Motion::Right,
            Motion::Up,
            Motion::Down,
            Motion::LineStart,
            Motion::LineEnd,
            Motion::PageUp,
            Motion::PageDown,
        ];
        let mut c = Cursor::new();
        // Walk a long deterministic mix of motions.
        for i in 0..500usize {
            let motion = all[(i * 7 + i / 3) % all.len()];
            c.apply(motion, &buf, 2);
            assert_clamped(c, &buf);
        }
    }

    #[test]
    fn clamp_pulls_stray_position_in() {
        let buf = sample_buffer();
        let mut c = Cursor::at(40, 40);
        c.clamp(&buf);
        assert_eq!((c.col(), c.row()), (0, 4));

        let mut c = Cursor::at(40, 1);
        c.clamp(&buf);
        assert_eq!((c.col(), c.row()), (2, 1));
    }
}
