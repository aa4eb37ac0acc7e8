// SPDX-License-Identifier: MIT
//
// VT100 control sequences.
//
// The eight sequences a full-frame redraw and a window-size probe need,
// each as a function that writes into any `impl Write`. Callers decide
// what to emit and when.
//
// Positions here are 0-based like the rest of the editor; CUP on the wire
// is 1-based, so `cursor_to` adds one to each coordinate.

use std::io::{self, Write};

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// CUP: put the cursor on column `x`, row `y` (both 0-based).
#[inline]
pub fn cursor_to(w: &mut impl Write, x: usize, y: usize) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", y + 1, x + 1)
}

/// Move the cursor to the top-left corner (CUP with no parameters).
#[inline]
pub fn cursor_home(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[H")
}

/// Push the cursor to the bottom-right corner.
///
/// CUF and CUD stop at the screen edge, so a large count lands exactly on
/// the last cell without knowing the screen size. Used before a
/// [`request_cursor_position`] to measure the window.
#[inline]
pub fn cursor_to_far_corner(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[999C\x1b[999B")
}

/// DECTCEM off. Keeps the cursor from flickering across a redraw.
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// DECTCEM on.
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

/// Ask the terminal to report the cursor position (DSR 6).
///
/// The reply arrives on stdin as `ESC [ rows ; cols R`.
#[inline]
pub fn request_cursor_position(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[6n")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// ED 2: blank the whole screen. The cursor does not move.
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Erase from the cursor to the end of the current line (EL 0).
#[inline]
pub fn erase_line(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[K")
}

// ─── Tests ───────────────────────────────────────────────────────────────────
