// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Key decoder.
//
// Turns raw stdin bytes into logical keys, one key per call. Terminals send
// ordinary keys as single bytes and special keys (arrows, Home, PageUp...)
// as short escape sequences starting with ESC (0x1B):
//
//   ESC [ A ... D          arrows
//   ESC [ H / ESC [ F      Home / End (xterm)
//   ESC O H / ESC O F      Home / End (application cursor mode)
//   ESC [ 1..8 ~           Home, Delete, End, PageUp, PageDown (vt-style)
//
// # Escape vs escape-sequence ambiguity
//
// A lone ESC could be the Escape key or the first byte of a sequence. There
// is no length prefix, so the decoder reads ahead with the terminal's
// bounded read (raw mode sets a 100ms timeout): if the follow-up bytes
// don't arrive in time, the user pressed Escape. Anything after ESC that
// doesn't match the grammar above also resolves to Escape rather than an
// error, so a truncated sequence never wedges input.
//
// # Byte sources
//
// Reading goes through the [`ByteSource`] trait: `Ok(None)` means "waited,
// nothing arrived". [`TtyInput`] reads the real terminal; `&[u8]` is a
// scripted source that times out once exhausted, which is how the tests
// (and the editor's session tests) drive the decoder.

use std::io;

use tracing::warn;

use crate::error::{Error, Result};

/// The escape byte that starts every multi-byte key sequence.
pub const ESC: u8 = 0x1B;

/// The byte a terminal sends for Ctrl + `key` (e.g. `ctrl_key(b'q')` = 0x11).
#[inline]
#[must_use]
pub const fn ctrl_key(key: u8) -> u8 {
    key & 0x1F
}

// ─── Key ────────────────────────────────────────────────────────────────────

/// A decoded key.
///
/// Ordinary input, printable or control, is delivered untouched as
/// [`Char`](Key::Char). Named variants come only from escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A single input byte that did not start an escape sequence.
    Char(u8),
    /// A bare ESC, or an escape sequence we don't recognize.
    Escape,
    // ── Navigation ──────────────────────────────────────────────
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    // ── Editing ─────────────────────────────────────────────────
    Delete,
}

impl Key {
    /// The key produced by Ctrl + `key`.
    #[inline]
    #[must_use]
    pub const fn ctrl(key: u8) -> Self {
        Self::Char(ctrl_key(key))
    }
}

// ─── Byte Sources ───────────────────────────────────────────────────────────

/// A byte stream with bounded waits.
pub trait ByteSource {
    /// Read one byte.
    ///
    /// Returns `Ok(None)` when the wait bound elapsed with no data. That is
    /// not an error: callers decide whether to retry or give up.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error for anything other than "no data".
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline]
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }
}

/// Scripted input: yields the slice byte by byte, then times out forever.
impl ByteSource for &[u8] {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        match self.split_first() {
            Some((&first, rest)) => {
                *self = rest;
                Ok(Some(first))
            }
            None => Ok(None),
        }
    }
}

/// The controlling terminal's stdin.
///
/// With raw mode enabled (`VMIN = 0`, `VTIME = 1`), each `read(2)` returns
/// one byte or returns empty after 100ms. Without raw mode it blocks like
/// any cooked read.
#[derive(Debug, Default, Clone, Copy)]
pub struct TtyInput;

#[cfg(unix)]
impl ByteSource for TtyInput {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = 0u8;
        let n = unsafe { libc::read(libc::STDIN_FILENO, (&raw mut byte).cast(), 1) };

        match n {
            1 => Ok(Some(byte)),
            0 => Ok(None),
            _ => {
                let err = io::Error::last_os_error();
                match err.kind() {
                    // Non-blocking stdin (Cygwin) or a signal such as SIGWINCH.
                    io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted => Ok(None),
                    _ => Err(err),
                }
            }
        }
    }
}

#[cfg(not(unix))]
impl ByteSource for TtyInput {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        use std::io::Read;

        let mut byte = [0u8; 1];
        match io::stdin().lock().read(&mut byte) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
            Err(e) => Err(e),
        }
    }
}

// ─── Decoder ────────────────────────────────────────────────────────────────

/// Reads one [`Key`] at a time from a [`ByteSource`].
///
/// # Example
///
/// ```
/// use tilde_term::input::{Key, KeyDecoder};
///
/// let mut decoder = KeyDecoder::new(&b"\x1b[Ax"[..]);
/// assert_eq!(decoder.read_key()?, Key::Up);
/// assert_eq!(decoder.read_key()?, Key::Char(b'x'));
/// # Ok::<(), tilde_term::Error>(())
/// ```
pub struct KeyDecoder<S> {
    source: S,
}

impl<S: ByteSource> KeyDecoder<S> {
    /// Wrap a byte source.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// The underlying source, e.g. to read a cursor-position reply.
    #[inline]
    pub const fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Unwrap the decoder, returning the source.
    #[inline]
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Wait for the next key.
    ///
    /// Blocks until a first byte arrives, retrying timeouts indefinitely.
    /// Reads after an ESC are single bounded attempts, so a bare Escape
    /// press resolves within one timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the source fails with a real I/O error.
    pub fn read_key(&mut self) -> Result<Key> {
        let byte = self.wait_for_byte()?;
        if byte != ESC {
            return Ok(Key::Char(byte));
        }
        self.decode_escape()
    }

    fn wait_for_byte(&mut self) -> Result<u8> {
        loop {
            if let Some(byte) = self.next_byte()? {
                return Ok(byte);
            }
        }
    }

    #[inline]
    fn next_byte(&mut self) -> Result<Option<u8>> {
        self.source.read_byte().map_err(Error::Read)
    }

    /// Decode what follows an ESC already consumed.
    fn decode_escape(&mut self) -> Result<Key> {
        let Some(first) = self.next_byte()? else {
            return Ok(Key::Escape);
        };
        let Some(second) = self.next_byte()? else {
            return Ok(Key::Escape);
        };

        let key = match (first, second) {
            (b'[', digit @ b'0'..=b'9') => {
                let Some(b'~') = self.next_byte()? else {
                    warn!(digit, "unterminated escape sequence");
                    return Ok(Key::Escape);
                };
                tilde_key(digit)
            }
            (b'[', letter) => csi_key(letter),
            (b'O', letter) => ss3_key(letter),
            _ => None,
        };

        Ok(key.unwrap_or_else(|| {
            warn!(first, second, "unrecognized escape sequence");
            Key::Escape
        }))
    }
}

// ─── Sequence Tables ────────────────────────────────────────────────────────

/// `ESC [ <digit> ~` — vt-style editing keys.
const fn tilde_key(digit: u8) -> Option<Key> {
    match digit {
        b'1' | b'7' => Some(Key::Home),
        b'3' => Some(Key::Delete),
        b'4' | b'8' => Some(Key::End),
        b'5' => Some(Key::PageUp),
        b'6' => Some(Key::PageDown),
        _ => None,
    }
}

/// `ESC [ <letter>` — xterm cursor keys.
const fn csi_key(letter: u8) -> Option<Key> {
    match letter {
        b'A' => Some(Key::Up),
        b'B' => Some(Key::Down),
        b'C' => Some(Key::Right),
        b'D' => Some(Key::Left),
        b'H' => Some(Key::Home),
        b'F' => Some(Key::End),
        _ => None,
    }
}

/// `ESC O <letter>` — Home/End in application cursor mode.
const fn ss3_key(letter: u8) -> Option<Key> {
    match letter {
        b'H' => Some(Key::Home),
        b'F' => Some(Key::End),
        _ => None,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
