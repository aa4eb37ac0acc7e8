// SPDX-License-Identifier: MIT
//
// tilde-term — Terminal layer for tilde.
//
// Everything that touches the terminal device lives here: switching stdin
// into raw mode and back (with a guard that restores on every exit path),
// decoding raw input bytes into keys, and the escape sequences plus frame
// buffer used to redraw the screen in a single write.
//
// There is no TUI framework underneath. Raw termios via libc and a dozen
// escape sequences are all a full-frame editor needs.

pub mod ansi;
pub mod error;
pub mod input;
pub mod output;
pub mod terminal;

pub use error::{Error, Result};
