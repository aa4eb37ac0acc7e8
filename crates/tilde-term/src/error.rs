// SPDX-License-Identifier: MIT
//
// Error type for terminal operations.
//
// Every variant is fatal to the editor: the caller restores the terminal,
// clears the screen, prints the message and exits. The message carries the
// name of the failing terminal call followed by the OS error text.

use std::io;

use thiserror::Error;

/// Terminal layer error.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading the current termios failed (usually: stdin is not a terminal).
    #[error("tcgetattr: {0}")]
    GetAttr(#[source] io::Error),

    /// Applying a termios configuration failed.
    #[error("tcsetattr: {0}")]
    SetAttr(#[source] io::Error),

    /// Reading input failed for a reason other than "no data yet".
    #[error("read: {0}")]
    Read(#[source] io::Error),

    /// Writing output to the terminal failed.
    #[error("write: {0}")]
    Write(#[source] io::Error),

    /// Neither `TIOCGWINSZ` nor the cursor-position report gave a usable size.
    #[error("getWindowSize: {0}")]
    WindowSize(String),
}

/// Result type for terminal operations.
pub type Result<T> = std::result::Result<T, Error>;
