// SPDX-License-Identifier: MIT
//
// tilde — a minimal screen-oriented terminal text editor.
//
// This is the main binary that wires together the two crates:
//
//   tilde-term   → raw mode, window size, key decoding, escape sequences
//   tilde-editor → text buffer, cursor movement, viewport rendering
//
// One thread, one loop. Each iteration redraws the whole screen and then
// blocks for one key:
//
//   view.refresh → append buffer → one write to stdout
//   stdin → KeyDecoder → process_key → cursor motion | quit
//
// Raw mode is held by a guard that lives for the duration of `run`, so the
// terminal is restored whether the loop quits, fails, or panics.

mod config;
mod error;
mod logging;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info};

use tilde_editor::buffer::TextBuffer;
use tilde_editor::cursor::{Cursor, Motion};
use tilde_editor::view::View;

use tilde_term::ansi;
use tilde_term::input::{ByteSource, Key, KeyDecoder, TtyInput};
use tilde_term::terminal::{self, RawMode, Size};

use crate::config::Args;
use crate::error::AppError;

// ─── Editor ─────────────────────────────────────────────────────────────────

/// What the main loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Continue,
    Quit,
}

/// The whole editor state: the file, where the cursor is, and what part of
/// the file is on screen.
struct Editor {
    buffer: TextBuffer,
    cursor: Cursor,
    view: View,
}

impl Editor {
    fn new(buffer: TextBuffer, size: Size) -> Self {
        Self {
            buffer,
            cursor: Cursor::new(),
            view: View::new(size),
        }
    }

    /// Apply one key. Only Ctrl-Q and the navigation keys do anything.
    fn process_key(&mut self, key: Key) -> Action {
        if key == Key::ctrl(b'q') {
            return Action::Quit;
        }

        if let Some(motion) = Motion::from_key(key) {
            self.cursor
                .apply(motion, &self.buffer, self.view.screen_rows());
        }
        Action::Continue
    }

    fn refresh(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.view.refresh(&self.buffer, &self.cursor, out)
    }
}

// ─── Main Loop ──────────────────────────────────────────────────────────────

/// Render, read a key, repeat until Ctrl-Q. On quit the screen is cleared
/// and the cursor homed.
fn run_session<S: ByteSource>(
    editor: &mut Editor,
    keys: &mut KeyDecoder<S>,
    out: &mut impl Write,
) -> Result<(), AppError> {
    loop {
        editor.refresh(out).map_err(tilde_term::Error::Write)?;

        let key = keys.read_key()?;
        debug!(?key, "key");

        if editor.process_key(key) == Action::Quit {
            ansi::clear_screen(out)
                .and_then(|()| ansi::cursor_home(out))
                .and_then(|()| out.flush())
                .map_err(tilde_term::Error::Write)?;
            return Ok(());
        }
    }
}

/// Load the file, take over the terminal, and run until quit.
fn run(args: &Args) -> Result<(), AppError> {
    let buffer = match &args.file {
        Some(path) => TextBuffer::open(path).map_err(|source| AppError::Open {
            path: path.clone(),
            source,
        })?,
        None => TextBuffer::new(),
    };

    let mut raw = RawMode::enable()?;
    let mut keys = KeyDecoder::new(TtyInput);
    let mut stdout = io::stdout().lock();

    let size = terminal::window_size(keys.source_mut(), &mut stdout)?;
    info!(cols = size.cols, rows = size.rows, "terminal size");

    let mut editor = Editor::new(buffer, size);
    run_session(&mut editor, &mut keys, &mut stdout)?;

    raw.disable()?;
    Ok(())
}

/// Start logging if asked to, then run the editor.
fn start(args: &Args) -> Result<(), AppError> {
    if let Some(path) = &args.log_file {
        logging::init(path)?;
    }
    info!(file = ?args.file, "starting");

    run(args)
}

/// Turn the outcome of a session into an exit status.
///
/// Errors get a best-effort clear of the screen on `out` and a one-line
/// message on `err`. By the time this runs the raw-mode guard has been
/// dropped, so the terminal is cooked again.
fn finish(result: Result<(), AppError>, out: &mut impl Write, err: &mut impl Write) -> ExitCode {
    match result {
        Ok(()) => {
            info!("quit");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "fatal");
            let _ = ansi::clear_screen(out)
                .and_then(|()| ansi::cursor_home(out))
                .and_then(|()| out.flush());
            let _ = writeln!(err, "tilde: {e}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let result = start(&args);
    finish(result, &mut io::stdout(), &mut io::stderr())
}

// ─── Tests ──────────────────────────────────────────────────────────────────
