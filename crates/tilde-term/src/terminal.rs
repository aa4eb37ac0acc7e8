// SPDX-License-Identifier: MIT
//
// Terminal control — raw mode, window size, and RAII cleanup.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr), ioctl (TIOCGWINSZ), and raw fd writes. These are the standard
// POSIX interfaces for terminal control — there is no safe alternative.
// Each unsafe block is minimal.
#![allow(unsafe_code)]
//
// This module owns the terminal's raw state. `RawMode::enable` snapshots the
// original termios and switches stdin to byte-at-a-time input with a 100ms
// read timeout. The returned guard restores the snapshot when it is dropped
// or when `disable` is called, whichever comes first; restoring twice is
// harmless. Because `Drop` runs on normal return, on `?` propagation and
// during unwinding, every exit path out of the editor's run function leaves
// the terminal cooked again.
//
// A panic that aborts (or a panic while the guard is borrowed elsewhere)
// never reaches `Drop`, so a panic hook restores from a process-wide backup
// copy of the snapshot. The hook writes straight to fd 1, bypassing Rust's
// stdout lock in case the panic happened mid-frame while it was held.

use std::io::{self, Write};
#[cfg(unix)]
use std::os::fd::RawFd;
use std::sync::{Mutex, Once};

use tracing::debug;

use crate::ansi;
use crate::error::{Error, Result};
use crate::input::ByteSource;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Query the current terminal size via `ioctl(TIOCGWINSZ)`.
///
/// Returns `None` if stdout is not a terminal, the query fails, or the
/// terminal reports a zero dimension.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// Longest cursor-position report we accept: `ESC [ 65535 ; 65535` is 13
/// bytes, so anything longer is garbage.
const REPORT_MAX: usize = 32;

/// Determine the window size, measuring with the cursor if `ioctl` fails.
///
/// Some terminals answer `TIOCGWINSZ` with an error or a zero width. In that
/// case the cursor is pushed to the bottom-right corner and the terminal is
/// asked where it ended up; the reply on `input` is the screen size. Raw
/// mode must already be enabled, or the reply would be line-buffered and
/// echoed.
///
/// # Errors
///
/// Returns [`Error::Write`] if the query cannot be sent, [`Error::Read`] if
/// reading the reply fails, and [`Error::WindowSize`] if no usable size
/// comes back.
pub fn window_size(input: &mut impl ByteSource, out: &mut impl Write) -> Result<Size> {
    if let Some(size) = get_size() {
        return Ok(size);
    }

    debug!("TIOCGWINSZ unavailable, measuring with a cursor position report");
    ansi::cursor_to_far_corner(out)
        .and_then(|()| ansi::request_cursor_position(out))
        .and_then(|()| out.flush())
        .map_err(Error::Write)?;

    let reply = read_cursor_report(input)?;
    parse_cursor_report(&reply).ok_or_else(|| {
        Error::WindowSize(format!(
            "unexpected cursor position report {:?}",
            String::from_utf8_lossy(&reply)
        ))
    })
}

/// Collect a cursor-position reply up to (not including) the final `R`.
///
/// Stops at `R`, at [`REPORT_MAX`] bytes, or when the read times out.
fn read_cursor_report(input: &mut impl ByteSource) -> Result<Vec<u8>> {
    let mut reply = Vec::with_capacity(REPORT_MAX);
    while reply.len() < REPORT_MAX {
        match input.read_byte().map_err(Error::Read)? {
            Some(b'R') | None => break,
            Some(byte) => reply.push(byte),
        }
    }
    Ok(reply)
}

/// Parse `ESC [ rows ; cols` (the `R` already stripped) into a [`Size`].
///
/// Returns `None` for anything malformed or for a zero dimension.
#[must_use]
pub fn parse_cursor_report(reply: &[u8]) -> Option<Size> {
    let params = reply.strip_prefix(b"\x1b[")?;
    let params = std::str::from_utf8(params).ok()?;
    let (rows, cols) = params.split_once(';')?;
    let size = Size {
        rows: rows.parse().ok()?,
        cols: cols.parse().ok()?,
    };
    (size.rows > 0 && size.cols > 0).then_some(size)
}

// ─── Panic-Safe Terminal Restore ────────────────────────────────────────────

/// The raw-mode fd and its cooked termios, while raw mode is on.
///
/// The [`RawMode`] guard owns its own copy, but the panic hook can't reach
/// it, so it reads this one instead.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<(RawFd, libc::termios)>> = Mutex::new(None);

/// Clean up the screen and re-apply the backed-up termios. Errors are
/// ignored.
///
/// Does nothing once raw mode has been turned off, so a panic in cooked
/// mode leaves the screen alone. Returns whether anything was restored.
#[cfg(unix)]
fn restore_from_backup() -> bool {
    let Ok(guard) = TERMIOS_BACKUP.lock() else {
        return false;
    };
    let Some((fd, original)) = *guard else {
        return false;
    };

    emergency_restore();
    unsafe {
        let _ = libc::tcsetattr(fd, libc::TCSAFLUSH, &raw const original);
    }
    true
}

#[cfg(not(unix))]
fn restore_from_backup() -> bool {
    false
}

/// Emergency screen restore: clear, home, show cursor.
///
/// A frame hides the cursor while it draws; a panic mid-frame would leave
/// it hidden. Clearing first puts the panic message at the top of a blank
/// screen.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[2J\x1b[H\x1b[?25h";

/// The panic hook is installed at most once per process.
static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Chain a panic hook that puts the terminal back in cooked mode and clears
/// the screen before the default hook prints the panic message.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_from_backup();
            original(info);
        }));
    });
}

/// Write [`EMERGENCY_RESTORE`] directly to stdout's file descriptor.
#[cfg(unix)]
fn emergency_restore() {
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }
}

// ─── Raw Mode ───────────────────────────────────────────────────────────────

/// Compute the raw configuration from the original one.
///
/// - input: no break-to-SIGINT, no CR→NL translation, no parity check, no
///   8th-bit stripping, no Ctrl-S/Ctrl-Q flow control
/// - output: no post-processing, so `\n` is not turned into `\r\n`
/// - control: 8-bit characters
/// - local: no echo, no canonical (line) mode, no Ctrl-V literal-next, no
///   signals from Ctrl-C/Ctrl-Z
/// - `VMIN = 0`, `VTIME = 1`: `read()` returns as soon as any byte is
///   available, or with nothing after 100ms
#[cfg(unix)]
#[must_use]
pub fn raw_termios(original: &libc::termios) -> libc::termios {
    let mut raw = *original;
    raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
    raw.c_oflag &= !libc::OPOST;
    raw.c_cflag |= libc::CS8;
    raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
    raw.c_cc[libc::VMIN] = 0;
    raw.c_cc[libc::VTIME] = 1;
    raw
}

/// Raw-mode session with RAII cleanup.
///
/// Exactly one should exist per process. The original terminal
/// configuration is restored by [`disable`](Self::disable) or on drop,
/// whichever comes first; later restores are no-ops.
///
/// # Example
///
/// ```no_run
/// use tilde_term::terminal::RawMode;
///
/// let raw = RawMode::enable()?;
/// // ... read keys, draw frames ...
/// drop(raw); // Terminal is cooked again.
/// # Ok::<(), tilde_term::Error>(())
/// ```
pub struct RawMode {
    /// The terminal being controlled.
    #[cfg(unix)]
    fd: RawFd,

    /// Original termios saved before entering raw mode. `None` once restored.
    #[cfg(unix)]
    original: Option<libc::termios>,

    #[cfg(not(unix))]
    active: bool,
}

impl RawMode {
    /// Snapshot stdin's terminal configuration and switch it to raw mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GetAttr`] if stdin is not a terminal or its
    /// configuration cannot be read, and [`Error::SetAttr`] if the raw
    /// configuration cannot be applied.
    #[cfg(unix)]
    pub fn enable() -> Result<Self> {
        Self::enable_on(libc::STDIN_FILENO)
    }

    /// Snapshot the configuration of the terminal open on `fd` and switch
    /// it to raw mode. `fd` must stay open for the life of the guard.
    ///
    /// # Errors
    ///
    /// Same as [`enable`](Self::enable), for `fd` instead of stdin.
    #[cfg(unix)]
    pub fn enable_on(fd: RawFd) -> Result<Self> {
        let original = unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &raw mut termios) != 0 {
                return Err(Error::GetAttr(io::Error::last_os_error()));
            }
            termios
        };

        // The snapshot must be in place before anything is mutated, so a
        // failure or panic from here on can still restore.
        if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
            *guard = Some((fd, original));
        }
        install_panic_hook();
        let guard = Self {
            fd,
            original: Some(original),
        };

        let raw = raw_termios(&original);
        if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, &raw const raw) } != 0 {
            return Err(Error::SetAttr(io::Error::last_os_error()));
        }

        debug!("raw mode enabled");
        Ok(guard)
    }

    #[cfg(not(unix))]
    pub fn enable() -> Result<Self> {
        install_panic_hook();
        Ok(Self { active: true })
    }

    /// Whether the original configuration is still waiting to be restored.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        #[cfg(unix)]
        {
            self.original.is_some()
        }
        #[cfg(not(unix))]
        {
            self.active
        }
    }

    /// Restore the configuration captured by [`enable`](Self::enable).
    ///
    /// Idempotent: calling it again after a successful restore does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SetAttr`] if the original configuration cannot be
    /// re-applied. The snapshot is kept, so a later call retries.
    #[cfg(unix)]
    pub fn disable(&mut self) -> Result<()> {
        if let Some(ref original) = self.original {
            unsafe {
                if libc::tcsetattr(self.fd, libc::TCSAFLUSH, original) != 0 {
                    return Err(Error::SetAttr(io::Error::last_os_error()));
                }
            }

            // Nothing left for the panic hook to restore.
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = None;
            }

            self.original = None;
            debug!("raw mode disabled");
        }

        Ok(())
    }

    #[cfg(not(unix))]
    pub fn disable(&mut self) -> Result<()> {
        self.active = false;
        Ok(())
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = self.disable();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
