//! # tilde-editor — Editor core for tilde
//!
//! The parts of the editor that know about text but not about the terminal
//! device:
//!
//! - **[`row`]** — `Row`, one line of the file as raw bytes
//! - **[`buffer`]** — `TextBuffer`, the rows of the file loaded at startup
//! - **[`cursor`]** — `Cursor` and the `Motion`s that move it
//! - **[`view`]** — `View`, scroll offsets and the full-frame renderer
//!
//! Everything here runs against plain readers and writers, so the whole
//! core is testable without a tty.

pub mod buffer;
pub mod cursor;
pub mod row;
pub mod view;
