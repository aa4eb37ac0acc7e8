// SPDX-License-Identifier: MIT
//
// Errors that end the process.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can make tilde exit with status 1.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Term(#[from] tilde_term::Error),

    #[error("{}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("log file {}: {source}", .path.display())]
    Log {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
