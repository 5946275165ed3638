//! Composition errors

use std::io;

use thiserror::Error;

/// Errors that can occur while building a message
#[derive(Debug, Error)]
pub enum ComposeError {
    /// An image could not be opened or read
    #[error("could not read image {path}")]
    ImageUnreadable {
        /// The path as given on the command line
        path: String,

        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The image path can't be used verbatim as a `Content-ID`
    #[error("image path {0:?} is not ASCII and can't be used as a content id")]
    NonAsciiImagePath(String),

    /// The MIME builder refused the message
    #[error("could not build the message")]
    BuildError(#[from] lettre::error::Error),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}
