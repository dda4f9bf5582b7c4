// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for chirp-term's frontend

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Error originated in [`chirp_term`]
    #[error(transparent)]
    Chirp(#[from] chirp_term::Error),
    /// Error originated in [`std::io`]
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A logger was already installed
    #[error(transparent)]
    Logger(#[from] log::SetLoggerError),
}
