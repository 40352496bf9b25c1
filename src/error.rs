use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),

    #[error("audio output unavailable: {0}")]
    Audio(#[from] rodio::StreamError),

    #[error("could not open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("logging already initialised: {0}")]
    Logging(String),
}
