use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Target folder '{}' does not exist or is not a directory", .0.display())]
    InvalidTarget(PathBuf),

    #[error("{0}")]
    Other(String),
}
