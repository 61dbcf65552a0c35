use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Host error: {0}")]
    Host(String),
}

pub type Result<T> = std::result::Result<T, Error>;
