use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to load portal data: {0}")]
    Load(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
