use thiserror::Error;

#[derive(Debug, Error)]
pub enum BloomError {
    #[error("input too short: {len} bytes, need at least {need} for the header", need = crate::consts::HEADER_SIZE)]
    InputTooShort { len: usize },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Persist: {0}")]
    Persist(#[from] tempfile::PersistError),
}

pub type Result<T> = std::result::Result<T, BloomError>;
