use thiserror::Error;

#[derive(Error, Debug)]
pub enum DexError {
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Limit reached: at most {limit} {collection}")]
    LimitExceeded {
        collection: &'static str,
        limit: usize,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl DexError {
    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        DexError::NotFound {
            kind,
            key: key.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DexError::NotFound { .. })
    }
}

impl From<reqwest::Error> for DexError {
    fn from(err: reqwest::Error) -> Self {
        DexError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DexError>;
