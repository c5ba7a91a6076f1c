use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChirpError {
    #[error("missing environment variable: {0}")]
    MissingEnv(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnv { var: String, reason: String },

    #[error("corpus file not found: {0}")]
    CorpusNotFound(String),

    #[error("corpus shape invalid: {0}")]
    CorpusInvalid(String),

    #[error("label table not found: {0}")]
    LabelTableNotFound(String),

    #[error("store read failed for '{key}': {reason}")]
    StoreRead { key: String, reason: String },

    #[error("store write failed for '{key}': {reason}")]
    StoreWrite { key: String, reason: String },

    #[error("publish failed: {0}")]
    Publish(String),

    #[error("profile description update failed: {0}")]
    ProfileUpdate(String),

    #[error("credential verification failed: {0}")]
    AuthCheck(String),

    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("no override scheduled for {0}")]
    OverrideNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChirpError>;
