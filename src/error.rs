use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("failed to read config file: {0}")]
    ReadConfig(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    ParseConfig(#[from] serde_yaml::Error),

    #[error("failed to encode selection: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
