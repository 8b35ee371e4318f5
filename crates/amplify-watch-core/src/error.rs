use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("job {0} not found")]
    NotFound(String),

    #[error("{code} ({status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("missing AWS credentials: {0}")]
    MissingCredentials(String),

    #[error("Job ID must be numeric, got '{0}'")]
    InvalidJobId(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("giving up after {0} consecutive failed requests")]
    TooManyErrors(u32),

    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected response: {0}")]
    Malformed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl WatchError {
    /// True for errors the poll loop must not retry.
    pub fn is_not_found(&self) -> bool {
        matches!(self, WatchError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, WatchError>;
