use thiserror::Error;

/**
 * Boxed error produced by a transport implementation
 */
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/**
 * All possible errors of a lookup, one variant per stage
 */
#[derive(Error, Debug)]
pub enum IpApiError {
    #[error("invalid ip address {0}")]
    InvalidInput(String),

    #[error("API request error: {0}")]
    Transport(#[source] BoxError),

    #[error("cannot read body: {0}")]
    Read(#[source] BoxError),

    #[error("cannot unmarshal API response: {0}")]
    Decode(#[from] serde_json::Error),

    // The service's own reason, verbatim
    #[error("{reason}")]
    Service { reason: String, ip: String },
}

/**
 * Stage of a lookup at which an error was raised
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Input,
    Transport,
    Read,
    Decode,
    Service,
}

impl IpApiError {
    pub fn stage(&self) -> Stage {
        match self {
            IpApiError::InvalidInput(_) => Stage::Input,
            IpApiError::Transport(_) => Stage::Transport,
            IpApiError::Read(_) => Stage::Read,
            IpApiError::Decode(_) => Stage::Decode,
            IpApiError::Service { .. } => Stage::Service,
        }
    }
}

/**
 * Result type alias
 */
pub type Result<T> = std::result::Result<T, IpApiError>;
