use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("{service} API error ({status}): {body}")]
    Upstream {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),
}
