use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} is not an acceptable move")]
    InvalidMove(String),

    #[error("No move-selection algorithm for bot: {0}")]
    UnimplementedStrategy(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),
}
