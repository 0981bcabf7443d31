use thiserror::Error;

#[derive(Debug, Error)]
pub enum HibikiError {
    #[error("config error: {0}")]
    Config(String),
}
