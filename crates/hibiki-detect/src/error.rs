use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("process snapshot failed: {0}")]
    Snapshot(String),
}
