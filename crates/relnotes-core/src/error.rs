use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed release record: {0}")]
    Json(#[from] serde_json::Error),
}
