use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("missing required field \"{field}\" on finalized item")]
    MissingField { field: String },

    #[error("invalid price \"{value}\": {reason}")]
    InvalidPrice { value: String, reason: String },
}

impl From<pricelens_core::MissingField> for IngestError {
    fn from(err: pricelens_core::MissingField) -> Self {
        IngestError::MissingField { field: err.0 }
    }
}
