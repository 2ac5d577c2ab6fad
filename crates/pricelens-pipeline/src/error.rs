use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("missing required field \"{field}\" while assembling item")]
    MissingField { field: String },

    #[error("malformed category path \"{value}\": expected \"<main>{separator}<sub>\"")]
    MalformedCategoryPath { value: String, separator: char },
}

impl From<pricelens_core::MissingField> for PipelineError {
    fn from(err: pricelens_core::MissingField) -> Self {
        PipelineError::MissingField { field: err.0 }
    }
}
