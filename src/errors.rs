use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("INVALID_DATE: {0}")]
    InvalidDate(String),
    #[error("INVALID_SETTING: {0}")]
    InvalidSetting(String),
}

impl From<chrono::ParseError> for EngineError {
    fn from(value: chrono::ParseError) -> Self {
        Self::InvalidDate(value.to_string())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
