use thiserror::Error;

pub type Result<T> = std::result::Result<T, DetectionError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    #[error("Unknown place type: {0}")]
    UnknownPlaceType(String),
}
