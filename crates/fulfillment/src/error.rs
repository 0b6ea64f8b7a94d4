use thiserror::Error;

pub type Result<T> = std::result::Result<T, FulfillmentError>;

/// Failures that abort a fulfillment attempt.
///
/// "No data" is never an error: empty candidate lists and rejected charts are
/// reported as `Ok(false)` by the search.
#[derive(Error, Debug)]
pub enum FulfillmentError {
    #[error("Existence check failed: {0:#}")]
    ExistenceCheck(#[source] anyhow::Error),

    #[error("Child place sampling failed for {place}: {source:#}")]
    Sampling {
        place: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Chart registration failed: {0:#}")]
    Registration(#[source] anyhow::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
