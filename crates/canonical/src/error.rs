use thiserror::Error;

/// Errors that can occur when building a normalizer.
///
/// Normalizing text never fails; only an unusable configuration is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
