//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Image payload is empty")]
    EmptyImage,

    #[error("Invalid provider: {0}")]
    InvalidProvider(String),

    #[error("No providers configured for the analysis cascade")]
    NoProviders,

    #[error("Invalid cascade setting: {0}")]
    InvalidCascadeSetting(String),
}
