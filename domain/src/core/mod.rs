//! Core domain concepts shared across all subdomains.
//!
//! - [`request::ImageInput`] / [`request::AnalysisRequest`]: what is sent to a provider
//! - [`provider::ProviderDescriptor`]: one entry of the ordered provider cascade
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod provider;
pub mod request;
pub mod string;
