//! Configuration value objects shared across layers

mod cascade;
mod output_format;

pub use cascade::CascadeConfig;
pub use output_format::OutputFormat;
