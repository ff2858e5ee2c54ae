//! Prompt templates sent to vision providers

pub mod template;

pub use template::AnalysisPrompt;
