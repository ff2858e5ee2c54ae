//! Offline synthesis used when every provider failed.

mod offline;

pub use offline::{ImageFingerprint, OfflineSynthesizer};
