//! Progress reporting for analyses

pub mod reporter;
