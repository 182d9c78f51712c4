#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod error;
pub mod manager;
pub mod navigate;
pub mod render;
pub mod schedule;
pub mod surface;
pub mod telemetry;
pub mod templates;
pub mod types;

pub type Result<T> = std::result::Result<T, error::Error>;
