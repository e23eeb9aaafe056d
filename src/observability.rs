//! Run observability: the deterministic JSON-line run log the batch driver
//! prints when a domination run finishes.

pub mod logging;

pub use logging::{JsonLineLogger, LogFile, LogLevel, LogRotationPolicy, LoggingError};
