//! Observability
//!
//! Structured logging for the CLI and library.

pub mod logging;

pub use logging::{LogFormat, init_logging, verbosity_to_directive};
