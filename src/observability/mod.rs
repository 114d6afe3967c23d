//! Observability module
//!
//! Logging setup for the sanitizer CLI and for hosts that embed it.

pub mod logging;

pub use logging::{LogFormat, init_logging, verbosity_to_directive};
