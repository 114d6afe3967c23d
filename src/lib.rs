//! `monocle-sanitizer` - configuration sanitizer for Monocle
//!
//! Checks a user configuration against the fixed table of Monocle options,
//! fills in defaults, warns about unknown keys, and exposes the result as an
//! immutable, shareable [`config::Config`].
//!
//! ```no_run
//! use std::path::Path;
//! use monocle_sanitizer::config::{ConfigLoader, sanitize_monocle};
//!
//! # fn main() -> monocle_sanitizer::error::Result<()> {
//! let raw = ConfigLoader::with_defaults().load(Path::new("config.yaml"))?;
//! let sanitized = sanitize_monocle(&raw, Path::new("/opt/monocle"))?;
//! let delay: f64 = sanitized.config.get_as("SCAN_DELAY")?;
//! # let _ = delay;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
