//! Configuration module
//!
//! Loads raw Monocle configurations, checks them against the option table,
//! and freezes the result for shared read-only access.

pub mod loader;
pub mod options;
pub mod raw;
pub mod resolved;
pub mod schema;
pub mod validation;
pub mod value;

use std::path::Path;

pub use loader::{ConfigLoader, LoaderOptions};
pub use options::{HostContext, monocle_schema};
pub use raw::RawConfig;
pub use resolved::{Config, FromValue, Origin, ResolvedOption};
pub use schema::{Expected, OptionSpec, Schema, SchemaBuilder};
pub use validation::{Sanitized, Sanitizer};
pub use value::{Key, RangeSpec, Value, ValueType};

use crate::error::Result;

/// Sanitizes `raw` against the Monocle option table.
///
/// The table's computed defaults come from `raw` itself (`GRID`) and from
/// `install_dir`.
///
/// # Errors
///
/// Returns an error if the option table is malformed or any supplied
/// option has the wrong type.
pub fn sanitize_monocle(raw: &RawConfig, install_dir: &Path) -> Result<Sanitized> {
    let host = HostContext::from_raw(raw, install_dir);
    tracing::debug!(
        install_dir = %host.install_dir.display(),
        worker_count = host.worker_count,
        "building option table"
    );
    let schema = monocle_schema(&host)?;
    Ok(Sanitizer::new(&schema).sanitize(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, SanitizerError};

    fn minimal() -> RawConfig {
        [
            ("GRID", Value::tuple([4, 4])),
            ("MAP_START", Value::tuple([40.7, -74.0])),
            ("MAP_END", Value::tuple([40.8, -73.9])),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_sanitize_monocle_fills_worker_defaults() {
        let result = sanitize_monocle(&minimal(), Path::new("/opt/monocle")).unwrap();
        assert_eq!(
            result.config.get("COROUTINES_LIMIT").unwrap(),
            &Value::Int(16)
        );
        assert_eq!(
            result.config.get("SWAP_OLDEST").unwrap(),
            &Value::Float(1350.0)
        );
        assert_eq!(
            result.config.get("INSTANCE_ID").unwrap(),
            &Value::from("/opt/monocle")
        );
    }

    #[test]
    fn test_sanitize_monocle_scan_delay() {
        let mut raw = minimal();
        raw.insert("SCAN_DELAY", 15);
        let result = sanitize_monocle(&raw, Path::new("/opt/monocle")).unwrap();
        assert_eq!(result.config.get("SCAN_DELAY").unwrap(), &Value::Int(15));
    }

    #[test]
    fn test_sanitize_monocle_wrong_type_is_config_error() {
        let mut raw = minimal();
        raw.insert("SCAN_DELAY", "fast");
        let err = sanitize_monocle(&raw, Path::new("/opt/monocle")).unwrap_err();
        assert!(matches!(
            err,
            SanitizerError::Config(ConfigError::InvalidTypes { .. })
        ));
    }

    #[test]
    fn test_sanitize_monocle_without_grid() {
        let result = sanitize_monocle(&RawConfig::new(), Path::new("/opt/monocle")).unwrap();
        let missing: Vec<_> = result.config.missing().collect();
        assert!(missing.contains(&"GRID"));
        assert!(missing.contains(&"COROUTINES_LIMIT"));
        assert!(missing.contains(&"SWAP_OLDEST"));
    }
}
