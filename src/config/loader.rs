//! Configuration loader
//!
//! Reads a YAML mapping into a [`RawConfig`]. Plain YAML covers none,
//! booleans, numbers, strings, lists and mappings. The remaining value
//! types are written with local tags:
//!
//! ```yaml
//! GRID: !tuple [4, 4]
//! NOTIFY_IDS: !set [149, 150]
//! RAIDS_LVL_MIN: !range [1, 6]
//! HASH_KEY: !bytes "abc123"
//! ACCOUNTS_CSV: !path "accounts.csv"
//! LAST_MIGRATION: !timestamp "2017-05-01 12:00:00"
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde_yaml::Value as Yaml;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::raw::RawConfig;
use crate::config::value::{Key, RangeSpec, Value};
use crate::error::ConfigError;

/// Default upper bound on a configuration file, in bytes.
pub const DEFAULT_MAX_CONFIG_SIZE: u64 = 1024 * 1024;

/// Label used in place of a path for in-memory sources.
const INLINE_SOURCE: &str = "<inline>";

// ============================================================================
// Public API
// ============================================================================

/// Options for the configuration loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Maximum configuration file size in bytes.
    pub max_config_size: u64,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            max_config_size: env_or("MONOCLE_MAX_CONFIG_SIZE", DEFAULT_MAX_CONFIG_SIZE),
        }
    }
}

/// Reads raw configurations from YAML.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file is larger than `max_config_size`
    /// - YAML parsing fails or the document is not a mapping
    /// - A value has no option representation
    pub fn load(&self, path: &Path) -> Result<RawConfig, ConfigError> {
        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        if metadata.len() > self.options.max_config_size {
            return Err(ConfigError::FileTooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit: self.options.max_config_size,
            });
        }

        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => ConfigError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: "file is not valid UTF-8".to_string(),
            },
            _ => ConfigError::MissingFile {
                path: path.to_path_buf(),
            },
        })?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "loading configuration");
        parse(&text, path)
    }

    /// Parses configuration text.
    ///
    /// # Errors
    ///
    /// Returns the parse and conversion errors of [`ConfigLoader::load`].
    pub fn load_from_str(&self, text: &str) -> Result<RawConfig, ConfigError> {
        let size = u64::try_from(text.len()).unwrap_or(u64::MAX);
        if size > self.options.max_config_size {
            return Err(ConfigError::FileTooLarge {
                path: PathBuf::from(INLINE_SOURCE),
                size,
                limit: self.options.max_config_size,
            });
        }
        parse(text, Path::new(INLINE_SOURCE))
    }
}

// ============================================================================
// Parsing
// ============================================================================

fn parse(text: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let root: Yaml = serde_yaml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        line: e.location().map(|l| l.line()),
        message: e.to_string(),
    })?;

    let mapping = match root {
        Yaml::Mapping(mapping) => mapping,
        Yaml::Null => {
            return Err(ConfigError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: "Configuration file is empty".to_string(),
            });
        }
        other => {
            return Err(ConfigError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: format!(
                    "Configuration must be a mapping of option names, found {}",
                    yaml_kind(&other)
                ),
            });
        }
    };

    let mut raw = RawConfig::new();
    for (key, value) in mapping {
        let Yaml::String(name) = key else {
            return Err(ConfigError::UnsupportedValue {
                option: "<root>".to_string(),
                reason: format!("option names must be strings, found {}", yaml_kind(&key)),
            });
        };
        let value = convert(value, &name)?;
        raw.insert(name, value);
    }

    tracing::trace!(entries = raw.len(), "parsed configuration");
    Ok(raw)
}

fn convert(yaml: Yaml, location: &str) -> Result<Value, ConfigError> {
    match yaml {
        Yaml::Null => Ok(Value::None),
        Yaml::Bool(b) => Ok(Value::Bool(b)),
        Yaml::Number(n) => convert_number(&n, location),
        Yaml::String(s) => Ok(Value::Str(s)),
        Yaml::Sequence(items) => Ok(Value::List(convert_items(items, location)?)),
        Yaml::Mapping(mapping) => {
            let mut dict = IndexMap::with_capacity(mapping.len());
            for (key, value) in mapping {
                let key = convert_key(key, location)?;
                let nested = format!("{location}[{key}]");
                dict.insert(key, convert(value, &nested)?);
            }
            Ok(Value::Dict(dict))
        }
        Yaml::Tagged(tagged) => {
            let tag = tagged.tag.to_string();
            convert_tagged(tag.trim_start_matches('!'), tagged.value, location)
        }
    }
}

fn convert_number(n: &serde_yaml::Number, location: &str) -> Result<Value, ConfigError> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::Int(i));
    }
    if n.is_u64() {
        return Err(unsupported(location, format!("integer {n} is out of range")));
    }
    n.as_f64()
        .map(Value::Float)
        .ok_or_else(|| unsupported(location, format!("unreadable number {n}")))
}

fn convert_items(items: Vec<Yaml>, location: &str) -> Result<Vec<Value>, ConfigError> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| convert(item, &format!("{location}[{i}]")))
        .collect()
}

fn convert_key(yaml: Yaml, location: &str) -> Result<Key, ConfigError> {
    match yaml {
        Yaml::Bool(b) => Ok(Key::Bool(b)),
        Yaml::Number(n) => n
            .as_i64()
            .map(Key::Int)
            .ok_or_else(|| unsupported(location, format!("{n} cannot be a key or set member"))),
        Yaml::String(s) => Ok(Key::Str(s)),
        other => Err(unsupported(
            location,
            format!("{} cannot be a key or set member", yaml_kind(&other)),
        )),
    }
}

fn convert_tagged(tag: &str, yaml: Yaml, location: &str) -> Result<Value, ConfigError> {
    match tag {
        "tuple" => Ok(Value::Tuple(convert_items(
            expect_sequence(yaml, tag, location)?,
            location,
        )?)),
        "set" => Ok(Value::Set(convert_members(yaml, tag, location)?)),
        "frozenset" => Ok(Value::FrozenSet(convert_members(yaml, tag, location)?)),
        "range" => convert_range(yaml, location),
        "bytes" => Ok(Value::Bytes(expect_string(yaml, tag, location)?.into_bytes())),
        "path" => Ok(Value::Path(PathBuf::from(expect_string(yaml, tag, location)?))),
        "timestamp" => {
            let text = expect_string(yaml, tag, location)?;
            parse_timestamp(&text)
                .map(Value::Timestamp)
                .ok_or_else(|| unsupported(location, format!("'{text}' is not a timestamp")))
        }
        other => Err(unsupported(location, format!("unknown tag !{other}"))),
    }
}

fn convert_members(yaml: Yaml, tag: &str, location: &str) -> Result<BTreeSet<Key>, ConfigError> {
    expect_sequence(yaml, tag, location)?
        .into_iter()
        .map(|item| convert_key(item, location))
        .collect()
}

fn convert_range(yaml: Yaml, location: &str) -> Result<Value, ConfigError> {
    let bounds = expect_sequence(yaml, "range", location)?
        .into_iter()
        .map(|item| match item {
            Yaml::Number(n) => n.as_i64(),
            _ => None,
        })
        .collect::<Option<Vec<i64>>>()
        .ok_or_else(|| unsupported(location, "!range bounds must be integers"))?;

    let (start, stop, step) = match bounds.as_slice() {
        [stop] => (0, *stop, 1),
        [start, stop] => (*start, *stop, 1),
        [start, stop, step] => (*start, *stop, *step),
        _ => {
            return Err(unsupported(
                location,
                "!range takes [stop], [start, stop] or [start, stop, step]",
            ));
        }
    };

    RangeSpec::new(start, stop, step)
        .map(Value::Range)
        .ok_or_else(|| unsupported(location, "!range step must not be zero"))
}

fn expect_sequence(yaml: Yaml, tag: &str, location: &str) -> Result<Vec<Yaml>, ConfigError> {
    match yaml {
        Yaml::Sequence(items) => Ok(items),
        other => Err(unsupported(
            location,
            format!("!{tag} expects a sequence, found {}", yaml_kind(&other)),
        )),
    }
}

fn expect_string(yaml: Yaml, tag: &str, location: &str) -> Result<String, ConfigError> {
    match yaml {
        Yaml::String(s) => Ok(s),
        other => Err(unsupported(
            location,
            format!("!{tag} expects a string, found {}", yaml_kind(&other)),
        )),
    }
}

/// Accepts `YYYY-MM-DD HH:MM:SS`, the same with `T`, a bare date, or RFC
/// 3339 (converted to UTC).
fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

const fn yaml_kind(yaml: &Yaml) -> &'static str {
    match yaml {
        Yaml::Null => "null",
        Yaml::Bool(_) => "bool",
        Yaml::Number(_) => "number",
        Yaml::String(_) => "string",
        Yaml::Sequence(_) => "sequence",
        Yaml::Mapping(_) => "mapping",
        Yaml::Tagged(_) => "tagged value",
    }
}

fn unsupported(location: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::UnsupportedValue {
        option: location.to_string(),
        reason: reason.into(),
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ============================================================================
// Tests
// ============================================================================
