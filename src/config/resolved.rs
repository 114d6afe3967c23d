//! Resolved configuration
//!
//! The outcome of sanitizing: every declared option is either supplied by
//! the user, filled from its default, or unset. A [`Config`] never changes
//! after it is built, so it can be shared across threads behind an `Arc`.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use std::path::Path;

use crate::config::schema::{Expected, closest_name};
use crate::config::value::{Key, Value};
use crate::error::ConfigError;

/// Names that hosts probe for but that are not options. They read as
/// empty instead of failing.
const ENVIRONMENT_ARTIFACTS: &[&str] = &["__path__"];

static EMPTY: Value = Value::None;

// ============================================================================
// Resolution
// ============================================================================

/// Where an option's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The user supplied a value of an accepted type
    Supplied,
    /// The schema default was used
    Default,
    /// Not supplied and no default exists
    Unset,
}

impl Origin {
    /// Lower-case label for output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Supplied => "supplied",
            Self::Default => "default",
            Self::Unset => "unset",
        }
    }
}

/// Terminal state of one option.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Value supplied by the user
    Supplied(Value),
    /// Default value
    Defaulted(Value),
    /// Required option that was never supplied
    Unset,
}

impl Resolution {
    /// Origin of the value.
    #[must_use]
    pub const fn origin(&self) -> Origin {
        match self {
            Self::Supplied(_) => Origin::Supplied,
            Self::Defaulted(_) => Origin::Default,
            Self::Unset => Origin::Unset,
        }
    }

    /// The value, unless unset.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Supplied(v) | Self::Defaulted(v) => Some(v),
            Self::Unset => None,
        }
    }
}

/// One option as seen by [`Config::iter`].
#[derive(Debug, Clone, Copy)]
pub struct ResolvedOption<'a> {
    /// Option name
    pub name: &'static str,
    /// Accepted value types
    pub expected: Expected,
    /// Where the value came from
    pub origin: Origin,
    /// The value, unless unset
    pub value: Option<&'a Value>,
}

#[derive(Debug, Clone)]
struct Entry {
    expected: Expected,
    resolution: Resolution,
}

// ============================================================================
// Typed Access
// ============================================================================

/// Conversion from a stored value for [`Config::get_as`].
pub trait FromValue<'a>: Sized {
    /// Name of the requested type, used in error messages.
    const TYPE_NAME: &'static str;

    /// Converts the value, or returns `None` if it has another type.
    fn from_value(value: &'a Value) -> Option<Self>;
}

impl<'a> FromValue<'a> for &'a Value {
    const TYPE_NAME: &'static str = "value";

    fn from_value(value: &'a Value) -> Option<Self> {
        Some(value)
    }
}

impl FromValue<'_> for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue<'_> for i64 {
    const TYPE_NAME: &'static str = "int";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_int()
    }
}

impl FromValue<'_> for f64 {
    const TYPE_NAME: &'static str = "number";

    #[allow(clippy::cast_precision_loss)]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i as f64),
            Value::Float(x) => Some(*x),
            Value::Bool(b) => Some(f64::from(u8::from(*b))),
            _ => None,
        }
    }
}

impl<'a> FromValue<'a> for &'a str {
    const TYPE_NAME: &'static str = "str";

    fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl<'a> FromValue<'a> for &'a Path {
    const TYPE_NAME: &'static str = "path";

    fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(Path::new(s)),
            Value::Path(p) => Some(p),
            _ => None,
        }
    }
}

impl<'a> FromValue<'a> for &'a [Value] {
    const TYPE_NAME: &'static str = "sequence";

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_sequence()
    }
}

impl<'a> FromValue<'a> for &'a IndexMap<Key, Value> {
    const TYPE_NAME: &'static str = "dict";

    fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Dict(map) => Some(map),
            _ => None,
        }
    }
}

impl FromValue<'_> for NaiveDateTime {
    const TYPE_NAME: &'static str = "timestamp";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }
}

impl<'a, T: FromValue<'a>> FromValue<'a> for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn from_value(value: &'a Value) -> Option<Self> {
        if value.is_none() {
            Some(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

// ============================================================================
// Config
// ============================================================================

/// The resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    entries: IndexMap<&'static str, Entry>,
}

impl Config {
    pub(crate) fn from_resolutions(
        resolutions: impl IntoIterator<Item = (&'static str, Expected, Resolution)>,
    ) -> Self {
        let entries = resolutions
            .into_iter()
            .map(|(name, expected, resolution)| {
                (
                    name,
                    Entry {
                        expected,
                        resolution,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Reads an option.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UndeclaredOption`] if the schema does not
    /// declare `name`, or [`ConfigError::MissingRequired`] if the option has
    /// no value and no default.
    pub fn get(&self, name: &str) -> Result<&Value, ConfigError> {
        let Some(entry) = self.entries.get(name) else {
            if ENVIRONMENT_ARTIFACTS.contains(&name) {
                return Ok(&EMPTY);
            }
            let suggestion = closest_name(name, self.entries.keys().copied());
            tracing::error!(option = name, "read of undeclared config option");
            return Err(ConfigError::UndeclaredOption {
                option: name.to_string(),
                suggestion: suggestion.map(ToString::to_string),
            });
        };

        entry.resolution.value().ok_or_else(|| {
            let err = ConfigError::MissingRequired {
                option: name.to_string(),
            };
            tracing::error!("{err}");
            err
        })
    }

    /// Reads an option as a specific type.
    ///
    /// `Option<T>` reads `None` values as `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Config::get`], or
    /// [`ConfigError::WrongAccessor`] if the value has another type.
    pub fn get_as<'a, T: FromValue<'a>>(&'a self, name: &str) -> Result<T, ConfigError> {
        let value = self.get(name)?;
        T::from_value(value).ok_or_else(|| ConfigError::WrongAccessor {
            option: name.to_string(),
            requested: T::TYPE_NAME,
            actual: value.value_type(),
        })
    }

    /// Where an option's value came from, or `None` if it is undeclared.
    #[must_use]
    pub fn origin(&self, name: &str) -> Option<Origin> {
        self.entries.get(name).map(|e| e.resolution.origin())
    }

    /// Returns `true` if the schema declares `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates over every declared option in schema order.
    pub fn iter(&self) -> impl Iterator<Item = ResolvedOption<'_>> {
        self.entries.iter().map(|(name, entry)| ResolvedOption {
            name: *name,
            expected: entry.expected,
            origin: entry.resolution.origin(),
            value: entry.resolution.value(),
        })
    }

    /// Names of the options that are unset.
    pub fn missing(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .filter(|(_, e)| e.resolution.origin() == Origin::Unset)
            .map(|(name, _)| *name)
    }

    /// Checks that each named option has a value.
    ///
    /// # Errors
    ///
    /// Returns the error for the first name that is undeclared or unset.
    pub fn require(&self, names: &[&str]) -> Result<(), ConfigError> {
        for name in names {
            self.get(name)?;
        }
        Ok(())
    }

    /// Number of declared options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no options are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
