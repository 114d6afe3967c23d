//! Option schema
//!
//! A [`Schema`] is the fixed table of recognised option names, the value
//! types each one accepts, and the default used when the user leaves it
//! out. Tables are assembled with [`SchemaBuilder`], which rejects
//! duplicate entries and defaults for undeclared options.

use indexmap::IndexMap;

use crate::config::value::{Value, ValueType};
use crate::error::SchemaError;

// ============================================================================
// Type Descriptors
// ============================================================================

/// Tuple or list.
pub const SEQUENCE: &[ValueType] = &[ValueType::Tuple, ValueType::List];

/// String or path.
pub const PATH: &[ValueType] = &[ValueType::Str, ValueType::Path];

/// Any sequence or set.
pub const SET_SEQUENCE: &[ValueType] = &[
    ValueType::Tuple,
    ValueType::List,
    ValueType::Set,
    ValueType::FrozenSet,
];

/// Any sequence, set, or integer range.
pub const SET_SEQUENCE_RANGE: &[ValueType] = &[
    ValueType::Tuple,
    ValueType::List,
    ValueType::Range,
    ValueType::Set,
    ValueType::FrozenSet,
];

/// A single string or any sequence or set of them.
pub const STR_OR_SET_SEQUENCE: &[ValueType] = &[
    ValueType::Str,
    ValueType::Tuple,
    ValueType::List,
    ValueType::Set,
    ValueType::FrozenSet,
];

/// A socket address string or a `(host, port)` pair.
pub const ADDRESS: &[ValueType] = &[ValueType::Str, ValueType::Tuple, ValueType::List];

/// Value types an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// Anything, including `None`
    Any,
    /// Exactly one value type
    Exactly(ValueType),
    /// Integer, float, or bool
    Number,
    /// Any of several value types
    OneOf(&'static [ValueType]),
}

impl Expected {
    /// Returns `true` if `value` has an accepted type.
    ///
    /// Booleans count as integers, so they satisfy both `int` and `number`.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        let actual = value.value_type();
        match self {
            Self::Any => true,
            Self::Exactly(ValueType::Int) => matches!(actual, ValueType::Int | ValueType::Bool),
            Self::Exactly(expected) => *expected == actual,
            Self::Number => matches!(
                actual,
                ValueType::Int | ValueType::Float | ValueType::Bool
            ),
            Self::OneOf(types) => types.contains(&actual),
        }
    }

    /// Names of the accepted types, as shown in error messages.
    #[must_use]
    pub fn type_names(&self) -> Vec<&'static str> {
        match self {
            Self::Any => vec!["any"],
            Self::Exactly(t) => vec![t.name()],
            Self::Number => vec!["number"],
            Self::OneOf(types) => types.iter().map(|t| t.name()).collect(),
        }
    }
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.type_names().join(" | "))
    }
}

// ============================================================================
// Options
// ============================================================================

/// One declared option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    /// Option name, upper-case by convention
    pub name: &'static str,

    /// Accepted value types
    pub expected: Expected,

    /// Fallback value. `Some(Value::None)` means unset is acceptable;
    /// `None` means the option is required.
    pub default: Option<Value>,
}

impl OptionSpec {
    /// Returns `true` if the option has no default.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// The table of declared options.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    options: IndexMap<&'static str, OptionSpec>,
}

impl Schema {
    /// Starts a new table.
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Looks up an option by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.options.get(name)
    }

    /// Iterates over the options in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options.values()
    }

    /// Number of declared options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns `true` if no options are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Suggests a declared option name for a misspelled one.
    ///
    /// Returns the closest match if its Damerau-Levenshtein distance is ≤ 3.
    #[must_use]
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        closest_name(input, self.options.keys().copied())
    }
}

/// Returns the candidate closest to `input` within Damerau-Levenshtein
/// distance 3.
pub fn closest_name(
    input: &str,
    candidates: impl IntoIterator<Item = &'static str>,
) -> Option<&'static str> {
    candidates
        .into_iter()
        .map(|name| (name, strsim::damerau_levenshtein(input, name)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(name, _)| name)
}

// ============================================================================
// Builder
// ============================================================================

/// Collects type and default tables and checks them against each other.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    types: IndexMap<&'static str, Expected>,
    defaults: IndexMap<&'static str, Value>,
    errors: Vec<SchemaError>,
}

impl SchemaBuilder {
    /// Declares an option.
    #[must_use]
    pub fn option(mut self, name: &'static str, expected: Expected) -> Self {
        if self.types.insert(name, expected).is_some() {
            self.errors
                .push(SchemaError::DuplicateOption(name.to_string()));
        }
        self
    }

    /// Registers the default for a declared option.
    #[must_use]
    pub fn with_default(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        if self.defaults.insert(name, value.into()).is_some() {
            self.errors
                .push(SchemaError::DuplicateDefault(name.to_string()));
        }
        self
    }

    /// Finishes the table.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: a duplicate option, a duplicate
    /// default, or a default for an option that was never declared.
    pub fn build(mut self) -> Result<Schema, SchemaError> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(err);
        }

        if let Some(orphan) = self.defaults.keys().find(|k| !self.types.contains_key(*k)) {
            return Err(SchemaError::OrphanDefault((*orphan).to_string()));
        }

        let options = self
            .types
            .into_iter()
            .map(|(name, expected)| {
                let spec = OptionSpec {
                    name,
                    expected,
                    default: self.defaults.shift_remove(name),
                };
                (name, spec)
            })
            .collect();

        Ok(Schema { options })
    }
}

// ============================================================================
// Tests
// ============================================================================
