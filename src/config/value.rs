//! Option values
//!
//! A configuration value is one of a fixed set of categories. The schema
//! matches on [`ValueType`] rather than inspecting values at runtime.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

// ============================================================================
// Value Types
// ============================================================================

/// Runtime category of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Explicit null
    None,
    /// `true` / `false`
    Bool,
    /// Signed integer
    Int,
    /// Floating point number
    Float,
    /// UTF-8 string
    Str,
    /// Byte string
    Bytes,
    /// Filesystem path
    Path,
    /// Fixed sequence
    Tuple,
    /// Sequence
    List,
    /// Set of hashable scalars
    Set,
    /// Immutable set of hashable scalars
    FrozenSet,
    /// Integer range
    Range,
    /// Mapping with hashable scalar keys
    Dict,
    /// Date and time without offset
    Timestamp,
}

impl ValueType {
    /// Short name used in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Bytes => "bytes",
            Self::Path => "path",
            Self::Tuple => "tuple",
            Self::List => "list",
            Self::Set => "set",
            Self::FrozenSet => "frozenset",
            Self::Range => "range",
            Self::Dict => "dict",
            Self::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Keys
// ============================================================================

/// Hashable scalar used as a set member or mapping key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Boolean key
    Bool(bool),
    /// Integer key
    Int(i64),
    /// String key
    Str(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl Key {
    /// Key text without quoting, used for JSON object keys.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Str(s) => serializer.serialize_str(s),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

// ============================================================================
// Ranges
// ============================================================================

/// Half-open integer range with a non-zero step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSpec {
    /// First value
    pub start: i64,
    /// Exclusive bound
    pub stop: i64,
    /// Increment, never zero
    pub step: i64,
}

impl RangeSpec {
    /// Creates a range, or `None` when `step` is zero.
    #[must_use]
    pub const fn new(start: i64, stop: i64, step: i64) -> Option<Self> {
        if step == 0 {
            None
        } else {
            Some(Self { start, stop, step })
        }
    }

    /// Returns `true` if `value` is produced by the range.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        let in_bounds = if self.step > 0 {
            self.start <= value && value < self.stop
        } else {
            self.stop < value && value <= self.start
        };
        in_bounds
            && value
                .checked_sub(self.start)
                .and_then(|offset| offset.checked_rem(self.step))
                == Some(0)
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.step == 1 {
            write!(f, "range({}, {})", self.start, self.stop)
        } else {
            write!(f, "range({}, {}, {})", self.start, self.stop, self.step)
        }
    }
}

// ============================================================================
// Values
// ============================================================================

/// A configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit null
    None,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Float
    Float(f64),
    /// String
    Str(String),
    /// Byte string
    Bytes(Vec<u8>),
    /// Filesystem path
    Path(PathBuf),
    /// Fixed sequence
    Tuple(Vec<Value>),
    /// Sequence
    List(Vec<Value>),
    /// Set
    Set(BTreeSet<Key>),
    /// Immutable set
    FrozenSet(BTreeSet<Key>),
    /// Integer range
    Range(RangeSpec),
    /// Ordered mapping
    Dict(IndexMap<Key, Value>),
    /// Date and time
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Returns the runtime category of this value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::None => ValueType::None,
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::Float(_) => ValueType::Float,
            Self::Str(_) => ValueType::Str,
            Self::Bytes(_) => ValueType::Bytes,
            Self::Path(_) => ValueType::Path,
            Self::Tuple(_) => ValueType::Tuple,
            Self::List(_) => ValueType::List,
            Self::Set(_) => ValueType::Set,
            Self::FrozenSet(_) => ValueType::FrozenSet,
            Self::Range(_) => ValueType::Range,
            Self::Dict(_) => ValueType::Dict,
            Self::Timestamp(_) => ValueType::Timestamp,
        }
    }

    /// Returns `true` for [`Value::None`].
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Builds a tuple.
    pub fn tuple<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Builds a list.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Builds a set.
    pub fn set<I, K>(items: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        Self::Set(items.into_iter().map(Into::into).collect())
    }

    /// Builds a mapping, keeping insertion order.
    pub fn dict<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Self>,
    {
        Self::Dict(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns the elements of a tuple or list.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Tuple(items) | Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the integer value of an `Int`, or 0/1 for a `Bool`.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<PathBuf> for Value {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl From<RangeSpec> for Value {
    fn from(value: RangeSpec) -> Self {
        Self::Range(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

fn write_joined<'a, T, I>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    T: fmt::Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    for (idx, item) in items.into_iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Bytes(bytes) => write!(f, "b{:?}", String::from_utf8_lossy(bytes)),
            Self::Path(p) => write!(f, "path({:?})", p.display().to_string()),
            Self::Tuple(items) => {
                f.write_str("(")?;
                write_joined(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Self::List(items) => {
                f.write_str("[")?;
                write_joined(f, items)?;
                f.write_str("]")
            }
            Self::Set(keys) | Self::FrozenSet(keys) => {
                let prefix = if matches!(self, Self::FrozenSet(_)) {
                    "frozenset"
                } else {
                    "set"
                };
                if keys.is_empty() {
                    return write!(f, "{prefix}()");
                }
                write!(f, "{prefix}({{")?;
                write_joined(f, keys)?;
                f.write_str("})")
            }
            Self::Range(range) => write!(f, "{range}"),
            Self::Dict(map) => {
                f.write_str("{")?;
                for (idx, (k, v)) in map.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Self::Timestamp(ts) => write!(f, "{ts}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::None => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::Str(s) => serializer.serialize_str(s),
            Self::Bytes(bytes) => serializer.serialize_str(&String::from_utf8_lossy(bytes)),
            Self::Path(p) => p.serialize(serializer),
            Self::Tuple(items) | Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Set(keys) | Self::FrozenSet(keys) => {
                let mut seq = serializer.serialize_seq(Some(keys.len()))?;
                for key in keys {
                    seq.serialize_element(key)?;
                }
                seq.end()
            }
            Self::Range(range) => {
                let mut state = serializer.serialize_struct("Range", 3)?;
                state.serialize_field("start", &range.start)?;
                state.serialize_field("stop", &range.stop)?;
                state.serialize_field("step", &range.step)?;
                state.end()
            }
            Self::Dict(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(&k.label(), v)?;
                }
                map.end()
            }
            Self::Timestamp(ts) => ts.serialize(serializer),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
