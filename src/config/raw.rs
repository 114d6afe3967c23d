//! Raw user configuration
//!
//! The unvalidated name/value pairs a user wrote, in the order they wrote
//! them. Only names that are entirely upper-case count as options.

use indexmap::IndexMap;

use crate::config::value::Value;

/// User-supplied values before sanitizing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawConfig {
    values: IndexMap<String, Value>,
}

impl RawConfig {
    /// Creates an empty raw configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, replacing any earlier one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    /// Looks up a value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Iterates over every entry, options or not, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over the entries whose names mark them as options.
    pub fn options(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.iter().filter(|(name, _)| is_option_name(name))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawConfig
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Returns `true` if `name` has at least one cased character and no
/// lower-case ones.
#[must_use]
pub fn is_option_name(name: &str) -> bool {
    name.chars().any(char::is_uppercase) && !name.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_names() {
        assert!(is_option_name("SCAN_DELAY"));
        assert!(is_option_name("LV30_GMO"));
        assert!(is_option_name("_X"));
        assert!(!is_option_name("scan_delay"));
        assert!(!is_option_name("Scan_Delay"));
        assert!(!is_option_name("__path__"));
        assert!(!is_option_name("123"));
        assert!(!is_option_name(""));
    }

    #[test]
    fn test_options_skips_lower_case_names() {
        let raw: RawConfig = [
            ("SCAN_DELAY", Value::Int(15)),
            ("helper", Value::Int(1)),
            ("GRID", Value::tuple([4, 4])),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = raw.options().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["SCAN_DELAY", "GRID"]);
        assert_eq!(raw.len(), 3);
    }

    #[test]
    fn test_insert_replaces() {
        let mut raw = RawConfig::new();
        assert!(raw.insert("NOTIFY", true).is_none());
        assert_eq!(raw.insert("NOTIFY", false), Some(Value::Bool(true)));
        assert_eq!(raw.get("NOTIFY"), Some(&Value::Bool(false)));
    }
}
