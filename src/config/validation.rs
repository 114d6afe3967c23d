//! Configuration sanitizing
//!
//! Resolution runs in two passes over a [`Schema`]:
//!
//! 1. **Validate**: every upper-case key the user supplied is checked. Known
//!    options of an accepted type are taken as-is; a value equal to the
//!    option's default is taken as the default; unknown keys only produce a
//!    warning; anything else is a type mismatch.
//! 2. **Finalize**: every option the user left out takes its default, or is
//!    marked unset when it has none.
//!
//! Each option moves out of `Unvalidated` exactly once, so a default is
//! never handed out twice. All mismatches are collected before failing.

use std::sync::Arc;

use crate::config::raw::RawConfig;
use crate::config::resolved::{Config, Resolution};
use crate::config::schema::{OptionSpec, Schema};
use crate::config::value::Value;
use crate::error::{ConfigError, ConfigWarning, TypeMismatch};

// ============================================================================
// Public API
// ============================================================================

/// Result of sanitizing a raw configuration.
#[derive(Debug)]
pub struct Sanitized {
    /// The resolved configuration, frozen for sharing.
    pub config: Arc<Config>,

    /// Non-fatal issues, one per unknown key.
    pub warnings: Vec<ConfigWarning>,
}

/// Validates raw configurations against a schema.
#[derive(Debug, Clone, Copy)]
pub struct Sanitizer<'s> {
    schema: &'s Schema,
}

impl<'s> Sanitizer<'s> {
    /// Creates a sanitizer for `schema`.
    #[must_use]
    pub const fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    /// Resolves every option in the schema against `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTypes`] listing every option supplied
    /// with a value of the wrong type.
    pub fn sanitize(&self, raw: &RawConfig) -> Result<Sanitized, ConfigError> {
        let mut slots: Vec<Slot<'s>> = self.schema.iter().map(Slot::new).collect();
        let mut warnings = Vec::new();
        let mut mismatches = Vec::new();

        for (name, value) in raw.options() {
            let Some(slot) = slots.iter_mut().find(|s| s.spec.name == name) else {
                let suggestion = self.schema.suggest(name);
                tracing::warn!(option = name, suggestion, "{name} is not a valid config option");
                warnings.push(ConfigWarning {
                    option: name.to_string(),
                    message: format!("{name} is not a valid config option"),
                    suggestion: suggestion.map(ToString::to_string),
                });
                continue;
            };

            if let Err(mismatch) = slot.validate(value) {
                tracing::error!("{mismatch}");
                mismatches.push(mismatch);
            }
        }

        if !mismatches.is_empty() {
            return Err(ConfigError::InvalidTypes { mismatches });
        }

        let config = Config::from_resolutions(
            slots
                .into_iter()
                .map(|slot| (slot.spec.name, slot.spec.expected, slot.finalize())),
        );

        tracing::debug!(
            options = config.len(),
            unset = config.missing().count(),
            warnings = warnings.len(),
            "configuration sanitized"
        );

        Ok(Sanitized {
            config: Arc::new(config),
            warnings,
        })
    }
}

// ============================================================================
// Per-Option State
// ============================================================================

/// Validation state of one option.
#[derive(Debug, Clone, PartialEq)]
enum OptionState {
    /// Not yet seen
    Unvalidated,
    /// User value of an accepted type
    Accepted(Value),
    /// User value equal to the default
    Defaulted(Value),
    /// User value of the wrong type
    Rejected,
}

#[derive(Debug)]
struct Slot<'s> {
    spec: &'s OptionSpec,
    state: OptionState,
}

impl<'s> Slot<'s> {
    const fn new(spec: &'s OptionSpec) -> Self {
        Self {
            spec,
            state: OptionState::Unvalidated,
        }
    }

    /// Moves the slot out of `Unvalidated` using the user's value.
    fn validate(&mut self, value: &Value) -> Result<(), TypeMismatch> {
        debug_assert_eq!(self.state, OptionState::Unvalidated);

        if self.spec.expected.accepts(value) {
            self.state = OptionState::Accepted(value.clone());
            return Ok(());
        }

        if let Some(default) = self.spec.default.as_ref().filter(|d| *d == value) {
            self.state = OptionState::Defaulted(default.clone());
            return Ok(());
        }

        self.state = OptionState::Rejected;
        Err(TypeMismatch {
            option: self.spec.name.to_string(),
            expected: self.spec.expected.type_names(),
            actual: value.value_type(),
        })
    }

    /// Terminal resolution; unvalidated options fall back to the default.
    fn finalize(self) -> Resolution {
        match self.state {
            OptionState::Accepted(value) => Resolution::Supplied(value),
            OptionState::Defaulted(value) => Resolution::Defaulted(value),
            OptionState::Unvalidated => self
                .spec
                .default
                .clone()
                .map_or(Resolution::Unset, Resolution::Defaulted),
            // sanitize() returns before finalizing a pass with rejections
            OptionState::Rejected => Resolution::Unset,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolved::Origin;
    use crate::config::schema::{Expected, SEQUENCE};
    use crate::config::value::ValueType;

    fn schema() -> Schema {
        Schema::builder()
            .option("SCAN_DELAY", Expected::Number)
            .option("BALANCE", Expected::Exactly(ValueType::Str))
            .option("GRID", Expected::OneOf(SEQUENCE))
            .option("SMART_THROTTLE", Expected::Number)
            .option("FORCED_KILL", Expected::Exactly(ValueType::Bool))
            .with_default("SCAN_DELAY", 10)
            .with_default("BALANCE", Value::None)
            .with_default("SMART_THROTTLE", false)
            .with_default("FORCED_KILL", Value::None)
            .build()
            .unwrap()
    }

    fn raw(entries: Vec<(&str, Value)>) -> RawConfig {
        entries.into_iter().collect()
    }

    #[test]
    fn test_supplied_value_is_accepted() {
        let schema = schema();
        let result = Sanitizer::new(&schema)
            .sanitize(&raw(vec![("SCAN_DELAY", Value::Int(15))]))
            .unwrap();
        assert_eq!(result.config.get("SCAN_DELAY").unwrap(), &Value::Int(15));
        assert_eq!(result.config.origin("SCAN_DELAY"), Some(Origin::Supplied));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_omitted_value_uses_default() {
        let schema = schema();
        let result = Sanitizer::new(&schema).sanitize(&RawConfig::new()).unwrap();
        assert_eq!(result.config.get("SCAN_DELAY").unwrap(), &Value::Int(10));
        assert_eq!(result.config.origin("SCAN_DELAY"), Some(Origin::Default));
    }

    #[test]
    fn test_none_default_reads_none() {
        let schema = schema();
        let result = Sanitizer::new(&schema).sanitize(&RawConfig::new()).unwrap();
        assert_eq!(result.config.get("BALANCE").unwrap(), &Value::None);
    }

    #[test]
    fn test_wrong_type_fails() {
        let schema = schema();
        let err = Sanitizer::new(&schema)
            .sanitize(&raw(vec![("SCAN_DELAY", Value::from("fast"))]))
            .unwrap_err();
        match err {
            ConfigError::InvalidTypes { mismatches } => {
                assert_eq!(mismatches.len(), 1);
                assert_eq!(mismatches[0].option, "SCAN_DELAY");
                assert_eq!(mismatches[0].expected, vec!["number"]);
                assert_eq!(mismatches[0].actual, ValueType::Str);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_every_mismatch_is_reported() {
        let schema = schema();
        let err = Sanitizer::new(&schema)
            .sanitize(&raw(vec![
                ("SCAN_DELAY", Value::from("fast")),
                ("GRID", Value::Int(4)),
            ]))
            .unwrap_err();
        assert_eq!(err.options(), vec!["SCAN_DELAY", "GRID"]);
    }

    #[test]
    fn test_value_equal_to_default_bypasses_type_check() {
        let schema = schema();
        let result = Sanitizer::new(&schema)
            .sanitize(&raw(vec![
                ("FORCED_KILL", Value::None),
                ("BALANCE", Value::None),
            ]))
            .unwrap();
        assert_eq!(result.config.get("FORCED_KILL").unwrap(), &Value::None);
        assert_eq!(result.config.origin("FORCED_KILL"), Some(Origin::Default));
        assert_eq!(result.config.origin("BALANCE"), Some(Origin::Default));
    }

    #[test]
    fn test_bool_for_number_is_supplied() {
        let schema = schema();
        let result = Sanitizer::new(&schema)
            .sanitize(&raw(vec![
                ("SMART_THROTTLE", Value::Bool(true)),
                ("SCAN_DELAY", Value::Bool(false)),
            ]))
            .unwrap();
        assert_eq!(
            result.config.get("SMART_THROTTLE").unwrap(),
            &Value::Bool(true)
        );
        assert_eq!(result.config.origin("SMART_THROTTLE"), Some(Origin::Supplied));
        assert_eq!(result.config.origin("SCAN_DELAY"), Some(Origin::Supplied));
    }

    #[test]
    fn test_value_differing_from_default_is_rejected() {
        let schema = schema();
        let err = Sanitizer::new(&schema)
            .sanitize(&raw(vec![
                ("SMART_THROTTLE", Value::from("fast")),
                ("FORCED_KILL", Value::Int(1)),
            ]))
            .unwrap_err();
        assert_eq!(err.options(), vec!["SMART_THROTTLE", "FORCED_KILL"]);
    }

    #[test]
    fn test_unknown_key_warns_once() {
        let schema = schema();
        let result = Sanitizer::new(&schema)
            .sanitize(&raw(vec![("UNKNOWN_OPTION", Value::Int(1))]))
            .unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].option, "UNKNOWN_OPTION");
        assert!(!result.config.contains("UNKNOWN_OPTION"));
        assert!(result.config.get("UNKNOWN_OPTION").is_err());
    }

    #[test]
    fn test_unknown_key_gets_suggestion() {
        let schema = schema();
        let result = Sanitizer::new(&schema)
            .sanitize(&raw(vec![("SCAN_DELY", Value::Int(1))]))
            .unwrap();
        assert_eq!(result.warnings[0].suggestion.as_deref(), Some("SCAN_DELAY"));
    }

    #[test]
    fn test_lower_case_names_are_ignored() {
        let schema = schema();
        let result = Sanitizer::new(&schema)
            .sanitize(&raw(vec![("scan_delay", Value::from("fast"))]))
            .unwrap();
        assert!(result.warnings.is_empty());
        assert_eq!(result.config.get("SCAN_DELAY").unwrap(), &Value::Int(10));
    }

    #[test]
    fn test_required_option_is_unset() {
        let schema = schema();
        let result = Sanitizer::new(&schema).sanitize(&RawConfig::new()).unwrap();
        assert_eq!(result.config.origin("GRID"), Some(Origin::Unset));
        assert!(matches!(
            result.config.get("GRID"),
            Err(ConfigError::MissingRequired { .. })
        ));
    }

    #[test]
    fn test_slot_transitions_once() {
        let spec = OptionSpec {
            name: "SCAN_DELAY",
            expected: Expected::Number,
            default: Some(Value::Int(10)),
        };
        let mut slot = Slot::new(&spec);
        slot.validate(&Value::Int(15)).unwrap();
        assert_eq!(slot.state, OptionState::Accepted(Value::Int(15)));
        assert_eq!(slot.finalize(), Resolution::Supplied(Value::Int(15)));
    }

    #[test]
    fn test_rejected_slot_records_state() {
        let spec = OptionSpec {
            name: "SCAN_DELAY",
            expected: Expected::Number,
            default: Some(Value::Int(10)),
        };
        let mut slot = Slot::new(&spec);
        assert!(slot.validate(&Value::from("fast")).is_err());
        assert_eq!(slot.state, OptionState::Rejected);
    }

    #[test]
    fn test_resolved_config_is_shared_not_copied() {
        let schema = schema();
        let result = Sanitizer::new(&schema).sanitize(&RawConfig::new()).unwrap();
        let reader = Arc::clone(&result.config);
        let first = result.config.get("SCAN_DELAY").unwrap();
        let second = reader.get("SCAN_DELAY").unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
