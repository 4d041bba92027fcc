//! Parameter values supplied on the command line and their validation.

use crate::config::ParameterOptions;
use crate::error::{Error, Result};
use crate::resolver::value_to_string;
use indexmap::IndexMap;
use jsonschema::Validator;
use log::debug;
use regex::Regex;
use serde_json::Value;
use std::fmt;

/// Parses `key=value` arguments into an ordered map.
///
/// The value is everything after the first `=`, kept as typed. A later pair
/// overrides an earlier one with the same key.
///
/// # Errors
/// * `Error::InvalidParameterFormat` if an argument has no `=` or an empty key
pub fn parse_key_value_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<IndexMap<String, Value>> {
    let mut values = IndexMap::new();
    for pair in pairs {
        let pair = pair.as_ref();
        let (key, value) = pair
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| Error::InvalidParameterFormat(pair.to_string()))?;
        values.insert(key.trim().to_string(), Value::String(value.to_string()));
    }
    Ok(values)
}

/// Numeric reading of a textual value, used when a schema expects a number.
fn as_number(value: &Value) -> Option<Value> {
    let Value::String(text) = value else {
        return None;
    };
    if let Ok(number) = text.parse::<i64>() {
        return Some(Value::from(number));
    }
    text.parse::<f64>().ok().filter(|number| number.is_finite()).map(Value::from)
}

/// Compiled checks of a single parameter.
pub struct ParameterValidator {
    pattern: Option<Regex>,
    schema: Option<Validator>,
    message: Option<String>,
}

impl ParameterValidator {
    /// Compiles the pattern and schema of `options`.
    ///
    /// # Errors
    /// Returns the compiler's message when the pattern or schema is invalid.
    pub fn new(options: &ParameterOptions) -> std::result::Result<Self, String> {
        let pattern = options
            .pattern
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|e| e.to_string())?;
        let schema = options
            .schema
            .as_ref()
            .map(jsonschema::validator_for)
            .transpose()
            .map_err(|e| e.to_string())?;
        Ok(Self { pattern, schema, message: options.message.clone() })
    }

    /// Validates `value`, returning the failure message if it is rejected.
    pub fn validate(&self, value: &Value) -> Option<String> {
        let failure = self.pattern_failure(value).or_else(|| self.schema_failure(value))?;
        Some(self.message.clone().unwrap_or(failure))
    }

    fn pattern_failure(&self, value: &Value) -> Option<String> {
        let pattern = self.pattern.as_ref()?;
        let text = value_to_string(value);
        if pattern.is_match(&text) {
            None
        } else {
            Some(format!("'{text}' does not match {}", pattern.as_str()))
        }
    }

    /// Values given as text also pass when their numeric reading does.
    fn schema_failure(&self, value: &Value) -> Option<String> {
        let schema = self.schema.as_ref()?;
        if schema.is_valid(value) || as_number(value).is_some_and(|n| schema.is_valid(&n)) {
            return None;
        }
        schema.iter_errors(value).next().map(|e| e.to_string())
    }
}

impl fmt::Debug for ParameterValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterValidator")
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("schema", &self.schema.is_some())
            .field("message", &self.message)
            .finish()
    }
}

/// Validates every supplied parameter that has a validator.
///
/// # Errors
/// * `Error::InvalidParameterValue` for the first rejected value
pub fn validate_parameters(
    validators: &IndexMap<String, ParameterValidator>,
    values: &IndexMap<String, Value>,
) -> Result<()> {
    for (parameter, value) in values {
        let Some(validator) = validators.get(parameter) else {
            continue;
        };
        if let Some(message) = validator.validate(value) {
            return Err(Error::InvalidParameterValue { parameter: parameter.clone(), message });
        }
        debug!("Parameter '{parameter}' is valid");
    }
    Ok(())
}
