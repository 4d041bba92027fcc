//! Placeholder resolution.
//! Turns placeholder tokens into their replacement text and substitutes
//! every placeholder of a name or file content.

use crate::config::Config;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::grammar::{find_placeholders, Placeholder};
use crate::pipeline::apply_transformers;
use crate::registry::{FunctionRegistry, TransformerRegistry};
use indexmap::IndexMap;
use log::trace;
use serde_json::Value;

/// Text used in place of a parameter value.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Resolves a single raw placeholder token.
///
/// # Errors
/// * `Error::MissingFunctionImplementation` if a function token names an
///   unregistered function
/// * `Error::MissingKeyValuePairs` if a value token's key has no value
/// * `Error::UnknownTransformer` if the transformer chain names an
///   unregistered transformer
/// * any error returned by the called function or transformers
pub fn resolve(
    token: &str,
    values: &IndexMap<String, Value>,
    transformers: &TransformerRegistry,
    functions: &FunctionRegistry,
    ctx: &Context<'_>,
) -> Result<String> {
    match Placeholder::parse(token) {
        Placeholder::Function { name } => {
            let function = functions.get(name).ok_or_else(|| {
                Error::MissingFunctionImplementation { function_key: name.to_string() }
            })?;
            function(ctx)
        }
        Placeholder::Value { key, transformers: chain } => {
            let value = values
                .get(key)
                .ok_or_else(|| Error::MissingKeyValuePairs { token: token.to_string() })?;
            apply_transformers(value_to_string(value), transformers, chain.as_slice(), ctx)
        }
    }
}

/// Substitutes placeholders using one set of values, transformers and functions.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    values: &'a IndexMap<String, Value>,
    transformers: &'a TransformerRegistry,
    functions: &'a FunctionRegistry,
}

impl<'a> Resolver<'a> {
    pub fn new(
        values: &'a IndexMap<String, Value>,
        transformers: &'a TransformerRegistry,
        functions: &'a FunctionRegistry,
    ) -> Self {
        Self { values, transformers, functions }
    }

    pub fn from_config(values: &'a IndexMap<String, Value>, config: &'a Config) -> Self {
        Self::new(values, &config.transformers, &config.functions)
    }

    pub fn resolve(&self, token: &str, ctx: &Context<'_>) -> Result<String> {
        resolve(token, self.values, self.transformers, self.functions, ctx)
    }

    /// Replaces every placeholder in `text`, failing on the first one that
    /// cannot be resolved.
    pub fn substitute(&self, text: &str, ctx: &Context<'_>) -> Result<String> {
        let mut output = String::with_capacity(text.len());
        let mut last = 0;

        for placeholder in find_placeholders(text) {
            let replacement = self.resolve(placeholder.as_str(), ctx)?;
            trace!("Resolved {} to '{}'", placeholder.as_str(), replacement);
            output.push_str(&text[last..placeholder.start()]);
            output.push_str(&replacement);
            last = placeholder.end();
        }

        output.push_str(&text[last..]);
        Ok(output)
    }
}
