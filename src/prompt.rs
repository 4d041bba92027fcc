//! Interactive input for parameters that were not given on the command line.

use crate::config::ParameterOptions;
use crate::error::Result;
use crate::resolver::value_to_string;
use dialoguer::Input;
use indexmap::IndexMap;
use serde_json::Value;

/// Source of answers to parameter questions.
pub trait Prompter {
    /// Asks `question` and returns the raw answer.
    fn ask(&self, question: &str, default: Option<String>) -> Result<String>;
}

/// Prompter reading answers from the terminal.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&self, question: &str, default: Option<String>) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(question);
        if let Some(default) = default {
            input = input.default(default);
        }
        Ok(input.interact_text()?)
    }
}

/// Asks for every parameter declared in `options` that has no value yet.
///
/// Answers are kept as typed, like `key=value` arguments.
pub fn prompt_missing_parameters(
    prompter: &dyn Prompter,
    options: &IndexMap<String, ParameterOptions>,
    values: &mut IndexMap<String, Value>,
) -> Result<()> {
    for (parameter, parameter_options) in options {
        if values.contains_key(parameter) {
            continue;
        }
        let question = parameter_options
            .question
            .clone()
            .unwrap_or_else(|| format!("Value for '{parameter}'"));
        let default = parameter_options.default.as_ref().map(value_to_string);
        let answer = prompter.ask(&question, default)?;
        values.insert(parameter.clone(), Value::String(answer));
    }
    Ok(())
}
