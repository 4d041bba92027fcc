//! Built-in case transformers.

use crate::error::Result;
use crate::registry::TransformerRegistry;
use cruet::Inflector;

/// Names and implementations of the built-in transformers.
pub const BUILTIN_TRANSFORMERS: [(&str, fn(&str) -> String); 11] = [
    ("camelCase", |s| s.to_camel_case()),
    ("pascalCase", |s| s.to_pascal_case()),
    ("snakeCase", |s| s.to_snake_case()),
    ("kebabCase", |s| s.to_kebab_case()),
    ("screamingSnakeCase", |s| s.to_screaming_snake_case()),
    ("titleCase", |s| s.to_title_case()),
    ("sentenceCase", |s| s.to_sentence_case()),
    ("trainCase", |s| s.to_train_case()),
    ("upperCase", |s| s.to_uppercase()),
    ("lowerCase", |s| s.to_lowercase()),
    ("capitalize", capitalize),
];

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Looks up a built-in transformer by name.
pub fn builtin(name: &str) -> Option<fn(&str) -> String> {
    BUILTIN_TRANSFORMERS.iter().find(|(builtin, _)| *builtin == name).map(|(_, f)| *f)
}

/// Registers every built-in whose name is still free in `registry`.
pub fn register_builtins(registry: &mut TransformerRegistry) -> Result<()> {
    for (name, transform) in BUILTIN_TRANSFORMERS {
        if !registry.contains(name) {
            registry.register(name, move |value, _| Ok(transform(value)))?;
        }
    }
    Ok(())
}
