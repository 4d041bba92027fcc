//! Named functions and transformers available to placeholders.

use crate::context::Context;
use crate::error::{Error, Result};
use crate::grammar::is_valid_identifier;
use indexmap::IndexMap;
use std::fmt;

/// Signature of a transformer: refines a resolved value.
pub type TransformerFn = dyn Fn(&str, &Context<'_>) -> Result<String>;

/// Signature of a function: computes a value from the context alone.
pub type FunctionFn = dyn Fn(&Context<'_>) -> Result<String>;

/// Mapping from placeholder identifiers to callables.
///
/// Names are checked when they are registered: they must be expressible in
/// the placeholder grammar and unique within the registry.
pub struct Registry<F: ?Sized> {
    entries: IndexMap<String, Box<F>>,
}

pub type TransformerRegistry = Registry<TransformerFn>;
pub type FunctionRegistry = Registry<FunctionFn>;

impl<F: ?Sized> Registry<F> {
    pub fn new() -> Self {
        Self { entries: IndexMap::new() }
    }

    /// Adds an already boxed callable under `name`.
    ///
    /// # Errors
    /// * `Error::RegistrationError` if the name is not a valid identifier or
    ///   is already registered
    pub fn register_boxed<S: Into<String>>(&mut self, name: S, callable: Box<F>) -> Result<()> {
        let name = name.into();
        if !is_valid_identifier(&name) {
            return Err(Error::RegistrationError {
                name,
                reason: "names may only contain letters, digits, '_' and '-'".to_string(),
            });
        }
        if self.entries.contains_key(&name) {
            return Err(Error::RegistrationError {
                name,
                reason: "a callable with this name is already registered".to_string(),
            });
        }
        self.entries.insert(name, callable);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&F> {
        self.entries.get(name).map(|callable| &**callable)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Registry<TransformerFn> {
    pub fn register<S, T>(&mut self, name: S, transformer: T) -> Result<()>
    where
        S: Into<String>,
        T: Fn(&str, &Context<'_>) -> Result<String> + 'static,
    {
        self.register_boxed(name, Box::new(transformer))
    }
}

impl Registry<FunctionFn> {
    pub fn register<S, T>(&mut self, name: S, function: T) -> Result<()>
    where
        S: Into<String>,
        T: Fn(&Context<'_>) -> Result<String> + 'static,
    {
        self.register_boxed(name, Box::new(function))
    }
}

impl<F: ?Sized> Default for Registry<F> {
    fn default() -> Self {
        Registry::new()
    }
}

impl<F: ?Sized> fmt::Debug for Registry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
