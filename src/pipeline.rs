//! Transformer chains.

use crate::context::Context;
use crate::error::{Error, Result};
use crate::registry::TransformerRegistry;
use log::trace;

/// Pipes `value` through the transformers named in `chain`, left to right.
///
/// An empty chain returns the value unchanged.
///
/// # Errors
/// * `Error::UnknownTransformer` for the first name missing from `transformers`;
///   the transformers after it are not run
/// * any error returned by a transformer, as is
pub fn apply_transformers<S: AsRef<str>>(
    value: String,
    transformers: &TransformerRegistry,
    chain: &[S],
    ctx: &Context<'_>,
) -> Result<String> {
    chain.iter().try_fold(value, |current, name| {
        let name = name.as_ref();
        let transformer = transformers
            .get(name)
            .ok_or_else(|| Error::UnknownTransformer { name: name.to_string() })?;
        let next = transformer(&current, ctx)?;
        trace!("Transformer '{name}': '{current}' -> '{next}'");
        Ok(next)
    })
}
