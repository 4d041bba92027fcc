//! Pre and post generation hooks.
//! A hook is an executable declared in the template options. It receives
//! the global context as JSON on stdin.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use crate::config::TemplateOptions;
use crate::context::GlobalContext;
use crate::error::{Error, Result};

/// Resolves the pre and post hook paths of a template against `base_dir`.
pub fn get_hooks<P: AsRef<Path>>(
    base_dir: P,
    options: &TemplateOptions,
) -> (Option<PathBuf>, Option<PathBuf>) {
    let base_dir = base_dir.as_ref();
    let resolve = |hook: &Option<PathBuf>| hook.as_ref().map(|path| base_dir.join(path));
    (
        resolve(&options.hooks.pre_template_generation),
        resolve(&options.hooks.post_template_generation),
    )
}

/// Runs the hook at `script_path`, writing `context` to its stdin.
///
/// # Errors
/// * `Error::HookError` if the script cannot be started or exits unsuccessfully
pub fn run_hook<P: AsRef<Path>>(script_path: P, context: &GlobalContext) -> Result<()> {
    let script_path = script_path.as_ref();
    debug!("Running hook {}", script_path.display());

    let mut child = Command::new(script_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| Error::HookError(format!("cannot run '{}': {e}", script_path.display())))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(context.to_value().to_string().as_bytes())?;
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(Error::HookError(format!("Hook failed with status: {status}")));
    }

    Ok(())
}
