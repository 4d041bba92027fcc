//! File and directory ignore pattern handling for templates.
//! This module processes .scaffolderignore files to exclude specific paths
//! from template trees, similar to .gitignore functionality.

use crate::constants::DEFAULT_IGNORE_PATTERNS;
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{fs::read_to_string, path::Path};

fn add_pattern(builder: &mut GlobSetBuilder, pattern: &str) -> Result<()> {
    let glob = Glob::new(pattern).map_err(|e| {
        Error::IgnoreError(format!(".scaffolderignore loading failed: {e}"))
    })?;
    builder.add(glob);
    Ok(())
}

/// Reads and processes the .scaffolderignore file to create a set of glob patterns.
///
/// # Arguments
/// * `ignore_path` - Path to the .scaffolderignore file
///
/// # Returns
/// * `Result<GlobSet>` - Set of compiled glob patterns, matched against
///   paths relative to the template root
///
/// # Notes
/// - If the file doesn't exist, only the default patterns are returned
/// - Each non-empty line that doesn't start with `#` is a glob pattern
/// - Invalid patterns result in an `IgnoreError`
///
/// # Example
/// ```ignore
/// # Contents of .scaffolderignore:
/// *.orig
/// **/node_modules/**
/// ```
pub fn parse_ignore_file<P: AsRef<Path>>(ignore_path: P) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in DEFAULT_IGNORE_PATTERNS {
        add_pattern(&mut builder, pattern)?;
    }

    if let Ok(contents) = read_to_string(ignore_path.as_ref()) {
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            add_pattern(&mut builder, line)?;
        }
    } else {
        debug!("{} does not exist", ignore_path.as_ref().display());
    }

    builder
        .build()
        .map_err(|e| Error::IgnoreError(format!(".scaffolderignore loading failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::IGNORE_FILE;
    use tempfile::TempDir;

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let ignore_path = temp_dir.path().join(IGNORE_FILE);
        std::fs::write(&ignore_path, "# generated files\n\n*.orig\n").unwrap();

        let glob_set = parse_ignore_file(&ignore_path).unwrap();
        assert!(glob_set.is_match("component.tsx.orig"));
        assert!(!glob_set.is_match("# generated files"));
    }

    #[test]
    fn test_invalid_pattern() {
        let temp_dir = TempDir::new().unwrap();
        let ignore_path = temp_dir.path().join(IGNORE_FILE);
        std::fs::write(&ignore_path, "a[\n").unwrap();

        assert!(matches!(parse_ignore_file(&ignore_path), Err(Error::IgnoreError(_))));
    }
}
