//! Template discovery.
//! Every `scaffolder/` directory found in the start directory or one of its
//! ancestors contributes its sub-directories as templates.

use crate::constants::TEMPLATES_DIR;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Finds the templates available from `start_dir`.
///
/// Templates in directories closer to `start_dir` override templates of the
/// same name further up. The result is ordered by name.
pub fn discover_templates<P: AsRef<Path>>(start_dir: P) -> Result<IndexMap<String, PathBuf>> {
    let mut templates = IndexMap::new();
    let ancestors: Vec<&Path> = start_dir.as_ref().ancestors().collect();

    for ancestor in ancestors.into_iter().rev() {
        let templates_dir = ancestor.join(TEMPLATES_DIR);
        if !templates_dir.is_dir() {
            continue;
        }
        debug!("Found templates in {}", templates_dir.display());

        for entry in WalkDir::new(&templates_dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::FilesystemError {
                path: templates_dir.clone(),
                source: e.into(),
            })?;
            if entry.file_type().is_dir() {
                let name = entry.file_name().to_string_lossy().into_owned();
                templates.insert(name, entry.into_path());
            }
        }
    }

    templates.sort_keys();
    Ok(templates)
}

/// Looks up the directory of `template`.
///
/// # Errors
/// * `Error::NoMatchingTemplate` if no template has that name
pub fn find_template<'a>(
    templates: &'a IndexMap<String, PathBuf>,
    template: &str,
) -> Result<&'a PathBuf> {
    templates
        .get(template)
        .ok_or_else(|| Error::NoMatchingTemplate { template: template.to_string() })
}
