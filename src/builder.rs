//! Writes resolved template trees to disk.

use crate::error::{Error, Result};
use crate::tree::{NodeKind, TemplateNode};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of writing one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildAction {
    CreateFolder(PathBuf),
    WriteFile(PathBuf),
}

/// Materializes a resolved tree under an entry point.
///
/// Files end up in `entry_point / path_prefix / folder`, where the prefix
/// and the wrapping folder are optional.
#[derive(Debug)]
pub struct TemplatesBuilder<'a> {
    templates: &'a [TemplateNode],
    template_name: String,
    entry_point: PathBuf,
    path_prefix: Option<PathBuf>,
    folder: Option<String>,
}

impl<'a> TemplatesBuilder<'a> {
    pub fn new<S: Into<String>>(templates: &'a [TemplateNode], template_name: S) -> Self {
        Self {
            templates,
            template_name: template_name.into(),
            entry_point: std::env::current_dir().unwrap_or_default(),
            path_prefix: None,
            folder: None,
        }
    }

    /// Wraps the generated files in a new folder.
    pub fn in_a_folder<S: Into<String>>(mut self, folder: S) -> Self {
        self.folder = Some(folder.into());
        self
    }

    pub fn with_custom_entry_point<P: Into<PathBuf>>(mut self, entry_point: P) -> Self {
        self.entry_point = entry_point.into();
        self
    }

    pub fn with_path_prefix<P: Into<PathBuf>>(mut self, path_prefix: P) -> Self {
        self.path_prefix = Some(path_prefix.into());
        self
    }

    /// Directory the tree is written into.
    pub fn full_path(&self) -> PathBuf {
        let mut path = self.entry_point.clone();
        if let Some(prefix) = &self.path_prefix {
            path.push(prefix);
        }
        if let Some(folder) = &self.folder {
            path.push(folder);
        }
        path
    }

    /// Writes every folder and file of the tree.
    ///
    /// # Errors
    /// * `Error::FolderAlreadyExists` if the wrapping folder already exists;
    ///   nothing is written in that case
    /// * `Error::IoError` if a folder or file cannot be written
    pub fn build(&self) -> Result<Vec<BuildAction>> {
        let root = self.full_path();

        if let Some(folder) = &self.folder {
            if root.exists() {
                return Err(Error::FolderAlreadyExists {
                    template: self.template_name.clone(),
                    folder: folder.clone(),
                    path: root,
                });
            }
        }

        fs::create_dir_all(&root)?;
        let mut actions = Vec::new();
        write_nodes(self.templates, &root, &mut actions)?;
        Ok(actions)
    }
}

fn write_nodes(nodes: &[TemplateNode], dir: &Path, actions: &mut Vec<BuildAction>) -> Result<()> {
    for node in nodes {
        let target = dir.join(&node.name);
        match &node.kind {
            NodeKind::Folder(children) => {
                debug!("Creating folder: {}", target.display());
                fs::create_dir_all(&target)?;
                actions.push(BuildAction::CreateFolder(target.clone()));
                write_nodes(children, &target, actions)?;
            }
            NodeKind::File(content) => {
                debug!("Writing file: {}", target.display());
                fs::write(&target, content)?;
                actions.push(BuildAction::WriteFile(target));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tree() -> Vec<TemplateNode> {
        vec![
            TemplateNode::folder(
                "auth",
                "/t",
                "",
                vec![TemplateNode::file("index.ts", "/t/x", "auth", "export {};")],
            ),
            TemplateNode::file("README.md", "/t", "", "# auth"),
        ]
    }

    #[test]
    fn test_full_path() {
        let tree = tree();
        let builder = TemplatesBuilder::new(&tree, "feature")
            .with_custom_entry_point("/repo")
            .with_path_prefix("src/features")
            .in_a_folder("auth");
        assert_eq!(builder.full_path(), PathBuf::from("/repo/src/features/auth"));
    }

    #[test]
    fn test_build_writes_tree() {
        let temp_dir = TempDir::new().unwrap();
        let tree = tree();
        let actions = TemplatesBuilder::new(&tree, "feature")
            .with_custom_entry_point(temp_dir.path())
            .with_path_prefix("src")
            .build()
            .unwrap();

        let root = temp_dir.path().join("src");
        assert_eq!(
            actions,
            vec![
                BuildAction::CreateFolder(root.join("auth")),
                BuildAction::WriteFile(root.join("auth/index.ts")),
                BuildAction::WriteFile(root.join("README.md")),
            ]
        );
        assert_eq!(fs::read_to_string(root.join("auth/index.ts")).unwrap(), "export {};");
    }

    #[test]
    fn test_existing_wrapping_folder() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("auth")).unwrap();
        let tree = tree();

        let result = TemplatesBuilder::new(&tree, "feature")
            .with_custom_entry_point(temp_dir.path())
            .in_a_folder("auth")
            .build();
        assert!(matches!(result, Err(Error::FolderAlreadyExists { folder, .. }) if folder == "auth"));
        assert!(!temp_dir.path().join("auth/README.md").exists());
    }
}
