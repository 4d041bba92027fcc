//! In-memory template trees.
//! Reads a template directory into an ordered tree of folder and file nodes.

use crate::error::{Error, Result};
use globset::GlobSet;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Payload of a [`TemplateNode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A directory and its entries, in listing order.
    Folder(Vec<TemplateNode>),
    /// A file and its contents decoded as text.
    File(String),
}

/// A folder or file of a template, before or after substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateNode {
    pub name: String,
    /// Directory this node was read from.
    pub origin_dir: PathBuf,
    /// Parent directory relative to the template root. Empty for top-level nodes.
    pub relative_dir: PathBuf,
    pub kind: NodeKind,
}

impl TemplateNode {
    pub fn folder<S: Into<String>, P: Into<PathBuf>>(
        name: S,
        origin_dir: P,
        relative_dir: P,
        children: Vec<TemplateNode>,
    ) -> Self {
        Self {
            name: name.into(),
            origin_dir: origin_dir.into(),
            relative_dir: relative_dir.into(),
            kind: NodeKind::Folder(children),
        }
    }

    pub fn file<S: Into<String>, P: Into<PathBuf>>(
        name: S,
        origin_dir: P,
        relative_dir: P,
        content: S,
    ) -> Self {
        Self {
            name: name.into(),
            origin_dir: origin_dir.into(),
            relative_dir: relative_dir.into(),
            kind: NodeKind::File(content.into()),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder(_))
    }

    /// Children of a folder node; empty for files.
    pub fn children(&self) -> &[TemplateNode] {
        match &self.kind {
            NodeKind::Folder(children) => children,
            NodeKind::File(_) => &[],
        }
    }

    /// Content of a file node; `None` for folders.
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File(content) => Some(content),
            NodeKind::Folder(_) => None,
        }
    }

    /// Path of this node relative to the template root.
    pub fn relative_path(&self) -> PathBuf {
        self.relative_dir.join(&self.name)
    }
}

fn filesystem_error(path: &Path, source: std::io::Error) -> Error {
    Error::FilesystemError { path: path.to_path_buf(), source }
}

fn read_content(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| filesystem_error(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// A folder whose entries are still being read.
struct OpenFolder {
    name: String,
    origin_dir: PathBuf,
    relative_dir: PathBuf,
    children: Vec<TemplateNode>,
}

impl OpenFolder {
    fn close(self) -> TemplateNode {
        TemplateNode::folder(self.name, self.origin_dir, self.relative_dir, self.children)
    }
}

/// Appends the innermost open folder to its parent.
fn close_folder(stack: &mut Vec<OpenFolder>) {
    if let Some(folder) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(folder.close());
        }
    }
}

/// Relative path of `path` below `root`.
fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

fn read_dir(root: &Path, ignored: &GlobSet) -> Result<Vec<TemplateNode>> {
    // The bottom entry stands for the template root; walkdir reports links
    // back to an ancestor as errors while it follows symlinks.
    let mut stack = vec![OpenFolder {
        name: String::new(),
        origin_dir: root.to_path_buf(),
        relative_dir: PathBuf::new(),
        children: Vec::new(),
    }];

    let walker = WalkDir::new(root).min_depth(1).follow_links(true).into_iter();
    let entries = walker.filter_entry(|entry| {
        let skip = entry.depth() > 0 && ignored.is_match(relative_to(root, entry.path()));
        if skip {
            debug!("Skipping {} from ignore patterns", entry.path().display());
        }
        !skip
    });

    for entry in entries {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::FilesystemError { path, source: e.into() }
        })?;
        while stack.len() > entry.depth() {
            close_folder(&mut stack);
        }

        let relative_path = relative_to(root, entry.path());
        let relative_dir = relative_path.parent().map(Path::to_path_buf).unwrap_or_default();
        let origin_dir = entry.path().parent().unwrap_or(root).to_path_buf();
        let name = entry.file_name().to_string_lossy().into_owned();
        debug!("Read template entry: {}", relative_path.display());

        if entry.file_type().is_dir() {
            stack.push(OpenFolder { name, origin_dir, relative_dir, children: Vec::new() });
        } else {
            let content = read_content(entry.path())?;
            if let Some(parent) = stack.last_mut() {
                parent.children.push(TemplateNode::file(name, origin_dir, relative_dir, content));
            }
        }
    }

    while stack.len() > 1 {
        close_folder(&mut stack);
    }
    Ok(stack.pop().map(|top| top.children).unwrap_or_default())
}

/// Reads a template directory into an ordered list of sibling nodes.
///
/// Entries come in the order the filesystem lists them. Entries whose
/// template-relative path matches `ignored` are left out.
///
/// # Errors
/// * `Error::FilesystemError` if the path does not exist, is not a directory
///   or any entry below it cannot be read
pub fn read_template_tree<P: AsRef<Path>>(
    template_root: P,
    ignored: &GlobSet,
) -> Result<Vec<TemplateNode>> {
    let template_root = template_root.as_ref();
    let metadata =
        fs::metadata(template_root).map_err(|e| filesystem_error(template_root, e))?;
    if !metadata.is_dir() {
        return Err(filesystem_error(
            template_root,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
        ));
    }

    debug!("Reading template tree from {}", template_root.display());
    read_dir(template_root, ignored)
}
