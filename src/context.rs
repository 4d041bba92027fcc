//! Substitution contexts.
//!
//! Every substitution sees a [`Context`]: the run-wide [`GlobalContext`]
//! combined with the [`LocalContext`] of the node being resolved.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

/// Run-wide values, created once before a tree is transformed.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalContext {
    pub template_name: String,
    pub template_root: PathBuf,
    pub parameters_values: IndexMap<String, Value>,
    pub target_root: PathBuf,
}

impl GlobalContext {
    pub fn new<S, P, T>(
        template_name: S,
        template_root: P,
        parameters_values: IndexMap<String, Value>,
        target_root: T,
    ) -> Self
    where
        S: Into<String>,
        P: Into<PathBuf>,
        T: Into<PathBuf>,
    {
        Self {
            template_name: template_name.into(),
            template_root: template_root.into(),
            parameters_values,
            target_root: target_root.into(),
        }
    }

    /// Flattened key/value view, as handed to hooks and config functions.
    pub fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }

    fn to_map(&self) -> Map<String, Value> {
        let parameters: Map<String, Value> = self
            .parameters_values
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let mut map = Map::new();
        map.insert("templateName".into(), Value::String(self.template_name.clone()));
        map.insert("templateRoot".into(), path_value(&self.template_root));
        map.insert("parametersValues".into(), Value::Object(parameters));
        map.insert("targetRoot".into(), path_value(&self.target_root));
        map
    }
}

/// What part of a node is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    FileName,
    FileContent,
    Folder,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::FileName => "FILE_NAME",
            NodeType::FileContent => "FILE_CONTENT",
            NodeType::Folder => "FOLDER",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-node values, rebuilt for every substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalContext {
    pub file_name: String,
    pub node_type: NodeType,
    /// Directory the node will be written to.
    pub current_file_path: PathBuf,
}

impl LocalContext {
    pub fn new<S: Into<String>, P: Into<PathBuf>>(
        file_name: S,
        node_type: NodeType,
        current_file_path: P,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            node_type,
            current_file_path: current_file_path.into(),
        }
    }

    fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("fileName".into(), Value::String(self.file_name.clone()));
        map.insert("type".into(), Value::String(self.node_type.to_string()));
        map.insert("currentFilePath".into(), path_value(&self.current_file_path));
        map
    }
}

/// Immutable combination of a global and a local context.
///
/// Local fields take precedence over global fields of the same name in
/// [`Context::to_value`].
#[derive(Debug, Clone)]
pub struct Context<'a> {
    global: &'a GlobalContext,
    local: LocalContext,
}

impl<'a> Context<'a> {
    pub fn new(global: &'a GlobalContext, local: LocalContext) -> Self {
        Self { global, local }
    }

    pub fn global(&self) -> &GlobalContext {
        self.global
    }

    pub fn local(&self) -> &LocalContext {
        &self.local
    }

    pub fn template_name(&self) -> &str {
        &self.global.template_name
    }

    pub fn target_root(&self) -> &Path {
        &self.global.target_root
    }

    pub fn file_name(&self) -> &str {
        &self.local.file_name
    }

    pub fn node_type(&self) -> NodeType {
        self.local.node_type
    }

    pub fn current_file_path(&self) -> &Path {
        &self.local.current_file_path
    }

    pub fn parameter(&self, key: &str) -> Option<&Value> {
        self.global.parameters_values.get(key)
    }

    /// Flattened key/value view of both contexts, local fields winning.
    pub fn to_value(&self) -> Value {
        let mut map = self.global.to_map();
        map.extend(self.local.to_map());
        Value::Object(map)
    }
}

fn path_value(path: &Path) -> Value {
    Value::String(path.display().to_string())
}
