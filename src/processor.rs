//! Template processing orchestration.
//! Finds a template, loads its configuration and tree, gathers parameter
//! values and resolves every placeholder.

use crate::builtins::register_builtins;
use crate::commands::{discover_templates, find_template};
use crate::config::{config_dir, load_config, Config};
use crate::constants::IGNORE_FILE;
use crate::context::GlobalContext;
use crate::error::Result;
use crate::ignore::parse_ignore_file;
use crate::parameters::{parse_key_value_pairs, validate_parameters};
use crate::prompt::{prompt_missing_parameters, Prompter};
use crate::resolver::Resolver;
use crate::transformer::transform_tree;
use crate::tree::{read_template_tree, NodeKind, TemplateNode};
use indexmap::IndexMap;
use log::debug;
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// A template loaded from disk, before substitution.
#[derive(Debug)]
pub struct LoadedTemplate {
    pub name: String,
    pub path: PathBuf,
    pub config: Config,
    pub tree: Vec<TemplateNode>,
}

/// What to generate and where.
#[derive(Debug, Clone)]
pub struct TemplateRequest {
    pub template: String,
    /// Raw `key=value` arguments.
    pub parameters: Vec<String>,
    /// Directory templates are discovered from.
    pub load_from: PathBuf,
    /// Root the generated files are written under.
    pub target_root: PathBuf,
}

/// A template with every placeholder resolved.
#[derive(Debug)]
pub struct TransformedTemplate {
    pub templates: Vec<TemplateNode>,
    pub config: Config,
    pub global: GlobalContext,
}

/// Finds `template` from `load_from` and reads its configuration and tree.
///
/// The configuration is read fresh and the built-in transformers are added
/// under every name the configuration leaves free.
pub fn load_template<P: AsRef<Path>>(load_from: P, template: &str) -> Result<LoadedTemplate> {
    let templates = discover_templates(load_from)?;
    let path = find_template(&templates, template)?.clone();
    debug!("Using template '{}' from {}", template, path.display());

    let mut config = load_config(&path)?;
    register_builtins(&mut config.transformers)?;

    let ignored = parse_ignore_file(config_dir(&path).join(IGNORE_FILE))?;
    let tree = read_template_tree(&path, &ignored)?;

    Ok(LoadedTemplate { name: template.to_string(), path, config, tree })
}

/// Loads, parameterizes and resolves the requested template.
///
/// When a prompter is given, parameters declared in the configuration but
/// missing from the request are asked for. Values are validated before any
/// substitution happens.
pub fn transform_template(
    request: &TemplateRequest,
    prompter: Option<&dyn Prompter>,
) -> Result<TransformedTemplate> {
    let LoadedTemplate { name, path, config, tree } =
        load_template(&request.load_from, &request.template)?;

    let mut values = parse_key_value_pairs(&request.parameters)?;
    if let Some(prompter) = prompter {
        prompt_missing_parameters(prompter, &config.parameters_options, &mut values)?;
    }
    validate_parameters(&config.parameter_validators, &values)?;

    let global = GlobalContext::new(name, path, values, &request.target_root);
    let resolver = Resolver::from_config(&global.parameters_values, &config);
    let templates = transform_tree(&tree, &resolver, &global)?;

    Ok(TransformedTemplate { templates, config, global })
}

/// One line per template, `name: path`.
pub fn format_templates(templates: &IndexMap<String, PathBuf>) -> String {
    let mut output = String::new();
    for (name, path) in templates {
        let _ = writeln!(output, "{name}: {}", path.display());
    }
    output
}

/// Indented outline of a tree, optionally with file contents.
pub fn format_tree(tree: &[TemplateNode], show_content: bool) -> String {
    let mut output = String::new();
    write_tree(&mut output, tree, 0, show_content);
    output
}

fn write_tree(output: &mut String, nodes: &[TemplateNode], depth: usize, show_content: bool) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        match &node.kind {
            NodeKind::Folder(children) => {
                let _ = writeln!(output, "{indent}{}/", node.name);
                write_tree(output, children, depth + 1, show_content);
            }
            NodeKind::File(content) => {
                let _ = writeln!(output, "{indent}{}", node.name);
                if show_content {
                    for line in content.lines() {
                        let _ = writeln!(output, "{indent}  | {line}");
                    }
                }
            }
        }
    }
}
