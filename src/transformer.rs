//! Template tree transformation.
//! Maps a raw template tree onto a tree of the same shape whose folder names,
//! file names and file contents have every placeholder resolved.

use crate::context::{Context, GlobalContext, LocalContext, NodeType};
use crate::error::Result;
use crate::resolver::Resolver;
use crate::tree::{NodeKind, TemplateNode};
use log::debug;
use std::path::{Path, PathBuf};

/// Resolves every placeholder of `tree`.
///
/// Each node is given a [`LocalContext`] whose `current_file_path` is the
/// directory it will be written to: `global.target_root` joined with the
/// resolved names of its ancestor folders.
///
/// # Errors
/// The first resolution error aborts the whole transformation and is
/// returned as is; no partial tree is produced.
pub fn transform_tree(
    tree: &[TemplateNode],
    resolver: &Resolver<'_>,
    global: &GlobalContext,
) -> Result<Vec<TemplateNode>> {
    debug!("Transforming template '{}'", global.template_name);
    transform_nodes(tree, resolver, global, Path::new(""))
}

fn transform_nodes(
    nodes: &[TemplateNode],
    resolver: &Resolver<'_>,
    global: &GlobalContext,
    resolved_dir: &Path,
) -> Result<Vec<TemplateNode>> {
    nodes.iter().map(|node| transform_node(node, resolver, global, resolved_dir)).collect()
}

fn transform_node(
    node: &TemplateNode,
    resolver: &Resolver<'_>,
    global: &GlobalContext,
    resolved_dir: &Path,
) -> Result<TemplateNode> {
    let current_file_path = global.target_root.join(resolved_dir);
    let local = |node_type| LocalContext::new(&node.name, node_type, &current_file_path);

    let (name, kind) = match &node.kind {
        NodeKind::Folder(children) => {
            let ctx = Context::new(global, local(NodeType::Folder));
            let name = resolver.substitute(&node.name, &ctx)?;
            let children = transform_nodes(children, resolver, global, &resolved_dir.join(&name))?;
            (name, NodeKind::Folder(children))
        }
        NodeKind::File(content) => {
            let name_ctx = Context::new(global, local(NodeType::FileName));
            let name = resolver.substitute(&node.name, &name_ctx)?;
            let content_ctx = Context::new(global, local(NodeType::FileContent));
            let content = resolver.substitute(content, &content_ctx)?;
            (name, NodeKind::File(content))
        }
    };

    if name != node.name {
        debug!("Resolved '{}' to '{}'", node.relative_path().display(), name);
    }

    Ok(TemplateNode {
        name,
        origin_dir: node.origin_dir.clone(),
        relative_dir: PathBuf::from(resolved_dir),
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::registry::{FunctionRegistry, TransformerRegistry};
    use indexmap::IndexMap;
    use serde_json::json;

    fn global(values: IndexMap<String, serde_json::Value>) -> GlobalContext {
        GlobalContext::new("feature", "/repo/scaffolder/feature", values, "/repo/src")
    }

    fn file(name: &str, relative_dir: &str, content: &str) -> TemplateNode {
        let origin = Path::new("/repo/scaffolder/feature").join(relative_dir);
        TemplateNode::file(name.to_string(), origin, PathBuf::from(relative_dir), content.to_string())
    }

    fn folder(name: &str, relative_dir: &str, children: Vec<TemplateNode>) -> TemplateNode {
        let origin = Path::new("/repo/scaffolder/feature").join(relative_dir);
        TemplateNode::folder(name, origin, PathBuf::from(relative_dir), children)
    }

    #[test]
    fn test_identity_without_placeholders() {
        let tree = vec![
            folder("src", "", vec![file("main.rs", "src", "fn main() {}")]),
            file("README.md", "", "# Readme"),
        ];
        let global = global(IndexMap::new());
        let (transformers, functions) = (TransformerRegistry::new(), FunctionRegistry::new());
        let resolver = Resolver::new(&global.parameters_values, &transformers, &functions);

        assert_eq!(transform_tree(&tree, &resolver, &global).unwrap(), tree);
    }

    #[test]
    fn test_folder_name_resolved_independently_of_children() {
        let mut values = IndexMap::new();
        values.insert("featureName".to_string(), json!("auth"));
        let global = global(values);

        let tree = vec![folder(
            "{{featureName}}",
            "",
            vec![file("index.ts", "{{featureName}}", "export {};")],
        )];
        let (transformers, functions) = (TransformerRegistry::new(), FunctionRegistry::new());
        let resolver = Resolver::new(&global.parameters_values, &transformers, &functions);

        let resolved = transform_tree(&tree, &resolver, &global).unwrap();
        assert_eq!(resolved[0].name, "auth");
        let child = &resolved[0].children()[0];
        assert_eq!(child.name, "index.ts");
        assert_eq!(child.content(), Some("export {};"));
        assert_eq!(child.relative_dir, PathBuf::from("auth"));
    }

    #[test]
    fn test_name_and_content_use_their_own_context() {
        let global = global(IndexMap::new());
        let transformers = TransformerRegistry::new();
        let mut functions = FunctionRegistry::new();
        functions.register("kind", |ctx| Ok(ctx.node_type().to_string())).unwrap();
        functions
            .register("location", |ctx| Ok(ctx.current_file_path().display().to_string()))
            .unwrap();
        let resolver = Resolver::new(&global.parameters_values, &transformers, &functions);

        let tree = vec![folder(
            "{{kind()}}",
            "",
            vec![folder("b", "FOLDER", vec![file("{{kind()}}.txt", "FOLDER/b", "{{kind()}} {{location()}}")])],
        )];

        let resolved = transform_tree(&tree, &resolver, &global).unwrap();
        assert_eq!(resolved[0].name, "FOLDER");
        let leaf = &resolved[0].children()[0].children()[0];
        assert_eq!(leaf.name, "FILE_NAME.txt");
        assert_eq!(leaf.content(), Some("FILE_CONTENT /repo/src/FOLDER/b"));
    }

    #[test]
    fn test_current_file_path_uses_resolved_ancestors() {
        let mut values = IndexMap::new();
        values.insert("featureName".to_string(), json!("auth"));
        let global = global(values);
        let transformers = TransformerRegistry::new();
        let mut functions = FunctionRegistry::new();
        functions
            .register("path", |ctx| Ok(ctx.current_file_path().display().to_string()))
            .unwrap();
        let resolver = Resolver::new(&global.parameters_values, &transformers, &functions);

        let tree = vec![
            file("top.txt", "", "{{ path() }}"),
            folder(
                "{{featureName}}",
                "",
                vec![folder("api", "{{featureName}}", vec![file("x.ts", "{{featureName}}/api", "{{ path() }}")])],
            ),
        ];

        let resolved = transform_tree(&tree, &resolver, &global).unwrap();
        assert_eq!(resolved[0].content(), Some("/repo/src"));
        let deep = &resolved[1].children()[0].children()[0];
        assert_eq!(deep.content(), Some("/repo/src/auth/api"));
    }

    #[test]
    fn test_greet_function_on_file() {
        let global = global(IndexMap::new());
        let transformers = TransformerRegistry::new();
        let mut functions = FunctionRegistry::new();
        functions.register("greet", |ctx| Ok(format!("hi {}", ctx.file_name()))).unwrap();
        let resolver = Resolver::new(&global.parameters_values, &transformers, &functions);

        let resolved =
            transform_tree(&[file("x.txt", "", "{{ greet() }}")], &resolver, &global).unwrap();
        assert_eq!(resolved[0].content(), Some("hi x.txt"));
    }

    #[test]
    fn test_missing_key_fails_whole_tree() {
        let mut values = IndexMap::new();
        values.insert("name".to_string(), json!("auth"));
        let global = global(values);
        let (transformers, functions) = (TransformerRegistry::new(), FunctionRegistry::new());
        let resolver = Resolver::new(&global.parameters_values, &transformers, &functions);

        let tree = vec![
            file("{{name}}.ts", "", "ok"),
            folder("nested", "", vec![file("deep.ts", "nested", "{{ missing }}")]),
        ];
        let snapshot = tree.clone();

        let err = transform_tree(&tree, &resolver, &global).unwrap_err();
        assert!(matches!(err, Error::MissingKeyValuePairs { token } if token == "{{ missing }}"));
        assert_eq!(tree, snapshot);
    }
}
