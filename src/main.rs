//! Scaffolder's main application entry point and orchestration logic.
//! Handles command-line argument parsing and dispatches to the template
//! listing, display and generation flows.

use std::path::PathBuf;

use scaffolder::{
    builder::{BuildAction, TemplatesBuilder},
    cli::{get_args, Args, Command},
    commands::discover_templates,
    config::config_dir,
    context::GlobalContext,
    error::{default_error_handler, Result},
    hooks::{get_hooks, run_hook},
    processor::{format_templates, format_tree, load_template, transform_template, TemplateRequest},
    prompt::{DialoguerPrompter, Prompter},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_default()
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Create {
            template,
            parameters,
            load_from,
            entry_point,
            path_prefix,
            folder,
            interactive,
        } => {
            let request = TemplateRequest {
                template,
                parameters,
                load_from: load_from.unwrap_or_else(current_dir),
                target_root: entry_point.unwrap_or_else(current_dir),
            };
            create(&request, path_prefix, folder, interactive)
        }
        Command::List { load_from } => {
            let templates = discover_templates(load_from.unwrap_or_else(current_dir))?;
            if templates.is_empty() {
                println!("No templates found.");
            } else {
                print!("{}", format_templates(&templates));
            }
            Ok(())
        }
        Command::Show { template, show_content } => {
            let loaded = load_template(current_dir(), &template)?;
            print!("{}", format_tree(&loaded.tree, show_content));
            Ok(())
        }
    }
}

/// Runs an optional hook. A failing hook is reported but does not stop generation.
fn run_optional_hook(hook: Option<PathBuf>, template: &str, stage: &str, global: &GlobalContext) {
    let Some(hook) = hook else {
        return;
    };
    match run_hook(&hook, global) {
        Ok(()) => println!("Executed \"{template}\" {stage} hook."),
        Err(e) => eprintln!("Error while executing \"{template}\" {stage} hook::\n{e}"),
    }
}

/// Generation flow
/// 1. Finds the template and loads its configuration
/// 2. Collects and validates parameter values
/// 3. Resolves every placeholder of the tree
/// 4. Runs the pre-generation hook
/// 5. Writes the tree
/// 6. Runs the post-generation hook
fn create(
    request: &TemplateRequest,
    path_prefix: Option<PathBuf>,
    folder: Option<String>,
    interactive: bool,
) -> Result<()> {
    let prompter = DialoguerPrompter::new();
    let prompter: Option<&dyn Prompter> =
        if interactive { Some(&prompter) } else { None };

    let transformed = transform_template(request, prompter)?;
    let template = request.template.as_str();

    let options = transformed.config.template_options(template);
    let (pre_hook, post_hook) =
        get_hooks(config_dir(&transformed.global.template_root), &options);

    let mut builder = TemplatesBuilder::new(&transformed.templates, template)
        .with_custom_entry_point(&request.target_root);
    if let Some(prefix) = path_prefix {
        builder = builder.with_path_prefix(prefix);
    }
    if let Some(folder) = folder {
        builder = builder.in_a_folder(folder);
    }

    run_optional_hook(pre_hook, template, "pre-template generation", &transformed.global);

    for action in builder.build()? {
        match action {
            BuildAction::CreateFolder(path) => log::debug!("Created '{}'", path.display()),
            BuildAction::WriteFile(path) => println!("Created: '{}'", path.display()),
        }
    }
    println!(
        "Template \"{template}\" generated successfully in {}.",
        builder.full_path().display()
    );

    run_optional_hook(post_hook, template, "post-template generation", &transformed.global);
    Ok(())
}
