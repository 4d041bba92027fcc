//! Configuration handling for templates.
//! A configuration file sits next to the template directories and declares
//! transformers, functions, parameter validation and per-template options.
//! It is read again on every invocation.

use crate::builtins::builtin;
use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};
use crate::parameters::ParameterValidator;
use crate::registry::{FunctionRegistry, TransformerRegistry};
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Options of a single parameter.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParameterOptions {
    /// Question asked in interactive mode.
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    /// Regular expression the value must match.
    #[serde(default)]
    pub pattern: Option<String>,
    /// Message reported when validation fails.
    #[serde(default)]
    pub message: Option<String>,
    /// JSON Schema the value must satisfy.
    #[serde(default)]
    pub schema: Option<serde_json::Value>,
}

/// Commands run around the generation of a template.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateHooks {
    #[serde(default)]
    pub pre_template_generation: Option<PathBuf>,
    #[serde(default)]
    pub post_template_generation: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateOptions {
    #[serde(default)]
    pub hooks: TemplateHooks,
}

/// Raw contents of a configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    /// Named chains of built-in transformers.
    #[serde(default)]
    pub transformers: IndexMap<String, Vec<String>>,
    /// MiniJinja templates rendered against the substitution context.
    #[serde(default)]
    pub functions: IndexMap<String, String>,
    #[serde(default)]
    pub parameters_options: IndexMap<String, ParameterOptions>,
    #[serde(default)]
    pub templates_options: IndexMap<String, TemplateOptions>,
}

/// Everything a template run can call or check.
///
/// The default configuration has no transformers, functions or options.
#[derive(Debug, Default)]
pub struct Config {
    pub transformers: TransformerRegistry,
    pub functions: FunctionRegistry,
    pub parameters_options: IndexMap<String, ParameterOptions>,
    /// Compiled checks for `parameters_options`, by parameter name.
    pub parameter_validators: IndexMap<String, ParameterValidator>,
    pub templates_options: IndexMap<String, TemplateOptions>,
}

impl Config {
    /// Builds a configuration from a parsed file, registering its
    /// transformers and functions.
    ///
    /// # Errors
    /// * `Error::ConfigError` if a transformer chain names an unknown
    ///   built-in, a function template does not compile, or a parameter
    ///   pattern or schema is invalid
    /// * `Error::RegistrationError` if a name is not a valid identifier
    pub fn from_file(file: ConfigFile) -> Result<Self> {
        let mut config = Config::default();

        for (name, chain) in file.transformers {
            let steps = chain
                .iter()
                .map(|step| {
                    builtin(step).ok_or_else(|| {
                        Error::ConfigError(format!(
                            "transformer '{name}' refers to unknown built-in '{step}'"
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            config.transformers.register(name, move |value, _| {
                Ok(steps.iter().fold(value.to_string(), |current, step| step(current.as_str())))
            })?;
        }

        let renderer = MiniJinjaRenderer::new();
        for (name, template) in file.functions {
            renderer.validate(&template).map_err(|e| {
                Error::ConfigError(format!("function '{name}' is not a valid template: {e}"))
            })?;
            let renderer = renderer.clone();
            config
                .functions
                .register(name, move |ctx| renderer.render(&template, &ctx.to_value()))?;
        }

        for (parameter, options) in &file.parameters_options {
            let validator = ParameterValidator::new(options).map_err(|e| {
                Error::ConfigError(format!("options of parameter '{parameter}': {e}"))
            })?;
            config.parameter_validators.insert(parameter.clone(), validator);
        }

        config.parameters_options = file.parameters_options;
        config.templates_options = file.templates_options;
        Ok(config)
    }

    /// Options declared for `template`, or the defaults.
    pub fn template_options(&self, template: &str) -> TemplateOptions {
        self.templates_options.get(template).cloned().unwrap_or_default()
    }
}

/// Directory searched for the configuration of the template at `template_path`.
pub fn config_dir<P: AsRef<Path>>(template_path: P) -> PathBuf {
    let template_path = template_path.as_ref();
    template_path.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// Reads the first existing configuration file from `dir`.
///
/// # Arguments
/// * `dir` - Directory containing the configuration
/// * `config_files` - List of configuration files to try, in order
///
/// # Returns
/// * `Result<Option<String>>` - Contents of the first found file, if any
pub fn read_config_file<P: AsRef<Path>>(dir: P, config_files: &[&str]) -> Result<Option<String>> {
    for file in config_files {
        let config_path = dir.as_ref().join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            return Ok(Some(std::fs::read_to_string(&config_path)?));
        }
    }
    Ok(None)
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML
///   for the configuration schema
pub fn parse_config(content: &str) -> Result<ConfigFile> {
    match serde_json::from_str(content) {
        Ok(file) => Ok(file),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Loads the configuration of the template at `template_path`.
///
/// The file is looked up in the template's parent directory. When there is
/// none, the empty default configuration is returned.
pub fn load_config<P: AsRef<Path>>(template_path: P) -> Result<Config> {
    match read_config_file(config_dir(template_path), &CONFIG_FILES)? {
        Some(content) => Config::from_file(parse_config(&content)?),
        None => {
            debug!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Context, GlobalContext, LocalContext, NodeType};
    use crate::resolver::Resolver;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_empty() {
        let config = Config::default();
        assert!(config.transformers.is_empty());
        assert!(config.functions.is_empty());
        assert!(config.parameters_options.is_empty());
        assert!(config.templates_options.is_empty());
    }

    #[test]
    fn test_config_dir_strips_last_segment() {
        assert_eq!(config_dir("/repo/scaffolder/component"), PathBuf::from("/repo/scaffolder"));
    }

    #[test]
    fn test_parse_yaml_config() {
        let content = r#"
transformers:
  componentName: [camelCase, capitalize]
functions:
  header: "// {{ fileName }} generated for {{ templateName }}"
parametersOptions:
  name:
    question: Component name?
    pattern: "^[A-Za-z]+$"
templatesOptions:
  component:
    hooks:
      postTemplateGeneration: hooks/format.sh
"#;
        let config = Config::from_file(parse_config(content).unwrap()).unwrap();

        let global = GlobalContext::new("component", "/t/component", Default::default(), "/out");
        let ctx = Context::new(&global, LocalContext::new("index.ts", NodeType::FileContent, "/out"));

        let transformer = config.transformers.get("componentName").unwrap();
        assert_eq!(transformer("user profile", &ctx).unwrap(), "UserProfile");

        let header = config.functions.get("header").unwrap();
        assert_eq!(header(&ctx).unwrap(), "// index.ts generated for component");

        assert_eq!(
            config.parameters_options["name"].question.as_deref(),
            Some("Component name?")
        );
        assert_eq!(
            config.template_options("component").hooks.post_template_generation,
            Some(PathBuf::from("hooks/format.sh"))
        );
        assert_eq!(config.template_options("other"), TemplateOptions::default());
    }

    #[test]
    fn test_unknown_builtin_is_config_error() {
        let file = parse_config(r#"{"transformers": {"shout": ["loud"]}}"#).unwrap();
        assert!(matches!(Config::from_file(file), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_invalid_function_template_is_config_error() {
        let file = parse_config(r#"{"functions": {"broken": "{% for %}"}}"#).unwrap();
        assert!(matches!(Config::from_file(file), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_function_render_failure_reaches_caller() {
        let file = parse_config(r#"{"functions": {"bad": "{{ fileName | nosuchfilter }}"}}"#)
            .unwrap();
        let config = Config::from_file(file).unwrap();

        let values = IndexMap::new();
        let resolver = Resolver::from_config(&values, &config);
        let global = GlobalContext::new("component", "/t/component", IndexMap::new(), "/out");
        let ctx = Context::new(&global, LocalContext::new("index.ts", NodeType::FileContent, "/out"));

        let result = resolver.substitute("x{{ bad() }}y", &ctx);
        assert!(matches!(result, Err(Error::MinijinjaError(_))));
    }

    #[test]
    fn test_invalid_parameter_pattern_is_config_error() {
        let file = parse_config(r#"{"parametersOptions": {"name": {"pattern": "("}}}"#).unwrap();
        assert!(matches!(Config::from_file(file), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_invalid_function_name_is_registration_error() {
        let file = parse_config(r#"{"functions": {"two words": "x"}}"#).unwrap();
        assert!(matches!(Config::from_file(file), Err(Error::RegistrationError { .. })));
    }

    #[test]
    fn test_unknown_field_is_config_error() {
        assert!(matches!(parse_config("helpers: {}"), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_load_config_reads_sibling_file() {
        let temp_dir = TempDir::new().unwrap();
        let template = temp_dir.path().join("component");
        std::fs::create_dir(&template).unwrap();

        assert!(load_config(&template).unwrap().functions.is_empty());

        std::fs::write(
            temp_dir.path().join("scaffolder.json"),
            r#"{"functions": {"year": "2026"}}"#,
        )
        .unwrap();
        let config = load_config(&template).unwrap();
        assert_eq!(config.functions.names().collect::<Vec<_>>(), vec!["year"]);
    }
}
