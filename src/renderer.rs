//! MiniJinja rendering for functions declared in configuration files.
use crate::error::{Error, Result};
use minijinja::Environment;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;

    /// Checks that `template` compiles, without rendering it.
    fn validate(&self, template: &str) -> Result<()>;
}

/// MiniJinja-based template rendering engine.
#[derive(Debug, Clone)]
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        let env = Environment::new();
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if the template does not compile or fails
    ///   while rendering
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        self.env.render_str(template, context).map_err(Error::MinijinjaError)
    }

    /// Compiles `template` in a copy of the renderer's environment.
    fn validate(&self, template: &str) -> Result<()> {
        let mut env = self.env.clone();
        env.add_template_owned("validate", template.to_string()).map_err(Error::MinijinjaError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render() {
        let renderer = MiniJinjaRenderer::new();
        let context = json!({ "fileName": "index.ts", "parametersValues": { "name": "auth" } });

        let result = renderer
            .render("{{ parametersValues.name }}/{{ fileName }}", &context)
            .unwrap();
        assert_eq!(result, "auth/index.ts");
    }

    #[test]
    fn test_validate_rejects_broken_templates() {
        let renderer = MiniJinjaRenderer::new();
        assert!(renderer.validate("{{ fileName }}").is_ok());
        assert!(matches!(renderer.validate("{% if %}"), Err(Error::MinijinjaError(_))));
    }

    #[test]
    fn test_validate_leaves_environment_untouched() {
        let renderer = MiniJinjaRenderer::new();
        renderer.validate("{{ fileName }}").unwrap();
        assert!(renderer.env.get_template("validate").is_err());
    }
}
