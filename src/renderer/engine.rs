use crate::{
    config::FormatterConfig,
    error::{Error, Result},
    renderer::interface::TemplateEngine,
};
use minijinja::{Environment, ErrorKind};
use serde_json::{json, Map, Value};
use std::io;

/// MiniJinja-based template engine resolving view paths on the filesystem.
pub struct MiniJinjaEngine {
    /// MiniJinja environment instance
    env: Environment<'static>,
    /// Default context that will be merged with any provided context
    default_context: Value,
}

impl MiniJinjaEngine {
    /// Creates an engine that loads `path + ext` for each extension, in order.
    pub fn new(extensions: Vec<String>) -> Self {
        let mut env = Environment::new();
        env.set_loader(move |name| load_view(name, &extensions));
        Self { env, default_context: Value::Object(Map::new()) }
    }

    /// Creates an engine from the configured extensions and globals.
    pub fn from_config(config: &FormatterConfig) -> Self {
        let mut engine = Self::new(config.extensions.clone());
        engine.default_context = Value::Object(config.globals.clone());
        engine
    }

    /// Registers an inline template under a view path; takes precedence over files.
    pub fn add_template(&mut self, path: &str, source: &str) -> Result<()> {
        // Normalize the path for cross-platform compatibility
        let normalized = path.replace('\\', "/");
        self.env.add_template_owned(normalized, source.to_string())?;
        Ok(())
    }

    /// Merges the default context under the provided one; provided keys win.
    fn merge_context(&self, context: &Value) -> Value {
        if let (Some(default_obj), Some(context_obj)) =
            (self.default_context.as_object(), context.as_object())
        {
            let mut result = default_obj.clone();
            for (key, value) in context_obj {
                result.insert(key.clone(), value.clone());
            }
            json!(result)
        } else {
            // If either isn't an object, just use the provided context
            context.clone()
        }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::from_config(&FormatterConfig::default())
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, path: &str, context: &Value) -> Result<String> {
        let tmpl = self.env.get_template(path).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => Error::ViewNotFound { path: path.to_string() },
            _ => e.into(),
        })?;
        Ok(tmpl.render(self.merge_context(context))?)
    }
}

fn load_view(name: &str, extensions: &[String]) -> Result<Option<String>, minijinja::Error> {
    for ext in extensions {
        let candidate = format!("{name}{ext}");
        match std::fs::read_to_string(&candidate) {
            Ok(source) => {
                log::trace!("Resolved view '{name}' to '{candidate}'");
                return Ok(Some(source));
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) => {
                return Err(minijinja::Error::new(
                    ErrorKind::InvalidOperation,
                    format!("could not read view '{candidate}'"),
                )
                .with_source(err))
            }
        }
    }
    Ok(None)
}
