use crate::error::Result;

/// Trait for template rendering engines.
pub trait TemplateEngine {
    /// Renders the template at a view path with the given context.
    ///
    /// # Arguments
    /// * `path` - View path, e.g. `views/partials/Course/default`
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered output, or `Error::ViewNotFound` when
    ///   nothing resolves at `path`
    fn render(&self, path: &str, context: &serde_json::Value) -> Result<String>;
}

impl<T: TemplateEngine + ?Sized> TemplateEngine for &T {
    fn render(&self, path: &str, context: &serde_json::Value) -> Result<String> {
        (**self).render(path, context)
    }
}

impl<T: TemplateEngine + ?Sized> TemplateEngine for Box<T> {
    fn render(&self, path: &str, context: &serde_json::Value) -> Result<String> {
        (**self).render(path, context)
    }
}
