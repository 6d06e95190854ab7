use super::classify::{classify, Strategy};
use crate::{
    config::FormatterConfig,
    constants::{DEFAULT_PARTIALS_ROOT, DEFAULT_VIEW, MODEL_KEY},
    error::{Error, Result},
    record::Record,
    renderer::TemplateEngine,
    request::Input,
    view::ViewPath,
};
use log::debug;
use serde_json::{Map, Value};

/// Renders inputs through per-type or shared partial views.
///
/// The dispatcher owns no state beyond its engine and settings; every call
/// works only on its arguments.
pub struct Dispatcher<E> {
    engine: E,
    partials_root: String,
    default_view: String,
}

impl<E: TemplateEngine> Dispatcher<E> {
    /// Creates a dispatcher with the conventional partials root and default view.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            partials_root: DEFAULT_PARTIALS_ROOT.to_string(),
            default_view: DEFAULT_VIEW.to_string(),
        }
    }

    pub fn from_config(engine: E, config: &FormatterConfig) -> Self {
        Self {
            engine,
            partials_root: config.partials_root.clone(),
            default_view: config.default_view.clone(),
        }
    }

    pub fn with_partials_root(mut self, partials_root: impl Into<String>) -> Self {
        self.partials_root = partials_root.into();
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn partials_root(&self) -> &str {
        &self.partials_root
    }

    /// Classifies `input` and renders it.
    ///
    /// # Returns
    /// * `Ok(None)` - absent input, an empty request, or an unrecognized shape
    /// * `Ok(Some(output))` - the rendered view(s); an empty sequence gives `""`
    pub fn render(&self, input: &Input<'_>) -> Result<Option<String>> {
        let options = input.options();
        let output = match classify(input) {
            Strategy::Empty => return Ok(None),
            Strategy::Record(record) | Strategy::Object(record) => {
                self.render_by_type(record, &self.default_view, options)?
            }
            Strategy::Sequence(records) | Strategy::ObjectSequence(records) => {
                self.render_sequence(records, options)?
            }
            Strategy::ObjectView(record, view) => self.render_by_type(record, view, options)?,
            Strategy::ObjectSequenceView(records, view) => {
                self.render_sequence_view(records, view, options)?
            }
        };
        Ok(Some(output))
    }

    /// Renders a record through `root/<type>/<view>`.
    pub fn render_by_type(
        &self,
        record: &dyn Record,
        view: &str,
        options: Option<&Map<String, Value>>,
    ) -> Result<String> {
        let type_name = record.type_name();
        if type_name.is_empty() {
            return Err(Error::InvalidRenderTarget(
                "record has no type name to resolve a view from".into(),
            ));
        }
        let path = ViewPath::for_type(&self.partials_root, type_name, view);
        self.render_path(&path, record, options)
    }

    /// Renders a record through the shared view `root/<view>`.
    pub fn render_view(
        &self,
        record: &dyn Record,
        view: &str,
        options: Option<&Map<String, Value>>,
    ) -> Result<String> {
        let path = ViewPath::shared(&self.partials_root, view);
        self.render_path(&path, record, options)
    }

    /// Renders each record by type with the default view and concatenates.
    pub fn render_sequence(
        &self,
        records: &[&dyn Record],
        options: Option<&Map<String, Value>>,
    ) -> Result<String> {
        records.iter().try_fold(String::new(), |mut out, record| {
            out.push_str(&self.render_by_type(*record, &self.default_view, options)?);
            Ok(out)
        })
    }

    /// Renders each record through the same shared view and concatenates.
    pub fn render_sequence_view(
        &self,
        records: &[&dyn Record],
        view: &str,
        options: Option<&Map<String, Value>>,
    ) -> Result<String> {
        records.iter().try_fold(String::new(), |mut out, record| {
            out.push_str(&self.render_view(*record, view, options)?);
            Ok(out)
        })
    }

    fn render_path(
        &self,
        path: &ViewPath,
        record: &dyn Record,
        options: Option<&Map<String, Value>>,
    ) -> Result<String> {
        debug!("Rendering {} through '{path}'", record.type_name());
        self.engine.render(path.as_str(), &render_context(record, options))
    }
}

/// `{ model: record, ..options }`; `model` cannot be shadowed by options.
fn render_context(record: &dyn Record, options: Option<&Map<String, Value>>) -> Value {
    let mut context = options.cloned().unwrap_or_default();
    context.insert(MODEL_KEY.to_string(), record.to_value());
    Value::Object(context)
}
