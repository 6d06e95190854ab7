//! Shapes of values handed to the dispatcher.

use crate::record::Record;
use serde::Deserialize;
use serde_json::{Map, Value};

/// The nested `object` of a request: one record or an ordered sequence.
pub enum Subject<'a> {
    One(&'a dyn Record),
    Many(Vec<&'a dyn Record>),
}

impl<'a> Subject<'a> {
    pub fn is_empty(&self) -> bool {
        match self {
            Subject::One(_) => false,
            Subject::Many(records) => records.is_empty(),
        }
    }
}

/// A bare ordered sequence of records, each rendered by its own type.
#[derive(Default)]
pub struct RecordSequence<'a> {
    pub items: Vec<&'a dyn Record>,
    pub options: Option<Map<String, Value>>,
}

impl<'a> RecordSequence<'a> {
    pub fn new<R: Record>(records: &'a [R]) -> Self {
        let items = records.iter().map(|r| r as &dyn Record).collect();
        Self { items, options: None }
    }

    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.options = Some(options);
        self
    }

    /// True when the sequence carries neither records nor options.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.options.is_none()
    }
}

/// A structured render request around a nested `object`.
#[derive(Default)]
pub struct RenderRequest<'a> {
    pub object: Option<Subject<'a>>,
    pub view: Option<String>,
    pub options: Option<Map<String, Value>>,
}

impl<'a> RenderRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A request wrapping a single nested record.
    pub fn object<R: Record>(record: &'a R) -> Self {
        Self { object: Some(Subject::One(record)), ..Self::default() }
    }

    /// A request wrapping a nested sequence of records.
    pub fn objects<R: Record>(records: &'a [R]) -> Self {
        let records = records.iter().map(|r| r as &dyn Record).collect();
        Self { object: Some(Subject::Many(records)), ..Self::default() }
    }

    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.options = Some(options);
        self
    }

    /// True when the request carries nothing at all.
    pub fn is_empty(&self) -> bool {
        self.object.is_none() && self.view.is_none() && self.options.is_none()
    }
}

/// A raw value to render.
pub enum Input<'a> {
    Absent,
    Record(&'a dyn Record),
    Sequence(RecordSequence<'a>),
    Request(RenderRequest<'a>),
}

impl<'a> Input<'a> {
    pub fn record<R: Record>(record: &'a R) -> Self {
        Input::Record(record)
    }

    /// Extra context carried by a structured request.
    pub fn options(&self) -> Option<&Map<String, Value>> {
        match self {
            Input::Sequence(sequence) => sequence.options.as_ref(),
            Input::Request(request) => request.options.as_ref(),
            _ => None,
        }
    }
}

impl<'a> From<RecordSequence<'a>> for Input<'a> {
    fn from(sequence: RecordSequence<'a>) -> Self {
        Input::Sequence(sequence)
    }
}

impl<'a> From<RenderRequest<'a>> for Input<'a> {
    fn from(request: RenderRequest<'a>) -> Self {
        Input::Request(request)
    }
}

impl<'a, R: Record> From<Option<&'a R>> for Input<'a> {
    fn from(record: Option<&'a R>) -> Self {
        match record {
            Some(record) => Input::Record(record),
            None => Input::Absent,
        }
    }
}

/// Options applied uniformly to every record when building pairs.
///
/// `view` selects the sub-view; every other key is merged into the render
/// context, so `{"view": "selector", "lang": "en"}` renders the `selector`
/// view with `lang` available next to `model`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RenderOptions {
    #[serde(default)]
    pub view: Option<String>,
    #[serde(flatten)]
    pub context: Map<String, Value>,
}

impl RenderOptions {
    pub fn view(view: impl Into<String>) -> Self {
        Self { view: Some(view.into()), context: Map::new() }
    }

    pub fn with_context(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    /// Wraps `record` in a request carrying these options.
    pub fn request<'a, R: Record>(&self, record: &'a R) -> RenderRequest<'a> {
        RenderRequest {
            object: Some(Subject::One(record)),
            view: self.view.clone(),
            options: (!self.context.is_empty()).then(|| self.context.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DynamicRecord;
    use serde_json::json;

    #[test]
    fn empty_requests_carry_nothing() {
        assert!(RenderRequest::new().is_empty());
        let records: Vec<DynamicRecord> = Vec::new();
        assert!(RecordSequence::new(&records).is_empty());
        assert!(!RecordSequence::new(&records).with_options(Map::new()).is_empty());
        assert!(!RenderRequest::objects(&records).is_empty());
        assert!(!RenderRequest::new().with_view("row").is_empty());
    }

    #[test]
    fn parses_options_with_flattened_context() {
        let options: RenderOptions =
            serde_json::from_value(json!({"view": "selector", "lang": "en"})).unwrap();
        assert_eq!(options.view.as_deref(), Some("selector"));
        assert_eq!(options.context.get("lang"), Some(&json!("en")));
    }

    #[test]
    fn options_build_single_object_requests() {
        let record = DynamicRecord::from_value("Course", json!({"id": 1})).unwrap();
        let request = RenderOptions::view("selector").request(&record);
        assert!(matches!(request.object, Some(Subject::One(_))));
        assert_eq!(request.view.as_deref(), Some("selector"));
        assert!(request.options.is_none());

        let request = RenderOptions::default().with_context("lang", json!("en")).request(&record);
        assert!(request.view.is_none());
        assert_eq!(request.options, Some(json!({"lang": "en"}).as_object().unwrap().clone()));
    }
}
