//! Key → rendered-view pairs for selection widgets.
//!
//! ```rust,ignore
//! let pairs = PairBuilder::new(&dispatcher, &store).pairs(
//!     "Course",
//!     json!({"status": ["OPEN", "PENDING"]}).as_object().unwrap(),
//!     Some("id"),
//!     Some(&RenderOptions::view("selector")),
//! )?;
//! // {5: "<Course/selector for 5>", 7: "<Course/selector for 7>"}
//! ```

use crate::{
    config::FormatterConfig,
    constants::DEFAULT_KEY_FIELD,
    dispatch::Dispatcher,
    error::{Error, Result},
    record::{PairKey, Record},
    renderer::TemplateEngine,
    request::{Input, RenderOptions, RenderRequest, Subject},
    store::{Criteria, Query, RecordStore},
};
use indexmap::IndexMap;
use log::info;

/// Ordered pairs; a repeated key keeps its first position and its last value.
pub type Pairs = IndexMap<PairKey, String>;

/// Builds [`Pairs`] from records, rendering each through a [`Dispatcher`].
pub struct PairBuilder<'d, E, S> {
    dispatcher: &'d Dispatcher<E>,
    store: S,
    key_field: String,
}

impl<'d, E: TemplateEngine, S> PairBuilder<'d, E, S> {
    pub fn new(dispatcher: &'d Dispatcher<E>, store: S) -> Self {
        Self { dispatcher, store, key_field: DEFAULT_KEY_FIELD.to_string() }
    }

    /// Creates a builder keyed by the configured `key_field`.
    pub fn from_config(dispatcher: &'d Dispatcher<E>, store: S, config: &FormatterConfig) -> Self {
        Self { dispatcher, store, key_field: config.key_field.clone() }
    }

    /// Key field used when a call does not name one.
    pub fn with_key_field(mut self, key_field: impl Into<String>) -> Self {
        self.key_field = key_field.into();
        self
    }

    /// Renders every record and keys it by `key_field`.
    ///
    /// Fails the whole batch with `Error::KeyFieldNotFound` if any record lacks
    /// the key field; no partial mapping is returned.
    pub fn object_pairs<R: Record>(
        &self,
        records: &[R],
        key_field: Option<&str>,
        options: Option<&RenderOptions>,
    ) -> Result<Pairs> {
        let mut pairs = Pairs::with_capacity(records.len());
        let default_options = RenderOptions::default();
        let options = options.unwrap_or(&default_options);

        for record in records {
            let (key, value) = self.pair(options.request(record).into(), key_field)?;
            pairs.insert(key, value);
        }
        Ok(pairs)
    }

    /// Renders a bare record or a single-object request and reads its key.
    pub fn pair(&self, input: Input<'_>, key_field: Option<&str>) -> Result<(PairKey, String)> {
        let key_field = key_field.filter(|k| !k.is_empty()).unwrap_or(self.key_field.as_str());
        let key = match &input {
            Input::Record(record) => PairKey::read(*record, key_field)?,
            Input::Request(RenderRequest { object: Some(Subject::One(record)), .. }) => {
                PairKey::read(*record, key_field)?
            }
            _ => {
                return Err(Error::InvalidRenderTarget(
                    "a pair needs a single record to read its key from".into(),
                ))
            }
        };
        let value = self.dispatcher.render(&input)?.unwrap_or_default();
        Ok((key, value))
    }
}

impl<'d, E: TemplateEngine, S: RecordStore> PairBuilder<'d, E, S> {
    /// Fetches `type_name` records matching `criteria` and builds their pairs.
    ///
    /// An empty `criteria` applies no filter. No matches give an empty mapping
    /// without rendering anything.
    pub fn pairs(
        &self,
        type_name: &str,
        criteria: &Criteria,
        key_field: Option<&str>,
        options: Option<&RenderOptions>,
    ) -> Result<Pairs> {
        let mut query = self.store.find(type_name)?;
        if !criteria.is_empty() {
            query = query.filter_where(criteria);
        }
        let records = query.all()?;
        info!("Found {} {type_name} record(s) for pairs", records.len());

        if records.is_empty() {
            return Ok(Pairs::new());
        }
        self.object_pairs(&records, key_field, options)
    }
}
