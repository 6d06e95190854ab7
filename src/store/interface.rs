use crate::{error::Result, record::Record};
use serde_json::{Map, Value};

/// Field → operand filter; array operands match any of their elements.
pub type Criteria = Map<String, Value>;

/// Trait for sources of records.
pub trait RecordStore {
    type Record: Record;
    type Query: Query<Record = Self::Record>;

    /// Starts a query over all records of `type_name`.
    fn find(&self, type_name: &str) -> Result<Self::Query>;
}

/// A pending query built by a [`RecordStore`].
pub trait Query: Sized {
    type Record: Record;

    /// Narrows the query; criteria with empty operands are ignored.
    fn filter_where(self, criteria: &Criteria) -> Self;

    /// Runs the query, returning matches in store order.
    fn all(self) -> Result<Vec<Self::Record>>;
}

impl<T: RecordStore + ?Sized> RecordStore for &T {
    type Record = T::Record;
    type Query = T::Query;

    fn find(&self, type_name: &str) -> Result<Self::Query> {
        (**self).find(type_name)
    }
}
