use super::interface::{Criteria, Query, RecordStore};
use crate::{
    error::{Error, Result},
    record::{DynamicRecord, Record},
};
use indexmap::IndexMap;
use log::debug;
use serde_json::Value;
use std::{path::Path, sync::Arc};

/// Records held in memory, grouped by type name.
///
/// Fixtures are objects mapping a type name to its records:
///
/// ```yaml
/// Course:
///   - { id: 5, title: Rust, status: OPEN }
///   - { id: 6, title: Go, status: CLOSED }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: IndexMap<String, Arc<Vec<DynamicRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record to its type's table, creating the table if needed.
    pub fn insert(&mut self, record: DynamicRecord) {
        let table = self.tables.entry(record.type_name().to_string()).or_default();
        Arc::make_mut(table).push(record);
    }

    /// Registers a type with no records, so queries on it succeed empty.
    pub fn register(&mut self, type_name: impl Into<String>) {
        self.tables.entry(type_name.into()).or_default();
    }

    pub fn from_value(fixture: Value) -> Result<Self> {
        let Value::Object(tables) = fixture else {
            return Err(Error::InvalidFixture(
                "fixture must map type names to lists of records".into(),
            ));
        };

        let mut store = Self::new();
        for (type_name, records) in tables {
            store.register(type_name.as_str());
            let Value::Array(records) = records else {
                return Err(Error::InvalidFixture(format!(
                    "fixture entry '{type_name}' must be a list of records"
                )));
            };
            for record in records {
                store.insert(DynamicRecord::from_value(type_name.as_str(), record)?);
            }
        }
        Ok(store)
    }

    /// Loads a JSON or YAML fixture, picked by extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let fixture: Value = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };
        debug!("Loaded fixture from {}", path.display());
        Self::from_value(fixture)
    }
}

impl RecordStore for MemoryStore {
    type Record = DynamicRecord;
    type Query = MemoryQuery;

    fn find(&self, type_name: &str) -> Result<MemoryQuery> {
        let records = self
            .tables
            .get(type_name)
            .cloned()
            .ok_or_else(|| Error::UnknownRecordType(type_name.to_string()))?;
        Ok(MemoryQuery { records, conditions: Vec::new() })
    }
}

/// Query over one [`MemoryStore`] table.
#[derive(Debug, Clone)]
pub struct MemoryQuery {
    records: Arc<Vec<DynamicRecord>>,
    conditions: Vec<(String, Value)>,
}

impl MemoryQuery {
    fn matches(&self, record: &DynamicRecord) -> bool {
        self.conditions.iter().all(|(field, operand)| {
            let Some(value) = record.field(field) else {
                return false;
            };
            match operand {
                Value::Array(candidates) => candidates.iter().any(|c| same_value(&value, c)),
                operand => same_value(&value, operand),
            }
        })
    }
}

impl Query for MemoryQuery {
    type Record = DynamicRecord;

    fn filter_where(mut self, criteria: &Criteria) -> Self {
        for (field, operand) in criteria {
            if is_empty_operand(operand) {
                continue;
            }
            self.conditions.push((field.clone(), operand.clone()));
        }
        self
    }

    fn all(self) -> Result<Vec<DynamicRecord>> {
        Ok(self.records.iter().filter(|r| self.matches(r)).cloned().collect())
    }
}

fn is_empty_operand(operand: &Value) -> bool {
    match operand {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Equality that also matches numbers against their decimal text (`5` == `"5"`).
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            n.to_string() == *s
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn store() -> MemoryStore {
        MemoryStore::from_value(json!({
            "Course": [
                {"id": 5, "title": "Rust", "status": "OPEN"},
                {"id": 6, "title": "Go", "status": "CLOSED"},
                {"id": 7, "title": "Zig", "status": "PENDING"}
            ],
            "Instructor": []
        }))
        .unwrap()
    }

    fn ids(records: &[DynamicRecord]) -> Vec<i64> {
        records.iter().map(|r| r.field("id").unwrap().as_i64().unwrap()).collect()
    }

    fn criteria(value: Value) -> Criteria {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn unfiltered_queries_return_everything_in_order() {
        let records = store().find("Course").unwrap().all().unwrap();
        assert_eq!(ids(&records), vec![5, 6, 7]);
    }

    #[test]
    fn array_operands_match_any_element() {
        let records = store()
            .find("Course")
            .unwrap()
            .filter_where(&criteria(json!({"status": ["OPEN", "PENDING"]})))
            .all()
            .unwrap();
        assert_eq!(ids(&records), vec![5, 7]);
    }

    #[test]
    fn empty_operands_are_ignored() {
        let records = store()
            .find("Course")
            .unwrap()
            .filter_where(&criteria(json!({"status": [], "title": " ", "owner": null})))
            .all()
            .unwrap();
        assert_eq!(ids(&records), vec![5, 6, 7]);
    }

    #[test]
    fn numbers_match_their_text() {
        let records = store()
            .find("Course")
            .unwrap()
            .filter_where(&criteria(json!({"id": "6"})))
            .all()
            .unwrap();
        assert_eq!(ids(&records), vec![6]);
    }

    #[test]
    fn unknown_fields_match_nothing() {
        let records = store()
            .find("Course")
            .unwrap()
            .filter_where(&criteria(json!({"level": "advanced"})))
            .all()
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn registered_types_may_be_empty_but_unknown_types_fail() {
        assert!(store().find("Instructor").unwrap().all().unwrap().is_empty());
        assert!(matches!(store().find("Student"), Err(Error::UnknownRecordType(t)) if t == "Student"));
    }

    #[test]
    fn loads_yaml_fixtures() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fixture.yaml");
        fs::write(&path, "Course:\n  - { id: 1, title: Rust }\n").unwrap();

        let records = MemoryStore::from_file(&path).unwrap().find("Course").unwrap().all().unwrap();
        assert_eq!(records[0].field("title"), Some(json!("Rust")));
    }

    #[test]
    fn rejects_malformed_fixtures() {
        assert!(matches!(MemoryStore::from_value(json!(["Course"])), Err(Error::InvalidFixture(_))));
        assert!(matches!(
            MemoryStore::from_value(json!({"Course": {"id": 1}})),
            Err(Error::InvalidFixture(_))
        ));
        assert!(matches!(
            MemoryStore::from_value(json!({"Course": [{"id": 1}, 2]})),
            Err(Error::InvalidFixture(_))
        ));
    }
}
