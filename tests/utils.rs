#![allow(dead_code)]

use partials::{error::Result, DynamicRecord, Error, TemplateEngine};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::PathBuf;

/// Template engine double: renders `path|id` and records every call.
///
/// Paths listed as missing fail with `Error::ViewNotFound`.
#[derive(Default)]
pub struct RecordingEngine {
    pub calls: RefCell<Vec<(String, Value)>>,
    missing: HashSet<String>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing(mut self, path: &str) -> Self {
        self.missing.insert(path.to_string());
        self
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(path, _)| path.clone()).collect()
    }
}

impl TemplateEngine for RecordingEngine {
    fn render(&self, path: &str, context: &Value) -> Result<String> {
        self.calls.borrow_mut().push((path.to_string(), context.clone()));
        if self.missing.contains(path) {
            return Err(Error::ViewNotFound { path: path.to_string() });
        }
        Ok(format!("<{path}|{}>", context["model"]["id"]))
    }
}

pub fn course(id: i64, title: &str) -> DynamicRecord {
    DynamicRecord::from_value("Course", json!({ "id": id, "title": title })).unwrap()
}

pub fn instructor(id: i64) -> DynamicRecord {
    DynamicRecord::from_value("Instructor", json!({ "id": id })).unwrap()
}

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Partials root inside the fixtures, with a trailing separator.
pub fn partials_root() -> String {
    format!("{}/views/partials/", fixtures_dir().display())
}
