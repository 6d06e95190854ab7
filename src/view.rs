//! View path resolution under the partials root.

use std::fmt::{self, Display};

/// Template path a record is rendered through.
///
/// Per-type views live in one directory per record type
/// (`root/Course/default`), shared views sit directly under the root
/// (`root/selector`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewPath(String);

impl ViewPath {
    /// `root + type_name + "/" + view`
    pub fn for_type(root: &str, type_name: &str, view: &str) -> Self {
        let mut path = with_separator(root);
        path.push_str(type_name);
        path.push('/');
        path.push_str(view);
        Self(path)
    }

    /// `root + view`
    pub fn shared(root: &str, view: &str) -> Self {
        let mut path = with_separator(root);
        path.push_str(view);
        Self(path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn with_separator(root: &str) -> String {
    let mut path = String::with_capacity(root.len() + 32);
    path.push_str(root);
    if !root.is_empty() && !root.ends_with('/') {
        path.push('/');
    }
    path
}

impl AsRef<str> for ViewPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ViewPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
