//! Constants used throughout partials

/// Configuration file names in order of preference
pub const CONFIG_FILENAMES: &[&str] = &["partials.json", "partials.yaml", "partials.yml"];

/// Root under which per-type view directories and shared partials live
pub const DEFAULT_PARTIALS_ROOT: &str = "views/partials/";

/// Sub-view used when the caller does not name one
pub const DEFAULT_VIEW: &str = "default";

/// Record field read as the pair key when none is given
pub const DEFAULT_KEY_FIELD: &str = "id";

/// Template file suffixes tried, in order, when resolving a view path on disk
pub const TEMPLATE_EXTENSIONS: &[&str] = &[".j2", ".jinja", ".jinja2", ".html"];

/// Context key under which the rendered record is exposed to templates
pub const MODEL_KEY: &str = "model";

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
