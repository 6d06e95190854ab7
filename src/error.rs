use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to render. Original error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    /// No template resolves at the requested view path.
    #[error("View not found: '{path}'.")]
    ViewNotFound { path: String },

    /// The value cannot be rendered by type, usually because it carries no type tag.
    #[error("Invalid render target: {0}.")]
    InvalidRenderTarget(String),

    /// The pair key field does not exist on a record.
    #[error("Key field '{field}' not found on record of type '{type_name}'.")]
    KeyFieldNotFound { field: String, type_name: String },

    #[error("Key field '{field}' on record of type '{type_name}' is not a scalar value.")]
    InvalidPairKey { field: String, type_name: String },

    #[error("Unknown record type: '{0}'.")]
    UnknownRecordType(String),

    #[error("Invalid fixture: {0}.")]
    InvalidFixture(String),

    #[error("No configuration file found in '{dir}'. Tried: {config_files}.")]
    ConfigNotFound { dir: String, config_files: String },

    #[error("Configuration error: {0}.")]
    ConfigValidation(String),

    #[error("Invalid argument: {0}.")]
    ArgumentError(String),
}

/// Convenience type alias for Results with the crate error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
