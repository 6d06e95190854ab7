//! Configuration for the partials formatter
//!
//! - `loader`: the `FormatterConfig` structure and how it is read from disk

pub mod loader;

pub use loader::FormatterConfig;
