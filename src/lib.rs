/// Handles argument parsing and the preview commands.
pub mod cli;

/// Formatter configuration.
pub mod config;

/// Shared constants and defaults.
pub mod constants;

/// Shape classification and view dispatch.
pub mod dispatch;

/// Defines custom error types.
pub mod error;

/// Key → rendered-view pairs for selection widgets.
pub mod pairs;

/// Records and pair keys.
pub mod record;

/// Template engines views are rendered through.
pub mod renderer;

/// Input shapes accepted by the dispatcher.
pub mod request;

/// Record stores queried by the pair builder.
pub mod store;

/// View path resolution.
pub mod view;

pub use config::FormatterConfig;
pub use dispatch::{Dispatcher, Signature, Strategy};
pub use error::{Error, Result};
pub use pairs::{PairBuilder, Pairs};
pub use record::{DynamicRecord, PairKey, Record};
pub use renderer::{MiniJinjaEngine, TemplateEngine};
pub use request::{Input, RecordSequence, RenderOptions, RenderRequest, Subject};
pub use store::{Criteria, MemoryStore, Query, RecordStore};
pub use view::ViewPath;
