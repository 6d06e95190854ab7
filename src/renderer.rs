//! Template engines the dispatcher renders views through.

mod interface;
mod engine;

pub use interface::TemplateEngine;
pub use engine::MiniJinjaEngine;
