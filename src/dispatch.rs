//! Shape classification and view dispatch.

mod classify;
mod dispatcher;

pub use classify::{classify, Signature, Strategy};
pub use dispatcher::Dispatcher;
