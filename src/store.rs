//! Record stores the pair builder fetches records from.

mod interface;
mod memory;

pub use interface::{Criteria, Query, RecordStore};
pub use memory::{MemoryQuery, MemoryStore};
