mod engine;

pub use engine::{EditSource, RowView, SyncEngine, TEXT_PLACEHOLDER};
