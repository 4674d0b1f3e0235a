pub mod tag;

pub use tag::command::{
    ClearUiRequest, Command, CommandDispatcher, DeleteUserAreaRequest, ICommandSink,
    SimulateRequest, WriteRequest,
};
pub use tag::config::{TagLayout, TagLayoutConfig};
pub use tag::error::{CodecError, ConfigError, RangeError, SchemaError, TagError};
pub use tag::schema::{Endianness, Field, FieldId, FieldKind, PageLabels, PageSpan, Schema};
pub use tag::staging::{FilamentProfile, StagingController};
pub use tag::store::{PageRow, PageStore, TriState};
pub use tag::sync::{EditSource, RowView, SyncEngine};
pub use tag::types::{PageData, PageId, PageMap, PAGE_SIZE};
