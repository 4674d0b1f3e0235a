mod field;
mod layout;
mod span;
mod table;

pub use field::{Endianness, Field, FieldId, FieldKind};
pub use layout::{PageLabels, FILAMENT_FIELDS, FILAMENT_LABELS, UNKNOWN_LABEL};
pub use span::PageSpan;
pub use table::Schema;
