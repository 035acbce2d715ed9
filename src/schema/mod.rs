//! Schema extraction (C2)

pub mod descriptor;
pub mod extractor;

pub use descriptor::{ColumnDecl, SchemaDescriptor};
pub use extractor::{ExtractResult, ReservedNameConflict, SCHEMA_BASE_NAME, extract};
