//! Service layer: the create/list record contract on top of a document store.
//! - Record kinds and their validation live in `models`.
//! - Storage is reached only through [`store::DocumentStore`].

pub mod errors;
pub mod records;
pub mod store;

pub use records::{RecordService, LIST_LIMIT};
