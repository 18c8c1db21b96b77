//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Entity services (`campaign`, `order`, `catalog`) wrap a `MemoryStore` and
//! own validation. `studio` holds editable drafts on top of them. `stats`,
//! `export` and `share` are pure functions over records, so route handlers
//! stay focused on extracting input and shaping responses.

pub mod campaign;
pub mod catalog;
pub mod export;
pub mod order;
pub mod share;
pub mod stats;
pub mod studio;
