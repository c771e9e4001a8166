//! Durable state for projects, analysts, experts, and interviews.
//!
//! One libsql-backed client owns the schema and every query. Concurrent
//! analyst tasks share this client; the expert table carries a unique
//! natural key so racing get-or-create calls converge on one row.

pub mod store;

pub use store::ProjectStore;
