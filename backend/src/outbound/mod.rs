//! Outbound adapters implementing the domain ports.
//!
//! Two backends implement the same port traits:
//!
//! - **persistence**: PostgreSQL repositories via Diesel and `diesel-async`.
//! - **memory**: in-process stores used as the development fallback and as
//!   the deterministic backend for handler and integration tests.
//!
//! Adapters translate between domain types and infrastructure
//! representations; they contain no business logic.

pub mod memory;
pub(crate) mod password;
pub mod persistence;
