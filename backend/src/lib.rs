//! Blog backend library modules.
//!
//! The crate is organised hexagonally: `domain` holds the entities,
//! authorization rules, and port traits; `inbound` adapts HTTP requests to
//! domain calls; `outbound` implements the ports over PostgreSQL or process
//! memory; `middleware` carries request-lifecycle concerns.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::RequestLog;
