//! In-process adapters backing the domain ports without a database.
//!
//! These adapters serve two roles: the development fallback when no
//! `DATABASE_URL` is configured, and the deterministic backend for handler
//! and integration tests. They honour the same contracts as the Diesel
//! adapters, including the article → comment cascade.

mod blog_store;
mod identity;

pub use blog_store::InMemoryBlogStore;
pub use identity::InMemoryIdentityService;
