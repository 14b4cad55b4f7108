//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain ports backed by PostgreSQL via
//! `diesel-async` with `bb8` connection pooling.
//!
//! The adapters are thin translators: Diesel row structs (`models.rs`) and
//! schema definitions (`schema.rs`) stay internal to this module, and every
//! database error is mapped to the owning port's error type. No business
//! logic lives here.

mod diesel_article_repository;
mod diesel_comment_repository;
mod diesel_identity_service;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_article_repository::DieselArticleRepository;
pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_identity_service::DieselIdentityService;
pub use migrations::{run_pending_migrations, MigrationError};
pub use pool::{DbPool, PoolConfig, PoolError};
