//! PostgreSQL-backed `IdentityService` implementation using Diesel ORM.
//!
//! Credential hashes never leave this adapter: rows carry the stored hash
//! only as far as verification, and the domain sees the public identity.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::auth::{LoginCredentials, Registration};
use crate::domain::ports::{IdentityError, IdentityService};
use crate::domain::user::{User, UserId, Username};
use crate::outbound::password::{hash_password, verify_password};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `IdentityService` port.
#[derive(Clone)]
pub struct DieselIdentityService {
    pool: DbPool,
}

impl DieselIdentityService {
    /// Create a new service with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_row_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRow>, IdentityError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)
    }
}

fn map_pool_error(error: PoolError) -> IdentityError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            IdentityError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> IdentityError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        // The unique index on users.username is the uniqueness authority.
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            IdentityError::UsernameTaken
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            IdentityError::connection("database connection error")
        }
        _ => IdentityError::query("database error"),
    }
}

fn row_to_user(row: UserRow) -> Result<User, IdentityError> {
    row.into_user().map_err(IdentityError::query)
}

#[async_trait]
impl IdentityService for DieselIdentityService {
    async fn register(&self, registration: &Registration) -> Result<User, IdentityError> {
        let password_hash = hash_password(registration.password())?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: Uuid::new_v4(),
            username: registration.username().as_ref(),
            password_hash: &password_hash,
        };

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_user(row)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, IdentityError> {
        let Some(row) = self.find_row_by_username(credentials.username()).await? else {
            return Err(IdentityError::InvalidCredentials);
        };

        if verify_password(credentials.password(), &row.password_hash)? {
            row_to_user(row)
        } else {
            Err(IdentityError::InvalidCredentials)
        }
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, IdentityError> {
        let row = self.find_row_by_username(username.as_ref()).await?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, IdentityError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}
