//! In-memory identity store with real Argon2 credential hashing.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::auth::{LoginCredentials, Registration};
use crate::domain::ports::{IdentityError, IdentityService};
use crate::domain::user::{User, UserId, Username};
use crate::outbound::password::{hash_password, verify_password};

struct Account {
    user: User,
    password_hash: String,
}

/// Identity adapter backed by process memory.
///
/// Hashing goes through the same Argon2 code path as the Diesel adapter
/// so tests exercise real verification, not a shortcut comparison.
#[derive(Clone, Default)]
pub struct InMemoryIdentityService {
    accounts: Arc<Mutex<Vec<Account>>>,
}

impl InMemoryIdentityService {
    /// Create an empty identity store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_accounts<T>(&self, f: impl FnOnce(&mut Vec<Account>) -> T) -> T {
        let mut accounts = self
            .accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut accounts)
    }
}

#[async_trait]
impl IdentityService for InMemoryIdentityService {
    async fn register(&self, registration: &Registration) -> Result<User, IdentityError> {
        let password_hash = hash_password(registration.password())?;
        self.with_accounts(|accounts| {
            if accounts
                .iter()
                .any(|account| account.user.username() == registration.username())
            {
                return Err(IdentityError::UsernameTaken);
            }
            let user = User::new(UserId::random(), registration.username().clone());
            accounts.push(Account {
                user: user.clone(),
                password_hash,
            });
            Ok(user)
        })
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, IdentityError> {
        let found = self.with_accounts(|accounts| {
            accounts
                .iter()
                .find(|account| account.user.username().as_ref() == credentials.username())
                .map(|account| (account.user.clone(), account.password_hash.clone()))
        });
        let Some((user, password_hash)) = found else {
            return Err(IdentityError::InvalidCredentials);
        };
        if verify_password(credentials.password(), &password_hash)? {
            Ok(user)
        } else {
            Err(IdentityError::InvalidCredentials)
        }
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, IdentityError> {
        Ok(self.with_accounts(|accounts| {
            accounts
                .iter()
                .find(|account| account.user.username() == username)
                .map(|account| account.user.clone())
        }))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, IdentityError> {
        Ok(self.with_accounts(|accounts| {
            accounts
                .iter()
                .find(|account| account.user.id() == id)
                .map(|account| account.user.clone())
        }))
    }
}
