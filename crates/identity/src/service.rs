//! Signup and login flows.

use std::sync::Arc;

use serde_json::{Map as JsonMap, json};

use agrovault_core::{EntityId, ServiceError, ServiceResult};
use agrovault_store::{DocumentStore, DocumentStoreExt, StoreError};

use crate::password::{hash_password, verify_password};
use crate::user::{Session, User};

/// Default role for auto-provisioned accounts.
const DEFAULT_ROLE: &str = "consumer";

/// Identity & session service over the users collection.
#[derive(Clone)]
pub struct IdentityService {
    store: Arc<dyn DocumentStore>,
}

impl IdentityService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create an account. Fails on empty inputs and on a taken email.
    ///
    /// Only the exact empty string fails validation; inputs are taken as
    /// sent, whitespace included.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> ServiceResult<Session> {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ServiceError::validation(
                "Name, email and password are required",
            ));
        }

        if self.find_by_email(email).await?.is_some() {
            return Err(ServiceError::already_exists("User already exists"));
        }

        let user = User {
            id: EntityId::generate().into_string(),
            name: name.to_string(),
            email: email.to_string(),
            password: hash_password(password)?,
            role: role.unwrap_or(DEFAULT_ROLE).to_string(),
        };

        // The store enforces email uniqueness too, which closes the race
        // between the lookup above and this insert.
        match self.store.insert_doc(&user).await {
            Ok(()) => {}
            Err(StoreError::DuplicateKey(_)) => {
                return Err(ServiceError::already_exists("User already exists"));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(user_id = %user.id, "user signed up");
        Ok(Session::issue(&user))
    }

    /// Log in. Never fails on credentials: an unknown email provisions a new
    /// account, and a mismatched password replaces the stored hash with the
    /// hash of the presented password. Deliberate product behavior, not a
    /// security mechanism.
    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<Session> {
        if email.is_empty() {
            return Err(ServiceError::validation("Email is required"));
        }

        let user = match self.find_by_email(email).await? {
            None => self.provision(email, password).await?,
            Some(user) => {
                if verify_password(&user.password, password) {
                    user
                } else {
                    self.rehash(user, password).await?
                }
            }
        };

        Ok(Session::issue(&user))
    }

    async fn find_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        Ok(self
            .store
            .find_doc_by::<User>("email", &json!(email))
            .await?)
    }

    async fn provision(&self, email: &str, password: &str) -> ServiceResult<User> {
        let user = User {
            id: EntityId::generate().into_string(),
            name: name_from_email(email),
            email: email.to_string(),
            password: hash_password(password)?,
            role: DEFAULT_ROLE.to_string(),
        };
        self.store.insert_doc(&user).await?;
        tracing::info!(user_id = %user.id, "auto-provisioned account on first login");
        Ok(user)
    }

    async fn rehash(&self, mut user: User, password: &str) -> ServiceResult<User> {
        let new_hash = hash_password(password)?;

        let mut fields = JsonMap::new();
        fields.insert("password".to_string(), json!(new_hash));
        self.store
            .update_doc::<User>(&user.id, fields)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => ServiceError::not_found("User not found"),
                other => other.into(),
            })?;

        tracing::warn!(user_id = %user.id, "stored credential replaced on mismatch");
        user.password = new_hash;
        Ok(user)
    }
}

/// Display name derived from an email's local part, title-cased per letter
/// run (first letter after a non-letter goes uppercase, the rest lower).
/// An empty local part falls back to "User".
fn name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    if local.is_empty() {
        return "User".to_string();
    }

    let mut name = String::with_capacity(local.len());
    let mut at_word_start = true;
    for ch in local.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                name.extend(ch.to_uppercase());
            } else {
                name.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            name.push(ch);
            at_word_start = true;
        }
    }
    name
}
