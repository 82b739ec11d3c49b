//! Account management: registration and profile edits
//!
//! Handlers only see the [`AccountManager`] trait. [`LocalAccountManager`]
//! implements it on top of a [`UserStore`], with argon2 hashing and the form
//! rules in [`crate::validation`].

use std::sync::Arc;

use async_trait::async_trait;
use common::{
    error::DatabaseError,
    password::{hash_password, verify_password},
    user::{User, canonicalize},
};
use thiserror::Error;
use tracing::{error, info};

use crate::{
    error::ApiError,
    models::user::{NewUser, ProfileChanges, ProfileForm, RegistrationForm, UserProjection},
    repositories::UserStore,
    validation::{ValidationErrors, validate_email, validate_password, validate_username},
};

/// Errors raised while registering or editing an account
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Validation Failed")]
    Validation(ValidationErrors),

    #[error("User not found")]
    UnknownUser,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<ValidationErrors> for AccountError {
    fn from(errors: ValidationErrors) -> Self {
        AccountError::Validation(errors)
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Validation(errors) => ApiError::Validation(errors),
            AccountError::UnknownUser => ApiError::NotFound("User not found"),
            AccountError::Hashing(msg) => {
                error!("Password hashing failed: {}", msg);
                ApiError::InternalServerError
            }
            AccountError::Database(e) => ApiError::Database(e),
        }
    }
}

/// Registration and profile edition
#[async_trait]
pub trait AccountManager: Send + Sync {
    async fn register(&self, form: RegistrationForm) -> Result<UserProjection, AccountError>;

    async fn update_profile(
        &self,
        user: &User,
        form: ProfileForm,
    ) -> Result<UserProjection, AccountError>;
}

/// [`AccountManager`] backed by the application's own user store
#[derive(Clone)]
pub struct LocalAccountManager {
    users: Arc<dyn UserStore>,
}

impl LocalAccountManager {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Flag `username` when its canonical form belongs to someone other than `owner`
    async fn check_username_free(
        &self,
        errors: &mut ValidationErrors,
        canonical: &str,
        owner: Option<i64>,
    ) -> Result<(), AccountError> {
        if let Some(existing) = self.users.find_by_username_canonical(canonical).await? {
            if Some(existing.id) != owner {
                errors.add("username", "The username is already used");
            }
        }
        Ok(())
    }

    async fn check_email_free(
        &self,
        errors: &mut ValidationErrors,
        canonical: &str,
        owner: Option<i64>,
    ) -> Result<(), AccountError> {
        if let Some(existing) = self.users.find_by_email_canonical(canonical).await? {
            if Some(existing.id) != owner {
                errors.add("email", "The email is already used");
            }
        }
        Ok(())
    }
}

/// A unique index caught a duplicate the lookups missed
fn duplicate_account(e: DatabaseError) -> AccountError {
    if e.is_unique_violation() {
        let mut errors = ValidationErrors::new();
        errors.add("username", "The username or email is already used");
        AccountError::Validation(errors)
    } else {
        AccountError::Database(e)
    }
}

#[async_trait]
impl AccountManager for LocalAccountManager {
    async fn register(&self, form: RegistrationForm) -> Result<UserProjection, AccountError> {
        let username = form.username.trim().to_string();
        let email = form.email.trim().to_string();
        let password = form.plain_password;

        let mut errors = ValidationErrors::new();
        errors.check("username", validate_username(&username));
        errors.check("email", validate_email(&email));
        errors.check("plainPassword", validate_password(&password.first));
        if password.first != password.second {
            errors.add("plainPassword", "The entered passwords don't match");
        }

        let username_canonical = canonicalize(&username);
        let email_canonical = canonicalize(&email);
        if errors.field("username").is_none() {
            self.check_username_free(&mut errors, &username_canonical, None)
                .await?;
        }
        if errors.field("email").is_none() {
            self.check_email_free(&mut errors, &email_canonical, None)
                .await?;
        }
        errors.into_result()?;

        let password_hash =
            hash_password(&password.first).map_err(|e| AccountError::Hashing(e.to_string()))?;

        let user = self
            .users
            .create(&NewUser {
                username,
                username_canonical,
                email,
                email_canonical,
                password_hash,
            })
            .await
            .map_err(duplicate_account)?;

        info!("Registered user {}", user.id);
        Ok(UserProjection::from(&user))
    }

    async fn update_profile(
        &self,
        user: &User,
        form: ProfileForm,
    ) -> Result<UserProjection, AccountError> {
        let mut errors = ValidationErrors::new();

        let password_ok = !form.current_password.is_empty()
            && verify_password(&form.current_password, &user.password_hash)
                .map_err(|e| AccountError::Hashing(e.to_string()))?;
        if !password_ok {
            errors.add("currentPassword", "The entered password is invalid");
        }

        let mut changes = ProfileChanges::default();

        if let Some(username) = form.username.map(|u| u.trim().to_string()) {
            errors.check("username", validate_username(&username));
            let canonical = canonicalize(&username);
            if errors.field("username").is_none() {
                self.check_username_free(&mut errors, &canonical, Some(user.id))
                    .await?;
            }
            changes.username = Some((username, canonical));
        }

        if let Some(email) = form.email.map(|e| e.trim().to_string()) {
            errors.check("email", validate_email(&email));
            let canonical = canonicalize(&email);
            if errors.field("email").is_none() {
                self.check_email_free(&mut errors, &canonical, Some(user.id))
                    .await?;
            }
            changes.email = Some((email, canonical));
        }

        errors.into_result()?;

        if changes.is_empty() {
            return Ok(UserProjection::from(user));
        }

        let updated = self
            .users
            .update_profile(user.id, &changes)
            .await
            .map_err(duplicate_account)?
            .ok_or(AccountError::UnknownUser)?;

        info!("Updated profile of user {}", updated.id);
        Ok(UserProjection::from(&updated))
    }
}
