use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::repo::{User, UserRepository};

#[derive(Debug, Error)]
pub enum UserError {
    #[error("user not found")]
    NotFound,
    #[error("user with this email already exists")]
    EmailExists,
    #[error("email already in use by another user")]
    EmailInUse,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Database(#[from] anyhow::Error),
}

/// Field-level patch for updates. `None` means "leave unchanged";
/// clearing a field is deliberately not expressible.
#[derive(Debug, Default, Clone)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Business rules above raw persistence: uniqueness enforcement,
/// not-found translation, partial-update merging, pagination arithmetic.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Returns `(users, total_pages, total_items)`.
    pub async fn list_users(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<User>, i64, i64), UserError> {
        let (users, total) = self.repo.list(page, limit).await?;
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Ok((users, total_pages, total))
    }

    pub async fn get_user(&self, id: i64) -> Result<User, UserError> {
        self.repo.get_by_id(id).await?.ok_or(UserError::NotFound)
    }

    pub async fn create_user(&self, name: &str, email: &str) -> Result<User, UserError> {
        // Advisory pre-check for a friendlier error. Two racing creates with
        // the same email are settled by the store's partial unique index,
        // which may still reject this insert.
        if self.repo.get_by_email(email).await?.is_some() {
            return Err(UserError::EmailExists);
        }
        let user = self.repo.create(name, email).await?;
        debug!(user_id = user.id, "user created");
        Ok(user)
    }

    pub async fn update_user(&self, id: i64, patch: UserPatch) -> Result<User, UserError> {
        let mut user = self.repo.get_by_id(id).await?.ok_or(UserError::NotFound)?;

        if let Some(email) = patch.email {
            if email != user.email {
                if let Some(holder) = self.repo.get_by_email(&email).await? {
                    if holder.id != user.id {
                        return Err(UserError::EmailInUse);
                    }
                }
                user.email = email;
            }
        }
        if let Some(name) = patch.name {
            user.name = name;
        }

        let updated = self.repo.update(&user).await?;
        debug!(user_id = updated.id, "user updated");
        Ok(updated)
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), UserError> {
        if self.repo.get_by_id(id).await?.is_none() {
            return Err(UserError::NotFound);
        }
        self.repo.delete(id).await?;
        debug!(user_id = id, "user soft-deleted");
        Ok(())
    }
}
