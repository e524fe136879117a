//! Resolves every request to a capability-checked identity.
//!
//! Handlers never branch on "logged in or not": they extract a
//! [`CurrentUser`] and call [`CurrentUser::can`]. An unauthenticated request
//! resolves to the `Guest` sentinel, which denies every permission.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use loco_rs::prelude::*;
use std::collections::HashSet;

use crate::models::{
    roles::{self, Permission},
    users,
};

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: users::Model,
    pub role: roles::Model,
    permissions: HashSet<Permission>,
}

/// The identity a request acts as: either a persisted user with its role's
/// permission set, or the anonymous guest.
#[derive(Debug, Clone)]
pub enum CurrentUser {
    Authenticated(AuthenticatedUser),
    Guest,
}

impl CurrentUser {
    /// Loads a user's role and permissions into an authenticated identity.
    ///
    /// # Errors
    ///
    /// Returns a `ModelError` when the role or permissions cannot be loaded.
    pub async fn load(db: &DatabaseConnection, user: users::Model) -> ModelResult<Self> {
        let role = user.role(db).await?;
        let permissions = role.permissions(db).await?.into_iter().collect();
        Ok(Self::Authenticated(AuthenticatedUser {
            user,
            role,
            permissions,
        }))
    }

    /// The uniform capability check. Guests deny everything.
    #[must_use]
    pub fn can(&self, permission: Permission) -> bool {
        match self {
            Self::Authenticated(auth) => auth.permissions.contains(&permission),
            Self::Guest => false,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        match self {
            Self::Authenticated(auth) => auth.role.name == roles::ADMIN_ROLE,
            Self::Guest => false,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The granted permissions, sorted by name for stable output.
    #[must_use]
    pub fn permissions(&self) -> Vec<Permission> {
        match self {
            Self::Authenticated(auth) => {
                let mut permissions: Vec<Permission> = auth.permissions.iter().copied().collect();
                permissions.sort_by_key(|p| p.as_str());
                permissions
            }
            Self::Guest => Vec::new(),
        }
    }

    /// The persisted user behind this identity, if any.
    #[must_use]
    pub fn user(&self) -> Option<&users::Model> {
        match self {
            Self::Authenticated(auth) => Some(&auth.user),
            Self::Guest => None,
        }
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppContext: FromRef<S>,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ctx = AppContext::from_ref(state);
        let Ok(jwt) = auth::JWT::from_request_parts(parts, state).await else {
            return Ok(Self::Guest);
        };
        // A token for a since-deleted account degrades to guest rather than
        // failing the request.
        match users::Model::find_by_pid(&ctx.db, &jwt.claims.pid).await {
            Ok(user) => Ok(Self::load(&ctx.db, user).await?),
            Err(ModelError::EntityNotFound) => Ok(Self::Guest),
            Err(err) => Err(err.into()),
        }
    }
}
