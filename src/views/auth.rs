use serde::{Deserialize, Serialize};

use crate::access::CurrentUser;
use crate::models::users;

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub pid: String,
    pub name: String,
    pub username: String,
    pub is_verified: bool,
}

impl LoginResponse {
    #[must_use]
    pub fn new(user: &users::Model, token: &String) -> Self {
        Self {
            token: token.to_string(),
            pid: user.pid.to_string(),
            name: user.name.clone(),
            username: user.username.clone(),
            is_verified: user.email_verified_at.is_some(),
        }
    }
}

/// The uniform "who am I" answer; guests get `authenticated: false` and an
/// empty capability set instead of an error.
#[derive(Debug, Deserialize, Serialize)]
pub struct CurrentResponse {
    pub authenticated: bool,
    pub is_admin: bool,
    pub permissions: Vec<String>,
    pub pid: Option<String>,
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl CurrentResponse {
    #[must_use]
    pub fn new(current: &CurrentUser) -> Self {
        Self {
            authenticated: current.is_authenticated(),
            is_admin: current.is_admin(),
            permissions: current
                .permissions()
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            pid: current.user().map(|u| u.pid.to_string()),
            username: current.user().map(|u| u.username.clone()),
            name: current.user().map(|u| u.name.clone()),
            email: current.user().map(|u| u.email.clone()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CsrfResponse {
    pub csrf_token: String,
}
