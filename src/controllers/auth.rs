use axum::debug_handler;
use axum::Json;
use loco_rs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    access::{csrf, CsrfGuard, CurrentUser},
    mailers::auth::AuthMailer,
    models::users::{self, LoginParams, RegisterParams},
    views::auth::{CsrfResponse, CurrentResponse, LoginResponse},
};

#[derive(Debug, Deserialize, Serialize)]
pub struct VerifyParams {
    pub token: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ForgotParams {
    pub email: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ResetParams {
    pub token: String,
    pub password: String,
}

/// Issues a CSRF token: set as a cookie and echoed in the body so clients
/// can double-submit it on unsafe requests.
#[debug_handler]
async fn csrf() -> Result<Response> {
    let token = csrf::generate_token();
    let mut response = format::json(CsrfResponse {
        csrf_token: token.clone(),
    })?;
    let cookie = format!("{}={token}; Path=/; SameSite=Lax", csrf::CSRF_COOKIE);
    response.headers_mut().insert(
        axum::http::header::SET_COOKIE,
        axum::http::HeaderValue::from_str(&cookie).map_err(|e| Error::Message(e.to_string()))?,
    );
    Ok(response)
}

/// Creates a user with the default role and queues the confirmation mail.
/// A duplicate email or username answers the same as success, so the
/// endpoint does not leak which accounts exist.
#[debug_handler]
async fn register(
    State(ctx): State<AppContext>,
    _csrf: CsrfGuard,
    Json(params): Json<RegisterParams>,
) -> Result<Response> {
    let res = users::Model::create_with_password(&ctx.db, &params).await;

    let user = match res {
        Ok(user) => user,
        Err(err) => {
            tracing::info!(
                message = err.to_string(),
                user_email = &params.email,
                "could not register user",
            );
            return format::json(());
        }
    };

    let user = user
        .into_active_model()
        .set_email_verification_sent(&ctx.db)
        .await?;

    AuthMailer::send_confirm_email(&ctx, &user).await?;

    format::json(())
}

/// Marks the account behind the token as having a confirmed email.
#[debug_handler]
async fn verify(State(ctx): State<AppContext>, Json(params): Json<VerifyParams>) -> Result<Response> {
    let user = match users::Model::find_by_verification_token(&ctx.db, &params.token).await {
        Ok(user) => user,
        Err(ModelError::EntityNotFound) => return Err(Error::NotFound),
        Err(err) => return Err(err.into()),
    };

    if user.email_verified_at.is_some() {
        tracing::info!(pid = user.pid.to_string(), "user already verified");
    } else {
        let active_model = user.into_active_model();
        let user = active_model.verified(&ctx.db).await?;
        tracing::info!(pid = user.pid.to_string(), "user verified");
    }

    format::json(())
}

/// Creates a JWT from a valid email/password pair.
#[debug_handler]
async fn login(
    State(ctx): State<AppContext>,
    _csrf: CsrfGuard,
    Json(params): Json<LoginParams>,
) -> Result<Response> {
    // an unknown email answers the same as a wrong password
    let Ok(user) = users::Model::find_by_email(&ctx.db, &params.email).await else {
        return unauthorized("unauthorized!");
    };

    let valid = user.verify_password(&params.password);
    if !valid {
        return unauthorized("unauthorized!");
    }

    let jwt_secret = ctx.config.get_jwt_config()?;

    let token = user
        .generate_jwt(&jwt_secret.secret, jwt_secret.expiration)
        .or_else(|_| unauthorized("unauthorized!"))?;

    format::json(LoginResponse::new(&user, &token))
}

/// Queues a password-reset mail. Answers 200 whether or not the account
/// exists.
#[debug_handler]
async fn forgot(
    State(ctx): State<AppContext>,
    _csrf: CsrfGuard,
    Json(params): Json<ForgotParams>,
) -> Result<Response> {
    let Ok(user) = users::Model::find_by_email(&ctx.db, &params.email).await else {
        // do not expose whether the account exists
        return format::json(());
    };

    let user = user
        .into_active_model()
        .set_forgot_password_sent(&ctx.db)
        .await?;

    AuthMailer::send_reset_password_email(&ctx, &user).await?;

    format::json(())
}

/// Consumes a reset token and replaces the password.
#[debug_handler]
async fn reset(
    State(ctx): State<AppContext>,
    _csrf: CsrfGuard,
    Json(params): Json<ResetParams>,
) -> Result<Response> {
    let Ok(user) = users::Model::find_by_reset_token(&ctx.db, &params.token).await else {
        // silently return, the token either never existed or was consumed
        tracing::info!("reset token not found");
        return format::json(());
    };

    user.into_active_model()
        .reset_password(&ctx.db, &params.password)
        .await?;

    format::json(())
}

/// Answers for authenticated users and guests alike; the guest answer
/// carries an empty capability set.
#[debug_handler(state = AppContext)]
async fn current(current: CurrentUser) -> Result<Response> {
    format::json(CurrentResponse::new(&current))
}

pub fn routes() -> Routes {
    Routes::new()
        .prefix("/api/auth")
        .add("/csrf", get(csrf))
        .add("/register", post(register))
        .add("/verify", post(verify))
        .add("/login", post(login))
        .add("/forgot", post(forgot))
        .add("/reset", post(reset))
        .add("/current", get(current))
}
