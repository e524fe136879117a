use albumy::{app::App, models::users};
use loco_rs::testing::prelude::*;
use serde_json::{json, Value};
use serial_test::serial;

use crate::helpers::{auth_header, csrf_headers, init_user_login, register_user, USER_PASSWORD};

#[tokio::test]
#[serial]
async fn can_register() {
    request::<App, _, _>(|request, ctx| async move {
        seed::<App>(&ctx).await.unwrap();

        let user = register_user(&request, &ctx, "loco", "test@loco.com").await;

        assert_eq!(user.username, "loco");
        assert!(user.email_verification_token.is_some());
        assert!(user.email_verification_sent_at.is_some());
        assert_eq!(user.role(&ctx.db).await.unwrap().name, "User");

        let deliveries = ctx.mailer.clone().unwrap().deliveries();
        assert_eq!(deliveries.count, 1, "the confirmation mail should be queued");
    })
    .await;
}

#[tokio::test]
#[serial]
async fn register_is_silent_on_duplicate_email() {
    request::<App, _, _>(|request, ctx| async move {
        seed::<App>(&ctx).await.unwrap();

        register_user(&request, &ctx, "loco", "test@loco.com").await;

        let [(cookie_name, cookie_value), (header_name, header_value)] = csrf_headers();
        let response = request
            .post("/api/auth/register")
            .add_header(cookie_name, cookie_value)
            .add_header(header_name, header_value)
            .json(&json!({
                "name": "other",
                "username": "other",
                "email": "test@loco.com",
                "password": USER_PASSWORD,
            }))
            .await;

        // same answer as success, no second mail
        assert_eq!(response.status_code(), 200);
        assert!(users::Model::find_by_username(&ctx.db, "other").await.is_err());
        assert_eq!(ctx.mailer.clone().unwrap().deliveries().count, 1);
    })
    .await;
}

#[tokio::test]
#[serial]
async fn register_without_csrf_token_is_bad_request() {
    request::<App, _, _>(|request, _ctx| async move {
        let response = request
            .post("/api/auth/register")
            .json(&json!({
                "name": "loco",
                "username": "loco",
                "email": "test@loco.com",
                "password": USER_PASSWORD,
            }))
            .await;

        assert_eq!(response.status_code(), 400);
        assert!(response.text().contains("The CSRF token is missing."));
    })
    .await;
}

#[tokio::test]
#[serial]
async fn register_with_mismatched_csrf_tokens_is_bad_request() {
    request::<App, _, _>(|request, _ctx| async move {
        let response = request
            .post("/api/auth/register")
            .add_header(
                axum::http::HeaderName::from_static("cookie"),
                axum::http::HeaderValue::from_static("csrf_token=abc"),
            )
            .add_header(
                axum::http::HeaderName::from_static("x-csrf-token"),
                axum::http::HeaderValue::from_static("other"),
            )
            .json(&json!({
                "name": "loco",
                "username": "loco",
                "email": "test@loco.com",
                "password": USER_PASSWORD,
            }))
            .await;

        assert_eq!(response.status_code(), 400);
        assert!(response.text().contains("The CSRF tokens do not match."));
    })
    .await;
}

#[tokio::test]
#[serial]
async fn csrf_endpoint_sets_cookie() {
    request::<App, _, _>(|request, _ctx| async move {
        let response = request.get("/api/auth/csrf").await;
        assert_eq!(response.status_code(), 200);

        let body: Value = serde_json::from_str(&response.text()).unwrap();
        let token = body["csrf_token"].as_str().unwrap().to_string();
        assert!(!token.is_empty());

        let cookie = response.header("set-cookie");
        assert!(cookie.to_str().unwrap().contains(&token));
    })
    .await;
}

#[tokio::test]
#[serial]
async fn can_login_and_fetch_current() {
    request::<App, _, _>(|request, ctx| async move {
        seed::<App>(&ctx).await.unwrap();

        let logged_in = init_user_login(&request, &ctx, "loco", "test@loco.com").await;

        let (name, value) = auth_header(&logged_in.token);
        let response = request.get("/api/auth/current").add_header(name, value).await;
        assert_eq!(response.status_code(), 200);

        let body: Value = serde_json::from_str(&response.text()).unwrap();
        assert_eq!(body["authenticated"], json!(true));
        assert_eq!(body["is_admin"], json!(false));
        assert_eq!(body["username"], json!("loco"));
        assert_eq!(body["pid"], json!(logged_in.user.pid.to_string()));

        let permissions = body["permissions"].as_array().unwrap();
        assert!(permissions.contains(&json!("COMMENT")));
        assert!(permissions.contains(&json!("UPLOAD")));
        assert!(!permissions.contains(&json!("ADMINISTER")));
    })
    .await;
}

#[tokio::test]
#[serial]
async fn login_with_wrong_password_is_unauthorized() {
    request::<App, _, _>(|request, ctx| async move {
        seed::<App>(&ctx).await.unwrap();

        register_user(&request, &ctx, "loco", "test@loco.com").await;

        let [(cookie_name, cookie_value), (header_name, header_value)] = csrf_headers();
        let response = request
            .post("/api/auth/login")
            .add_header(cookie_name, cookie_value)
            .add_header(header_name, header_value)
            .json(&json!({
                "email": "test@loco.com",
                "password": "not-the-password",
            }))
            .await;

        assert_eq!(response.status_code(), 401);
    })
    .await;
}

#[tokio::test]
#[serial]
async fn login_with_unknown_email_is_unauthorized() {
    request::<App, _, _>(|request, ctx| async move {
        seed::<App>(&ctx).await.unwrap();

        let [(cookie_name, cookie_value), (header_name, header_value)] = csrf_headers();
        let response = request
            .post("/api/auth/login")
            .add_header(cookie_name, cookie_value)
            .add_header(header_name, header_value)
            .json(&json!({
                "email": "nobody@loco.com",
                "password": USER_PASSWORD,
            }))
            .await;

        assert_eq!(response.status_code(), 401);
    })
    .await;
}

#[tokio::test]
#[serial]
async fn verify_with_unknown_token_is_not_found() {
    request::<App, _, _>(|request, ctx| async move {
        seed::<App>(&ctx).await.unwrap();

        let response = request
            .post("/api/auth/verify")
            .json(&json!({ "token": "not-a-real-token" }))
            .await;

        assert_eq!(response.status_code(), 404);
    })
    .await;
}

#[tokio::test]
#[serial]
async fn current_answers_for_guests() {
    request::<App, _, _>(|request, _ctx| async move {
        let response = request.get("/api/auth/current").await;
        assert_eq!(response.status_code(), 200);

        let body: Value = serde_json::from_str(&response.text()).unwrap();
        assert_eq!(
            body,
            json!({
                "authenticated": false,
                "is_admin": false,
                "permissions": [],
                "pid": null,
                "username": null,
                "name": null,
                "email": null,
            })
        );
    })
    .await;
}

#[tokio::test]
#[serial]
async fn can_verify_email() {
    request::<App, _, _>(|request, ctx| async move {
        seed::<App>(&ctx).await.unwrap();

        let user = register_user(&request, &ctx, "loco", "test@loco.com").await;
        let token = user.email_verification_token.clone().unwrap();

        let response = request
            .post("/api/auth/verify")
            .json(&json!({ "token": token }))
            .await;
        assert_eq!(response.status_code(), 200);

        let user = users::Model::find_by_email(&ctx.db, "test@loco.com")
            .await
            .unwrap();
        assert!(user.email_verified_at.is_some());
        assert!(user.email_verification_token.is_none());
    })
    .await;
}

#[tokio::test]
#[serial]
async fn can_reset_password_with_token() {
    request::<App, _, _>(|request, ctx| async move {
        seed::<App>(&ctx).await.unwrap();

        register_user(&request, &ctx, "loco", "test@loco.com").await;

        let [(cookie_name, cookie_value), (header_name, header_value)] = csrf_headers();
        let response = request
            .post("/api/auth/forgot")
            .add_header(cookie_name, cookie_value)
            .add_header(header_name, header_value)
            .json(&json!({ "email": "test@loco.com" }))
            .await;
        assert_eq!(response.status_code(), 200);

        let user = users::Model::find_by_email(&ctx.db, "test@loco.com")
            .await
            .unwrap();
        let reset_token = user.reset_token.clone().unwrap();
        assert_eq!(ctx.mailer.clone().unwrap().deliveries().count, 2);

        let [(cookie_name, cookie_value), (header_name, header_value)] = csrf_headers();
        let response = request
            .post("/api/auth/reset")
            .add_header(cookie_name, cookie_value)
            .add_header(header_name, header_value)
            .json(&json!({
                "token": reset_token,
                "password": "brand-new-password",
            }))
            .await;
        assert_eq!(response.status_code(), 200);

        let user = users::Model::find_by_email(&ctx.db, "test@loco.com")
            .await
            .unwrap();
        assert!(user.reset_token.is_none());
        assert!(user.verify_password("brand-new-password"));
    })
    .await;
}

#[tokio::test]
#[serial]
async fn forgot_is_silent_for_unknown_email() {
    request::<App, _, _>(|request, ctx| async move {
        seed::<App>(&ctx).await.unwrap();

        let [(cookie_name, cookie_value), (header_name, header_value)] = csrf_headers();
        let response = request
            .post("/api/auth/forgot")
            .add_header(cookie_name, cookie_value)
            .add_header(header_name, header_value)
            .json(&json!({ "email": "nobody@loco.com" }))
            .await;

        assert_eq!(response.status_code(), 200);
        assert_eq!(ctx.mailer.clone().unwrap().deliveries().count, 0);
    })
    .await;
}
