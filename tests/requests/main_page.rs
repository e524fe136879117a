use albumy::app::App;
use albumy::models::{comments, tags};
use loco_rs::testing::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{json, Value};
use serial_test::serial;

use crate::helpers::{add_photo, auth_header, csrf_headers, init_user_login, register_user};

#[tokio::test]
#[serial]
async fn feed_lists_all_photos_newest_first() {
    request::<App, _, _>(|request, ctx| async move {
        seed::<App>(&ctx).await.unwrap();

        let alice = register_user(&request, &ctx, "alice", "alice@loco.com").await;
        let bob = register_user(&request, &ctx, "bob", "bob@loco.com").await;
        add_photo(&ctx.db, alice.id, "oldest.jpg", 3).await;
        add_photo(&ctx.db, bob.id, "newest.jpg", 0).await;
        add_photo(&ctx.db, alice.id, "middle.jpg", 1).await;

        let response = request.get("/api").await;
        assert_eq!(response.status_code(), 200);

        let body: Value = serde_json::from_str(&response.text()).unwrap();
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["filename"], "newest.jpg");
        assert_eq!(results[1]["filename"], "middle.jpg");
        assert_eq!(results[2]["filename"], "oldest.jpg");
        assert_eq!(body["pagination"]["total_items"], 3);
    })
    .await;
}

#[tokio::test]
#[serial]
async fn shows_photo_with_tags_and_comments() {
    request::<App, _, _>(|request, ctx| async move {
        seed::<App>(&ctx).await.unwrap();

        let user = register_user(&request, &ctx, "alice", "alice@loco.com").await;
        let photo = add_photo(&ctx.db, user.id, "sunset.jpg", 0).await;

        let tag = tags::ActiveModel::find_or_create(&ctx.db, "sunset")
            .await
            .unwrap();
        tag.attach_to_photo(&ctx.db, photo.id).await.unwrap();
        // attaching twice must not duplicate the tag
        tag.attach_to_photo(&ctx.db, photo.id).await.unwrap();

        comments::ActiveModel::create(&ctx.db, user.id, photo.id, "First!")
            .await
            .unwrap();

        let response = request.get(&format!("/api/photo/{}", photo.id)).await;
        assert_eq!(response.status_code(), 200);

        let body: Value = serde_json::from_str(&response.text()).unwrap();
        assert_eq!(body["filename"], "sunset.jpg");
        assert_eq!(body["author"], "alice");
        assert_eq!(body["tags"], json!(["sunset"]));

        let comment_items = body["comments"].as_array().unwrap();
        assert_eq!(comment_items.len(), 1);
        assert_eq!(comment_items[0]["body"], "First!");
        assert_eq!(comment_items[0]["author"], "alice");
    })
    .await;
}

#[tokio::test]
#[serial]
async fn missing_photo_is_not_found() {
    request::<App, _, _>(|request, _ctx| async move {
        let response = request.get("/api/photo/9999").await;
        assert_eq!(response.status_code(), 404);
    })
    .await;
}

#[tokio::test]
#[serial]
async fn logged_in_user_can_comment() {
    request::<App, _, _>(|request, ctx| async move {
        seed::<App>(&ctx).await.unwrap();

        let logged_in = init_user_login(&request, &ctx, "alice", "alice@loco.com").await;
        let photo = add_photo(&ctx.db, logged_in.user.id, "sunset.jpg", 0).await;

        let [(cookie_name, cookie_value), (header_name, header_value)] = csrf_headers();
        let (auth_name, auth_value) = auth_header(&logged_in.token);
        let response = request
            .post(&format!("/api/photo/{}/comments", photo.id))
            .add_header(cookie_name, cookie_value)
            .add_header(header_name, header_value)
            .add_header(auth_name, auth_value)
            .json(&json!({ "body": "Nice shot!" }))
            .await;
        assert_eq!(response.status_code(), 200);

        let body: Value = serde_json::from_str(&response.text()).unwrap();
        assert_eq!(body["body"], "Nice shot!");
        assert_eq!(body["author"], "alice");

        assert_eq!(comments::Entity::find().count(&ctx.db).await.unwrap(), 1);
    })
    .await;
}

#[tokio::test]
#[serial]
async fn guest_cannot_comment() {
    request::<App, _, _>(|request, ctx| async move {
        seed::<App>(&ctx).await.unwrap();

        let user = register_user(&request, &ctx, "alice", "alice@loco.com").await;
        let photo = add_photo(&ctx.db, user.id, "sunset.jpg", 0).await;

        let [(cookie_name, cookie_value), (header_name, header_value)] = csrf_headers();
        let response = request
            .post(&format!("/api/photo/{}/comments", photo.id))
            .add_header(cookie_name, cookie_value)
            .add_header(header_name, header_value)
            .json(&json!({ "body": "Nice shot!" }))
            .await;

        assert_eq!(response.status_code(), 403);
        assert_eq!(comments::Entity::find().count(&ctx.db).await.unwrap(), 0);
    })
    .await;
}

#[tokio::test]
#[serial]
async fn comment_requires_csrf_token() {
    request::<App, _, _>(|request, ctx| async move {
        seed::<App>(&ctx).await.unwrap();

        let logged_in = init_user_login(&request, &ctx, "alice", "alice@loco.com").await;
        let photo = add_photo(&ctx.db, logged_in.user.id, "sunset.jpg", 0).await;

        let (auth_name, auth_value) = auth_header(&logged_in.token);
        let response = request
            .post(&format!("/api/photo/{}/comments", photo.id))
            .add_header(auth_name, auth_value)
            .json(&json!({ "body": "Nice shot!" }))
            .await;

        assert_eq!(response.status_code(), 400);
        assert_eq!(comments::Entity::find().count(&ctx.db).await.unwrap(), 0);
    })
    .await;
}

#[tokio::test]
#[serial]
async fn empty_comment_body_is_rejected() {
    request::<App, _, _>(|request, ctx| async move {
        seed::<App>(&ctx).await.unwrap();

        let logged_in = init_user_login(&request, &ctx, "alice", "alice@loco.com").await;
        let photo = add_photo(&ctx.db, logged_in.user.id, "sunset.jpg", 0).await;

        let [(cookie_name, cookie_value), (header_name, header_value)] = csrf_headers();
        let (auth_name, auth_value) = auth_header(&logged_in.token);
        let response = request
            .post(&format!("/api/photo/{}/comments", photo.id))
            .add_header(cookie_name, cookie_value)
            .add_header(header_name, header_value)
            .add_header(auth_name, auth_value)
            .json(&json!({ "body": "   " }))
            .await;

        assert_eq!(response.status_code(), 400);
        assert_eq!(comments::Entity::find().count(&ctx.db).await.unwrap(), 0);
    })
    .await;
}
