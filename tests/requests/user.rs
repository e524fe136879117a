use albumy::app::App;
use loco_rs::testing::prelude::*;
use serde_json::Value;
use serial_test::serial;

use crate::helpers::{add_photo, register_user};

#[tokio::test]
#[serial]
async fn unknown_username_is_not_found() {
    request::<App, _, _>(|request, _ctx| async move {
        let response = request.get("/api/user/nobody").await;
        assert_eq!(response.status_code(), 404);
    })
    .await;
}

#[tokio::test]
#[serial]
async fn lists_user_photos_newest_first() {
    request::<App, _, _>(|request, ctx| async move {
        seed::<App>(&ctx).await.unwrap();

        let user = register_user(&request, &ctx, "gallery", "gallery@loco.com").await;
        for age in [4, 2, 0, 3, 1] {
            add_photo(&ctx.db, user.id, &format!("photo-{age}.jpg"), age).await;
        }
        // someone else's photo must not show up on this page
        let other = register_user(&request, &ctx, "other", "other@loco.com").await;
        add_photo(&ctx.db, other.id, "not-mine.jpg", 0).await;

        let response = request.get("/api/user/gallery?page=1&page_size=2").await;
        assert_eq!(response.status_code(), 200);

        let body: Value = serde_json::from_str(&response.text()).unwrap();
        assert_eq!(body["user"]["username"], "gallery");

        let results = body["photos"]["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["filename"], "photo-0.jpg");
        assert_eq!(results[1]["filename"], "photo-1.jpg");

        let info = &body["photos"]["pagination"];
        assert_eq!(info["page"], 1);
        assert_eq!(info["page_size"], 2);
        assert_eq!(info["total_pages"], 3);
        assert_eq!(info["total_items"], 5);

        // the last page holds the oldest photo
        let response = request.get("/api/user/gallery?page=3&page_size=2").await;
        let body: Value = serde_json::from_str(&response.text()).unwrap();
        let results = body["photos"]["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["filename"], "photo-4.jpg");
    })
    .await;
}

#[tokio::test]
#[serial]
async fn page_size_defaults_to_settings() {
    request::<App, _, _>(|request, ctx| async move {
        seed::<App>(&ctx).await.unwrap();

        let user = register_user(&request, &ctx, "gallery", "gallery@loco.com").await;
        add_photo(&ctx.db, user.id, "only-one.jpg", 0).await;

        let response = request.get("/api/user/gallery").await;
        assert_eq!(response.status_code(), 200);

        let body: Value = serde_json::from_str(&response.text()).unwrap();
        let info = &body["photos"]["pagination"];
        assert_eq!(info["page"], 1);
        assert_eq!(info["page_size"], 12);
        assert_eq!(info["total_items"], 1);
    })
    .await;
}

#[tokio::test]
#[serial]
async fn empty_gallery_is_an_empty_page() {
    request::<App, _, _>(|request, ctx| async move {
        seed::<App>(&ctx).await.unwrap();

        register_user(&request, &ctx, "gallery", "gallery@loco.com").await;

        let response = request.get("/api/user/gallery").await;
        assert_eq!(response.status_code(), 200);

        let body: Value = serde_json::from_str(&response.text()).unwrap();
        assert_eq!(body["photos"]["results"].as_array().unwrap().len(), 0);
        assert_eq!(body["photos"]["pagination"]["total_items"], 0);
    })
    .await;
}
