use axum::debug_handler;
use axum::extract::{Path, Query};
use loco_rs::model::query::{self, PaginationQuery};
use loco_rs::prelude::*;
use sea_orm::PaginatorTrait;
use serde::{Deserialize, Serialize};

use crate::common::settings::Settings;
use crate::models::{photos, users};
use crate::views::user::UserPhotosResponse;

#[derive(Debug, Deserialize, Serialize)]
pub struct ListQueryParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// `GET /api/user/{username}` — the user's page: their photos newest-first,
/// paginated with the configured page size. Unknown usernames answer 404.
#[debug_handler]
async fn show(
    State(ctx): State<AppContext>,
    Path(username): Path<String>,
    Query(params): Query<ListQueryParams>,
) -> Result<Response> {
    let user = match users::Model::find_by_username(&ctx.db, &username).await {
        Ok(user) => user,
        Err(ModelError::EntityNotFound) => return Err(Error::NotFound),
        Err(err) => return Err(err.into()),
    };

    let settings = Settings::from_context(&ctx);
    let pagination_query = PaginationQuery {
        page: params.page.unwrap_or(1),
        page_size: params.page_size.unwrap_or(settings.photos_per_page),
    };

    let condition = query::condition()
        .eq(photos::Column::UserId, user.id)
        .build();
    let total_items = photos::Entity::find()
        .filter(condition.clone())
        .count(&ctx.db)
        .await?;
    let paginated = query::paginate(
        &ctx.db,
        photos::Entity::newest_first(),
        Some(condition),
        &pagination_query,
    )
    .await?;

    format::json(UserPhotosResponse::new(
        &user,
        paginated,
        &pagination_query,
        total_items,
    ))
}

pub fn routes() -> Routes {
    Routes::new().prefix("/api/user").add("/{username}", get(show))
}
