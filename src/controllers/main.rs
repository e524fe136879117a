use axum::debug_handler;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use loco_rs::controller::ErrorDetail;
use loco_rs::model::query::{self, PaginationQuery};
use loco_rs::prelude::*;
use sea_orm::PaginatorTrait;
use serde::{Deserialize, Serialize};

use crate::access::{CsrfGuard, CurrentUser};
use crate::common::settings::Settings;
use crate::controllers::user::ListQueryParams;
use crate::models::roles::Permission;
use crate::models::{_entities::tags, _entities::users, comments, photos};
use crate::views::photo::{CommentItem, PhotoDetailResponse};
use crate::views::user::pager;

#[derive(Debug, Deserialize, Serialize)]
pub struct CommentParams {
    pub body: String,
}

/// The landing feed: every photo, newest-first, shared pager envelope.
#[debug_handler]
async fn index(
    State(ctx): State<AppContext>,
    Query(params): Query<ListQueryParams>,
) -> Result<Response> {
    let settings = Settings::from_context(&ctx);
    let pagination_query = PaginationQuery {
        page: params.page.unwrap_or(1),
        page_size: params.page_size.unwrap_or(settings.photos_per_page),
    };

    let total_items = photos::Entity::find().count(&ctx.db).await?;
    let paginated = query::paginate(
        &ctx.db,
        photos::Entity::newest_first(),
        None,
        &pagination_query,
    )
    .await?;

    format::json(pager(paginated, &pagination_query, total_items))
}

/// A single photo with its author, tags and comments. 404 when absent.
#[debug_handler]
async fn show_photo(State(ctx): State<AppContext>, Path(id): Path<i32>) -> Result<Response> {
    let photo = photos::Entity::find_by_id(id)
        .one(&ctx.db)
        .await?
        .ok_or_else(|| Error::NotFound)?;

    let author = photo
        .find_related(users::Entity)
        .one(&ctx.db)
        .await?
        .ok_or_else(|| Error::NotFound)?;
    let photo_tags = photo.find_related(tags::Entity).all(&ctx.db).await?;

    let comment_rows = comments::Entity::for_photo(photo.id)
        .find_also_related(users::Entity)
        .all(&ctx.db)
        .await?;
    let comment_views = comment_rows
        .iter()
        .filter_map(|(comment, author)| {
            author.as_ref().map(|author| CommentItem::new(comment, author))
        })
        .collect();

    format::json(PhotoDetailResponse::new(
        photo,
        &author,
        &photo_tags,
        comment_views,
    ))
}

/// Posts a comment on a photo. The capability check is uniform: a guest
/// fails `can(Comment)` the same way a locked account does.
#[debug_handler]
async fn comment(
    State(ctx): State<AppContext>,
    _csrf: CsrfGuard,
    current: CurrentUser,
    Path(id): Path<i32>,
    Json(params): Json<CommentParams>,
) -> Result<Response> {
    if !current.can(Permission::Comment) {
        return Err(Error::CustomError(
            StatusCode::FORBIDDEN,
            ErrorDetail::new("forbidden", "You do not have permission to comment."),
        ));
    }
    // can(Comment) never holds for guests, so a user is always present here
    let user = current
        .user()
        .ok_or_else(|| Error::Unauthorized("login required".to_string()))?;

    if params.body.trim().is_empty() {
        return Err(Error::BadRequest("Comment body must not be empty.".to_string()));
    }

    let photo = photos::Entity::find_by_id(id)
        .one(&ctx.db)
        .await?
        .ok_or_else(|| Error::NotFound)?;

    let comment = comments::ActiveModel::create(&ctx.db, user.id, photo.id, &params.body).await?;

    format::json(CommentItem::new(&comment, user))
}

pub fn routes() -> Routes {
    Routes::new()
        .prefix("/api")
        .add("/", get(index))
        .add("/photo/{id}", get(show_photo))
        .add("/photo/{id}/comments", post(comment))
}
