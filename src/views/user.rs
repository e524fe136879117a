use loco_rs::model::query::{PageResponse, PaginationQuery};
use serde::{Deserialize, Serialize};

use super::photo::PhotoListItem;
use crate::models::_entities::photos;
use crate::models::users;

#[derive(Debug, Deserialize, Serialize)]
pub struct UserDetail {
    pub pid: String,
    pub username: String,
    pub name: String,
}

impl From<&users::Model> for UserDetail {
    fn from(user: &users::Model) -> Self {
        Self {
            pid: user.pid.to_string(),
            username: user.username.clone(),
            name: user.name.clone(),
        }
    }
}

/// Page metadata for listings; `total_items` is the full match count, not
/// the size of the current page.
#[derive(Debug, Deserialize, Serialize)]
pub struct PagerMeta {
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub total_items: u64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Pager<T> {
    pub results: T,
    pub pagination: PagerMeta,
}

/// The user page: who the photos belong to, the current page of photos,
/// and the pagination metadata the original listing template rendered.
#[derive(Debug, Deserialize, Serialize)]
pub struct UserPhotosResponse {
    pub user: UserDetail,
    pub photos: Pager<Vec<PhotoListItem>>,
}

impl UserPhotosResponse {
    #[must_use]
    pub fn new(
        user: &users::Model,
        data: PageResponse<photos::Model>,
        pagination_query: &PaginationQuery,
        total_items: u64,
    ) -> Self {
        Self {
            user: UserDetail::from(user),
            photos: pager(data, pagination_query, total_items),
        }
    }
}

/// Folds a page of photos into the shared pager envelope.
#[must_use]
pub fn pager(
    data: PageResponse<photos::Model>,
    pagination_query: &PaginationQuery,
    total_items: u64,
) -> Pager<Vec<PhotoListItem>> {
    Pager {
        results: data.page.into_iter().map(PhotoListItem::from).collect(),
        pagination: PagerMeta {
            page: pagination_query.page,
            page_size: pagination_query.page_size,
            total_pages: data.total_pages,
            total_items,
        },
    }
}
