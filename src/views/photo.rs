use serde::{Deserialize, Serialize};

use crate::models::_entities::{comments, photos, tags, users};

#[derive(Debug, Deserialize, Serialize)]
pub struct PhotoListItem {
    pub id: i32,
    pub description: Option<String>,
    pub filename: String,
    pub created_at: String,
}

impl From<photos::Model> for PhotoListItem {
    fn from(photo: photos::Model) -> Self {
        Self {
            id: photo.id,
            description: photo.description,
            filename: photo.filename,
            created_at: photo.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CommentItem {
    pub id: i32,
    pub body: String,
    pub author: String,
    pub created_at: String,
}

impl CommentItem {
    #[must_use]
    pub fn new(comment: &comments::Model, author: &users::Model) -> Self {
        Self {
            id: comment.id,
            body: comment.body.clone(),
            author: author.username.clone(),
            created_at: comment.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PhotoDetailResponse {
    pub id: i32,
    pub description: Option<String>,
    pub filename: String,
    pub created_at: String,
    pub author: String,
    pub tags: Vec<String>,
    pub comments: Vec<CommentItem>,
}

impl PhotoDetailResponse {
    #[must_use]
    pub fn new(
        photo: photos::Model,
        author: &users::Model,
        tags: &[tags::Model],
        comments: Vec<CommentItem>,
    ) -> Self {
        Self {
            id: photo.id,
            description: photo.description,
            filename: photo.filename,
            created_at: photo.created_at.to_rfc3339(),
            author: author.username.clone(),
            tags: tags.iter().map(|tag| tag.name.clone()).collect(),
            comments,
        }
    }
}
