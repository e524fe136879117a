use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use sea_orm::QueryOrder;

pub use super::_entities::comments::{self, ActiveModel, Column, Entity, Model};

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert && self.updated_at.is_unchanged() {
            let mut this = self;
            this.updated_at = Set(chrono::Utc::now().into());
            Ok(this)
        } else {
            Ok(self)
        }
    }
}

// implement your read-oriented logic here
impl Model {}

// implement your write-oriented logic here
impl ActiveModel {
    /// Records a comment by `user_id` on `photo_id`.
    ///
    /// # Errors
    ///
    /// Returns a `DbErr` when the insert fails.
    pub async fn create<C>(db: &C, user_id: i32, photo_id: i32, body: &str) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        ActiveModel {
            user_id: Set(user_id),
            photo_id: Set(photo_id),
            body: Set(body.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}

// implement your custom finders, selectors oriented logic here
impl Entity {
    /// Comments on one photo, oldest-first as they are displayed.
    #[must_use]
    pub fn for_photo(photo_id: i32) -> Select<Entity> {
        Self::find()
            .filter(Column::PhotoId.eq(photo_id))
            .order_by_asc(Column::CreatedAt)
    }
}
