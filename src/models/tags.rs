use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

pub use super::_entities::tags::{self, ActiveModel, Column, Entity, Model};
use super::_entities::photo_tags;

pub type Tags = Entity;

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

impl ActiveModelBehavior for photo_tags::ActiveModel {}

// implement your read-oriented logic here
impl Model {
    /// Attaches this tag to a photo; attaching twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a `DbErr` when a database operation fails.
    pub async fn attach_to_photo<C>(&self, db: &C, photo_id: i32) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        let attached = photo_tags::Entity::find_by_id((photo_id, self.id))
            .one(db)
            .await?
            .is_some();
        if !attached {
            photo_tags::ActiveModel {
                photo_id: Set(photo_id),
                tag_id: Set(self.id),
            }
            .insert(db)
            .await?;
        }
        Ok(())
    }
}

// implement your write-oriented logic here
impl ActiveModel {
    /// Finds or creates the tag carrying `name`.
    ///
    /// # Errors
    ///
    /// Returns a `DbErr` when a database operation fails.
    pub async fn find_or_create<C>(db: &C, name: &str) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        if let Some(tag) = Entity::find().filter(Column::Name.eq(name)).one(db).await? {
            return Ok(tag);
        }
        ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}

// implement your custom finders, selectors oriented logic here
impl Entity {}
