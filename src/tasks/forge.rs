//! `forge` — drop, recreate and fill the database with fake data for
//! development: roles, one admin account, then users, tags, photos and
//! comments in dependency order. Destructive on every run.

use chrono::{Duration, Utc};
use loco_rs::prelude::*;
use loco_rs::task::Vars;
use migration::{Migrator, MigratorTrait};
use sea_orm::ActiveValue::Set;

use crate::common::settings::Settings;
use crate::models::{
    comments, photos,
    roles::{self, ADMIN_ROLE},
    tags,
    users::{self, RegisterParams},
};

const DEFAULT_USERS: u64 = 10;
const DEFAULT_TAGS: u64 = 20;
const DEFAULT_PHOTOS: u64 = 30;
const DEFAULT_COMMENTS: u64 = 100;

const FAKE_PASSWORD: &str = "helloflask";

const ADJECTIVES: &[&str] = &[
    "golden", "quiet", "misty", "bright", "wandering", "hidden", "late", "early", "distant",
    "frozen", "amber", "pale",
];
const NOUNS: &[&str] = &[
    "harbor", "meadow", "skyline", "forest", "river", "lantern", "window", "garden", "valley",
    "rooftop", "shore", "trail",
];

fn pick(list: &'static [&'static str]) -> &'static str {
    list[fastrand::usize(0..list.len())]
}

fn sentence() -> String {
    format!("A {} {} at dusk.", pick(ADJECTIVES), pick(NOUNS))
}

fn count_var(vars: &Vars, key: &str, default: u64) -> Result<u64> {
    match vars.cli_arg(key) {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|_| Error::BadRequest(format!("{key} expects a number, got `{value}`"))),
        Err(_) => Ok(default),
    }
}

pub struct Forge;

#[async_trait]
impl Task for Forge {
    fn task(&self) -> TaskInfo {
        TaskInfo {
            name: "forge".to_string(),
            detail:
                "drop, recreate and seed the database with fake data (user:N photo:N tag:N comment:N)"
                    .to_string(),
        }
    }

    async fn run(&self, app_context: &AppContext, vars: &Vars) -> Result<()> {
        let user_count = count_var(vars, "user", DEFAULT_USERS)?;
        let tag_count = count_var(vars, "tag", DEFAULT_TAGS)?;
        let photo_count = count_var(vars, "photo", DEFAULT_PHOTOS)?;
        let comment_count = count_var(vars, "comment", DEFAULT_COMMENTS)?;

        let db = &app_context.db;

        Migrator::fresh(db).await?;
        println!("Recreated schema.");

        roles::Model::init_roles(db).await?;
        println!("Initialized roles and permissions.");

        let settings = Settings::from_context(app_context);
        let admin = users::Model::create_with_password(
            db,
            &RegisterParams {
                email: settings.admin_email.clone(),
                username: settings.admin_username.clone(),
                password: settings.admin_password.clone(),
                name: "Admin".to_string(),
            },
        )
        .await?;
        let admin = admin.into_active_model().assign_role(db, ADMIN_ROLE).await?;
        let admin = admin.into_active_model().verified(db).await?;
        println!("Created administrator account.");

        let mut user_ids = Vec::with_capacity(usize::try_from(user_count).unwrap_or(usize::MAX));
        for i in 0..user_count {
            let username = format!("{}_{}{i}", pick(ADJECTIVES), pick(NOUNS));
            let user = users::Model::create_with_password(
                db,
                &RegisterParams {
                    email: format!("{username}@example.com"),
                    username: username.clone(),
                    password: FAKE_PASSWORD.to_string(),
                    name: username,
                },
            )
            .await?;
            user_ids.push(user.id);
        }
        println!("Created {user_count} users.");

        // photos and comments need an author even when user:0 was requested
        let author_pool = if user_ids.is_empty() {
            vec![admin.id]
        } else {
            user_ids.clone()
        };

        let mut tag_ids = Vec::with_capacity(usize::try_from(tag_count).unwrap_or(usize::MAX));
        for i in 0..tag_count {
            let tag = tags::ActiveModel::find_or_create(db, &format!("{}-{i}", pick(NOUNS))).await?;
            tag_ids.push(tag.id);
        }
        println!("Created {tag_count} tags.");

        let mut photo_ids = Vec::with_capacity(usize::try_from(photo_count).unwrap_or(usize::MAX));
        for _ in 0..photo_count {
            let owner = author_pool[fastrand::usize(0..author_pool.len())];
            let taken_at = Utc::now()
                - Duration::days(fastrand::i64(0..365))
                - Duration::seconds(fastrand::i64(0..86_400));
            let photo = photos::ActiveModel {
                user_id: Set(owner),
                description: Set(Some(sentence())),
                filename: Set(format!("{}.jpg", uuid::Uuid::new_v4())),
                created_at: Set(taken_at.into()),
                ..Default::default()
            }
            .insert(db)
            .await?;
            photo_ids.push(photo.id);

            if !tag_ids.is_empty() {
                for _ in 0..fastrand::usize(0..=3) {
                    let tag_id = tag_ids[fastrand::usize(0..tag_ids.len())];
                    if let Some(tag) = tags::Entity::find_by_id(tag_id).one(db).await? {
                        tag.attach_to_photo(db, photo.id).await?;
                    }
                }
            }
        }
        println!("Created {photo_count} photos.");

        if comment_count > 0 && photo_ids.is_empty() {
            return Err(Error::BadRequest(
                "comment:N needs at least one photo; pass photo:N as well".to_string(),
            ));
        }
        for _ in 0..comment_count {
            let author = author_pool[fastrand::usize(0..author_pool.len())];
            let photo = photo_ids[fastrand::usize(0..photo_ids.len())];
            comments::ActiveModel::create(db, author, photo, &sentence()).await?;
        }
        println!("Created {comment_count} comments.");

        Ok(())
    }
}
