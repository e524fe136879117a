use async_trait::async_trait;
use chrono::offset::Local;
use loco_rs::{auth::jwt, hash, prelude::*};
use regex::Regex;
use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;
use validator::Validate;

use super::roles;
pub use super::_entities::users::{self, ActiveModel, Entity, Model};

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_.]*$").expect("valid regex"));

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginParams {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterParams {
    pub email: String,
    pub username: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Validate, Deserialize)]
pub struct Validator {
    #[validate(length(min = 2, message = "Name must be at least 2 characters long."))]
    pub name: String,
    #[validate(email(message = "invalid email"))]
    pub email: String,
    #[validate(
        length(min = 1, max = 20, message = "Username must be 1-20 characters long."),
        regex(
            path = *USERNAME_RE,
            message = "Usernames may contain only letters, numbers, dots and underscores."
        )
    )]
    pub username: String,
}

impl Validatable for ActiveModel {
    fn validator(&self) -> Box<dyn Validate> {
        Box::new(Validator {
            name: self.name.as_ref().to_owned(),
            email: self.email.as_ref().to_owned(),
            username: self.username.as_ref().to_owned(),
        })
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        self.validate()?;
        if insert {
            let mut this = self;
            this.pid = ActiveValue::Set(Uuid::new_v4());
            this.api_key = ActiveValue::Set(format!("alb-{}", Uuid::new_v4()));
            Ok(this)
        } else if self.updated_at.is_unchanged() {
            let mut this = self;
            this.updated_at = ActiveValue::Set(chrono::Utc::now().into());
            Ok(this)
        } else {
            Ok(self)
        }
    }
}

#[async_trait]
impl Authenticable for Model {
    async fn find_by_api_key(db: &DatabaseConnection, api_key: &str) -> ModelResult<Self> {
        let user = users::Entity::find()
            .filter(
                model::query::condition()
                    .eq(users::Column::ApiKey, api_key)
                    .build(),
            )
            .one(db)
            .await?;
        user.ok_or_else(|| ModelError::EntityNotFound)
    }

    async fn find_by_claims_key(db: &DatabaseConnection, claims_key: &str) -> ModelResult<Self> {
        Self::find_by_pid(db, claims_key).await
    }
}

impl Model {
    /// Finds a user by the provided email.
    ///
    /// # Errors
    ///
    /// When could not find user by the given token or db query error.
    pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> ModelResult<Self> {
        let user = users::Entity::find()
            .filter(
                model::query::condition()
                    .eq(users::Column::Email, email)
                    .build(),
            )
            .one(db)
            .await?;
        user.ok_or_else(|| ModelError::EntityNotFound)
    }

    /// Finds a user by the provided username.
    ///
    /// # Errors
    ///
    /// When could not find user by the given token or db query error.
    pub async fn find_by_username(db: &DatabaseConnection, username: &str) -> ModelResult<Self> {
        let user = users::Entity::find()
            .filter(
                model::query::condition()
                    .eq(users::Column::Username, username)
                    .build(),
            )
            .one(db)
            .await?;
        user.ok_or_else(|| ModelError::EntityNotFound)
    }

    /// Finds a user by the provided verification token.
    ///
    /// # Errors
    ///
    /// When could not find user by the given token or db query error.
    pub async fn find_by_verification_token(
        db: &DatabaseConnection,
        token: &str,
    ) -> ModelResult<Self> {
        let user = users::Entity::find()
            .filter(
                model::query::condition()
                    .eq(users::Column::EmailVerificationToken, token)
                    .build(),
            )
            .one(db)
            .await?;
        user.ok_or_else(|| ModelError::EntityNotFound)
    }

    /// Finds a user by the provided reset token.
    ///
    /// # Errors
    ///
    /// When could not find user by the given token or db query error.
    pub async fn find_by_reset_token(db: &DatabaseConnection, token: &str) -> ModelResult<Self> {
        let user = users::Entity::find()
            .filter(
                model::query::condition()
                    .eq(users::Column::ResetToken, token)
                    .build(),
            )
            .one(db)
            .await?;
        user.ok_or_else(|| ModelError::EntityNotFound)
    }

    /// Finds a user by the provided pid.
    ///
    /// # Errors
    ///
    /// When could not find user or db query error.
    pub async fn find_by_pid(db: &DatabaseConnection, pid: &str) -> ModelResult<Self> {
        let parse_uuid = Uuid::parse_str(pid).map_err(|e| ModelError::Any(e.into()))?;
        let user = users::Entity::find()
            .filter(
                model::query::condition()
                    .eq(users::Column::Pid, parse_uuid)
                    .build(),
            )
            .one(db)
            .await?;
        user.ok_or_else(|| ModelError::EntityNotFound)
    }

    /// Verifies whether the provided plain password matches the hashed password.
    #[must_use]
    pub fn verify_password(&self, password: &str) -> bool {
        hash::verify_password(password, &self.password)
    }

    /// Creates a user with a hashed password and the default `User` role.
    ///
    /// # Errors
    ///
    /// When a user with the same email or username already exists, or a db
    /// query error occurs.
    pub async fn create_with_password(
        db: &DatabaseConnection,
        params: &RegisterParams,
    ) -> ModelResult<Self> {
        // resolve the role before the transaction takes the pool's connection
        let default_role = roles::Model::find_by_name(db, roles::DEFAULT_ROLE).await?;

        let txn = db.begin().await?;

        if users::Entity::find()
            .filter(
                model::query::condition()
                    .eq(users::Column::Email, &params.email)
                    .build(),
            )
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(ModelError::EntityAlreadyExists {});
        }

        if users::Entity::find()
            .filter(
                model::query::condition()
                    .eq(users::Column::Username, &params.username)
                    .build(),
            )
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(ModelError::EntityAlreadyExists {});
        }

        let password_hash =
            hash::hash_password(&params.password).map_err(|e| ModelError::Any(e.into()))?;
        let user = users::ActiveModel {
            email: ActiveValue::set(params.email.to_string()),
            username: ActiveValue::set(params.username.to_string()),
            password: ActiveValue::set(password_hash),
            name: ActiveValue::set(params.name.to_string()),
            role_id: ActiveValue::set(default_role.id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(user)
    }

    /// Creates a JWT for this user, keyed by its pid.
    ///
    /// # Errors
    ///
    /// When could not generate the token.
    pub fn generate_jwt(&self, secret: &str, expiration: u64) -> ModelResult<String> {
        Ok(jwt::JWT::new(secret).generate_token(&expiration, self.pid.to_string(), None)?)
    }

    /// Loads the role assigned to this user.
    ///
    /// # Errors
    ///
    /// When the role row is missing or a db query error occurs.
    pub async fn role(&self, db: &DatabaseConnection) -> ModelResult<roles::Model> {
        let role = self.find_related(roles::Entity).one(db).await?;
        role.ok_or_else(|| ModelError::EntityNotFound)
    }

    /// Whether this user's role carries the `ADMINISTER` permission.
    ///
    /// # Errors
    ///
    /// When the role or its permissions cannot be loaded.
    pub async fn is_admin(&self, db: &DatabaseConnection) -> ModelResult<bool> {
        let role = self.role(db).await?;
        Ok(role
            .permissions(db)
            .await?
            .contains(&roles::Permission::Administer))
    }
}

impl ActiveModel {
    /// Sets the email verification token and send timestamp, in preparation
    /// for the confirmation mail.
    ///
    /// # Errors
    ///
    /// When a db query error occurs.
    pub async fn set_email_verification_sent(
        mut self,
        db: &DatabaseConnection,
    ) -> ModelResult<Model> {
        self.email_verification_sent_at = ActiveValue::set(Some(Local::now().into()));
        self.email_verification_token = ActiveValue::Set(Some(Uuid::new_v4().to_string()));
        Ok(self.update(db).await?)
    }

    /// Sets the reset token and send timestamp, in preparation for the
    /// password-reset mail.
    ///
    /// # Errors
    ///
    /// When a db query error occurs.
    pub async fn set_forgot_password_sent(mut self, db: &DatabaseConnection) -> ModelResult<Model> {
        self.reset_sent_at = ActiveValue::set(Some(Local::now().into()));
        self.reset_token = ActiveValue::Set(Some(Uuid::new_v4().to_string()));
        Ok(self.update(db).await?)
    }

    /// Records this user as having verified their email.
    ///
    /// # Errors
    ///
    /// When a db query error occurs.
    pub async fn verified(mut self, db: &DatabaseConnection) -> ModelResult<Model> {
        self.email_verified_at = ActiveValue::set(Some(Local::now().into()));
        self.email_verification_token = ActiveValue::Set(None);
        Ok(self.update(db).await?)
    }

    /// Replaces the password and consumes the reset token.
    ///
    /// # Errors
    ///
    /// When the password cannot be hashed or a db query error occurs.
    pub async fn reset_password(
        mut self,
        db: &DatabaseConnection,
        password: &str,
    ) -> ModelResult<Model> {
        self.password =
            ActiveValue::set(hash::hash_password(password).map_err(|e| ModelError::Any(e.into()))?);
        self.reset_token = ActiveValue::Set(None);
        self.reset_sent_at = ActiveValue::Set(None);
        Ok(self.update(db).await?)
    }

    /// Reassigns this user to the named role.
    ///
    /// # Errors
    ///
    /// When the role does not exist or a db query error occurs.
    pub async fn assign_role(
        mut self,
        db: &DatabaseConnection,
        role_name: &str,
    ) -> ModelResult<Model> {
        let role = roles::Model::find_by_name(db, role_name).await?;
        self.role_id = ActiveValue::set(role.id);
        Ok(self.update(db).await?)
    }
}
