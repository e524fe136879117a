use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

pub use super::_entities::roles::{self, ActiveModel, Entity, Model};
use super::_entities::{permissions, roles_permissions};
use loco_rs::prelude::*;

pub const DEFAULT_ROLE: &str = "User";
pub const ADMIN_ROLE: &str = "Administrator";

/// A single capability a role can grant. Authorization decisions go through
/// `CurrentUser::can`, which answers from the permission set of the user's
/// role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    Follow,
    Collect,
    Comment,
    Upload,
    Moderate,
    Administer,
}

impl Permission {
    pub const ALL: [Self; 6] = [
        Self::Follow,
        Self::Collect,
        Self::Comment,
        Self::Upload,
        Self::Moderate,
        Self::Administer,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Follow => "FOLLOW",
            Self::Collect => "COLLECT",
            Self::Comment => "COMMENT",
            Self::Upload => "UPLOAD",
            Self::Moderate => "MODERATE",
            Self::Administer => "ADMINISTER",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

/// Which permissions each seeded role carries. Roles are cumulative from
/// `Locked` up to `Administrator`.
const ROLE_MATRIX: &[(&str, &[Permission])] = &[
    ("Locked", &[Permission::Follow, Permission::Collect]),
    (
        "User",
        &[
            Permission::Follow,
            Permission::Collect,
            Permission::Comment,
            Permission::Upload,
        ],
    ),
    (
        "Moderator",
        &[
            Permission::Follow,
            Permission::Collect,
            Permission::Comment,
            Permission::Upload,
            Permission::Moderate,
        ],
    ),
    (
        "Administrator",
        &[
            Permission::Follow,
            Permission::Collect,
            Permission::Comment,
            Permission::Upload,
            Permission::Moderate,
            Permission::Administer,
        ],
    ),
];

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

impl ActiveModelBehavior for permissions::ActiveModel {}
impl ActiveModelBehavior for roles_permissions::ActiveModel {}

impl Model {
    /// Finds a role by its unique name.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::EntityNotFound` when no role carries the name.
    pub async fn find_by_name(db: &DatabaseConnection, name: &str) -> ModelResult<Self> {
        let role = Entity::find()
            .filter(
                model::query::condition()
                    .eq(roles::Column::Name, name)
                    .build(),
            )
            .one(db)
            .await?;
        role.ok_or_else(|| ModelError::EntityNotFound)
    }

    /// Seeds the role/permission matrix. Safe to run repeatedly; existing
    /// rows are left alone, so it can run at every application start.
    ///
    /// # Errors
    ///
    /// Returns a `ModelError` when a database operation fails.
    pub async fn init_roles(db: &DatabaseConnection) -> ModelResult<()> {
        for permission in Permission::ALL {
            if Self::find_permission(db, permission).await?.is_none() {
                permissions::ActiveModel {
                    name: Set(permission.as_str().to_string()),
                    ..Default::default()
                }
                .insert(db)
                .await?;
            }
        }

        for (role_name, role_permissions) in ROLE_MATRIX {
            let role = match Self::find_by_name(db, role_name).await {
                Ok(role) => role,
                Err(ModelError::EntityNotFound) => {
                    ActiveModel {
                        name: Set((*role_name).to_string()),
                        ..Default::default()
                    }
                    .insert(db)
                    .await?
                }
                Err(err) => return Err(err),
            };

            for permission in *role_permissions {
                let permission = Self::find_permission(db, *permission)
                    .await?
                    .ok_or_else(|| ModelError::EntityNotFound)?;
                let granted = roles_permissions::Entity::find_by_id((role.id, permission.id))
                    .one(db)
                    .await?
                    .is_some();
                if !granted {
                    roles_permissions::ActiveModel {
                        role_id: Set(role.id),
                        permission_id: Set(permission.id),
                    }
                    .insert(db)
                    .await?;
                }
            }
        }

        Ok(())
    }

    /// Loads the permission names granted to this role.
    ///
    /// # Errors
    ///
    /// Returns a `ModelError` when the database query fails.
    pub async fn permissions(&self, db: &DatabaseConnection) -> ModelResult<Vec<Permission>> {
        let rows = self.find_related(permissions::Entity).all(db).await?;
        Ok(rows
            .iter()
            .filter_map(|row| Permission::from_name(&row.name))
            .collect())
    }

    async fn find_permission(
        db: &DatabaseConnection,
        permission: Permission,
    ) -> ModelResult<Option<permissions::Model>> {
        Ok(permissions::Entity::find()
            .filter(
                model::query::condition()
                    .eq(permissions::Column::Name, permission.as_str())
                    .build(),
            )
            .one(db)
            .await?)
    }
}
