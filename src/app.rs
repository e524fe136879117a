use std::path::Path;

use async_trait::async_trait;
use loco_rs::{
    app::{AppContext, Hooks, Initializer},
    bgworker::Queue,
    boot::{create_app, BootResult, StartMode},
    config::Config,
    controller::AppRoutes,
    db::truncate_table,
    environment::Environment,
    model::ModelError,
    task::Tasks,
    Result,
};
use migration::Migrator;
use sea_orm::IntoActiveModel;

use crate::{
    common::settings::Settings,
    controllers, initializers,
    models::{
        _entities::{
            comments, permissions, photo_tags, photos, roles_permissions, tags,
        },
        roles, users,
    },
    tasks,
};

pub struct App;

#[async_trait]
impl Hooks for App {
    fn app_name() -> &'static str {
        env!("CARGO_CRATE_NAME")
    }

    fn app_version() -> String {
        format!(
            "{} ({})",
            env!("CARGO_PKG_VERSION"),
            option_env!("BUILD_SHA")
                .or(option_env!("GITHUB_SHA"))
                .unwrap_or("dev")
        )
    }

    async fn boot(
        mode: StartMode,
        environment: &Environment,
        config: Config,
    ) -> Result<BootResult> {
        create_app::<Self, Migrator>(mode, environment, config).await
    }

    async fn initializers(_ctx: &AppContext) -> Result<Vec<Box<dyn Initializer>>> {
        Ok(vec![Box::new(
            initializers::roles_seeder::RolesSeederInitializer,
        )])
    }

    fn routes(_ctx: &AppContext) -> AppRoutes {
        AppRoutes::with_default_routes()
            .add_route(controllers::auth::routes())
            .add_route(controllers::user::routes())
            .add_route(controllers::main::routes())
    }

    async fn connect_workers(_ctx: &AppContext, _queue: &Queue) -> Result<()> {
        // outbound mail rides loco's own mailer worker; no app-specific workers
        Ok(())
    }

    fn register_tasks(tasks_registry: &mut Tasks) {
        tasks_registry.register(tasks::initdb::InitDb);
        tasks_registry.register(tasks::initdb::Init);
        tasks_registry.register(tasks::forge::Forge);
    }

    async fn truncate(ctx: &AppContext) -> Result<()> {
        // children before parents
        truncate_table(&ctx.db, comments::Entity).await?;
        truncate_table(&ctx.db, photo_tags::Entity).await?;
        truncate_table(&ctx.db, photos::Entity).await?;
        truncate_table(&ctx.db, tags::Entity).await?;
        truncate_table(&ctx.db, users::Entity).await?;
        truncate_table(&ctx.db, roles_permissions::Entity).await?;
        truncate_table(&ctx.db, permissions::Entity).await?;
        truncate_table(&ctx.db, roles::Entity).await?;
        Ok(())
    }

    async fn seed(ctx: &AppContext, _base: &Path) -> Result<()> {
        roles::Model::init_roles(&ctx.db).await?;

        let settings = Settings::from_context(ctx);
        match users::Model::find_by_email(&ctx.db, &settings.admin_email).await {
            Ok(_) => {}
            Err(ModelError::EntityNotFound) => {
                let admin = users::Model::create_with_password(
                    &ctx.db,
                    &users::RegisterParams {
                        email: settings.admin_email.clone(),
                        username: settings.admin_username.clone(),
                        password: settings.admin_password.clone(),
                        name: "Admin".to_string(),
                    },
                )
                .await?;
                let admin = admin
                    .into_active_model()
                    .assign_role(&ctx.db, roles::ADMIN_ROLE)
                    .await?;
                admin.into_active_model().verified(&ctx.db).await?;
            }
            Err(err) => return Err(err.into()),
        }

        Ok(())
    }
}
