use crate::models::roles;
use loco_rs::prelude::*;

/// Makes sure the role/permission matrix exists before the app serves
/// requests. Seeding is idempotent, so running at every start is safe.
pub struct RolesSeederInitializer;

#[async_trait]
impl Initializer for RolesSeederInitializer {
    fn name(&self) -> String {
        "roles-seeder".to_string()
    }

    async fn before_run(&self, ctx: &AppContext) -> Result<()> {
        roles::Model::init_roles(&ctx.db).await?;

        Ok(())
    }
}
