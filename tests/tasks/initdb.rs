use albumy::app::App;
use albumy::models::roles;
use loco_rs::boot::run_task;
use loco_rs::task;
use loco_rs::testing::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait};
use serial_test::serial;

#[tokio::test]
#[serial]
async fn init_is_idempotent() {
    let boot = boot_test::<App>().await.unwrap();
    let vars = task::Vars::from_cli_args(vec![]);

    assert!(
        run_task::<App>(&boot.app_context, Some(&"init".to_string()), &vars)
            .await
            .is_ok()
    );
    assert!(
        run_task::<App>(&boot.app_context, Some(&"init".to_string()), &vars)
            .await
            .is_ok()
    );
}

#[tokio::test]
#[serial]
async fn initdb_drop_recreates_the_schema() {
    let boot = boot_test::<App>().await.unwrap();
    seed::<App>(&boot.app_context).await.unwrap();
    let db = &boot.app_context.db;

    assert_eq!(roles::Entity::find().count(db).await.unwrap(), 4);

    let vars = task::Vars::from_cli_args(vec![
        ("drop".to_string(), "true".to_string()),
        ("yes".to_string(), "true".to_string()),
    ]);
    run_task::<App>(&boot.app_context, Some(&"initdb".to_string()), &vars)
        .await
        .unwrap();

    // fresh schema, nothing seeded yet
    assert_eq!(roles::Entity::find().count(db).await.unwrap(), 0);
}
