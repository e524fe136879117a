//! Schema management tasks: `initdb [drop:true]` and its idempotent
//! shorthand `init`.

use std::io::{self, BufRead, Write};

use loco_rs::prelude::*;
use loco_rs::task::Vars;
use migration::{Migrator, MigratorTrait};

/// Asks on stdin before a destructive operation. `yes:true` skips the
/// prompt for non-interactive use.
fn confirmed(vars: &Vars, prompt: &str) -> Result<bool> {
    if vars.cli_arg("yes").is_ok_and(|v| v == "true") {
        return Ok(true);
    }
    print!("{prompt} [y/N] ");
    io::stdout()
        .flush()
        .map_err(|e| Error::Message(e.to_string()))?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| Error::Message(e.to_string()))?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

pub struct InitDb;

#[async_trait]
impl Task for InitDb {
    fn task(&self) -> TaskInfo {
        TaskInfo {
            name: "initdb".to_string(),
            detail: "initialize the database schema; pass drop:true to drop all tables first"
                .to_string(),
        }
    }

    async fn run(&self, app_context: &AppContext, vars: &Vars) -> Result<()> {
        let drop = vars.cli_arg("drop").is_ok_and(|v| v == "true");

        if drop {
            if !confirmed(
                vars,
                "This operation will delete the database, do you want to continue?",
            )? {
                println!("Aborted.");
                return Ok(());
            }
            Migrator::fresh(&app_context.db).await?;
            println!("Dropped tables.");
        } else {
            Migrator::up(&app_context.db, None).await?;
        }

        println!("Initialized database.");
        Ok(())
    }
}

pub struct Init;

#[async_trait]
impl Task for Init {
    fn task(&self) -> TaskInfo {
        TaskInfo {
            name: "init".to_string(),
            detail: "create all tables (idempotent)".to_string(),
        }
    }

    async fn run(&self, app_context: &AppContext, _vars: &Vars) -> Result<()> {
        println!("Initializing the database.");
        Migrator::up(&app_context.db, None).await?;
        println!("Done.");
        Ok(())
    }
}
