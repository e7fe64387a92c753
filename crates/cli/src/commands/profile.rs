//! Mutating profile commands

use anyhow::Result;
use chefbook_store::prelude::{Confirmation, Identity};
use tracing::debug;

use crate::commands::{ProfileCommands, Session};
use crate::error::CliError;
use crate::output;

/// Execute a mutating command and persist the table if it succeeded
pub async fn execute(cmd: &ProfileCommands, session: &Session) -> Result<()> {
    let caller = session.caller()?;
    let confirmation = apply(cmd, session, &caller)?;

    if matches!(cmd, ProfileCommands::Endorse { .. }) {
        debug!("Endorsement leaves the table untouched, skipping save");
    } else {
        session.storage.save_store(&session.store).await?;
    }

    output::print_confirmation(&confirmation, session.json);
    Ok(())
}

fn apply(
    cmd: &ProfileCommands,
    session: &Session,
    caller: &Identity,
) -> Result<Confirmation, CliError> {
    let store = &session.store;

    let confirmation = match cmd {
        ProfileCommands::Create { fields } => store.create(caller, fields.to_fields())?,
        ProfileCommands::Modify { fields } => store.modify(caller, fields.to_fields())?,
        ProfileCommands::Delete => store.delete(caller)?,
        ProfileCommands::Rename { name } => store.update_name(caller, name.as_str())?,
        ProfileCommands::UpgradeRecipes { recipes } => {
            store.upgrade_recipe_collection(caller, recipes.clone())?
        }
        ProfileCommands::Restore { fields } => {
            store.restore_from_backup(caller, fields.to_fields())?
        }
        ProfileCommands::Endorse { target, note } => {
            let target = Identity::parse(target)?;
            store.endorse_chef(caller, &target, note)?
        }
    };

    Ok(confirmation)
}
