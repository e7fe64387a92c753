//! Read-only profile commands

use anyhow::Result;
use chefbook_store::prelude::ListField;

use crate::commands::{QueryCommands, Session};
use crate::error::CliError;
use crate::output;

/// Execute a read command. Nothing is written back.
pub fn execute(cmd: &QueryCommands, session: &Session) -> Result<()> {
    let store = &session.store;

    match cmd {
        QueryCommands::Show { owner } => {
            let owner = session.owner_or_caller(owner.as_deref())?;
            let profile = store.retrieve_full(&owner).map_err(CliError::from)?;
            output::print_profile(&profile, session.json);
        }
        QueryCommands::Specialties { owner } => {
            let owner = session.owner_or_caller(owner.as_deref())?;
            let items = store
                .retrieve_cuisine_specialties(&owner)
                .map_err(CliError::from)?;
            output::print_items(
                owner.as_str(),
                ListField::CuisineSpecialties,
                &items,
                session.json,
            );
        }
        QueryCommands::Dishes { owner } => {
            let owner = session.owner_or_caller(owner.as_deref())?;
            let items = store
                .retrieve_signature_dishes(&owner)
                .map_err(CliError::from)?;
            output::print_items(
                owner.as_str(),
                ListField::SignatureDishes,
                &items,
                session.json,
            );
        }
        QueryCommands::Recipes { owner } => {
            let owner = session.owner_or_caller(owner.as_deref())?;
            let items = store
                .retrieve_recipe_collection(&owner)
                .map_err(CliError::from)?;
            output::print_items(
                owner.as_str(),
                ListField::RecipeCollection,
                &items,
                session.json,
            );
        }
        QueryCommands::List => {
            output::print_profile_list(&store.list_profiles(), session.json);
        }
    }

    Ok(())
}
