//! Command implementations for chefctl

pub mod profile;
pub mod query;

use anyhow::Result;
use chefbook_store::prelude::{FileStorage, Identity, ProfileFields, ProfileStore};
use clap::{Args, Subcommand};

use crate::error::CliError;

/// The five profile fields, as command-line flags.
///
/// List flags repeat: `--dish Lasagna --dish Ragu`. Leaving a list flag out
/// yields an empty list, which the store rejects.
#[derive(Args, Debug, Clone)]
pub struct FieldArgs {
    /// Display name of the chef
    #[arg(long)]
    pub name: String,

    /// Years of experience
    #[arg(long)]
    pub experience: u32,

    /// Cuisine specialty (repeatable)
    #[arg(long = "specialty")]
    pub specialties: Vec<String>,

    /// Signature dish (repeatable)
    #[arg(long = "dish")]
    pub dishes: Vec<String>,

    /// Recipe (repeatable)
    #[arg(long = "recipe")]
    pub recipes: Vec<String>,
}

impl FieldArgs {
    pub fn to_fields(&self) -> ProfileFields {
        ProfileFields::new(self.name.clone(), self.experience)
            .with_specialties(self.specialties.iter().cloned())
            .with_dishes(self.dishes.iter().cloned())
            .with_recipes(self.recipes.iter().cloned())
    }
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Create the caller's profile
    Create {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Replace every field of the caller's profile
    Modify {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete the caller's profile
    Delete,

    /// Change the caller's chef name (at least 3 characters)
    Rename {
        /// New chef name
        name: String,
    },

    /// Replace the caller's recipe collection
    UpgradeRecipes {
        /// Recipe (repeatable)
        #[arg(long = "recipe")]
        recipes: Vec<String>,
    },

    /// Insert or overwrite the caller's profile
    Restore {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Endorse another chef (checked, not recorded)
    Endorse {
        /// Identity of the chef being endorsed
        target: String,
        /// Endorsement note
        #[arg(long)]
        note: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum QueryCommands {
    /// Show a full profile
    Show {
        /// Profile owner (defaults to the caller)
        owner: Option<String>,
    },

    /// Show a chef's cuisine specialties
    Specialties {
        /// Profile owner (defaults to the caller)
        owner: Option<String>,
    },

    /// Show a chef's signature dishes
    Dishes {
        /// Profile owner (defaults to the caller)
        owner: Option<String>,
    },

    /// Show a chef's recipe collection
    Recipes {
        /// Profile owner (defaults to the caller)
        owner: Option<String>,
    },

    /// List every stored profile
    List,
}

/// Everything a command needs for one run
pub struct Session {
    pub store: ProfileStore,
    pub storage: FileStorage,
    pub caller: Option<String>,
    pub json: bool,
}

impl Session {
    /// The caller identity, required by every mutating command
    pub fn caller(&self) -> Result<Identity, CliError> {
        let raw = self.caller.as_deref().ok_or(CliError::MissingCaller)?;
        Ok(Identity::parse(raw)?)
    }

    /// `owner` if given, else the caller
    pub fn owner_or_caller(&self, owner: Option<&str>) -> Result<Identity, CliError> {
        match owner {
            Some(raw) => Ok(Identity::parse(raw)?),
            None => self.caller(),
        }
    }
}
