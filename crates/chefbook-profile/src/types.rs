//! Profile type definitions

use serde::{Deserialize, Serialize};

use crate::Identity;

/// The caller-supplied part of a profile.
///
/// This is the argument of `create`, `modify` and `restore_from_backup`. It
/// carries no validity guarantee on its own; see [`crate::validate_fields`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileFields {
    pub chef_name: String,
    pub experience_level: u32,
    pub cuisine_specialties: Vec<String>,
    pub signature_dishes: Vec<String>,
    pub recipe_collection: Vec<String>,
}

impl ProfileFields {
    pub fn new(chef_name: impl Into<String>, experience_level: u32) -> Self {
        Self {
            chef_name: chef_name.into(),
            experience_level,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, chef_name: impl Into<String>) -> Self {
        self.chef_name = chef_name.into();
        self
    }

    pub fn with_specialties<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cuisine_specialties = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dishes<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.signature_dishes = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_recipes<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recipe_collection = items.into_iter().map(Into::into).collect();
        self
    }
}

/// A stored chef profile, keyed by its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChefProfile {
    owner: Identity,
    #[serde(flatten)]
    fields: ProfileFields,
}

impl ChefProfile {
    pub fn new(owner: Identity, fields: ProfileFields) -> Self {
        Self { owner, fields }
    }

    pub fn owner(&self) -> &Identity {
        &self.owner
    }

    pub fn fields(&self) -> &ProfileFields {
        &self.fields
    }

    pub fn into_fields(self) -> ProfileFields {
        self.fields
    }

    pub fn chef_name(&self) -> &str {
        &self.fields.chef_name
    }

    pub fn experience_level(&self) -> u32 {
        self.fields.experience_level
    }

    pub fn cuisine_specialties(&self) -> &[String] {
        &self.fields.cuisine_specialties
    }

    pub fn signature_dishes(&self) -> &[String] {
        &self.fields.signature_dishes
    }

    pub fn recipe_collection(&self) -> &[String] {
        &self.fields.recipe_collection
    }

    /// Replace every field except the owner.
    pub fn replace_fields(&mut self, fields: ProfileFields) {
        self.fields = fields;
    }

    pub fn set_chef_name(&mut self, chef_name: String) {
        self.fields.chef_name = chef_name;
    }

    pub fn set_recipe_collection(&mut self, recipes: Vec<String>) {
        self.fields.recipe_collection = recipes;
    }
}
