//! Field-level validation failures.
//!
//! A [`FieldViolation`] names the exact constraint a profile field broke.
//! Store operations wrap it in [`crate::StoreError::InvalidInput`], so the
//! reported kind stays the coarse `InvalidInput` while the detail survives.

use core::fmt;

use crate::common::ErrorSeverity;

/// The three bounded text-list fields of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListField {
    /// Cuisine specialties
    CuisineSpecialties,
    /// Signature dishes
    SignatureDishes,
    /// Recipe collection
    RecipeCollection,
}

impl ListField {
    /// Field name as it appears in serialized records.
    pub fn as_str(self) -> &'static str {
        match self {
            ListField::CuisineSpecialties => "cuisine_specialties",
            ListField::SignatureDishes => "signature_dishes",
            ListField::RecipeCollection => "recipe_collection",
        }
    }
}

impl fmt::Display for ListField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single violated field constraint.
///
/// # Examples
///
/// ```
/// use chefbook_errors::{FieldViolation, ListField};
///
/// let err = FieldViolation::too_many_items(ListField::RecipeCollection, 6, 5);
/// assert_eq!(err.field(), "recipe_collection");
/// assert!(err.to_string().contains("6"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldViolation {
    /// Chef name is empty
    #[error("chef_name must not be empty")]
    EmptyName,

    /// Chef name is shorter than a rename allows
    #[error("chef_name is too short: {actual} characters (min: {min})")]
    NameTooShort {
        /// Actual length in characters
        actual: usize,
        /// Minimum length
        min: usize,
    },

    /// Chef name exceeds the schema limit
    #[error("chef_name is too long: {actual} characters (max: {max})")]
    NameTooLong {
        /// Actual length in characters
        actual: usize,
        /// Maximum length
        max: usize,
    },

    /// Experience level outside the accepted range
    #[error("experience_level value {value} is out of range [{min}, {max}]")]
    ExperienceOutOfRange {
        /// Supplied value
        value: u32,
        /// Minimum accepted value
        min: u32,
        /// Maximum accepted value
        max: u32,
    },

    /// No cuisine specialties supplied
    #[error("cuisine_specialties must contain at least one item")]
    EmptySpecialties,

    /// No signature dishes supplied
    #[error("signature_dishes must contain at least one item")]
    EmptyDishes,

    /// No recipes supplied
    #[error("recipe_collection must contain at least one item")]
    EmptyRecipes,

    /// A list holds more items than allowed
    #[error("{field} has too many items: {actual} (max: {max})")]
    TooManyItems {
        /// Offending list
        field: ListField,
        /// Supplied item count
        actual: usize,
        /// Maximum item count
        max: usize,
    },

    /// A list item is longer than allowed
    #[error("{field}[{index}] is too long: {actual} characters (max: {max})")]
    ItemTooLong {
        /// Offending list
        field: ListField,
        /// Position of the item in the list
        index: usize,
        /// Actual length in characters
        actual: usize,
        /// Maximum length
        max: usize,
    },

    /// A chef tried to endorse themselves
    #[error("a chef cannot endorse their own profile")]
    SelfEndorsement,

    /// Endorsement note is empty
    #[error("endorsement note must not be empty")]
    EmptyNote,
}

impl FieldViolation {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }

    /// Name of the field (or argument) that was rejected.
    pub fn field(&self) -> &'static str {
        match self {
            FieldViolation::EmptyName
            | FieldViolation::NameTooShort { .. }
            | FieldViolation::NameTooLong { .. } => "chef_name",
            FieldViolation::ExperienceOutOfRange { .. } => "experience_level",
            FieldViolation::EmptySpecialties => ListField::CuisineSpecialties.as_str(),
            FieldViolation::EmptyDishes => ListField::SignatureDishes.as_str(),
            FieldViolation::EmptyRecipes => ListField::RecipeCollection.as_str(),
            FieldViolation::TooManyItems { field, .. }
            | FieldViolation::ItemTooLong { field, .. } => field.as_str(),
            FieldViolation::SelfEndorsement => "target",
            FieldViolation::EmptyNote => "note",
        }
    }

    /// Create an experience range error.
    pub fn experience_out_of_range(value: u32, min: u32, max: u32) -> Self {
        FieldViolation::ExperienceOutOfRange { value, min, max }
    }

    /// Create a too-many-items error.
    pub fn too_many_items(field: ListField, actual: usize, max: usize) -> Self {
        FieldViolation::TooManyItems { field, actual, max }
    }

    /// Create an item-too-long error.
    pub fn item_too_long(field: ListField, index: usize, actual: usize, max: usize) -> Self {
        FieldViolation::ItemTooLong {
            field,
            index,
            actual,
            max,
        }
    }

    /// The "list is empty" violation for `field`.
    pub fn empty_list(field: ListField) -> Self {
        match field {
            ListField::CuisineSpecialties => FieldViolation::EmptySpecialties,
            ListField::SignatureDishes => FieldViolation::EmptyDishes,
            ListField::RecipeCollection => FieldViolation::EmptyRecipes,
        }
    }
}
