//! Profile validation
//!
//! Lengths are counted in characters (Unicode scalar values), not bytes.

use chefbook_errors::{FieldViolation, ListField};

use crate::{ChefProfile, ProfileFields};

pub const CHEF_NAME_MAX_CHARS: usize = 100;
/// Minimum name length accepted by a rename. `create` only requires a
/// non-empty name.
pub const RENAME_MIN_CHARS: usize = 3;
pub const EXPERIENCE_MIN: u32 = 2;
pub const EXPERIENCE_MAX: u32 = 75;

/// Size limits of one bounded list field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLimits {
    pub max_items: usize,
    pub max_item_chars: usize,
}

pub const SPECIALTY_LIMITS: ListLimits = ListLimits {
    max_items: 10,
    max_item_chars: 50,
};
pub const DISH_LIMITS: ListLimits = ListLimits {
    max_items: 5,
    max_item_chars: 100,
};
pub const RECIPE_LIMITS: ListLimits = ListLimits {
    max_items: 5,
    max_item_chars: 100,
};

pub fn limits_for(field: ListField) -> ListLimits {
    match field {
        ListField::CuisineSpecialties => SPECIALTY_LIMITS,
        ListField::SignatureDishes => DISH_LIMITS,
        ListField::RecipeCollection => RECIPE_LIMITS,
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

pub fn validate_chef_name(name: &str) -> Result<(), FieldViolation> {
    if name.is_empty() {
        return Err(FieldViolation::EmptyName);
    }

    let actual = char_len(name);
    if actual > CHEF_NAME_MAX_CHARS {
        return Err(FieldViolation::NameTooLong {
            actual,
            max: CHEF_NAME_MAX_CHARS,
        });
    }

    Ok(())
}

/// Name rules for `update_name`: the schema rules plus a minimum length.
pub fn validate_new_name(name: &str) -> Result<(), FieldViolation> {
    validate_chef_name(name)?;

    let actual = char_len(name);
    if actual < RENAME_MIN_CHARS {
        return Err(FieldViolation::NameTooShort {
            actual,
            min: RENAME_MIN_CHARS,
        });
    }

    Ok(())
}

pub fn validate_experience(level: u32) -> Result<(), FieldViolation> {
    if !(EXPERIENCE_MIN..=EXPERIENCE_MAX).contains(&level) {
        return Err(FieldViolation::experience_out_of_range(
            level,
            EXPERIENCE_MIN,
            EXPERIENCE_MAX,
        ));
    }
    Ok(())
}

pub fn validate_list(field: ListField, items: &[String]) -> Result<(), FieldViolation> {
    let limits = limits_for(field);

    if items.is_empty() {
        return Err(FieldViolation::empty_list(field));
    }

    if items.len() > limits.max_items {
        return Err(FieldViolation::too_many_items(
            field,
            items.len(),
            limits.max_items,
        ));
    }

    for (index, item) in items.iter().enumerate() {
        let actual = char_len(item);
        if actual > limits.max_item_chars {
            return Err(FieldViolation::item_too_long(
                field,
                index,
                actual,
                limits.max_item_chars,
            ));
        }
    }

    Ok(())
}

/// Run all five field checks and collect every violation, in field order.
pub fn collect_violations(fields: &ProfileFields) -> Vec<FieldViolation> {
    [
        validate_chef_name(&fields.chef_name),
        validate_experience(fields.experience_level),
        validate_list(ListField::CuisineSpecialties, &fields.cuisine_specialties),
        validate_list(ListField::SignatureDishes, &fields.signature_dishes),
        validate_list(ListField::RecipeCollection, &fields.recipe_collection),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect()
}

/// Validate a full field set. Any single violation rejects the whole set;
/// the first one in field order is reported.
pub fn validate_fields(fields: &ProfileFields) -> Result<(), FieldViolation> {
    match collect_violations(fields).into_iter().next() {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}

pub fn validate_profile(profile: &ChefProfile) -> Result<(), FieldViolation> {
    validate_fields(profile.fields())
}
