//! Identities and profile field sets used across the test suites.

use chefbook_profile::{Identity, ProfileFields};

use crate::must::must;

/// Parse an identity, panicking on blank input.
#[track_caller]
pub fn identity(raw: &str) -> Identity {
    must(Identity::parse(raw))
}

/// `n` distinct items named `"{prefix} {i}"`.
pub fn items(prefix: &str, n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("{prefix} {i}")).collect()
}

/// The reference profile: Chef Ana, 5 years, Italian.
pub fn chef_ana() -> ProfileFields {
    ProfileFields::new("Chef Ana", 5)
        .with_specialties(["Italian"])
        .with_dishes(["Lasagna"])
        .with_recipes(["Carbonara"])
}

/// A valid field set with one item per list, named after `name`.
pub fn valid_fields(name: &str, experience_level: u32) -> ProfileFields {
    ProfileFields::new(name, experience_level)
        .with_specialties(items("Cuisine", 1))
        .with_dishes(items(&format!("{name} dish"), 1))
        .with_recipes(items(&format!("{name} recipe"), 1))
}
