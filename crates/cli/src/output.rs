//! Output formatting for CLI responses

use anyhow::Error;
use chefbook_store::prelude::{ChefProfile, Confirmation, ListField};
use colored::*;
use serde_json::{Value, json};

use crate::error::CliError;

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format output as JSON: {e}"),
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let mut details = json!({
        "message": error.to_string(),
        "type": error_type_name(error),
    });

    if let Some(CliError::Store(store_error)) = error.downcast_ref::<CliError>() {
        details["code"] = json!(store_error.code());
        if let Some(violation) = store_error.violation() {
            details["field"] = json!(violation.field());
        }
    }

    print_json(&json!({
        "success": false,
        "error": details
    }));
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    error
        .downcast_ref::<CliError>()
        .map_or("internal", CliError::type_name)
}

/// Print the acknowledgement of a successful operation
pub fn print_confirmation(confirmation: &Confirmation, json: bool) {
    if json {
        print_json(&json!({
            "success": true,
            "message": confirmation.to_string(),
            "operation": confirmation.operation,
            "owner": confirmation.owner,
        }));
    } else {
        println!("{} {}", "✓".green(), confirmation);
    }
}

/// Print a full profile
pub fn print_profile(profile: &ChefProfile, json: bool) {
    if json {
        print_json(&json!({
            "success": true,
            "profile": profile
        }));
        return;
    }

    println!("{} {}", "Chef:".bold(), profile.chef_name().bold());
    println!("  Owner: {}", profile.owner().as_str().dimmed());
    println!("  Experience: {} years", profile.experience_level());
    print_list_human(ListField::CuisineSpecialties, profile.cuisine_specialties());
    print_list_human(ListField::SignatureDishes, profile.signature_dishes());
    print_list_human(ListField::RecipeCollection, profile.recipe_collection());
}

fn list_title(field: ListField) -> &'static str {
    match field {
        ListField::CuisineSpecialties => "Cuisine specialties",
        ListField::SignatureDishes => "Signature dishes",
        ListField::RecipeCollection => "Recipe collection",
    }
}

fn print_list_human(field: ListField, items: &[String]) {
    println!("  {}:", list_title(field));
    for item in items {
        println!("    {} {}", "•".cyan(), item);
    }
}

/// Print one list field of a profile
pub fn print_items(owner: &str, field: ListField, items: &[String], json: bool) {
    if json {
        print_json(&json!({
            "success": true,
            "owner": owner,
            (field.as_str()): items,
        }));
    } else {
        println!("{} {}", owner.bold(), format!("({})", list_title(field)).dimmed());
        for item in items {
            println!("  {} {}", "•".cyan(), item);
        }
    }
}

/// Print a summary line per stored profile
pub fn print_profile_list(profiles: &[ChefProfile], json: bool) {
    if json {
        print_json(&json!({
            "success": true,
            "profiles": profiles
        }));
        return;
    }

    if profiles.is_empty() {
        println!("{}", "No profiles found".yellow());
        return;
    }

    println!("{}", "Chef Profiles:".bold());
    for profile in profiles {
        println!(
            "  {} {} ({}, {} years)",
            "●".green(),
            profile.chef_name().bold(),
            profile.owner().as_str().dimmed(),
            profile.experience_level()
        );
    }
}
