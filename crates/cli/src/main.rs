//! chefctl - Chefbook profile store CLI
//!
//! A command-line host for the chef profile store. Each run loads the
//! snapshot file, performs one operation as the given caller, and writes
//! the snapshot back when the operation changed the table.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod error;
mod output;

use anyhow::Result;
use chefbook_store::prelude::{FileStorage, SnapshotConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::*;
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "chefctl")]
#[command(about = "Chefbook CLI - Manage chef profiles")]
#[command(version)]
#[command(long_about = "
chefctl is a command-line interface for the Chefbook profile store.
Every chef owns at most one profile, keyed by their identity. Mutating
commands act on the caller's own profile; read commands accept any owner.

Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Snapshot file holding the profile table
    #[arg(long, global = true, env = "CHEFCTL_STORE", default_value = "chefbook.json")]
    store: PathBuf,

    /// Identity the command runs as
    #[arg(long, global = true, env = "CHEFCTL_CALLER")]
    caller: Option<String>,

    /// Skip the backup copy normally taken before the snapshot is overwritten
    #[arg(long, global = true)]
    no_backup: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Profile(ProfileCommands),

    #[command(flatten)]
    Query(QueryCommands),

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("chefctl={log_level},chefbook_store={log_level}").into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = execute_command(&cli).await;

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            std::process::exit(exit_code);
        }
    }
}

async fn execute_command(cli: &Cli) -> Result<()> {
    if let Commands::Completion { shell } = &cli.command {
        completion::generate_completion(*shell);
        return Ok(());
    }

    let config = SnapshotConfig::new(&cli.store).with_backup_on_overwrite(!cli.no_backup);
    let storage = FileStorage::new(config).await?;

    // Held until the command returns, so a mutation's load and save are not
    // interleaved with another chefctl run on the same snapshot.
    let _lock = match &cli.command {
        Commands::Profile(_) => storage.lock_exclusive().await?,
        Commands::Query(_) | Commands::Completion { .. } => storage.lock_shared().await?,
    };
    let store = storage.load_store().await?;

    let session = Session {
        store,
        storage,
        caller: cli.caller.clone(),
        json: cli.json,
    };

    match &cli.command {
        Commands::Profile(cmd) => commands::profile::execute(cmd, &session).await,
        Commands::Query(cmd) => commands::query::execute(cmd, &session),
        Commands::Completion { .. } => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    // --- Global flag parsing ---

    #[test]
    fn parse_list_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["chefctl", "list"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.no_backup);
        assert!(matches!(cli.command, Commands::Query(QueryCommands::List)));
        Ok(())
    }

    #[test]
    fn parse_global_flags_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from([
            "chefctl",
            "list",
            "--json",
            "--store",
            "/tmp/kitchen.json",
            "--caller",
            "ana",
            "--no-backup",
        ])?;
        assert!(cli.json);
        assert!(cli.no_backup);
        assert_eq!(cli.store, PathBuf::from("/tmp/kitchen.json"));
        assert_eq!(cli.caller.as_deref(), Some("ana"));
        Ok(())
    }

    #[test]
    fn parse_verbose_levels() -> TestResult {
        let cli = Cli::try_parse_from(["chefctl", "-vv", "list"])?;
        assert_eq!(cli.verbose, 2);
        Ok(())
    }

    // --- Profile command parsing ---

    #[test]
    fn parse_create_with_repeated_lists() -> TestResult {
        let cli = Cli::try_parse_from([
            "chefctl",
            "create",
            "--name",
            "Chef Ana",
            "--experience",
            "5",
            "--specialty",
            "Italian",
            "--specialty",
            "Basque",
            "--dish",
            "Lasagna",
            "--recipe",
            "Carbonara",
        ])?;
        match &cli.command {
            Commands::Profile(ProfileCommands::Create { fields }) => {
                assert_eq!(fields.name, "Chef Ana");
                assert_eq!(fields.experience, 5);
                assert_eq!(fields.specialties, vec!["Italian", "Basque"]);
                assert_eq!(fields.to_fields().signature_dishes, vec!["Lasagna"]);
            }
            _ => return Err("expected Create command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_create_without_lists() -> TestResult {
        let cli = Cli::try_parse_from(["chefctl", "create", "--name", "Ana", "--experience", "5"])?;
        match &cli.command {
            Commands::Profile(ProfileCommands::Create { fields }) => {
                assert!(fields.recipes.is_empty());
            }
            _ => return Err("expected Create command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_upgrade_recipes() -> TestResult {
        let cli = Cli::try_parse_from([
            "chefctl",
            "upgrade-recipes",
            "--recipe",
            "Risotto",
            "--recipe",
            "Ragu",
        ])?;
        match &cli.command {
            Commands::Profile(ProfileCommands::UpgradeRecipes { recipes }) => {
                assert_eq!(recipes, &vec!["Risotto".to_string(), "Ragu".to_string()]);
            }
            _ => return Err("expected UpgradeRecipes command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_endorse() -> TestResult {
        let cli = Cli::try_parse_from(["chefctl", "endorse", "bo", "--note", "great ragu"])?;
        match &cli.command {
            Commands::Profile(ProfileCommands::Endorse { target, note }) => {
                assert_eq!(target, "bo");
                assert_eq!(note, "great ragu");
            }
            _ => return Err("expected Endorse command".into()),
        }
        Ok(())
    }

    // --- Query command parsing ---

    #[test]
    fn parse_show_with_and_without_owner() -> TestResult {
        let cli = Cli::try_parse_from(["chefctl", "show", "bo"])?;
        assert!(matches!(
            &cli.command,
            Commands::Query(QueryCommands::Show { owner: Some(o) }) if o == "bo"
        ));

        let cli = Cli::try_parse_from(["chefctl", "show"])?;
        assert!(matches!(
            cli.command,
            Commands::Query(QueryCommands::Show { owner: None })
        ));
        Ok(())
    }

    #[test]
    fn parse_completion_bash() -> TestResult {
        let cli = Cli::try_parse_from(["chefctl", "completion", "bash"])?;
        assert!(matches!(cli.command, Commands::Completion { .. }));
        Ok(())
    }

    // --- Rejection / error cases ---

    #[test]
    fn reject_no_subcommand() {
        assert!(Cli::try_parse_from(["chefctl"]).is_err());
    }

    #[test]
    fn reject_negative_experience() {
        let result =
            Cli::try_parse_from(["chefctl", "create", "--name", "Ana", "--experience", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn reject_create_without_name() {
        let result = Cli::try_parse_from(["chefctl", "create", "--experience", "5"]);
        assert!(result.is_err());
    }

    #[test]
    fn reject_endorse_without_note() {
        let result = Cli::try_parse_from(["chefctl", "endorse", "bo"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
