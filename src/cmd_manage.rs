//! `manage` subcommand.

use std::path::Path;

use tracing::{info, warn};

use aptus_config::Config;
use aptus_core::updater::{parse_key_updates, update_keys};
use aptus_core::{KeyUpdate, Navigator, UpdateOutcome};

use crate::cli::ManageAction;
use crate::{open_browser, prompt};

/// Load the key updates from a JSON file.
pub(crate) async fn load_key_updates(file: &Path) -> Result<Vec<KeyUpdate>, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let content = tokio::fs::read_to_string(file).await?;
    Ok(parse_key_updates(&content)?)
}

/// Count (unchanged, updated) outcomes.
fn tally(outcomes: &[UpdateOutcome]) -> (usize, usize) {
    outcomes.iter().fold((0, 0), |(unchanged, updated), outcome| match outcome {
        UpdateOutcome::Unchanged => (unchanged + 1, updated),
        UpdateOutcome::Updated { .. } => (unchanged, updated + 1),
    })
}

/// Handle the manage command.
pub(crate) async fn handle_manage_command(
    config: &Config,
    action: ManageAction,
    file: &Path,
    yes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ManageAction::Keys => {
            let updates = load_key_updates(file).await?;
            info!("Loaded {} key update(s) from {}", updates.len(), file.display());

            let question = format!("Are you sure you want to update {} keys?", updates.len());
            if !yes && !prompt::confirm(&question)? {
                info!("Aborting!");
                return Ok(());
            }

            let browser = open_browser(&config.browser).await?;
            let mut nav = Navigator::new(browser, &config.aptus);

            let result = update_keys(&mut nav, &updates).await;

            if let Err(e) = nav.close().await {
                warn!("Failed to close browser: {}", e);
            }

            let (unchanged, updated) = tally(&result?);
            info!("Keys updated: {}, unchanged: {}", updated, unchanged);
        }
    }

    Ok(())
}
