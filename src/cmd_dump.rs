//! `dump` subcommand.

use std::ops::Range;

use tracing::{info, warn};

use aptus_config::Config;
use aptus_core::{Navigator, Orchestrator};

use crate::cli::DumpArgs;
use crate::open_browser;

/// Customer ids to try: the configured range with CLI overrides applied.
pub(crate) fn customer_range(
    config: &Config,
    from: Option<u32>,
    to: Option<u32>,
) -> Result<Range<u32>, String> {
    let configured = config.aptus.customer_ids();
    let start = from.unwrap_or(configured.start);
    let end = to.unwrap_or(configured.end);

    if start > end {
        return Err(format!("Invalid customer id range: {}..{}", start, end));
    }
    Ok(start..end)
}

/// Handle the dump command.
pub(crate) async fn handle_dump_command(
    config: &Config,
    args: DumpArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let customer_ids = customer_range(config, args.from, args.to)?;

    let browser = open_browser(&config.browser).await?;
    let mut nav = Navigator::new(browser, &config.aptus);

    let result = Orchestrator::new(&mut nav, customer_ids, config.output.dump_root.clone())
        .dump_all(&args.families)
        .await;

    if let Err(e) = nav.close().await {
        warn!("Failed to close browser: {}", e);
    }

    let summary = result?;
    if let Some(count) = summary.authorities {
        info!("Authorities: {}", count);
    }
    if let Some(count) = summary.customers {
        info!(
            "Customers: {} ({} ids without customer)",
            count, summary.absent_customers
        );
    }
    info!(
        "Dump complete: {} file(s) in {} ({} login(s))",
        summary.files.len(),
        summary.dump_dir.display(),
        summary.logins
    );

    Ok(())
}
