use anyhow::Result;
use cadence_core::materializer;
use cadence_core::repository::Repository;
use owo_colors::OwoColorize;

use crate::cli::PreviewCommand;
use crate::config::Config;
use crate::util::resolve_event_id;

pub async fn preview_instances(
    repo: &impl Repository,
    command: PreviewCommand,
    config: &Config,
) -> Result<()> {
    let template_id = resolve_event_id(repo, &command.id).await?;
    let weeks = command.weeks.unwrap_or(config.default_horizon_weeks);

    let dates = materializer::preview(repo, template_id, weeks).await?;

    if dates.is_empty() {
        println!(
            "Nothing would be generated in the next {weeks} weeks (already materialized, excluded, or pattern ended)."
        );
        return Ok(());
    }

    println!(
        "The next generation run would create {} instance(s):",
        dates.len().to_string().bright_white().bold()
    );
    for date in dates {
        println!("  {} ({})", date.to_string().cyan(), date.format("%A"));
    }

    Ok(())
}
