use anyhow::Result;
use cadence_core::materializer;
use cadence_core::repository::Repository;
use owo_colors::{OwoColorize, Style};

use crate::cli::GenerateCommand;
use crate::config::Config;
use crate::util::resolve_event_id;

pub async fn generate_instances(
    repo: &impl Repository,
    command: GenerateCommand,
    config: &Config,
) -> Result<()> {
    let template_id = resolve_event_id(repo, &command.id).await?;
    let weeks = command.weeks.unwrap_or(config.default_horizon_weeks);

    let outcome = materializer::generate(repo, template_id, weeks).await?;

    let success_style = Style::new().green().bold();
    if outcome.created_count == 0 {
        println!(
            "{} Nothing to do; the next {} weeks are already materialized",
            "✓".style(success_style),
            weeks
        );
    } else {
        println!(
            "{} Created {} instance(s) over the next {} weeks",
            "✓".style(success_style),
            outcome.created_count.to_string().bright_white().bold(),
            weeks
        );
        for id in &outcome.created_instance_ids {
            println!("  {}", id.to_string().yellow());
        }
    }

    Ok(())
}
