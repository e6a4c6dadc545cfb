use anyhow::Result;
use cadence_core::repository::Repository;
use chrono::{Duration, Utc};

use crate::cli::ListCommand;
use crate::config::Config;
use crate::util::resolve_event_id;
use crate::views::table;

pub async fn list_events(
    repo: &impl Repository,
    command: ListCommand,
    config: &Config,
) -> Result<()> {
    match command.id {
        Some(id) => {
            let template_id = resolve_event_id(repo, &id).await?;
            let weeks = command.weeks.unwrap_or(config.default_horizon_weeks);
            let start = Utc::now().date_naive();
            let end = start + Duration::days(weeks * 7);
            let instances = repo
                .find_instances_for_template(template_id, start, end)
                .await?;
            table::display_instances(&instances);
        }
        None => {
            let templates = repo.find_templates().await?;
            table::display_templates(&templates);
        }
    }

    Ok(())
}
