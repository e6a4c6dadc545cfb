use anyhow::Result;
use cadence_core::repository::Repository;
use owo_colors::{OwoColorize, Style};

use crate::cli::DeleteCommand;
use crate::util::resolve_event_id;

pub async fn delete_event(repo: &impl Repository, command: DeleteCommand) -> Result<()> {
    let event_id = resolve_event_id(repo, &command.id).await?;
    repo.delete_event(event_id).await?;

    let success_style = Style::new().green().bold();
    println!(
        "{} Deleted event {}. Generated instances, if any, are kept.",
        "✓".style(success_style),
        event_id.to_string().yellow()
    );

    Ok(())
}
