use anyhow::Result;
use cadence_core::repository::Repository;
use owo_colors::{OwoColorize, Style};

use crate::cli::ExcludeCommand;
use crate::parser::parse_date;
use crate::util::resolve_event_id;

pub async fn exclude_date(repo: &impl Repository, command: ExcludeCommand) -> Result<()> {
    let template_id = resolve_event_id(repo, &command.id).await?;
    let date = parse_date(&command.date)?;
    let success_style = Style::new().green().bold();

    if command.remove {
        repo.remove_exclusion(template_id, date).await?;
        println!(
            "{} Removed exclusion on {}; the date can be generated again",
            "✓".style(success_style),
            date.to_string().cyan()
        );
    } else {
        repo.add_exclusion(template_id, date).await?;
        println!(
            "{} Excluded {}; no instance will be generated on that date",
            "✓".style(success_style),
            date.to_string().cyan()
        );
    }

    Ok(())
}
