use anyhow::Result;
use cadence_core::models::NewTemplateData;
use cadence_core::repository::Repository;
use owo_colors::{OwoColorize, Style};

use crate::cli::AddCommand;
use crate::parser::{build_pattern, parse_datetime};
use crate::views::table::describe_pattern;

pub async fn add_template(repo: &impl Repository, command: AddCommand) -> Result<()> {
    let start_time = parse_datetime(&command.start)?;
    let end_time = parse_datetime(&command.end)?;
    let pattern = build_pattern(
        command.every.into(),
        command.on.as_deref(),
        command.until.as_deref(),
        command.count,
    )?;

    let template = repo
        .add_template(NewTemplateData {
            title: command.title,
            notes: command.notes,
            location: command.location,
            category: command.category,
            capacity: command.capacity,
            instructor: command.instructor,
            start_time,
            end_time,
            pattern,
        })
        .await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();
    println!(
        "{} Created template: {}",
        "✓".style(success_style),
        template.title.bright_white().bold()
    );
    println!(
        "  {} ID: {}",
        "→".style(info_style),
        template.id.to_string().yellow()
    );
    println!(
        "  {} Recurs: {}",
        "→".style(info_style),
        describe_pattern(&template).cyan()
    );
    println!(
        "  {} Preview upcoming dates: cadence preview {}",
        "→".style(info_style),
        &template.id.simple().to_string()[..8]
    );

    Ok(())
}
