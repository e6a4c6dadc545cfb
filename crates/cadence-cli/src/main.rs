use clap::Parser;
use owo_colors::{OwoColorize, Style};

use cadence_core::db;
use cadence_core::error::CoreError;
use cadence_core::repository::SqliteRepository;

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    let config = config::Config::new().unwrap_or_default();

    let db_pool = match db::establish_connection(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    let repository = SqliteRepository::new(db_pool);

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Add(command) => commands::add::add_template(&repository, command).await,
        cli::Commands::Exclude(command) => {
            commands::exclude::exclude_date(&repository, command).await
        }
        cli::Commands::Generate(command) => {
            commands::generate::generate_instances(&repository, command, &config).await
        }
        cli::Commands::Preview(command) => {
            commands::preview::preview_instances(&repository, command, &config).await
        }
        cli::Commands::List(command) => {
            commands::list::list_events(&repository, command, &config).await
        }
        cli::Commands::Delete(command) => {
            commands::delete::delete_event(&repository, command).await
        }
    };

    if let Err(e) = result {
        handle_error(e);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::TemplateNotFound(id) => {
                eprintln!(
                    "{} No template with id {}",
                    "Error:".style(error_style),
                    id.to_string().yellow()
                );
            }
            CoreError::NotARecurringTemplate(id) => {
                eprintln!(
                    "{} Event {} is a generated instance, not a recurring template",
                    "Error:".style(error_style),
                    id.to_string().yellow()
                );
            }
            CoreError::InvalidPattern(s) => {
                eprintln!(
                    "{} Invalid recurrence pattern: {}. Fix the template before retrying.",
                    "Error:".style(error_style),
                    s
                );
            }
            CoreError::PersistenceFailure(s) => {
                eprintln!(
                    "{} Batch write failed and was rolled back: {}",
                    "Error:".style(error_style),
                    s
                );
                eprintln!("Nothing was committed; re-running the command is safe.");
            }
            CoreError::AmbiguousId(events) => {
                eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
                eprintln!("Did you mean one of these?");
                for (id, title) in events {
                    eprintln!("  {} ({})", id.yellow(), title);
                }
            }
            CoreError::NotFound(s) | CoreError::InvalidInput(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }

    std::process::exit(1);
}
