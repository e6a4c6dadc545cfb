use cadence_core::models::Frequency;
use clap::{Parser, Subcommand};

/// Materialize recurring event templates into concrete scheduled instances
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new recurring template
    Add(AddCommand),
    /// Add or remove an exclusion date on a template
    Exclude(ExcludeCommand),
    /// Materialize instances for a template over a horizon
    Generate(GenerateCommand),
    /// Show the dates the next generation run would materialize
    Preview(PreviewCommand),
    /// List templates, or the instances of one template
    List(ListCommand),
    /// Delete a template or instance
    Delete(DeleteCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the template
    pub title: String,
    /// Start of the first occurrence (e.g. '2024-01-01 09:00')
    #[clap(long)]
    pub start: String,
    /// End of the first occurrence; sets the duration of every instance
    #[clap(long)]
    pub end: String,
    /// Recurrence frequency
    #[clap(long, value_enum)]
    pub every: FrequencyArg,
    /// Days of week for weekly/biweekly recurrence (e.g. 'mon,wed,fri' or '1,3,5')
    #[clap(long)]
    pub on: Option<String>,
    /// Last calendar date instances may fall on (e.g. '2024-12-31')
    #[clap(long, conflicts_with = "count")]
    pub until: Option<String>,
    /// Cap on instances created per generation run
    #[clap(long)]
    pub count: Option<u32>,
    /// Free-form notes copied onto every instance
    #[clap(short, long)]
    pub notes: Option<String>,
    /// Location copied onto every instance
    #[clap(short, long)]
    pub location: Option<String>,
    /// Category copied onto every instance
    #[clap(long)]
    pub category: Option<String>,
    /// Capacity copied onto every instance
    #[clap(long)]
    pub capacity: Option<i64>,
    /// Assigned instructor or resource copied onto every instance
    #[clap(short, long)]
    pub instructor: Option<String>,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum FrequencyArg {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl From<FrequencyArg> for Frequency {
    fn from(arg: FrequencyArg) -> Self {
        match arg {
            FrequencyArg::Daily => Frequency::Daily,
            FrequencyArg::Weekly => Frequency::Weekly,
            FrequencyArg::Biweekly => Frequency::Biweekly,
            FrequencyArg::Monthly => Frequency::Monthly,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ExcludeCommand {
    /// The ID (or unique prefix) of the template
    pub id: String,
    /// The calendar date to exclude (e.g. '2024-07-04')
    pub date: String,
    /// Remove the exclusion instead of adding it
    #[clap(long)]
    pub remove: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateCommand {
    /// The ID (or unique prefix) of the template
    pub id: String,
    /// How many weeks ahead to materialize
    #[clap(short, long)]
    pub weeks: Option<i64>,
}

#[derive(Parser, Debug, Clone)]
pub struct PreviewCommand {
    /// The ID (or unique prefix) of the template
    pub id: String,
    /// How many weeks ahead to look
    #[clap(short, long)]
    pub weeks: Option<i64>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Template ID (or unique prefix); lists its instances instead of all templates
    pub id: Option<String>,
    /// How many weeks of instances to show
    #[clap(short, long)]
    pub weeks: Option<i64>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID (or unique prefix) of the event to delete
    pub id: String,
}
