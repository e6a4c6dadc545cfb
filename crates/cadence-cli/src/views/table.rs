use cadence_core::models::Event;
use comfy_table::{Cell, Row, Table};

/// Human description of a template's recurrence columns, e.g.
/// "weekly on 1,3,5 until 2024-12-31".
pub fn describe_pattern(template: &Event) -> String {
    let mut description = match template.frequency {
        Some(frequency) => frequency.to_string(),
        None => return "-".to_string(),
    };
    if let Some(days) = &template.days_of_week {
        description.push_str(&format!(" on {days}"));
    }
    if let Some(end_date) = template.end_date {
        description.push_str(&format!(" until {end_date}"));
    } else if let Some(occurrences) = template.occurrences {
        description.push_str(&format!(" (max {occurrences}/run)"));
    }
    description
}

pub fn display_templates(templates: &[Event]) {
    if templates.is_empty() {
        println!("No templates found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ID", "Title", "Pattern", "First", "Time", "Location", "Capacity",
    ]);

    for template in templates {
        let mut row = Row::new();
        row.add_cell(Cell::new(&template.id.simple().to_string()[..8]));
        row.add_cell(Cell::new(&template.title));
        row.add_cell(Cell::new(describe_pattern(template)));
        row.add_cell(Cell::new(template.start_time.format("%Y-%m-%d").to_string()));
        row.add_cell(Cell::new(format!(
            "{}-{}",
            template.start_time.format("%H:%M"),
            template.end_time.format("%H:%M"),
        )));
        row.add_cell(Cell::new(template.location.as_deref().unwrap_or("-")));
        row.add_cell(Cell::new(
            template
                .capacity
                .map_or_else(|| "-".to_string(), |c| c.to_string()),
        ));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_instances(instances: &[Event]) {
    if instances.is_empty() {
        println!("No instances found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Date", "Time", "Location", "Instructor"]);

    for instance in instances {
        let mut row = Row::new();
        row.add_cell(Cell::new(&instance.id.simple().to_string()[..8]));
        row.add_cell(Cell::new(&instance.title));
        row.add_cell(Cell::new(
            instance
                .occurs_on
                .map_or_else(|| "-".to_string(), |d| d.to_string()),
        ));
        row.add_cell(Cell::new(format!(
            "{}-{}",
            instance.start_time.format("%H:%M"),
            instance.end_time.format("%H:%M"),
        )));
        row.add_cell(Cell::new(instance.location.as_deref().unwrap_or("-")));
        row.add_cell(Cell::new(instance.instructor.as_deref().unwrap_or("-")));
        table.add_row(row);
    }

    println!("{table}");
}
