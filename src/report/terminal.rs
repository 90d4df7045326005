use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::LicenseGroup;

/// Lines of license text shown per row before eliding the rest.
const MAX_LICENSE_LINES: usize = 8;

/// Render the license groups as a table on stdout.
pub fn render(groups: &[LicenseGroup], pattern: &str, quiet: bool) {
    if quiet {
        return;
    }

    println!(
        "\n {} v{}",
        "license-harvest".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Pattern: {}\n", pattern);

    if groups.is_empty() {
        println!(" {} No license comments found.\n", "[OK]".green().bold());
        return;
    }

    println!(
        " {} {} distinct license texts:\n",
        "[FOUND]".yellow().bold(),
        groups.len()
    );
    println!("{}\n", build_table(groups));
}

fn build_table(groups: &[LicenseGroup]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Files").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
        ]);

    for (i, group) in groups.iter().enumerate() {
        let files = group
            .files
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join("\n");

        table.add_row(vec![
            Cell::new(i + 1).fg(Color::DarkGrey),
            Cell::new(files).fg(Color::Cyan),
            Cell::new(excerpt(&group.license)),
        ]);
    }

    table
}

fn excerpt(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() <= MAX_LICENSE_LINES {
        return text.to_string();
    }
    format!(
        "{}\n… ({} more lines)",
        lines[..MAX_LICENSE_LINES].join("\n"),
        lines.len() - MAX_LICENSE_LINES
    )
}
