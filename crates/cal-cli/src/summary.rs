use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cal_cli::report::RunReport;
use cal_ingest::ResearcherSet;
use cal_model::Settings;

pub fn print_run_summary(report: &RunReport) {
    println!("Rule: {}", report.rule);
    println!(
        "Researchers: {}  Courses: {}  Activities: {}",
        report.identity_count, report.course_count, report.matched_count
    );

    let lines = report.lines();
    if lines.is_empty() {
        println!("No activities were submitted.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Course"),
        header_cell("Title"),
        header_cell("Researcher"),
        header_cell("Result"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table, 140);
    align_column(&mut table, 3, CellAlignment::Center);
    for line in lines {
        table.add_row(vec![
            Cell::new(line.activity).add_attribute(Attribute::Bold),
            Cell::new(line.title),
            Cell::new(line.researcher),
            result_cell(line.success),
            if line.message.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(line.message).fg(Color::Red)
            },
        ]);
    }
    println!("{table}");

    let failed = report.failed();
    let failed_cell = if failed > 0 {
        format!("{failed} failed")
    } else {
        "none failed".to_string()
    };
    println!("Submitted: {} created, {failed_cell}", report.succeeded());
}

pub fn print_sets(sets: &[ResearcherSet]) {
    if sets.is_empty() {
        println!("No researcher sets found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Members"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table, 120);
    align_column(&mut table, 2, CellAlignment::Right);
    for set in sets {
        table.add_row(vec![
            Cell::new(&set.id).add_attribute(Attribute::Bold),
            Cell::new(&set.name),
            Cell::new(set.number_of_members.value),
            text_cell(&set.description),
        ]);
    }
    println!("{table}");
}

pub fn print_rules(settings: &Settings) {
    println!(
        "Language: {}  Public profile: {}  Researcher profile: {}",
        settings.language, settings.visibility_public, settings.visibility_researcher
    );
    if settings.mapping_rules.is_empty() {
        println!("No mapping rules configured.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Org unit"),
        header_cell("Activity type"),
        header_cell("Role"),
        header_cell("Term"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table, 140);
    for (key, rule) in &settings.mapping_rules {
        let name = if rule.name.is_empty() { key } else { &rule.name };
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            text_cell(&rule.target_org_unit),
            text_cell(&rule.activity_type),
            text_cell(&rule.researcher_role),
            text_cell(&rule.course_term),
            text_cell(&rule.course_status),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table, width: u16) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn result_cell(success: bool) -> Cell {
    if success {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        Cell::new("✗").fg(Color::Red).add_attribute(Attribute::Bold)
    }
}

fn text_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}
