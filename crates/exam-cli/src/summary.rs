//! Human-readable tables for command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use exam_model::AssessmentArtifact;
use exam_publish::ClassHistory;
use exam_validate::ValidationReport;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn print_findings(report: &ValidationReport) {
    if report.is_valid() {
        println!("Blueprint is valid.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Code"), header_cell("Finding")]);
    apply_table_style(&mut table);
    for finding in &report.findings {
        table.add_row(vec![
            Cell::new(finding.code()).fg(Color::Red),
            Cell::new(finding.message()),
        ]);
    }
    println!("{table}");
    println!(
        "{count} finding(s); blueprint rejected.",
        count = report.finding_count()
    );
}

pub fn print_artifact_summary(artifact: &AssessmentArtifact) {
    println!("Artifact: {}", artifact.id);
    println!(
        "Tenant: {}  Class: {}  Subject: {}",
        artifact.blueprint.tenant_id, artifact.blueprint.class_id, artifact.blueprint.subject
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Section"),
        header_cell("Category"),
        header_cell("Questions"),
        header_cell("Marks each"),
        header_cell("Marks"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for section in &artifact.sections {
        table.add_row(vec![
            Cell::new(&section.title),
            Cell::new(section.questions.first().map_or_else(
                || "-".to_string(),
                |q| q.category.to_string(),
            )),
            Cell::new(section.questions.len()),
            Cell::new(section.marks_per_question),
            Cell::new(section.marks()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(artifact.total_questions()).add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(artifact.computed_total_marks()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_history(groups: &[ClassHistory]) {
    if groups.is_empty() {
        println!("No artifacts stored for this tenant.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Class"),
        header_cell("Artifact"),
        header_cell("Subject"),
        header_cell("Status"),
        header_cell("Marks"),
        header_cell("Created"),
    ]);
    apply_table_style(&mut table);
    for group in groups {
        for artifact in &group.artifacts {
            table.add_row(vec![
                Cell::new(group.class_id.as_str()),
                Cell::new(artifact.id.to_hex()),
                Cell::new(&artifact.blueprint.subject),
                Cell::new(artifact.status.to_string()),
                Cell::new(artifact.computed_total_marks()),
                Cell::new(artifact.created_at.to_rfc3339()),
            ]);
        }
    }
    println!("{table}");
}
