use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tableschema_core::{RowError, Schema};

use crate::commands::ValidationResult;

pub fn print_validation(result: &ValidationResult) {
    println!("CSV: {}", result.csv.display());
    println!("Schema: {}", result.schema.display());
    println!("{}", validation_line(result));
    if result.has_errors() {
        println!("{}", failure_table(result));
    }
}

pub fn print_fields(schema: &Schema) {
    println!("{}", field_table(schema));
}

/// One-line outcome, e.g. `rows cast: 2, failed: 1`.
pub fn validation_line(result: &ValidationResult) -> String {
    let mut line = format!(
        "rows cast: {}, failed: {}",
        result.rows_cast,
        result.failures.len()
    );
    if result.stopped_early {
        line.push_str(" (stopped at first failure)");
    }
    line
}

pub fn failure_table(result: &ValidationResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Error"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for failure in &result.failures {
        table.add_row(vec![
            Cell::new(failure.row_index),
            field_cell(error_field(&failure.cause)),
            Cell::new(failure.cause.to_string()).fg(Color::Red),
        ]);
    }
    table
}

pub fn field_table(schema: &Schema) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Field"),
        header_cell("Type"),
        header_cell("Format"),
        header_cell("Required"),
        header_cell("Unique"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Center);
    for (index, field) in schema.fields().iter().enumerate() {
        let key = schema.primary_key().iter().any(|name| name == field.name());
        let name = if key {
            Cell::new(field.name()).add_attribute(Attribute::Bold)
        } else {
            Cell::new(field.name())
        };
        table.add_row(vec![
            Cell::new(index + 1),
            name,
            Cell::new(field.field_type()),
            Cell::new(field.format()),
            flag_cell(field.constraints().required),
            flag_cell(field.constraints().unique || key),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn error_field(error: &RowError) -> Option<&str> {
    match error {
        RowError::Cast { field, .. }
        | RowError::Required { field }
        | RowError::Assign { field, .. }
        | RowError::Encode { field, .. }
        | RowError::Duplicate { field, .. } => Some(field.as_str()),
        RowError::LengthMismatch { .. } => None,
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn field_cell(field: Option<&str>) -> Cell {
    match field {
        Some(name) => Cell::new(name),
        None => Cell::new("-").add_attribute(Attribute::Dim),
    }
}

fn flag_cell(set: bool) -> Cell {
    if set {
        Cell::new("✓").fg(Color::Green)
    } else {
        Cell::new("-").add_attribute(Attribute::Dim)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
