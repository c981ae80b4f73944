use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use intake_core::{ExecuteResponse, SchemaView};
use intake_map::Candidate;
use intake_model::{
    Analysis, CanonicalRecord, ImportResult, MappingResult, PreviewRow, SchemaDefinition,
    ValidationResult,
};

/// Most validation messages listed before the rest are summarized.
const MAX_LISTED_MESSAGES: usize = 20;

pub fn print_schemas(schemas: &[SchemaDefinition], default_type: &str) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Data Type"),
        header_cell("Label"),
        header_cell("Worksheet"),
        header_cell("Required"),
        header_cell("Optional"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for schema in schemas {
        let data_type = if schema.data_type() == default_type {
            Cell::new(format!("{} (default)", schema.data_type()))
        } else {
            Cell::new(schema.data_type())
        };
        table.add_row(vec![
            data_type.fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(schema.label()),
            Cell::new(schema.worksheet()),
            Cell::new(schema.required_fields().count()),
            Cell::new(schema.optional_fields().count()),
        ]);
    }
    println!("{table}");
}

pub fn print_schema(view: &SchemaView) {
    println!("Data type: {} ({})", view.data_type, view.label);
    println!("Worksheet: {}", view.worksheet);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Required"),
        header_cell("Aliases"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    let fields = view
        .required
        .iter()
        .map(|field| (field, true))
        .chain(view.optional.iter().map(|field| (field, false)));
    for (field, required) in fields {
        let aliases = view
            .aliases
            .get(field)
            .filter(|aliases| !aliases.is_empty())
            .map(|aliases| Cell::new(aliases.join(", ")))
            .unwrap_or_else(|| dim_cell("-"));
        table.add_row(vec![Cell::new(field), required_cell(required), aliases]);
    }
    println!("{table}");
}

/// Print an analysis. `closest` gives the best sub-threshold candidate of
/// each unmapped header.
pub fn print_analysis(analysis: &Analysis, closest: &[(String, Option<Candidate>)]) {
    println!(
        "Headers: {}  Rows: {}",
        analysis.source_headers.len(),
        analysis.row_count
    );
    print_mapping(&analysis.mapping_suggestions);
    if !closest.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Unmapped Header"),
            header_cell("Closest Field"),
            header_cell("Score"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        for (header, candidate) in closest {
            let (field, score) = match candidate {
                Some(candidate) => (
                    Cell::new(&candidate.field),
                    Cell::new(candidate.score).fg(Color::Yellow),
                ),
                None => (dim_cell("-"), dim_cell("-")),
            };
            table.add_row(vec![Cell::new(header), field, score]);
        }
        println!();
        println!("{table}");
    }
    print_missing(&analysis.mapping_suggestions);
    if !analysis.preview_rows.is_empty() {
        println!();
        println!("Preview:");
        print_preview_rows(&analysis.source_headers, &analysis.preview_rows);
    }
}

pub fn print_import(result: &ImportResult) {
    if let Some(error) = &result.error {
        eprintln!("error: {error}");
        return;
    }
    print_mapping(&result.mapping);
    print_missing(&result.mapping);
    if !result.preview.is_empty() {
        println!();
        println!("Preview:");
        print_records(&result.preview);
    }
    print_validation(&result.validation);
}

pub fn print_execute(response: &ExecuteResponse, worksheet: &str) {
    print_import(&response.result);
    if response.result.success || response.persisted > 0 {
        println!();
        println!("Persisted: {} record(s) to {worksheet}", response.persisted);
    }
    if let Some(error) = &response.persist_error {
        eprintln!("error: {error}");
    }
}

fn print_mapping(mapping: &MappingResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Header"),
        header_cell("Field"),
        header_cell("Alias"),
        header_cell("Score"),
        header_cell("Required"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for entry in &mapping.mapping {
        let alias = if entry.is_user_defined() {
            Cell::new(&entry.matched_alias).fg(Color::Magenta)
        } else {
            Cell::new(&entry.matched_alias)
        };
        table.add_row(vec![
            Cell::new(&entry.source_header),
            Cell::new(&entry.target_field)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            alias,
            score_cell(entry.confidence_score),
            required_cell(entry.is_required),
        ]);
    }
    for header in &mapping.unmapped_headers {
        table.add_row(vec![
            Cell::new(header),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ]);
    }
    println!("{table}");
}

fn print_missing(mapping: &MappingResult) {
    if mapping.missing_required.is_empty() {
        return;
    }
    eprintln!("Missing required fields: {}", mapping.missing_required.join(", "));
}

fn print_validation(validation: &ValidationResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Records"),
        header_cell("Valid"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(validation.total_records),
        required_cell(validation.valid),
        count_cell(Some(validation.errors.len()), Color::Red),
        count_cell(Some(validation.warnings.len()), Color::Yellow),
    ]);
    println!();
    println!("{table}");
    print_messages("Errors", &validation.errors);
    print_messages("Warnings", &validation.warnings);
}

fn print_messages(title: &str, messages: &[String]) {
    if messages.is_empty() {
        return;
    }
    eprintln!("{title}:");
    for message in messages.iter().take(MAX_LISTED_MESSAGES) {
        eprintln!("- {message}");
    }
    if messages.len() > MAX_LISTED_MESSAGES {
        eprintln!("- ... and {} more", messages.len() - MAX_LISTED_MESSAGES);
    }
}

fn print_preview_rows(headers: &[String], rows: &[PreviewRow]) {
    let mut table = Table::new();
    table.set_header(headers.iter().map(|h| header_cell(h)).collect::<Vec<_>>());
    apply_wide_table_style(&mut table);
    for row in rows {
        table.add_row(
            headers
                .iter()
                .map(|header| match row.get(header) {
                    Some(value) if !value.is_empty() => Cell::new(value),
                    _ => dim_cell("-"),
                })
                .collect::<Vec<_>>(),
        );
    }
    println!("{table}");
}

fn print_records(records: &[CanonicalRecord]) {
    let mut fields: Vec<&str> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !fields.contains(&key.as_str()) {
                fields.push(key);
            }
        }
    }
    let mut table = Table::new();
    table.set_header(fields.iter().map(|f| header_cell(f)).collect::<Vec<_>>());
    apply_wide_table_style(&mut table);
    for record in records {
        table.add_row(
            fields
                .iter()
                .map(|field| match record.get(*field) {
                    Some(value) => Cell::new(value),
                    None => dim_cell("-"),
                })
                .collect::<Vec<_>>(),
        );
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() == 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ]);
    }
}

fn apply_wide_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn score_cell(score: u8) -> Cell {
    let color = match score {
        100 => Color::Green,
        80..=99 => Color::Reset,
        _ => Color::Yellow,
    };
    Cell::new(score).fg(color)
}

fn required_cell(flag: bool) -> Cell {
    if flag {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
