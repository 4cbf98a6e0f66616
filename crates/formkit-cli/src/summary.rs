use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use formkit_cli::commands::DirtyReport;
use formkit_model::{ChangeSet, DiffEntry, DiffKind};
use serde_json::Value;

const MAX_VALUE_WIDTH: usize = 60;

pub fn print_change_set(change_set: &ChangeSet) {
    if change_set.is_empty() {
        println!("No changes.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Scope"),
        header_cell("Variant"),
        header_cell("Path"),
        header_cell("Change"),
        header_cell("Before"),
        header_cell("After"),
    ]);
    apply_change_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);

    for group in &change_set.line_changes {
        for entry in &group.changes {
            let scope = if group.is_new {
                format!("line {} (new)", group.line_id)
            } else {
                format!("line {}", group.line_id)
            };
            table.add_row(entry_row(
                Cell::new(scope).fg(Color::Cyan),
                Cell::new(&group.variant_name),
                entry,
            ));
        }
    }
    for entry in &change_set.resource_changes {
        table.add_row(entry_row(dim_cell("order"), dim_cell("-"), entry));
    }
    println!("{table}");
    println!(
        "{} change(s): {} line(s), {} resource change(s)",
        change_set.change_count(),
        change_set.line_changes.len(),
        change_set.resource_changes.len()
    );
}

pub fn print_dirty_report(report: &DirtyReport) {
    let status = if report.dirty { "dirty" } else { "clean" };
    let flow = if report.compared_to_entity {
        "compared to entity"
    } else {
        "new form"
    };
    match &report.first_difference {
        Some(field) => println!("{status} ({flow}): first difference in '{field}'"),
        None => println!("{status} ({flow}): {} field(s) checked", report.field_count),
    }
}

fn entry_row(scope: Cell, variant: Cell, entry: &DiffEntry) -> Vec<Cell> {
    let path = if entry.path.is_empty() {
        dim_cell("(whole line)")
    } else {
        Cell::new(&entry.path)
    };
    vec![
        scope,
        variant,
        path,
        kind_cell(entry.kind()),
        value_cell(entry.change.before()),
        value_cell(entry.change.after()),
    ]
}

fn kind_cell(kind: DiffKind) -> Cell {
    let color = match kind {
        DiffKind::Added => Color::Green,
        DiffKind::Removed => Color::Red,
        DiffKind::PrimitiveChange => Color::Yellow,
        DiffKind::PrimitiveJsonChange => Color::Magenta,
    };
    Cell::new(kind.label())
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: Option<&Value>) -> Cell {
    match value {
        Some(value) => Cell::new(truncate(&value.to_string(), MAX_VALUE_WIDTH)),
        None => dim_cell("-"),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(content: T) -> Cell {
    Cell::new(content.to_string()).add_attribute(Attribute::Dim)
}

fn apply_change_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Fixed(18)),
        ColumnConstraint::UpperBoundary(Width::Fixed(20)),
        ColumnConstraint::UpperBoundary(Width::Percentage(25)),
        ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ColumnConstraint::UpperBoundary(Width::Percentage(25)),
        ColumnConstraint::UpperBoundary(Width::Percentage(25)),
    ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
