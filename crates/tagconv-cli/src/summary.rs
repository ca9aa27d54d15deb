use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tagconv_cli::pipeline::Upload;
use tagconv_model::{ConversionResult, OutputRecord};
use tagconv_output::WriteSummary;
use tagconv_transform::SourceRecord;

/// One-line status in the form `Loaded: FIC101.csv - 120 rows converted (offset: +5h)`.
pub fn status_line(upload: &Upload, result: &ConversionResult, hour_offset: i32) -> String {
    let offset = if hour_offset == 0 {
        String::new()
    } else {
        format!(" (offset: {hour_offset:+}h)")
    };
    format!(
        "Loaded: {} - {} rows converted{offset}",
        upload.label(),
        result.len()
    )
}

pub fn saved_line(summary: &WriteSummary) -> String {
    let name = summary
        .path
        .file_name()
        .map_or_else(|| summary.path.display().to_string(), |name| {
            name.to_string_lossy().into_owned()
        });
    format!("Saved: {name}")
}

pub fn print_counts(upload: &Upload, result: &ConversionResult) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    for file in &upload.files {
        table.add_row(vec![
            Cell::new(file.path.display()),
            Cell::new(file.rows),
        ]);
    }
    table.add_row(vec![
        Cell::new("Merged input").add_attribute(Attribute::Bold),
        Cell::new(result.input_records).add_attribute(Attribute::Bold),
    ]);
    let unparsed = upload.source.unparsed_count();
    if unparsed > 0 {
        table.add_row(vec![
            dim_cell("Unparsable timestamps"),
            count_cell(unparsed, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("Bad quality removed"),
        count_cell(result.counts.bad_quality_removed, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Outside time range"),
        count_cell(result.counts.range_filtered, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Duplicates removed"),
        count_cell(result.counts.duplicates_removed, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("OUTPUT")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.len())
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_preview(source: &[SourceRecord], converted: &[OutputRecord], rows: usize) {
    let mut original = Table::new();
    original.set_header(vec![
        header_cell("Timestamp"),
        header_cell("Value"),
        header_cell("Quality"),
    ]);
    apply_table_style(&mut original);
    for record in source.iter().take(rows) {
        let timestamp = if record.instant.is_some() {
            Cell::new(&record.raw.raw_timestamp)
        } else {
            Cell::new(&record.raw.raw_timestamp).fg(Color::Yellow)
        };
        let quality = if record.raw.has_bad_quality() {
            Cell::new(&record.raw.quality).fg(Color::Red)
        } else {
            Cell::new(&record.raw.quality)
        };
        original.add_row(vec![timestamp, Cell::new(&record.raw.value), quality]);
    }

    let has_tag = converted.first().is_some_and(|record| record.tagname.is_some());
    let mut output = Table::new();
    let mut header = Vec::with_capacity(3);
    if has_tag {
        header.push(header_cell("Tagname"));
    }
    header.push(header_cell("Timestamp"));
    header.push(header_cell("Value"));
    output.set_header(header);
    apply_table_style(&mut output);
    for record in converted.iter().take(rows) {
        output.add_row(record.fields());
    }

    println!("Original ({} rows):", source.len());
    println!("{original}");
    println!();
    println!("Converted ({} rows):", converted.len());
    println!("{output}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
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
