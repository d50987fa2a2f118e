//! CLI output: pretty tables, JSON, and CSV export.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use lift_analysis::selection::{CandidateCell, ScanOutcome};
use lift_analysis::series::sanitize_headers;
use lift_queries::registry::QueryRegistry;
use lift_warehouse::ResultTable;

use crate::{fail, OutputFormat};

/// Print the registered query names.
pub fn print_query_list(registry: &QueryRegistry, format: OutputFormat) -> Result<()> {
    let names = registry.names();
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&names)?);
        }
        _ => {
            for name in names {
                println!("{name}");
            }
        }
    }
    Ok(())
}

/// Print a warehouse result table.
pub fn print_table(table: &ResultTable, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = table
                .rows
                .iter()
                .map(|row| {
                    let object: serde_json::Map<String, serde_json::Value> = table
                        .columns
                        .iter()
                        .cloned()
                        .zip(row.iter().cloned())
                        .collect();
                    serde_json::Value::Object(object)
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Csv => {
            let columns = sanitize_headers(&table.columns).map_err(fail)?;
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(&columns)?;
            for row in &table.rows {
                let record: Vec<String> = row.iter().map(cell_text).collect();
                writer.write_record(&record)?;
            }
            writer.flush()?;
        }
        OutputFormat::Pretty => {
            let widths = column_widths(table);
            print_row(&table.columns, &widths);
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            print_row(&rule, &widths);
            for row in &table.rows {
                let cells: Vec<String> = row.iter().map(cell_text).collect();
                print_row(&cells, &widths);
            }
            println!("({} rows)", table.len());
        }
    }
    Ok(())
}

/// Write scan results to `out` (or stdout).
pub fn write_cells(
    outcome: &ScanOutcome,
    format: OutputFormat,
    out: Option<&Path>,
) -> Result<()> {
    let mut sink: Box<dyn Write> = match out {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut sink, &outcome.cells)?;
            writeln!(sink)?;
        }
        _ => write_cells_csv(&outcome.cells, &mut sink)?,
    }

    if outcome.truncated {
        eprintln!(
            "note: combination cap reached after {} combinations; results are partial",
            outcome.combinations_enumerated
        );
    }
    Ok(())
}

/// Flatten cells to CSV. Profile columns are prefixed so several profile
/// metrics can sit next to the design columns.
fn write_cells_csv(cells: &[CandidateCell], sink: &mut dyn Write) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);

    let profile_columns: Vec<String> = cells
        .first()
        .map(|cell| cell.profile.keys().cloned().collect())
        .unwrap_or_default();

    let mut header = vec![
        "regions".to_string(),
        "group_size".into(),
        "size_frac".into(),
        "mean".into(),
        "std".into(),
        "alpha".into(),
        "n_obs".into(),
        "alternative".into(),
        "power".into(),
        "mde_percent".into(),
        "effect_abs".into(),
        "std_error".into(),
    ];
    for column in &profile_columns {
        header.push(format!("profile_{column}"));
        header.push(format!("delta_{column}"));
        header.push(format!("delta_pct_{column}"));
    }
    writer.write_record(&header)?;

    for cell in cells {
        let mut record = vec![
            cell.regions.join("+"),
            cell.group_size.to_string(),
            cell.size_frac.to_string(),
            cell.mean.to_string(),
            cell.std.to_string(),
            cell.summary.alpha.to_string(),
            cell.summary.n_obs.to_string(),
            cell.summary.alternative.to_string(),
            cell.summary.power.to_string(),
            cell.summary.mde_percent.to_string(),
            cell.summary.effect_abs.to_string(),
            cell.summary.std_error.to_string(),
        ];
        for column in &profile_columns {
            record.push(number_or_empty(cell.profile.get(column)));
            record.push(number_or_empty(cell.profile_delta.get(column)));
            record.push(number_or_empty(cell.profile_delta_pct.get(column)));
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn number_or_empty(value: Option<&f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn column_widths(table: &ResultTable) -> Vec<usize> {
    let mut widths: Vec<usize> = table.columns.iter().map(String::len).collect();
    for row in &table.rows {
        for (i, value) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell_text(value).len());
            }
        }
    }
    widths
}

fn print_row<S: AsRef<str>>(cells: &[S], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
        .collect();
    println!("{}", line.join("  "));
}
