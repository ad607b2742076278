//! Output formatting: tsv, table, JSON, YAML.
//!
//! TSV and table views truncate costs to whole units; the structured
//! formats serialize the full-precision values.

use std::io::{self, Write};

use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use lpwancost_core::CostTable;
use lpwancost_core::report::whole_units;

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a report matrix in the chosen format.
pub fn render_cost_table(format: OutputFormat, table: &CostTable) -> Result<String, CliError> {
    match format {
        OutputFormat::Tsv => Ok(table.to_tsv().trim_end_matches('\n').to_owned()),
        OutputFormat::Table => Ok(render_matrix(table)),
        OutputFormat::Json => render_json(table),
        OutputFormat::Yaml => render_yaml(table),
    }
}

/// Render a list of serde-serializable + tabled items.
///
/// `to_row` builds the table view; `to_tsv` builds one tab-separated line
/// per item under `tsv_header`.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    tsv_header: &str,
    to_tsv: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(Table::new(rows).with(Style::rounded()).to_string())
        }
        OutputFormat::Json => render_json(data),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Tsv => {
            let mut lines = vec![tsv_header.to_owned()];
            lines.extend(data.iter().map(to_tsv));
            Ok(lines.join("\n"))
        }
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_matrix(table: &CostTable) -> String {
    let mut builder = Builder::default();
    builder.push_record(
        std::iter::once(table.index_label.to_owned()).chain(table.models.iter().cloned()),
    );
    for row in &table.rows {
        builder.push_record(
            std::iter::once(row.index.to_string())
                .chain(row.costs.iter().map(|c| whole_units(*c).to_string())),
        );
    }
    builder.build().with(Style::rounded()).to_string()
}

pub(crate) fn render_json<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(data).map_err(|e| CliError::Serialization(e.to_string()))
}

pub(crate) fn render_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data)
        .map(|s| s.trim_end().to_owned())
        .map_err(|e| CliError::Serialization(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use lpwancost_core::CostRow;

    fn sample() -> CostTable {
        CostTable {
            index_label: "month",
            models: vec!["a".into(), "b".into()],
            rows: vec![
                CostRow {
                    index: 0,
                    costs: vec![10.9, 20.0],
                },
                CostRow {
                    index: 1,
                    costs: vec![12.5, 21.75],
                },
            ],
        }
    }

    #[test]
    fn tsv_truncates_and_drops_trailing_newline() {
        let out = render_cost_table(OutputFormat::Tsv, &sample()).unwrap();
        assert_eq!(out, "month\ta\tb\n0\t10\t20\n1\t12\t21");
    }

    #[test]
    fn table_shows_whole_units() {
        let out = render_cost_table(OutputFormat::Table, &sample()).unwrap();
        assert!(out.contains("month"));
        assert!(out.contains("21"));
        assert!(!out.contains("21.75"));
    }

    #[test]
    fn json_keeps_full_precision() {
        let out = render_cost_table(OutputFormat::Json, &sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["rows"][1]["costs"][1], 21.75);
        assert_eq!(value["index_label"], "month");
    }
}
