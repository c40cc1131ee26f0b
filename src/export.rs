use crate::config::OutputFormat;
use crate::model::{StreetDataset, StreetRecord};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

const COLUMNS: [&str; 5] = ["street", "from", "to", "year", "cars"];

/// Write the assembled dataset to `path` in the requested format. The
/// delimited formats carry a header row; an unknown car count is an empty
/// cell (TSV/CSV) or `null` (JSON).
pub fn write_dataset(dataset: &StreetDataset, format: OutputFormat, path: &Path) -> Result<()> {
    let body = match format {
        OutputFormat::Tsv => render_delimited(dataset, '\t', sanitize_tsv_field),
        OutputFormat::Csv => render_delimited(dataset, ',', quote_csv_field),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&dataset.records).context("failed to encode dataset")?
                + "\n"
        }
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output dir {}", parent.display()))?;
    }

    std::fs::write(path, body)
        .with_context(|| format!("failed to write dataset {}", path.display()))?;

    info!(file = %path.display(), records = dataset.len(), "dataset written");

    Ok(())
}

fn render_delimited(
    dataset: &StreetDataset,
    delimiter: char,
    escape: fn(&str) -> String,
) -> String {
    let mut lines = Vec::with_capacity(dataset.len() + 1);
    lines.push(
        COLUMNS
            .iter()
            .map(|c| escape(c))
            .collect::<Vec<_>>()
            .join(&delimiter.to_string()),
    );

    for record in dataset.iter() {
        lines.push(
            record_fields(record)
                .iter()
                .map(|field| escape(field))
                .collect::<Vec<_>>()
                .join(&delimiter.to_string()),
        );
    }

    lines.join("\n") + "\n"
}

fn record_fields(record: &StreetRecord) -> [String; 5] {
    [
        record.street.clone(),
        record.from.clone(),
        record.to.clone(),
        record.year.to_string(),
        record.cars.map(|v| v.to_string()).unwrap_or_default(),
    ]
}

fn sanitize_tsv_field(field: &str) -> String {
    field.replace(['\t', '\n', '\r'], " ")
}

fn quote_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
