use crate::assemble::assemble_dataset;
use crate::config::{load_config, load_config_or_default, parse_output_format};
use crate::discover::{StreetPage, discover_street_pages};
use crate::export::write_dataset;
use crate::extract::extract_first_table;
use crate::model::{RunReport, StreetRecord, street_from_identifier};
use crate::normalize::normalize_table;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct AssembleOptions {
    pub config_path: PathBuf,
    pub input_dir: Option<PathBuf>,
    pub out_path: Option<PathBuf>,
    pub format: Option<String>,
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct InspectOptions {
    pub config_path: PathBuf,
    pub file: PathBuf,
}

/// Discover street pages, assemble the unified dataset and write it out.
pub fn run_assemble(options: &AssembleOptions) -> Result<RunReport> {
    let mut config = load_config_or_default(&options.config_path)?;

    if let Some(dir) = &options.input_dir {
        config.input.dir = dir.clone();
    }
    if let Some(path) = &options.out_path {
        config.output.path = path.clone();
    }
    if let Some(format) = &options.format {
        config.output.format = parse_output_format(format)?;
    }
    config.validate()?;

    let pages = discover_street_pages(&config.input)?;
    let (dataset, report) =
        assemble_dataset(&pages, &config.table.rules(), config.assemble.on_error)?;

    if options.dry_run {
        info!("dry run enabled; dataset not written");
    } else {
        write_dataset(&dataset, config.output.format, &config.output.path)?;
    }

    info!(
        discovered = report.files_discovered,
        parsed = report.files_parsed,
        skipped = report.files_skipped,
        records = report.records,
        "assemble complete"
    );

    Ok(report)
}

/// Parse a single street page and return its tagged records, for poking at
/// one file without touching the batch output.
pub fn inspect_page(options: &InspectOptions) -> Result<Vec<StreetRecord>> {
    let config = load_config_or_default(&options.config_path)?;

    let html = std::fs::read_to_string(&options.file)
        .with_context(|| format!("failed to read street page {}", options.file.display()))?;
    let id = options.file.display().to_string();

    let page = StreetPage { id: id.clone(), html };
    let table = extract_first_table(&page.id, &page.html)?;
    let records = normalize_table(&page.id, &table, &config.table.rules())?;

    let street = street_from_identifier(&id);
    Ok(records
        .into_iter()
        .map(|r| StreetRecord::new(&street, r))
        .collect())
}

/// Load and validate a config file, returning a printable confirmation.
pub fn validate_config(config_path: &Path) -> Result<String> {
    let config = load_config(config_path)?;
    Ok(format!(
        "OK: {} (input dir {})",
        config_path.display(),
        config.input.dir.display()
    ))
}
