use crate::normalize::TableRules;
use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScrapeConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub assemble: AssembleConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl ScrapeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.input.extension.trim().is_empty() {
            bail!("input.extension must not be empty");
        }
        if self.table.header_token.is_empty() {
            bail!("table.header_token must not be empty");
        }
        if self.table.endpoint_delimiter.is_empty() {
            bail!("table.endpoint_delimiter must not be empty");
        }
        for pattern in &self.input.exclude {
            Regex::new(pattern)
                .with_context(|| format!("invalid input.exclude pattern {pattern}"))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_input_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Patterns matched against the file stem; matching pages (index and
    /// navigation pages) are not street data and are left out.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl InputConfig {
    pub fn compiled_excludes(&self) -> Result<Vec<Regex>> {
        self.exclude
            .iter()
            .map(|pattern| {
                Regex::new(pattern)
                    .with_context(|| format!("invalid input.exclude pattern {pattern}"))
            })
            .collect()
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: default_input_dir(),
            extension: default_extension(),
            exclude: default_exclude(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_header_token")]
    pub header_token: String,
    #[serde(default = "default_endpoint_delimiter")]
    pub endpoint_delimiter: String,
}

impl TableConfig {
    pub fn rules(&self) -> TableRules {
        TableRules {
            header_token: self.header_token.clone(),
            endpoint_delimiter: self.endpoint_delimiter.clone(),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            header_token: default_header_token(),
            endpoint_delimiter: default_endpoint_delimiter(),
        }
    }
}

/// What a single bad street page does to the batch. `Abort` is the default:
/// a dataset meant to be joined downstream should not quietly shrink.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    #[default]
    Abort,
    Skip,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AssembleConfig {
    #[serde(default)]
    pub on_error: FailurePolicy,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Tsv,
    Csv,
    Json,
}

pub fn parse_output_format(value: &str) -> Result<OutputFormat> {
    match value.to_ascii_lowercase().as_str() {
        "tsv" => Ok(OutputFormat::Tsv),
        "csv" => Ok(OutputFormat::Csv),
        "json" => Ok(OutputFormat::Json),
        other => bail!("unsupported output format {other}"),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            path: default_output_path(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<ScrapeConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: ScrapeConfig = toml::from_str(&text)
        .with_context(|| format!("failed to parse toml in {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

/// Built-in defaults when no config file is present.
pub fn load_config_or_default(path: &Path) -> Result<ScrapeConfig> {
    if !path.exists() {
        return Ok(ScrapeConfig::default());
    }
    load_config(path)
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("data/streets")
}

fn default_extension() -> String {
    "html".to_string()
}

fn default_exclude() -> Vec<String> {
    vec!["^index$".to_string()]
}

fn default_header_token() -> String {
    "Delsträcka".to_string()
}

fn default_endpoint_delimiter() -> String {
    " – ".to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("data/out/streets.tsv")
}
