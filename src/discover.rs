use crate::config::InputConfig;
use anyhow::{Context, Result, bail};
use tracing::{debug, info};
use walkdir::WalkDir;

/// One street page as handed to the assembler: a file identifier and the
/// raw HTML behind it.
#[derive(Debug, Clone)]
pub struct StreetPage {
    pub id: String,
    pub html: String,
}

/// List and read the street pages under the configured input directory.
/// Files with the wrong extension are ignored; files whose stem matches an
/// exclude pattern (index and navigation pages) are dropped with a debug
/// log. The result is sorted by identifier.
pub fn discover_street_pages(input: &InputConfig) -> Result<Vec<StreetPage>> {
    if !input.dir.exists() {
        bail!("input dir does not exist: {}", input.dir.display());
    }

    let excludes = input.compiled_excludes()?;
    let mut pages = Vec::new();

    for entry in WalkDir::new(&input.dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some(input.extension.as_str()) {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        if excludes.iter().any(|re| re.is_match(stem)) {
            debug!(file = %path.display(), "page excluded by pattern");
            continue;
        }

        let html = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read street page {}", path.display()))?;
        pages.push(StreetPage {
            id: path.display().to_string(),
            html,
        });
    }

    pages.sort_by(|a, b| a.id.cmp(&b.id));
    info!(dir = %input.dir.display(), pages = pages.len(), "street pages discovered");

    Ok(pages)
}
