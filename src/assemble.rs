use crate::config::FailurePolicy;
use crate::discover::StreetPage;
use crate::error::TableError;
use crate::extract::extract_first_table;
use crate::model::{RunReport, StreetDataset, StreetRecord, StretchRecord, street_from_identifier};
use crate::normalize::{TableRules, normalize_table};
use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Run extractor and normalizer over every page and concatenate the tagged
/// records into one dataset. Pages are processed in lexicographic identifier
/// order so output is reproducible regardless of how they were discovered.
///
/// A page that fails either aborts the run or is skipped with a warning,
/// depending on `policy`; a skipped file is always named in the log together
/// with the cause.
pub fn assemble_dataset(
    pages: &[StreetPage],
    rules: &TableRules,
    policy: FailurePolicy,
) -> Result<(StreetDataset, RunReport)> {
    let mut ordered: Vec<&StreetPage> = pages.iter().collect();
    ordered.sort_by(|a, b| a.id.cmp(&b.id));

    let mut dataset = StreetDataset::default();
    let mut report = RunReport {
        files_discovered: pages.len(),
        ..RunReport::default()
    };

    for page in ordered {
        let records = match parse_page(page, rules) {
            Ok(records) => records,
            Err(err) => match policy {
                FailurePolicy::Abort => {
                    return Err(err)
                        .with_context(|| format!("failed to parse street page {}", page.id));
                }
                FailurePolicy::Skip => {
                    warn!(file = %page.id, error = %err, "street page skipped");
                    report.files_skipped += 1;
                    continue;
                }
            },
        };

        let street = street_from_identifier(&page.id);
        debug!(file = %page.id, street = %street, records = records.len(), "street page parsed");

        dataset
            .records
            .extend(records.into_iter().map(|r| StreetRecord::new(&street, r)));
        report.files_parsed += 1;
    }

    report.records = dataset.len();
    Ok((dataset, report))
}

fn parse_page(page: &StreetPage, rules: &TableRules) -> Result<Vec<StretchRecord>, TableError> {
    let table = extract_first_table(&page.id, &page.html)?;
    normalize_table(&page.id, &table, rules)
}
