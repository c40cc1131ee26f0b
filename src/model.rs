use serde::{Deserialize, Serialize};

/// Rows of one HTML table, as extracted: every cell a string, every row
/// padded to the width of the widest row in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One normalized stretch measurement. `from`/`to` are never empty once
/// normalization has run; `cars` stays `None` when the count is unpublished.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StretchRecord {
    pub from: String,
    pub to: String,
    pub year: i32,
    pub cars: Option<u64>,
}

/// A stretch record tagged with the street it was scraped from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreetRecord {
    pub street: String,
    pub from: String,
    pub to: String,
    pub year: i32,
    pub cars: Option<u64>,
}

impl StreetRecord {
    pub fn new(street: &str, record: StretchRecord) -> Self {
        Self {
            street: street.to_string(),
            from: record.from,
            to: record.to,
            year: record.year,
            cars: record.cars,
        }
    }
}

/// The unified table across all streets, file order preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreetDataset {
    pub records: Vec<StreetRecord>,
}

impl StreetDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StreetRecord> {
        self.records.iter()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub files_discovered: usize,
    pub files_parsed: usize,
    pub files_skipped: usize,
    pub records: usize,
}

/// Street name from a file identifier: directory path and extension dropped.
/// `"data/Avenyn.html"` becomes `"Avenyn"`.
pub fn street_from_identifier(identifier: &str) -> String {
    let base = identifier
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(identifier);
    match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => base.to_string(),
    }
}
