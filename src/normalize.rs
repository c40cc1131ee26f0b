use crate::error::TableError;
use crate::model::{RawTable, StretchRecord};

/// The source tables carry exactly three columns of interest, in fixed
/// positions: stretch label, year, vehicles per day.
pub const STRETCH_COLUMNS: usize = 3;

/// Site-format knobs for the normalizer. The defaults match the municipal
/// layout: a header row that repeats mid-table, and stretch endpoints
/// joined by an en dash with surrounding spaces.
#[derive(Debug, Clone)]
pub struct TableRules {
    pub header_token: String,
    pub endpoint_delimiter: String,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            header_token: "Delsträcka".to_string(),
            endpoint_delimiter: " – ".to_string(),
        }
    }
}

/// Raw rows to typed records, in row order: drop repeated header rows and
/// all-empty spacer rows, split stretch labels into endpoints, forward-fill
/// missing labels from the previous row of the same table, parse year and
/// vehicle count.
///
/// Fill state belongs to one table; callers normalize each document with a
/// fresh call so nothing leaks across files.
pub fn normalize_table(
    source_id: &str,
    table: &RawTable,
    rules: &TableRules,
) -> Result<Vec<StretchRecord>, TableError> {
    if table.is_empty() {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    let mut last_endpoints: Option<(String, String)> = None;

    for (row_index, row) in table.rows.iter().enumerate() {
        let Some([stretch_label, year_label, cars_label]) =
            row.first_chunk::<STRETCH_COLUMNS>()
        else {
            return Err(TableError::ShapeMismatch {
                source_id: source_id.to_string(),
                expected: STRETCH_COLUMNS,
                found: row.len(),
            });
        };
        let (stretch_label, year_label, cars_label) = (
            stretch_label.as_str(),
            year_label.as_str(),
            cars_label.as_str(),
        );

        if stretch_label == rules.header_token {
            continue;
        }

        // Spacer rows carry no data; they are not missing-label rows.
        if stretch_label.is_empty() && year_label.is_empty() && cars_label.is_empty() {
            continue;
        }

        let endpoints = if stretch_label.is_empty() {
            None
        } else {
            Some(split_endpoints(
                source_id,
                row_index,
                stretch_label,
                &rules.endpoint_delimiter,
            )?)
        };

        let (from, to) = match endpoints.or_else(|| last_endpoints.clone()) {
            Some(pair) => pair,
            None => {
                return Err(TableError::LeadingStretchMissing {
                    source_id: source_id.to_string(),
                });
            }
        };
        last_endpoints = Some((from.clone(), to.clone()));

        let year = year_label
            .parse::<i32>()
            .map_err(|_| TableError::InvalidYear {
                source_id: source_id.to_string(),
                row: row_index,
                value: year_label.to_string(),
            })?;

        records.push(StretchRecord {
            from,
            to,
            year,
            cars: parse_car_count(cars_label),
        });
    }

    Ok(records)
}

fn split_endpoints(
    source_id: &str,
    row_index: usize,
    label: &str,
    delimiter: &str,
) -> Result<(String, String), TableError> {
    let parts = label.split(delimiter).collect::<Vec<_>>();
    match parts.as_slice() {
        [from, to] if !from.is_empty() && !to.is_empty() => {
            Ok((from.to_string(), to.to_string()))
        }
        _ => Err(TableError::MalformedStretch {
            source_id: source_id.to_string(),
            row: row_index,
            label: label.to_string(),
        }),
    }
}

/// Vehicle counts are published with group separators and unit suffixes
/// ("12 345 bilar/dygn"); only the digits matter. No digits at all means
/// the count is unpublished, which is not an error.
pub fn parse_car_count(label: &str) -> Option<u64> {
    let digits = label
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u64>().ok()
}
