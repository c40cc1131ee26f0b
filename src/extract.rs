use crate::error::TableError;
use crate::model::RawTable;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Rows of the first `table` element in `html`, cells in document order.
/// Short rows are padded with empty strings up to the widest row so the
/// normalizer can rely on a rectangular shape.
pub fn extract_first_table(source_id: &str, html: &str) -> Result<RawTable, TableError> {
    let table_selector = Selector::parse("table").expect("table selector must be valid");
    let row_selector = Selector::parse("tr").expect("tr selector must be valid");
    let cell_selector = Selector::parse("th, td").expect("cell selector must be valid");

    let document = Html::parse_document(html);
    let Some(table) = document.select(&table_selector).next() else {
        return Err(TableError::MissingTable {
            source_id: source_id.to_string(),
        });
    };

    let mut rows = Vec::new();
    for row in table.select(&row_selector) {
        let cells = row
            .select(&cell_selector)
            .map(element_text)
            .collect::<Vec<_>>();
        rows.push(cells);
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, String::new());
    }

    debug!(source = %source_id, rows = rows.len(), width, "extracted table");

    Ok(RawTable { rows })
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
