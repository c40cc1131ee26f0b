use thiserror::Error;

/// Failures while turning one HTML document into stretch records. All of
/// these are fatal for the document they name; whether they abort the whole
/// batch is the assembler's policy decision.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("no table element found in {source_id}")]
    MissingTable { source_id: String },

    #[error("{source_id}: table has {found} columns, expected at least {expected}")]
    ShapeMismatch {
        source_id: String,
        expected: usize,
        found: usize,
    },

    #[error("{source_id} row {row}: stretch label {label:?} has no endpoint delimiter")]
    MalformedStretch {
        source_id: String,
        row: usize,
        label: String,
    },

    #[error("{source_id}: first data row has no stretch label to fill from")]
    LeadingStretchMissing { source_id: String },

    #[error("{source_id} row {row}: year {value:?} is not an integer")]
    InvalidYear {
        source_id: String,
        row: usize,
        value: String,
    },
}
