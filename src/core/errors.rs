use thiserror::Error;

/// Reasons a feature matrix / label vector pair is rejected before training.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("dataset has no rows")]
    Empty,

    /// `column == None` points at the label of `row`.
    #[error("missing value at row {row}{}", column_suffix(.column))]
    MissingValue { row: usize, column: Option<usize> },

    #[error("feature matrix has {rows} rows but {labels} labels were given")]
    LengthMismatch { rows: usize, labels: usize },

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

fn column_suffix(column: &Option<usize>) -> String {
    match column {
        Some(c) => format!(", column {c}"),
        None => ", label".to_string(),
    }
}

#[derive(Debug, Error)]
pub enum TreeError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("the tree has not been fitted")]
    NotFitted,

    #[error("row {row} has {found} columns, the tree was trained on {expected}")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("model (de)serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures while reading a headered CSV file into features and labels.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file has no header line")]
    EmptyFile,

    #[error("target column {index} is out of range for {columns} columns")]
    TargetColumnOutOfRange { index: usize, columns: usize },

    #[error("line {line} has {found} fields, the header has {expected}")]
    RaggedLine {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("malformed CSV{}: {message}", line_suffix(.line))]
    Malformed { line: Option<usize>, message: String },
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(l) => format!(" at line {l}"),
        None => String::new(),
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line() as usize);
        match err.into_kind() {
            csv::ErrorKind::Io(e) => LoadError::Io(e),
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => LoadError::RaggedLine {
                line: line.unwrap_or(0),
                expected: expected_len as usize,
                found: len as usize,
            },
            csv::ErrorKind::Utf8 { err, .. } => LoadError::Malformed {
                line,
                message: err.to_string(),
            },
            other => LoadError::Malformed {
                line,
                message: format!("{other:?}"),
            },
        }
    }
}
