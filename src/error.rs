use crate::database::value::ValueKind;
use thiserror::Error;

/// Failures reported by the row cursor underneath the accessor.
#[derive(Error, Debug)]
pub enum CursorError {
    #[error("ODBC Error: {0}")]
    Odbc(#[from] odbc_api::Error),

    #[error("Cannot convert '{text}' to {kind}: {reason}")]
    Conversion {
        kind: ValueKind,
        text: String,
        reason: String,
    },

    #[error("No current row, call next_row() first")]
    NoCurrentRow,

    #[error("Column {position} out of range, result has {count} columns")]
    ColumnOutOfRange { position: u16, count: u16 },

    #[error("Driver Error: {0}")]
    Driver(String),
}

/// Failures of the mapping layer. All of them abort the mapping of the current row.
#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Cannot obtain result metadata")]
    MetadataUnavailable {
        #[source]
        source: CursorError,
    },

    #[error("Could not read value {column} from result set")]
    ValueUnreadable {
        column: String,
        #[source]
        source: CursorError,
    },

    #[error("Cannot advance result set")]
    RowUnavailable {
        #[source]
        source: CursorError,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Bad parameter '{param}': {message}")]
    BadParameter { param: String, message: String },
}
