use thiserror::Error;

/// Reasons an uploaded file could not be turned into a table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    #[error("spreadsheet has no worksheet")]
    EmptyWorkbook,

    #[error("could not read delimited text: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("file has no header row")]
    NoHeader,

    #[error("required column '{0}' is missing")]
    MissingColumn(String),
}
