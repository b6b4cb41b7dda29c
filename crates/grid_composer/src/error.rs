use thiserror::Error;

pub type Result<T> = std::result::Result<T, ComposeError>;

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid CSV Header: {0}")]
    CsvHeader(String),

    #[error("Invalid CSV row {row}: expected {expected} columns, got {got}")]
    CsvRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("Unknown category at row {row}: {label}")]
    UnknownCategory { row: usize, label: String },

    #[error("Invalid duration at row {row}: {value}")]
    DurationParse {
        row: usize,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Invalid urgency flag at row {row}: {value}")]
    UrgencyParse { row: usize, value: String },

    #[error("Invalid intensity {value}: must be a number in [0, 1] or a level name")]
    InvalidIntensity { value: String },

    #[error("Invalid intensity at row {row}: {value}")]
    IntensityParse { row: usize, value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl From<toml::de::Error> for ComposeError {
    fn from(err: toml::de::Error) -> Self {
        ComposeError::Config(format!("TOML parse error: {}", err))
    }
}
