use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// One or more required columns are absent from the dataset header.
    #[error("Schema error: missing required column(s): {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Invalid value {value:?} for column '{column}' at row {row}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Duplicate identifier '{0}'")]
    DuplicateId(String),

    /// The record set is empty or smaller than the model can be fitted on.
    #[error("Insufficient data: {rows} record(s), at least {min} required")]
    InsufficientData { rows: usize, min: usize },

    #[error("Unknown scoring mode '{0}' (expected 'iforest' or 'random')")]
    UnknownMode(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, RiskError>;

impl RiskError {
    /// True for errors caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RiskError::UnknownMode(_) | RiskError::InsufficientData { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_all_missing_columns() {
        let err = RiskError::Schema {
            missing: vec!["usb_usage".into(), "login_count".into()],
        };
        assert_eq!(
            err.to_string(),
            "Schema error: missing required column(s): usb_usage, login_count"
        );
    }

    #[test]
    fn insufficient_data_message() {
        let err = RiskError::InsufficientData { rows: 1, min: 2 };
        assert_eq!(
            err.to_string(),
            "Insufficient data: 1 record(s), at least 2 required"
        );
        assert!(err.is_client_error());
    }
}
