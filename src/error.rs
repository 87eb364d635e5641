/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error in {file} line {line}: {message}")]
    Parse {
        file: String,
        line: u64,
        message: String,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Not-found error for a title lookup, worded for display to the user
    pub fn title_not_found(title: &str) -> Self {
        AppError::NotFound(format!("Film '{}' not found in the database", title))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_not_found_message() {
        let err = AppError::title_not_found("unknown movie (2042)");
        assert_eq!(
            err.to_string(),
            "Film 'unknown movie (2042)' not found in the database"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let err = AppError::Parse {
            file: "u.data".to_string(),
            line: 3,
            message: "rating 9 outside scale 1..=5".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Parse error in u.data line 3: rating 9 outside scale 1..=5"
        );
    }
}
