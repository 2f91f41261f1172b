use crate::variation::VariationError;

/// Exit code for usage, configuration and local file errors.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for "nothing to show" outcomes (empty feed, empty range, ...).
pub const EXIT_NO_DATA: u8 = 3;
/// Exit code for network, feed and terminal I/O failures.
pub const EXIT_FEED: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, message)
    }

    pub fn feed(message: impl Into<String>) -> Self {
        Self::new(EXIT_FEED, message)
    }

    /// Terminal setup, draw or input failure in the TUI.
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::new(EXIT_FEED, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<VariationError> for AppError {
    fn from(err: VariationError) -> Self {
        let message = match err {
            VariationError::EmptyInput => "No data available for this fund.".to_string(),
            VariationError::EmptyRange => "No data for the selected date range.".to_string(),
            VariationError::DegenerateGroup { month } => {
                format!("Cannot compute variation for {month}: first price is zero.")
            }
        };
        AppError::new(EXIT_NO_DATA, message)
    }
}
