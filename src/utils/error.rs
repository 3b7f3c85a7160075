use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosError {
    #[error("Catalog fetch failed: {message}")]
    FetchFailed { message: String },

    #[error("Transaction submission failed: {message}")]
    SubmissionFailed { message: String },

    #[error("Invalid member ID '{value}': expected 5 uppercase letters or digits")]
    InvalidMemberId { value: String },

    #[error("Cannot {action} during the {step} step")]
    InvalidTransition { step: String, action: String },

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Unknown menu item: {item_id}")]
    UnknownItem { item_id: String },

    #[error("Unknown option '{option}' for item {item_id}")]
    UnknownOption { item_id: String, option: String },

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Validation,
    Workflow,
    Configuration,
    System,
}

impl PosError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PosError::FetchFailed { .. }
            | PosError::SubmissionFailed { .. }
            | PosError::HttpError(_) => ErrorCategory::Network,
            PosError::InvalidMemberId { .. }
            | PosError::UnknownItem { .. }
            | PosError::UnknownOption { .. } => ErrorCategory::Validation,
            PosError::InvalidTransition { .. } | PosError::EmptyCart => ErrorCategory::Workflow,
            PosError::ConfigError { .. }
            | PosError::InvalidConfigValueError { .. }
            | PosError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PosError::IoError(_) => ErrorCategory::System,
        }
    }

    /// 給收銀員看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            PosError::FetchFailed { .. } => "Could not load the menu from the server".to_string(),
            PosError::SubmissionFailed { .. } => {
                "The transaction was not saved; the order is still open for review".to_string()
            }
            PosError::InvalidMemberId { .. } => {
                "Membership ID must be 5 letters or digits (e.g. AB12E)".to_string()
            }
            PosError::EmptyCart => "Add at least one item before reviewing the order".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the POS backend is running and reachable",
            ErrorCategory::Validation => "Correct the input and try again",
            ErrorCategory::Workflow => "Finish or cancel the current step first",
            ErrorCategory::Configuration => "Review the configuration file and CLI flags",
            ErrorCategory::System => "Check file permissions and the order script format",
        }
    }
}

pub type Result<T> = std::result::Result<T, PosError>;
