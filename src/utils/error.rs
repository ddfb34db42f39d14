use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Unexpected response from API: {message}")]
    ProtocolError { message: String },

    #[error("No photos returned for tag {tag}")]
    EmptyResultError { tag: String },

    #[error("Cannot parse date taken {value:?} of photo {photo_id}")]
    DateParseError {
        photo_id: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Failed to render template {template}: {}", render_chain(.source))]
    RenderError {
        template: String,
        #[source]
        source: tera::Error,
    },

    #[error("API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, PageError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Api,
    Data,
    Template,
    System,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PageError {
    pub fn protocol(message: impl Into<String>) -> Self {
        PageError::ProtocolError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PageError::ProtocolError { .. } | PageError::HttpError(_) => ErrorCategory::Api,
            PageError::EmptyResultError { .. }
            | PageError::DateParseError { .. } => ErrorCategory::Data,
            PageError::RenderError { .. } => ErrorCategory::Template,
            PageError::IoError(_) => ErrorCategory::System,
            PageError::ConfigError { .. }
            | PageError::InvalidConfigValueError { .. }
            | PageError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Transport failures may succeed on a later run; everything else needs a fix first.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PageError::HttpError(_) => ErrorSeverity::Medium,
            PageError::ProtocolError { .. }
            | PageError::EmptyResultError { .. }
            | PageError::DateParseError { .. }
            | PageError::RenderError { .. } => ErrorSeverity::High,
            PageError::IoError(_)
            | PageError::ConfigError { .. }
            | PageError::InvalidConfigValueError { .. }
            | PageError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PageError::ProtocolError { .. } => {
                "Check the API key and endpoint, then inspect the logged response body"
            }
            PageError::EmptyResultError { .. } => {
                "Check the user id and that photos are tagged 365:<year>"
            }
            PageError::DateParseError { .. } => {
                "Fix the date taken of the named photo on the photo service"
            }
            PageError::RenderError { .. } => "Check the list.html template in the template directory",
            PageError::HttpError(_) => "Check network connectivity and retry later",
            PageError::IoError(_) => "Check that the output path exists and is writable",
            PageError::ConfigError { .. }
            | PageError::InvalidConfigValueError { .. }
            | PageError::MissingConfigError { .. } => "Fix the configuration and run again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PageError::ProtocolError { .. } => {
                format!("The photo service returned something unexpected. {}", self)
            }
            PageError::EmptyResultError { tag } => {
                format!("No photos were found with the tag {}", tag)
            }
            PageError::HttpError(_) => format!("Could not reach the photo service. {}", self),
            _ => self.to_string(),
        }
    }
}

fn render_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}
