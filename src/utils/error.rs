use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to read customer input '{path}': {source}")]
    InputError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse customer record on line {line}: {source}")]
    ParseError {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid customer record on line {line}: {reason}")]
    InvalidRecordError { line: usize, reason: String },

    #[error("Duplicate user_id {id} on line {line} (first seen on line {first_line})")]
    DuplicateIdError {
        id: String,
        line: usize,
        first_line: usize,
    },

    #[error("Failed to write invite list to '{path}': {source}")]
    OutputError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Parse,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::IoError(_) | EtlError::InputError { .. } => ErrorCategory::Input,
            EtlError::ParseError { .. }
            | EtlError::InvalidRecordError { .. }
            | EtlError::DuplicateIdError { .. } => ErrorCategory::Parse,
            EtlError::OutputError { .. } => ErrorCategory::Output,
            EtlError::ConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Parse => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    /// Process exit code: 1 configuration, 2 parse, 3 input/output.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    /// 給操作者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::IoError(e) => format!("File system error: {}", e),
            EtlError::InputError { path, .. } => {
                format!("Could not read the customer file '{}'", path)
            }
            EtlError::ParseError { line, .. } => {
                format!("Line {} of the customer file is not a valid customer record", line)
            }
            EtlError::InvalidRecordError { line, reason } => {
                format!("Line {} of the customer file is invalid: {}", line, reason)
            }
            EtlError::DuplicateIdError { id, line, .. } => {
                format!("Customer {} appears more than once (line {})", id, line)
            }
            EtlError::OutputError { path, .. } => {
                format!("Could not write the invite list to '{}'", path)
            }
            EtlError::ConfigError { message } => format!("Configuration problem: {}", message),
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration value for {}: {}", field, reason)
            }
            EtlError::ConfigValidationError { field, message } => {
                format!("Configuration for {} is invalid: {}", field, message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::IoError(_) | EtlError::InputError { .. } => {
                "Check that the input file exists and is readable"
            }
            EtlError::ParseError { .. } => {
                "Each line must be one JSON object with user_id, name, latitude and longitude"
            }
            EtlError::InvalidRecordError { .. } => {
                "Latitude must be within [-90, 90] and longitude within [-180, 180]"
            }
            EtlError::DuplicateIdError { .. } => {
                "Remove the duplicate line or run with --on-duplicate-id overwrite"
            }
            EtlError::OutputError { .. } => {
                "Check that the output location is writable and the disk is not full"
            }
            EtlError::ConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
