//! Error types for commenttree.
//!
//! Every failure the client can hit is a variant of [`CommentTreeError`]. The
//! variants fall into four user-facing classes (see [`FailureClass`]) which the
//! navigation layer turns into transient status messages and the CLI turns
//! into exit codes.

use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for commenttree operations.
#[derive(Error, Debug)]
pub enum CommentTreeError {
    /// Comment text was empty or whitespace only.
    #[error("{field} text is empty")]
    EmptyText {
        /// Which input was empty ("reply", "comment").
        field: &'static str,
    },

    /// The backend could not be reached.
    #[error("network error: {message}")]
    Transport {
        /// Human-readable description of the transport failure.
        message: String,
        /// Underlying HTTP client error, if available.
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The backend answered with a non-success status.
    ///
    /// `message` is the server-supplied `error` field when present, otherwise
    /// the numeric status code.
    #[error("{message}")]
    Backend {
        /// HTTP status code.
        code: u16,
        /// Server error string or status code.
        message: String,
    },

    /// A success response whose body did not match the expected shape.
    #[error("malformed response from {endpoint}")]
    MalformedResponse {
        /// Endpoint that produced the body.
        endpoint: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The ancestor path of a comment came back empty.
    #[error("path to comment {id} not found")]
    PathNotFound {
        /// Comment whose path was requested.
        id: i64,
    },

    /// A failure already reported through the status line.
    #[error("{message}")]
    Reported {
        /// Class of the reported failure.
        class: FailureClass,
        /// Status message shown to the user.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Human-readable error message.
        message: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Human-readable error message.
        message: String,
    },

    /// Configuration file not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// I/O error.
    #[error("I/O error: {context}")]
    IoError {
        /// Context describing the operation that failed.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Serialization error: {context}")]
    SerializationError {
        /// Context describing the operation that failed.
        context: String,
        /// Underlying serde_json error.
        #[source]
        source: serde_json::Error,
    },

    /// TUI error.
    #[error("TUI error: {message}")]
    TuiError {
        /// Human-readable error message.
        message: String,
    },

    /// Invalid argument.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Name of the invalid argument.
        name: String,
        /// Reason why the argument is invalid.
        reason: String,
    },

    /// Unsupported operation or feature.
    #[error("Unsupported: {feature}")]
    Unsupported {
        /// Name of the unsupported feature.
        feature: String,
    },

    /// Interrupted operation.
    #[error("Operation interrupted")]
    Interrupted,
}

/// User-facing failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Local input validation; no request was sent.
    Validation,
    /// Network failure or unreadable response.
    Transport,
    /// Non-success answer from the backend.
    Backend,
    /// Logical "not found" (empty ancestor path).
    NotFound,
    /// Anything local to the client (config, I/O, terminal).
    Local,
}

impl CommentTreeError {
    /// Create a new I/O error with context.
    #[must_use]
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoError {
            context: context.into(),
            source,
        }
    }

    /// Create a transport error from an HTTP client error.
    #[must_use]
    pub fn transport(source: reqwest::Error) -> Self {
        Self::Transport {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Create a transport error without an underlying source.
    #[must_use]
    pub fn transport_msg(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create a backend error.
    #[must_use]
    pub fn backend(code: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            code,
            message: message.into(),
        }
    }

    /// Create a new unsupported error.
    #[must_use]
    pub fn unsupported(feature: impl Into<String>) -> Self {
        Self::Unsupported {
            feature: feature.into(),
        }
    }

    /// Classify this error for status reporting.
    #[must_use]
    pub const fn class(&self) -> FailureClass {
        match self {
            Self::EmptyText { .. } | Self::InvalidArgument { .. } => FailureClass::Validation,
            Self::Transport { .. } | Self::MalformedResponse { .. } => FailureClass::Transport,
            Self::Backend { .. } => FailureClass::Backend,
            Self::PathNotFound { .. } => FailureClass::NotFound,
            Self::Reported { class, .. } => *class,
            _ => FailureClass::Local,
        }
    }

    /// Message suitable for the status line.
    ///
    /// Transport failures collapse to a generic message; the detail goes to
    /// the log instead.
    #[must_use]
    pub fn status_detail(&self) -> String {
        match self {
            Self::Transport { .. } => "network error".to_string(),
            Self::MalformedResponse { endpoint, .. } => {
                format!("unexpected response from {endpoint}")
            }
            other => other.to_string(),
        }
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigError { .. } | Self::InvalidConfig { .. } => exit_codes::EXIT_CONFIG_ERROR,
            Self::IoError { .. } => exit_codes::EXIT_IO_ERROR,
            Self::FileNotFound { .. } => exit_codes::EXIT_NOT_FOUND,
            Self::Interrupted => exit_codes::EXIT_INTERRUPTED,
            _ => match self.class() {
                FailureClass::Validation => exit_codes::EXIT_USAGE_ERROR,
                FailureClass::Transport => exit_codes::EXIT_UNAVAILABLE,
                FailureClass::NotFound => exit_codes::EXIT_NOT_FOUND,
                FailureClass::Backend | FailureClass::Local => exit_codes::EXIT_GENERAL_ERROR,
            },
        }
    }
}

/// Result type alias for commenttree operations.
pub type Result<T> = std::result::Result<T, CommentTreeError>;

impl From<std::io::Error> for CommentTreeError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            context: "I/O operation failed".to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for CommentTreeError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            context: "JSON operation failed".to_string(),
            source: err,
        }
    }
}

/// Exit codes for CLI operations.
pub mod exit_codes {
    /// Operation completed successfully.
    pub const EXIT_SUCCESS: i32 = 0;
    /// General/unspecified error, including backend failures.
    pub const EXIT_GENERAL_ERROR: i32 = 1;
    /// Comment or path not found.
    pub const EXIT_NOT_FOUND: i32 = 3;
    /// Invalid configuration.
    pub const EXIT_CONFIG_ERROR: i32 = 5;
    /// Invalid input (BSD standard).
    pub const EXIT_USAGE_ERROR: i32 = 64;
    /// Backend unreachable (BSD standard).
    pub const EXIT_UNAVAILABLE: i32 = 69;
    /// I/O error (BSD standard).
    pub const EXIT_IO_ERROR: i32 = 74;
    /// Terminated by Ctrl+C (128 + SIGINT).
    pub const EXIT_INTERRUPTED: i32 = 130;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let empty = CommentTreeError::EmptyText { field: "reply" };
        assert_eq!(empty.exit_code(), 64);

        let backend = CommentTreeError::backend(500, "internal error");
        assert_eq!(backend.exit_code(), 1);

        let not_found = CommentTreeError::PathNotFound { id: 5 };
        assert_eq!(not_found.exit_code(), 3);

        let transport = CommentTreeError::transport_msg("connection refused");
        assert_eq!(transport.exit_code(), 69);

        assert_eq!(CommentTreeError::Interrupted.exit_code(), 130);
    }

    #[test]
    fn test_failure_classes() {
        assert_eq!(
            CommentTreeError::EmptyText { field: "comment" }.class(),
            FailureClass::Validation
        );
        assert_eq!(
            CommentTreeError::backend(404, "not found").class(),
            FailureClass::Backend
        );
        assert_eq!(
            CommentTreeError::PathNotFound { id: 1 }.class(),
            FailureClass::NotFound
        );
        let reported = CommentTreeError::Reported {
            class: FailureClass::NotFound,
            message: "Path not found".to_string(),
        };
        assert_eq!(reported.class(), FailureClass::NotFound);
    }

    #[test]
    fn test_status_detail_hides_transport_internals() {
        let err = CommentTreeError::transport_msg("tcp connect error: Connection refused (os error 111)");
        assert_eq!(err.status_detail(), "network error");

        let err = CommentTreeError::backend(400, "invalid input");
        assert_eq!(err.status_detail(), "invalid input");
    }
}
