//! Error handling for dpkg-index
//!
//! This module provides the error taxonomy of the parsing and indexing engine together
//! with user-friendly error reporting for the CLI. The error system follows two rules:
//! 1. **Strongly-typed errors** so callers can match on the failure mode
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`DpkgError`] - Enumerated error types for every failure the library reports
//! - [`ErrorContext`] - Wrapper that adds details and suggestions for display
//!
//! # Error Categories
//!
//! - **Parsing**: [`DpkgError::MissingField`], [`DpkgError::InvalidDependencyFormat`],
//!   [`DpkgError::InvalidStanza`] - abort the load of a whole file version
//! - **I/O**: [`DpkgError::FileUnreadable`] - the status file cannot be stat'ed or read
//! - **Lookup**: [`DpkgError::PackageNotFound`] - recoverable, per call
//! - **Usage**: [`DpkgError::MissingParameter`] - an API was called without a required argument
//! - **Configuration**: [`DpkgError::ConfigError`]
//!
//! None of these are logged or swallowed inside the library. Each carries the context a
//! caller needs to render a diagnostic (stanza index, raw entry text, parameter name).
//!
//! # Examples
//!
//! ```rust,no_run
//! use dpkg_index::core::{DpkgError, user_friendly_error};
//!
//! let error = DpkgError::PackageNotFound {
//!     name: "libfoo".to_string(),
//!     suggestions: vec!["libfoo1".to_string()],
//! };
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T, E = DpkgError> = std::result::Result<T, E>;

/// The main error type for dpkg-index operations
///
/// # Error Categories
///
/// ## Parsing
/// - [`MissingField`] - A required field is absent from a stanza
/// - [`InvalidDependencyFormat`] - A `Depends:` entry yields no package name
/// - [`InvalidStanza`] - Wraps a field failure with the index of the offending stanza
///
/// ## I/O
/// - [`FileUnreadable`] - The status file could not be stat'ed or read
///
/// ## Queries
/// - [`PackageNotFound`] - Lookup of a name the snapshot doesn't contain
/// - [`MissingParameter`] - A required argument was not supplied
///
/// [`MissingField`]: DpkgError::MissingField
/// [`InvalidDependencyFormat`]: DpkgError::InvalidDependencyFormat
/// [`InvalidStanza`]: DpkgError::InvalidStanza
/// [`FileUnreadable`]: DpkgError::FileUnreadable
/// [`PackageNotFound`]: DpkgError::PackageNotFound
/// [`MissingParameter`]: DpkgError::MissingParameter
#[derive(Error, Debug)]
pub enum DpkgError {
    /// A required field is absent from a stanza
    ///
    /// Raised by the `Package` and `Description` parsers. `Depends` is optional
    /// and never produces this error.
    #[error("Key \"{field}\" not found")]
    MissingField {
        /// Name of the missing field, e.g. `Package`
        field: &'static str,
    },

    /// A dependency entry that does not parse into at least one package name
    #[error("Invalid dependency format: '{entry}'")]
    InvalidDependencyFormat {
        /// The raw entry text as it appeared in the `Depends:` line
        entry: String,
    },

    /// A stanza of the status file failed to parse
    ///
    /// The whole load is aborted; no partial snapshot is published.
    #[error("Failed to parse entry {index}: {source}")]
    InvalidStanza {
        /// 0-based position of the stanza in the file
        index: usize,
        /// The field-level failure
        #[source]
        source: Box<DpkgError>,
    },

    /// The status file could not be stat'ed or read
    #[error("Cannot read status file {}", path.display())]
    FileUnreadable {
        /// Path of the status file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// No package with the given name is installed
    #[error("No package found with name '{name}'")]
    PackageNotFound {
        /// The name that was looked up
        name: String,
        /// Installed names that are close to `name`
        suggestions: Vec<String>,
    },

    /// A required argument was not supplied
    #[error("Parameter {parameter} must be given")]
    MissingParameter {
        /// Name of the missing parameter
        parameter: &'static str,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Other error, used for generic failures surfaced through [`user_friendly_error`]
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl DpkgError {
    /// Wrap a field-level failure with the index of the stanza it came from.
    #[must_use]
    pub fn in_stanza(self, index: usize) -> Self {
        Self::InvalidStanza {
            index,
            source: Box::new(self),
        }
    }

    /// Create a [`DpkgError::FileUnreadable`] for `path`.
    pub fn file_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileUnreadable {
            path: path.into(),
            source,
        }
    }

    /// The innermost error, looking through [`DpkgError::InvalidStanza`] wrappers.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::InvalidStanza { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// Pairs a [`DpkgError`] with optional details and a suggestion. Produced by
/// [`user_friendly_error`] and printed by the CLI with [`ErrorContext::display`].
///
/// ```rust,no_run
/// use dpkg_index::core::{DpkgError, ErrorContext};
///
/// let context = ErrorContext::new(DpkgError::MissingField { field: "Package" })
///     .with_suggestion("Check the status file for a truncated stanza")
///     .with_details("Every stanza needs a Package line");
///
/// println!("{}", context);
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: DpkgError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details
    #[must_use]
    pub const fn new(error: DpkgError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`DpkgError`] (directly, or as the root of an `anyhow` context chain),
/// [`std::io::Error`] and [`toml::de::Error`]. Anything else is wrapped in
/// [`DpkgError::Other`] with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if error.downcast_ref::<DpkgError>().is_some() {
        return match error.downcast::<DpkgError>() {
            Ok(dpkg_error) => create_error_context(dpkg_error),
            Err(error) => generic_error_context(&error),
        };
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(DpkgError::Other {
                    message: error_with_chain(&error),
                })
                .with_suggestion("Check the file permissions or run as a user allowed to read it")
                .with_details("dpkg-index only needs read access to the status file");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(DpkgError::Other {
                    message: error_with_chain(&error),
                })
                .with_suggestion("Check that the file exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(DpkgError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax of your config.toml. Verify quotes and key names");
    }

    generic_error_context(&error)
}

fn generic_error_context(error: &anyhow::Error) -> ErrorContext {
    ErrorContext::new(DpkgError::Other {
        message: error_with_chain(error),
    })
}

/// Render an error followed by its numbered cause chain.
fn error_with_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();

    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

/// Map each [`DpkgError`] variant to an [`ErrorContext`] with tailored suggestions
fn create_error_context(error: DpkgError) -> ErrorContext {
    match error.root_cause() {
        DpkgError::MissingField { field } => {
            let suggestion = format!(
                "Every stanza needs a '{field}:' line. Inspect the reported entry in the status file"
            );
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("Stanzas are separated by a blank line; entries are numbered from 0")
        }
        DpkgError::InvalidDependencyFormat { .. } => ErrorContext::new(error)
            .with_suggestion("Look for empty entries such as ', ,' or a dangling '|' in the Depends line")
            .with_details("Depends entries are comma separated; alternatives are separated by '|'"),
        DpkgError::FileUnreadable { .. } => ErrorContext::new(error)
            .with_suggestion("Pass --status-file or set status_file in config.toml")
            .with_details("The default location is /var/lib/dpkg/status"),
        DpkgError::PackageNotFound { suggestions, .. } => {
            if suggestions.is_empty() {
                ErrorContext::new(error)
                    .with_suggestion("Run 'dpkg-index list' to see installed packages")
            } else {
                let suggestion = format!("Did you mean: {}?", suggestions.join(", "));
                ErrorContext::new(error).with_suggestion(suggestion)
            }
        }
        DpkgError::MissingParameter { .. } => ErrorContext::new(error),
        DpkgError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Check the config file given with --config or DPKG_INDEX_CONFIG"),
        DpkgError::InvalidStanza { .. } | DpkgError::Other { .. } => ErrorContext::new(error),
    }
}
