//! Eligibility engine error types

use crate::ErrorCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Error - the configuration cannot be loaded
    Error,
    /// Warning - potential issue but loading can continue
    Warning,
    /// Information - informational message
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic message with the offending criterion and context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// The criterion text this diagnostic refers to, if any
    pub criterion: Option<String>,
    /// Additional context or help
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            criterion: None,
            help: None,
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            criterion: None,
            help: None,
        }
    }

    /// Attach the criterion text
    pub fn with_criterion(mut self, criterion: impl Into<String>) -> Self {
        self.criterion = Some(criterion.into());
        self
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.severity, self.code, self.message)?;
        if let Some(criterion) = &self.criterion {
            write!(f, " in '{}'", criterion)?;
        }
        Ok(())
    }
}

/// Main error type for the eligibility engine
///
/// Parse and resolution failures are configuration errors: they abort the
/// whole load. Per-patient data insufficiency is never an error; it flows
/// through evaluation as data.
#[derive(Debug, Error)]
pub enum TrialError {
    /// Malformed criterion text
    #[error("{code}: {message} in criterion '{criterion}'")]
    Parse {
        code: ErrorCode,
        message: String,
        criterion: String,
    },

    /// Invalid trial or cohort configuration
    #[error("{code}: {message}")]
    Configuration {
        code: ErrorCode,
        message: String,
        context: Option<String>,
    },

    /// A rule could not be wired to an evaluation function
    #[error("{code}: {message} for rule {rule}")]
    Resolution {
        code: ErrorCode,
        message: String,
        rule: String,
    },

    /// I/O failure while reading configuration or patient data
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON document
    #[error("invalid JSON: {0}")]
    Json(String),
}

impl TrialError {
    /// Create a parse error
    pub fn parse(code: ErrorCode, message: impl Into<String>, criterion: impl Into<String>) -> Self {
        Self::Parse {
            code,
            message: message.into(),
            criterion: criterion.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Configuration {
            code,
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn configuration_in(
        code: ErrorCode,
        message: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self::Configuration {
            code,
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a resolution error
    pub fn resolution(code: ErrorCode, message: impl Into<String>, rule: impl Into<String>) -> Self {
        Self::Resolution {
            code,
            message: message.into(),
            rule: rule.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse { code, .. } => *code,
            Self::Configuration { code, .. } => *code,
            Self::Resolution { code, .. } => *code,
            Self::Io(_) => crate::TRM0300,
            Self::Json(_) => crate::TRM0301,
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Parse {
                code,
                message,
                criterion,
            } => Diagnostic::error(*code, message.clone()).with_criterion(criterion.clone()),
            Self::Configuration {
                code,
                message,
                context,
            } => {
                let mut diag = Diagnostic::error(*code, message.clone());
                if let Some(ctx) = context {
                    diag = diag.with_help(ctx.clone());
                }
                diag
            }
            Self::Resolution { code, message, rule } => {
                Diagnostic::error(*code, format!("{} for rule {}", message, rule))
            }
            Self::Io(e) => Diagnostic::error(crate::TRM0300, e.to_string()),
            Self::Json(msg) => Diagnostic::error(crate::TRM0301, msg.clone()),
        }
    }
}

impl From<serde_json::Error> for TrialError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
