//! Eligibility engine error codes following a structured numbering system
//!
//! Error code ranges:
//! - TRM0001-TRM0099: Parse errors (criterion syntax)
//! - TRM0100-TRM0199: Configuration errors (trial/cohort definitions)
//! - TRM0200-TRM0299: Resolution errors (rule-to-function wiring)
//! - TRM0300-TRM0399: System errors (I/O, serialization)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a parse error (0001-0099)
    pub const fn is_parse_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a configuration error (0100-0199)
    pub const fn is_configuration_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is a resolution error (0200-0299)
    pub const fn is_resolution_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a system error (0300-0399)
    pub const fn is_system_error(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TRM{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

// Static error info storage
static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

use std::collections::HashMap;
use std::sync::LazyLock;

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Parse errors (0001-0099)
    map.insert(1, ErrorInfo::new("Malformed criterion"));
    map.insert(2, ErrorInfo::new("Unknown eligibility rule"));
    map.insert(
        3,
        ErrorInfo::new("Not a valid composite rule")
            .with_help("Only AND, OR, NOT and WARN_IF may take nested criteria"),
    );
    map.insert(4, ErrorInfo::new("Unbalanced delimiters"));
    map.insert(5, ErrorInfo::new("Empty criterion"));

    // Configuration errors (0100-0199)
    map.insert(100, ErrorInfo::new("Invalid trial configuration"));
    map.insert(101, ErrorInfo::new("Duplicate cohort identifier"));
    map.insert(
        102,
        ErrorInfo::new("Eligibility references unknown cohort")
            .with_help("Every cohort id in appliesToCohorts must be declared on the trial"),
    );

    // Resolution errors (0200-0299)
    map.insert(
        200,
        ErrorInfo::new("No evaluation function registered for rule"),
    );
    map.insert(201, ErrorInfo::new("Invalid number of nested criteria"));
    map.insert(202, ErrorInfo::new("Malformed rule parameter"));
    map.insert(203, ErrorInfo::new("Parameter kind mismatch"));

    // System errors (0300-0399)
    map.insert(300, ErrorInfo::new("I/O error"));
    map.insert(301, ErrorInfo::new("Invalid JSON document"));

    map
});

// Convenient error code constants

// Parse errors
pub const TRM0001: ErrorCode = ErrorCode::new(1);
pub const TRM0002: ErrorCode = ErrorCode::new(2);
pub const TRM0003: ErrorCode = ErrorCode::new(3);
pub const TRM0004: ErrorCode = ErrorCode::new(4);
pub const TRM0005: ErrorCode = ErrorCode::new(5);

// Configuration errors
pub const TRM0100: ErrorCode = ErrorCode::new(100);
pub const TRM0101: ErrorCode = ErrorCode::new(101);
pub const TRM0102: ErrorCode = ErrorCode::new(102);

// Resolution errors
pub const TRM0200: ErrorCode = ErrorCode::new(200);
pub const TRM0201: ErrorCode = ErrorCode::new(201);
pub const TRM0202: ErrorCode = ErrorCode::new(202);
pub const TRM0203: ErrorCode = ErrorCode::new(203);

// System errors
pub const TRM0300: ErrorCode = ErrorCode::new(300);
pub const TRM0301: ErrorCode = ErrorCode::new(301);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(TRM0001.to_string(), "TRM0001");
        assert_eq!(TRM0200.to_string(), "TRM0200");
    }

    #[test]
    fn test_error_categories() {
        assert!(TRM0001.is_parse_error());
        assert!(!TRM0001.is_configuration_error());

        assert!(TRM0100.is_configuration_error());
        assert!(TRM0200.is_resolution_error());
        assert!(TRM0300.is_system_error());
    }

    #[test]
    fn test_error_info() {
        let info = TRM0002.info();
        assert_eq!(info.description, "Unknown eligibility rule");
        assert!(TRM0003.info().help.is_some());
    }
}
