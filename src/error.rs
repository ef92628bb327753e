// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for SANER format compilation
//!
//! Only configuration problems surface as errors. Questions that reference
//! unknown fields, unrecognized population codes and missing scores are
//! tolerated by omission in the builders.

use thiserror::Error;

/// Result type alias for SANER operations
pub type Result<T> = std::result::Result<T, SanerError>;

/// Errors that can occur while compiling or reporting on a format
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SanerError {
    /// The format definition is malformed
    #[error("Invalid format '{format}': property '{property}' {reason}")]
    InvalidFormat {
        /// Name of the offending format (may be empty)
        format: String,
        /// The property that failed validation
        property: String,
        /// Why the property is invalid
        reason: String,
    },

    /// No format is registered under the requested name
    #[error("Format '{name}' not found")]
    FormatNotFound {
        /// The requested format name
        name: String,
    },

    /// A score was constructed without any value
    #[error("Invalid score: {reason}")]
    InvalidScore {
        /// Why the score is invalid
        reason: String,
    },

    /// Rendering or parsing JSON failed
    #[error("Serialization error: {message}")]
    Serialization {
        /// Underlying serializer message
        message: String,
    },
}

impl SanerError {
    /// Create an invalid format error
    pub fn invalid_format(
        format: impl Into<String>,
        property: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidFormat {
            format: format.into(),
            property: property.into(),
            reason: reason.into(),
        }
    }

    /// Create a format not found error
    pub fn format_not_found(name: impl Into<String>) -> Self {
        Self::FormatNotFound { name: name.into() }
    }

    /// Create an invalid score error
    pub fn invalid_score(reason: impl Into<String>) -> Self {
        Self::InvalidScore {
            reason: reason.into(),
        }
    }

    /// Whether this error is a configuration error for a format definition
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::InvalidFormat { .. })
    }
}

impl From<serde_json::Error> for SanerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_format_message_names_property() {
        let err = SanerError::invalid_format("sanerCDC", "measure_fields", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid format 'sanerCDC': property 'measure_fields' must not be empty"
        );
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_not_found_is_not_configuration_error() {
        let err = SanerError::format_not_found("missing");
        assert_eq!(err.to_string(), "Format 'missing' not found");
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SanerError = json_err.into();
        assert!(matches!(err, SanerError::Serialization { .. }));
    }
}
