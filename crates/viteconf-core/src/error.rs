//! Error type for config loading, validation and manifest lookup.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Stable error codes.
///
/// All codes are SCREAMING_SNAKE_CASE and stable across versions; the CLI
/// prints them in `--json` mode.
pub mod codes {
    /// Explicit config path does not exist.
    pub const CONFIG_NOT_FOUND: &str = "CONFIG_NOT_FOUND";
    /// Config file exists but could not be read.
    pub const CONFIG_READ_FAILED: &str = "CONFIG_READ_FAILED";
    /// Config object literal is malformed.
    pub const CONFIG_PARSE_ERROR: &str = "CONFIG_PARSE_ERROR";
    /// No `export default` object in the config source.
    pub const CONFIG_NO_DEFAULT_EXPORT: &str = "CONFIG_NO_DEFAULT_EXPORT";
    /// A required field is absent.
    pub const CONFIG_FIELD_MISSING: &str = "CONFIG_FIELD_MISSING";
    /// A field has the wrong JSON type.
    pub const CONFIG_FIELD_TYPE: &str = "CONFIG_FIELD_TYPE";
    /// `server.origin` is not an absolute http(s) URL.
    pub const ORIGIN_INVALID: &str = "ORIGIN_INVALID";
    /// `build.rollupOptions.input` is malformed.
    pub const INPUT_INVALID: &str = "INPUT_INVALID";
    /// `build.rollupOptions.input` does not name a readable file.
    pub const INPUT_NOT_FOUND: &str = "INPUT_NOT_FOUND";
    /// Built assets were requested but `build.manifest` is off.
    pub const MANIFEST_DISABLED: &str = "MANIFEST_DISABLED";
    /// `.vite/manifest.json` is missing.
    pub const MANIFEST_NOT_FOUND: &str = "MANIFEST_NOT_FOUND";
    /// `.vite/manifest.json` is not valid manifest JSON.
    pub const MANIFEST_INVALID: &str = "MANIFEST_INVALID";
    /// The manifest has no chunk for the entry.
    pub const MANIFEST_ENTRY_MISSING: &str = "MANIFEST_ENTRY_MISSING";
    /// The HTTP client for the dev-server probe could not be built.
    pub const PROBE_CLIENT_FAILED: &str = "PROBE_CLIENT_FAILED";
}

/// Config error with a stable code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConfigError {
    code: &'static str,
    message: String,
    path: Option<PathBuf>,
}

impl ConfigError {
    /// Create a new error with the given code and message.
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Attach the file the error refers to.
    #[must_use]
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Get the error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the file the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::new(codes::CONFIG_PARSE_ERROR, msg)
    }

    #[must_use]
    pub fn field_missing(field: &str) -> Self {
        Self::new(
            codes::CONFIG_FIELD_MISSING,
            format!("Missing required field `{field}`"),
        )
    }

    #[must_use]
    pub fn field_type(field: &str, expected: &str) -> Self {
        Self::new(
            codes::CONFIG_FIELD_TYPE,
            format!("Field `{field}` must be a {expected}"),
        )
    }

    pub fn origin_invalid(msg: impl Into<String>) -> Self {
        Self::new(codes::ORIGIN_INVALID, msg)
    }

    pub fn input_invalid(msg: impl Into<String>) -> Self {
        Self::new(codes::INPUT_INVALID, msg)
    }

    pub fn manifest_invalid(msg: impl Into<String>) -> Self {
        Self::new(codes::MANIFEST_INVALID, msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_screaming_snake_case() {
        let all = [
            codes::CONFIG_NOT_FOUND,
            codes::CONFIG_READ_FAILED,
            codes::CONFIG_PARSE_ERROR,
            codes::CONFIG_NO_DEFAULT_EXPORT,
            codes::CONFIG_FIELD_MISSING,
            codes::CONFIG_FIELD_TYPE,
            codes::ORIGIN_INVALID,
            codes::INPUT_INVALID,
            codes::INPUT_NOT_FOUND,
            codes::MANIFEST_DISABLED,
            codes::MANIFEST_NOT_FOUND,
            codes::MANIFEST_INVALID,
            codes::MANIFEST_ENTRY_MISSING,
            codes::PROBE_CLIENT_FAILED,
        ];
        for code in all {
            assert!(
                code.chars().all(|c| c.is_ascii_uppercase() || c == '_'),
                "{code} is not SCREAMING_SNAKE_CASE"
            );
        }
    }

    #[test]
    fn test_display_is_message() {
        let err = ConfigError::field_missing("server.origin").with_path("/tmp/vite.config.js");
        assert_eq!(err.code(), codes::CONFIG_FIELD_MISSING);
        assert_eq!(err.to_string(), "Missing required field `server.origin`");
        assert_eq!(err.path(), Some(Path::new("/tmp/vite.config.js")));
    }
}
