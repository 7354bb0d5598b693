//! Load-time validation of config fields.
//!
//! Shape checks run whenever an [`Origin`](crate::Origin) or
//! [`EntryInput`](crate::EntryInput) is built, so every `ViteConfig` value is
//! well-formed. [`validate_against_root`] adds the filesystem check that the
//! build tool would otherwise only hit at build time.

use crate::config::ViteConfig;
use crate::error::{codes, ConfigError};
use crate::paths::input_path;
use std::path::Path;
use url::Url;

/// File extensions accepted for `build.rollupOptions.input`.
pub const MODULE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx", "ts", "mts", "cts", "tsx"];

/// Check that `origin` is an absolute http(s) URL with a host.
///
/// Returns the parsed URL. The caller keeps the original string; the parsed
/// form normalizes a trailing slash onto bare origins.
pub fn validate_origin(origin: &str) -> Result<Url, ConfigError> {
    if origin.is_empty() {
        return Err(ConfigError::origin_invalid("server.origin must not be empty"));
    }

    // The URL parser trims and drops whitespace and accepts `http:host`; the
    // raw string is what ends up in generated URLs, so it must already be clean
    if origin.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ConfigError::origin_invalid(format!(
            "server.origin {origin:?} must not contain whitespace or control characters"
        )));
    }

    let lower = origin.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return Err(ConfigError::origin_invalid(format!(
            "server.origin '{origin}' must start with http:// or https://"
        )));
    }

    let url = Url::parse(origin).map_err(|e| {
        ConfigError::origin_invalid(format!("server.origin '{origin}' is not a valid URL: {e}"))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::origin_invalid(format!(
            "server.origin '{origin}' must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if url.host_str().unwrap_or_default().is_empty() {
        return Err(ConfigError::origin_invalid(format!(
            "server.origin '{origin}' has no host"
        )));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::origin_invalid(format!(
            "server.origin '{origin}' must not carry a query or fragment"
        )));
    }

    Ok(url)
}

/// Check that `input` is a root-absolute module path with a known extension.
pub fn validate_input(input: &str) -> Result<(), ConfigError> {
    if input.is_empty() {
        return Err(ConfigError::input_invalid(
            "build.rollupOptions.input must not be empty",
        ));
    }

    if !input.starts_with('/') {
        return Err(ConfigError::input_invalid(format!(
            "build.rollupOptions.input '{input}' must start with '/'"
        )));
    }

    let ext = Path::new(input).extension().and_then(|e| e.to_str());
    match ext {
        Some(ext) if MODULE_EXTENSIONS.contains(&ext) => Ok(()),
        _ => Err(ConfigError::input_invalid(format!(
            "build.rollupOptions.input '{input}' must end in one of: {}",
            MODULE_EXTENSIONS
                .iter()
                .map(|e| format!(".{e}"))
                .collect::<Vec<_>>()
                .join(", ")
        ))),
    }
}

/// Validate a config against a project root.
///
/// The input path is resolved with its leading `/` meaning `root`, and must
/// name an existing readable file.
pub fn validate_against_root(config: &ViteConfig, root: &Path) -> Result<(), ConfigError> {
    let input = config.input();
    let path = input_path(root, input);

    tracing::debug!(input, path = %path.display(), "checking build input");

    if !viteconf_util::fs::is_readable_file(&path) {
        return Err(ConfigError::new(
            codes::INPUT_NOT_FOUND,
            format!(
                "build.rollupOptions.input '{input}' does not resolve to a readable file ({})",
                path.display()
            ),
        )
        .with_path(path));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_accepts_http_and_https() {
        assert!(validate_origin("http://localhost:5173").is_ok());
        assert!(validate_origin("https://assets.example.com").is_ok());
        assert!(validate_origin("http://127.0.0.1:5173/").is_ok());
    }

    #[test]
    fn test_origin_rejects_malformed() {
        for bad in [
            "",
            "localhost:5173",
            "/relative/path",
            "ftp://localhost:5173",
            "http://",
            "http://localhost:5173/?x=1",
            "http://localhost:5173/#top",
            " http://localhost:5173",
            "http://localhost:5173\n",
            "http://local\thost:5173",
            "http:localhost:5173",
            "https:/localhost:5173",
        ] {
            let err = validate_origin(bad).unwrap_err();
            assert_eq!(err.code(), codes::ORIGIN_INVALID, "accepted {bad:?}");
        }
    }

    #[test]
    fn test_input_accepts_module_extensions() {
        for ok in ["/resources/main.js", "/src/main.tsx", "/app.mjs", "/a/b/c.cts"] {
            assert!(validate_input(ok).is_ok(), "rejected {ok}");
        }
    }

    #[test]
    fn test_input_rejects_malformed() {
        for bad in ["", "resources/main.js", "/index.html", "/resources/main", "/styles.css"] {
            let err = validate_input(bad).unwrap_err();
            assert_eq!(err.code(), codes::INPUT_INVALID, "accepted {bad:?}");
        }
    }

    #[test]
    fn test_validate_against_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = ViteConfig::default();

        let err = validate_against_root(&config, dir.path()).unwrap_err();
        assert_eq!(err.code(), codes::INPUT_NOT_FOUND);
        assert_eq!(err.path(), Some(dir.path().join("resources/main.js").as_path()));

        std::fs::create_dir_all(dir.path().join("resources")).unwrap();
        std::fs::write(dir.path().join("resources/main.js"), "import './app.css';").unwrap();
        assert!(validate_against_root(&config, dir.path()).is_ok());
    }

    #[test]
    fn test_validate_against_root_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("resources/main.js")).unwrap();

        let err = validate_against_root(&ViteConfig::default(), dir.path()).unwrap_err();
        assert_eq!(err.code(), codes::INPUT_NOT_FOUND);
    }
}
