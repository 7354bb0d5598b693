pub mod check;
pub mod entry;
pub mod init;
pub mod show;
pub mod version;

use miette::{miette, Report};
use std::path::{Path, PathBuf};
use viteconf_core::{load_config, ConfigError, Settings, ViteConfig};

/// Where a loaded config came from.
pub enum ConfigSource {
    File(PathBuf),
    BuiltIn,
}

impl ConfigSource {
    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::BuiltIn => "(built-in default)".to_string(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::BuiltIn => None,
        }
    }
}

/// Load the project's config, falling back to the built-in record when no file exists.
pub fn load(
    settings: &Settings,
    config_path: Option<&Path>,
) -> Result<(PathBuf, ConfigSource, ViteConfig), ConfigError> {
    let root = settings.project_root();
    let config_path = config_path.map(|p| settings.resolve(p));
    match load_config(&root, config_path.as_deref())? {
        Some((path, config)) => Ok((root, ConfigSource::File(path), config)),
        None => {
            tracing::info!(root = %root.display(), "no vite config found, using built-in default");
            Ok((root, ConfigSource::BuiltIn, ViteConfig::default()))
        }
    }
}

/// JSON body for a failed command.
pub fn error_json(err: &ConfigError) -> serde_json::Value {
    serde_json::json!({
        "ok": false,
        "error": {
            "code": err.code(),
            "message": err.message(),
            "path": err.path().map(|p| p.display().to_string()),
        }
    })
}

/// Report a config error: JSON on stdout with exit code 1, or a diagnostic.
pub fn fail(err: ConfigError, json: bool) -> Report {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&error_json(&err)).unwrap_or_default()
        );
        std::process::exit(1);
    }
    match err.path() {
        Some(path) => miette!(code = err.code(), "{} ({})", err, path.display()),
        None => miette!(code = err.code(), "{}", err),
    }
}
