use crate::paths::DEFAULT_OUT_DIR;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime settings for the viteconf CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Current working directory.
    pub cwd: PathBuf,

    /// Whether to emit JSON logs.
    pub json_logs: bool,

    /// Verbosity level (0 = INFO, 1 = DEBUG, 2+ = TRACE).
    pub verbosity: u8,

    /// Build output directory, relative to the project root unless absolute.
    pub out_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            json_logs: false,
            verbosity: 0,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

impl Settings {
    /// Create settings for the given working directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            ..Default::default()
        }
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON log output.
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    /// Set the build output directory.
    #[must_use]
    pub fn with_out_dir(mut self, out_dir: PathBuf) -> Self {
        self.out_dir = out_dir;
        self
    }

    /// Project root: the nearest ancestor with `package.json` or `.git`, else `cwd`.
    #[must_use]
    pub fn project_root(&self) -> PathBuf {
        crate::paths::project_root(&self.cwd).unwrap_or_else(|| self.cwd.clone())
    }

    /// Resolve a user-supplied path against `cwd`.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.cwd.join(path)
    }
}
