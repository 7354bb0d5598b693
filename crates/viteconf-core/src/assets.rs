//! Entry asset resolution for the page that loads the application.
//!
//! In development the page loads the HMR client and the entry straight from
//! the dev server. After a build it loads the hashed files listed in the
//! manifest. A running dev server wins over an existing manifest.

use crate::config::ViteConfig;
use crate::error::{codes, ConfigError};
use crate::manifest::Manifest;
use crate::paths::manifest_path;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

/// URLs the page needs to load the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum EntryAssets {
    /// Served by the dev server.
    Dev {
        /// HMR client script.
        client: String,
        /// Entry module.
        entry: String,
    },
    /// Served from the build output.
    Built {
        /// Entry chunk script.
        script: String,
        /// Chunks to `modulepreload`.
        preload: Vec<String>,
        /// Stylesheets.
        css: Vec<String>,
    },
}

impl EntryAssets {
    /// Assets for a running dev server.
    #[must_use]
    pub fn dev(config: &ViteConfig) -> Self {
        Self::Dev {
            client: config.dev_client_url(),
            entry: config.dev_entry_url(),
        }
    }

    /// Assets for a built entry, looked up in `manifest`.
    pub fn built(config: &ViteConfig, manifest: &Manifest) -> Result<Self, ConfigError> {
        let input = config.build().rollup_options().input();
        let chunk = manifest.entry(input)?;
        let key = input.manifest_key();

        Ok(Self::Built {
            script: public_path(&chunk.file),
            preload: manifest
                .imported_chunks(key)
                .into_iter()
                .map(|c| public_path(&c.file))
                .collect(),
            css: manifest
                .imported_css(key)
                .iter()
                .map(|f| public_path(f))
                .collect(),
        })
    }

    #[must_use]
    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev { .. })
    }

    /// Render the tags to place in the page's `<head>`.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        match self {
            Self::Dev { client, entry } => {
                let _ = writeln!(
                    html,
                    r#"<script type="module" src="{}"></script>"#,
                    escape_attr(client)
                );
                let _ = writeln!(
                    html,
                    r#"<script type="module" src="{}"></script>"#,
                    escape_attr(entry)
                );
            }
            Self::Built {
                script,
                preload,
                css,
            } => {
                for href in css {
                    let _ = writeln!(
                        html,
                        r#"<link rel="stylesheet" href="{}">"#,
                        escape_attr(href)
                    );
                }
                for href in preload {
                    let _ = writeln!(
                        html,
                        r#"<link rel="modulepreload" href="{}">"#,
                        escape_attr(href)
                    );
                }
                let _ = writeln!(
                    html,
                    r#"<script type="module" src="{}"></script>"#,
                    escape_attr(script)
                );
            }
        }
        html
    }
}

/// Escape a value for a double-quoted HTML attribute.
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Pick dev or built assets for the entry.
///
/// `dev_running` is the result of a [`DevServerProbe`](crate::DevServerProbe)
/// check. Otherwise the manifest under `root/out_dir` is read, which requires
/// `build.manifest` to be on.
pub fn resolve_entry_assets(
    config: &ViteConfig,
    root: &Path,
    out_dir: &Path,
    dev_running: bool,
) -> Result<EntryAssets, ConfigError> {
    if dev_running {
        tracing::debug!(origin = config.origin(), "using dev server assets");
        return Ok(EntryAssets::dev(config));
    }

    if !config.manifest() {
        return Err(ConfigError::new(
            codes::MANIFEST_DISABLED,
            "Dev server is not running and build.manifest is disabled; cannot locate built assets",
        ));
    }

    let path = manifest_path(root, out_dir);
    tracing::debug!(path = %path.display(), "using built assets");
    let manifest = Manifest::load(&path)?;
    EntryAssets::built(config, &manifest).map_err(|e| e.with_path(path))
}

/// Output files are served from the site root.
fn public_path(file: &str) -> String {
    format!("/{}", file.trim_start_matches('/'))
}
