//! The build configuration record.
//!
//! Mirrors the subset of Vite's config that a backend integration relies on:
//!
//! ```js
//! export default defineConfig({
//!   server: { origin: 'http://localhost:5173' },
//!   build: {
//!     manifest: true,
//!     rollupOptions: { input: '/resources/main.js' },
//!   },
//! });
//! ```
//!
//! Every value of these types is valid by construction: [`Origin`] and
//! [`EntryInput`] run their checks when built, including when deserialized.
//! Nothing exposes `&mut`, so a record never changes after it is built.

use crate::error::ConfigError;
use crate::validate::{validate_input, validate_origin};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Default dev-server origin.
pub const DEFAULT_ORIGIN: &str = "http://localhost:5173";

/// Default build entry point.
pub const DEFAULT_INPUT: &str = "/resources/main.js";

/// Path the Vite dev server serves its HMR client from.
pub const VITE_CLIENT_PATH: &str = "/@vite/client";

/// Dev-server origin, kept exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Origin {
    raw: String,
    url: Url,
}

impl Origin {
    /// Parse and validate an origin string.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let url = validate_origin(raw)?;
        Ok(Self {
            raw: raw.to_string(),
            url,
        })
    }

    /// The origin exactly as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Append a root-absolute path to the origin without doubling the slash.
    #[must_use]
    pub fn join_path(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.raw.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl TryFrom<String> for Origin {
    type Error = ConfigError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        let url = validate_origin(&raw)?;
        Ok(Self { raw, url })
    }
}

impl From<Origin> for String {
    fn from(origin: Origin) -> Self {
        origin.raw
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Build entry point, a project-root-absolute module path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryInput(String);

impl EntryInput {
    /// Parse and validate an entry path. The path is not normalized.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        validate_input(raw)?;
        Ok(Self(raw.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The manifest key for this entry: the path without its leading `/`.
    #[must_use]
    pub fn manifest_key(&self) -> &str {
        self.0.trim_start_matches('/')
    }
}

impl TryFrom<String> for EntryInput {
    type Error = ConfigError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        validate_input(&raw)?;
        Ok(Self(raw))
    }
}

impl From<EntryInput> for String {
    fn from(input: EntryInput) -> Self {
        input.0
    }
}

impl fmt::Display for EntryInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `server` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerOptions {
    origin: Origin,
}

impl ServerOptions {
    #[must_use]
    pub fn origin(&self) -> &Origin {
        &self.origin
    }
}

/// `build.rollupOptions` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RollupOptions {
    input: EntryInput,
}

impl RollupOptions {
    #[must_use]
    pub fn input(&self) -> &EntryInput {
        &self.input
    }
}

/// `build` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildOptions {
    manifest: bool,
    rollup_options: RollupOptions,
}

impl BuildOptions {
    /// Whether the builder emits `.vite/manifest.json`.
    #[must_use]
    pub fn manifest(&self) -> bool {
        self.manifest
    }

    #[must_use]
    pub fn rollup_options(&self) -> &RollupOptions {
        &self.rollup_options
    }
}

/// The build configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViteConfig {
    server: ServerOptions,
    build: BuildOptions,
}

impl ViteConfig {
    /// Build a record from already-validated parts.
    #[must_use]
    pub fn from_parts(origin: Origin, manifest: bool, input: EntryInput) -> Self {
        Self {
            server: ServerOptions { origin },
            build: BuildOptions {
                manifest,
                rollup_options: RollupOptions { input },
            },
        }
    }

    /// Build a record from raw values, validating each field.
    pub fn new(origin: &str, manifest: bool, input: &str) -> Result<Self, ConfigError> {
        Ok(Self::from_parts(
            Origin::parse(origin)?,
            manifest,
            EntryInput::parse(input)?,
        ))
    }

    #[must_use]
    pub fn server(&self) -> &ServerOptions {
        &self.server
    }

    #[must_use]
    pub fn build(&self) -> &BuildOptions {
        &self.build
    }

    /// Shorthand for `server.origin` as written.
    #[must_use]
    pub fn origin(&self) -> &str {
        self.server.origin.as_str()
    }

    /// Shorthand for `build.manifest`.
    #[must_use]
    pub fn manifest(&self) -> bool {
        self.build.manifest
    }

    /// Shorthand for `build.rollupOptions.input` as written.
    #[must_use]
    pub fn input(&self) -> &str {
        self.build.rollup_options.input.as_str()
    }

    /// URL of the dev server's HMR client.
    #[must_use]
    pub fn dev_client_url(&self) -> String {
        self.server.origin.join_path(VITE_CLIENT_PATH)
    }

    /// URL of the entry module on the dev server.
    #[must_use]
    pub fn dev_entry_url(&self) -> String {
        self.server.origin.join_path(self.input())
    }

    /// Render the record as a `vite.config.js` source file.
    #[must_use]
    pub fn to_js_source(&self) -> String {
        format!(
            "import {{ defineConfig }} from 'vite';\n\
             \n\
             export default defineConfig({{\n  \
               server: {{\n    \
                 origin: '{origin}',\n  \
               }},\n  \
               build: {{\n    \
                 // generate .vite/manifest.json in outDir\n    \
                 manifest: {manifest},\n    \
                 rollupOptions: {{\n      \
                   // overwrite default .html entry\n      \
                   input: '{input}',\n    \
                 }},\n  \
               }},\n\
             }});\n",
            origin = escape_js_string(self.origin()),
            manifest = self.manifest(),
            input = escape_js_string(self.input()),
        )
    }
}

/// Escape a value for a single-quoted JS string literal.
fn escape_js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out
}

impl Default for ViteConfig {
    /// The project's literal configuration.
    fn default() -> Self {
        Self {
            server: ServerOptions {
                origin: Origin {
                    raw: DEFAULT_ORIGIN.to_string(),
                    url: Url::parse(DEFAULT_ORIGIN).expect("default origin is a valid URL"),
                },
            },
            build: BuildOptions {
                manifest: true,
                rollup_options: RollupOptions {
                    input: EntryInput(DEFAULT_INPUT.to_string()),
                },
            },
        }
    }
}
