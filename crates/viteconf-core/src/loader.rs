//! Config file discovery and parsing.
//!
//! Loads `vite.config.js`, `vite.config.mjs` or `vite.config.ts` and extracts
//! the static record. The file is never executed: the default export must be
//! an object literal, optionally wrapped in `defineConfig(...)`.
//!
//! ## Supported config format
//!
//! ```js
//! import { defineConfig } from 'vite';
//!
//! export default defineConfig({
//!   server: { origin: 'http://localhost:5173' },
//!   build: { manifest: true, rollupOptions: { input: '/resources/main.js' } },
//! });
//! ```

use crate::config::{EntryInput, Origin, ViteConfig};
use crate::error::{codes, ConfigError};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Config file names in priority order.
pub const CONFIG_FILES: &[&str] = &["vite.config.js", "vite.config.mjs", "vite.config.ts"];

/// Find a config file in the given root directory.
#[must_use]
pub fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

/// Load the config from the given root directory.
///
/// If `config_path` is `Some`, use that file (relative paths resolve against
/// `root`). Otherwise auto-discover; `Ok(None)` means no config file exists.
pub fn load_config(
    root: &Path,
    config_path: Option<&Path>,
) -> Result<Option<(PathBuf, ViteConfig)>, ConfigError> {
    let path = match config_path {
        Some(p) => {
            let abs = if p.is_absolute() {
                p.to_path_buf()
            } else {
                root.join(p)
            };
            if !abs.exists() {
                return Err(ConfigError::new(
                    codes::CONFIG_NOT_FOUND,
                    format!("Config file not found: {}", abs.display()),
                )
                .with_path(abs));
            }
            abs
        }
        None => match find_config_file(root) {
            Some(p) => p,
            None => {
                tracing::debug!(root = %root.display(), "no config file found");
                return Ok(None);
            }
        },
    };

    let config = load_config_file(&path)?;
    Ok(Some((path, config)))
}

/// Read and parse a single config file.
pub fn load_config_file(path: &Path) -> Result<ViteConfig, ConfigError> {
    tracing::debug!(path = %path.display(), "loading config");

    let source = viteconf_util::fs::read_to_string_lossy(path).map_err(|e| {
        ConfigError::new(
            codes::CONFIG_READ_FAILED,
            format!("Failed to read config file {}: {e}", path.display()),
        )
        .with_path(path)
    })?;

    parse_config_source(&source).map_err(|e| e.with_path(path))
}

/// Parse config source text into a record.
pub fn parse_config_source(source: &str) -> Result<ViteConfig, ConfigError> {
    let obj_str = extract_default_export_object(source).ok_or_else(|| {
        ConfigError::new(
            codes::CONFIG_NO_DEFAULT_EXPORT,
            "No `export default { ... }` or `export default defineConfig({ ... })` found in config file",
        )
    })?;

    let value = parse_js_object(&obj_str)?;
    config_from_value(&value)
}

/// Convert a parsed object into a record, checking each field's type.
fn config_from_value(value: &Value) -> Result<ViteConfig, ConfigError> {
    let root = value
        .as_object()
        .ok_or_else(|| ConfigError::field_type("(default export)", "object"))?;
    warn_unknown(root, "", &["server", "build"]);

    let server = object_field(root, "server", "server")?;
    warn_unknown(server, "server.", &["origin"]);
    let origin = string_field(server, "origin", "server.origin")?;

    let build = object_field(root, "build", "build")?;
    warn_unknown(build, "build.", &["manifest", "rollupOptions"]);
    let manifest = match build.get("manifest") {
        Some(Value::Bool(b)) => *b,
        Some(_) => return Err(ConfigError::field_type("build.manifest", "boolean")),
        None => return Err(ConfigError::field_missing("build.manifest")),
    };

    let rollup = object_field(build, "rollupOptions", "build.rollupOptions")?;
    warn_unknown(rollup, "build.rollupOptions.", &["input"]);
    let input = string_field(rollup, "input", "build.rollupOptions.input")?;

    let config = ViteConfig::from_parts(Origin::parse(origin)?, manifest, EntryInput::parse(input)?);
    tracing::trace!(?config, "parsed config");
    Ok(config)
}

fn object_field<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    field: &str,
) -> Result<&'a Map<String, Value>, ConfigError> {
    match obj.get(key) {
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(ConfigError::field_type(field, "object")),
        None => Err(ConfigError::field_missing(field)),
    }
}

fn string_field<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    field: &str,
) -> Result<&'a str, ConfigError> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ConfigError::field_type(field, "string")),
        None => Err(ConfigError::field_missing(field)),
    }
}

/// Keys outside the record are Vite options this crate does not model.
fn warn_unknown(obj: &Map<String, Value>, prefix: &str, known: &[&str]) {
    for key in obj.keys().filter(|k| !known.contains(&k.as_str())) {
        tracing::debug!(key = %format!("{prefix}{key}"), "ignoring unrecognized config option");
    }
}

/// Extract the object literal from `export default { ... }` or
/// `export default defineConfig({ ... })`.
///
/// Returns the object including the outer braces.
fn extract_default_export_object(source: &str) -> Option<String> {
    // Comments may contain braces or the marker itself
    let stripped = strip_comments(source);

    let marker = "export default";
    let idx = stripped.find(marker)?;
    let mut after = stripped[idx + marker.len()..].trim_start();

    if let Some(rest) = after.strip_prefix("defineConfig") {
        after = rest.trim_start().strip_prefix('(')?.trim_start();
    }

    if !after.starts_with('{') {
        return None;
    }

    let mut depth = 0;
    let mut in_string: Option<char> = None;
    let mut escaped = false;
    let mut end = 0;

    for (i, ch) in after.char_indices() {
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                in_string = None;
            }
        } else {
            match ch {
                '"' | '\'' | '`' => in_string = Some(ch),
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end = i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    if depth != 0 || end == 0 {
        return None;
    }

    Some(after[..end].to_string())
}

/// Strip `//` and `/* */` comments from JS source, keeping line breaks.
fn strip_comments(source: &str) -> String {
    let mut result = String::with_capacity(source.len());
    let chars: Vec<char> = source.chars().collect();
    let len = chars.len();
    let mut i = 0;
    let mut in_string: Option<char> = None;
    let mut escaped = false;

    while i < len {
        if let Some(quote) = in_string {
            result.push(chars[i]);
            if escaped {
                escaped = false;
            } else if chars[i] == '\\' {
                escaped = true;
            } else if chars[i] == quote {
                in_string = None;
            }
            i += 1;
        } else if i + 1 < len && chars[i] == '/' && chars[i + 1] == '/' {
            while i < len && chars[i] != '\n' {
                i += 1;
            }
        } else if i + 1 < len && chars[i] == '/' && chars[i + 1] == '*' {
            i += 2;
            while i + 1 < len && !(chars[i] == '*' && chars[i + 1] == '/') {
                if chars[i] == '\n' {
                    result.push('\n');
                }
                i += 1;
            }
            i += 2;
        } else {
            if chars[i] == '"' || chars[i] == '\'' || chars[i] == '`' {
                in_string = Some(chars[i]);
            }
            result.push(chars[i]);
            i += 1;
        }
    }

    result
}

/// Parse a JavaScript object literal into a `serde_json::Value`.
///
/// Handles unquoted keys, single-quoted and template strings, trailing
/// commas, nested objects, arrays, numbers, booleans and null. Anything the
/// file would have to execute (identifiers, calls, `new`, member access,
/// arrow functions, interpolated templates, spreads) is skipped and read as
/// `null`, so plugin lists and computed options don't block the load.
fn parse_js_object(input: &str) -> Result<Value, ConfigError> {
    let mut parser = JsObjectParser::new(input);
    parser.parse_value()
}

struct JsObjectParser {
    chars: Vec<char>,
    pos: usize,
}

impl JsObjectParser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn parse_value(&mut self) -> Result<Value, ConfigError> {
        self.skip_whitespace();
        let value = match self.peek() {
            Some('{') => self.parse_object()?,
            Some('[') => self.parse_array()?,
            Some('"' | '\'' | '`') => self.parse_string()?.map_or(Value::Null, Value::String),
            Some(ch) if ch == '-' || ch.is_ascii_digit() => self.parse_number()?,
            Some(ch @ (',' | '}' | ']' | ')' | ':')) => {
                return Err(ConfigError::parse(format!(
                    "Unexpected character '{ch}' at position {}",
                    self.pos
                )))
            }
            Some(_) => {
                if self.consume_keyword("true") {
                    Value::Bool(true)
                } else if self.consume_keyword("false") {
                    Value::Bool(false)
                } else if self.consume_keyword("null") {
                    Value::Null
                } else {
                    self.skip_expression()?;
                    return Ok(Value::Null);
                }
            }
            None => return Err(ConfigError::parse("Unexpected end of input")),
        };
        self.finish_value(value)
    }

    /// A literal followed by more expression (`'a' + b`, `[].concat(x)`) is
    /// computed at runtime, so the whole thing reads as null.
    fn finish_value(&mut self, value: Value) -> Result<Value, ConfigError> {
        self.skip_whitespace();
        match self.peek() {
            None | Some(',' | '}' | ']' | ')') => Ok(value),
            Some(_) => {
                self.skip_expression()?;
                Ok(Value::Null)
            }
        }
    }

    /// Skip one expression up to the next top-level `,`, `}`, `]` or `)`,
    /// which is left unconsumed.
    fn skip_expression(&mut self) -> Result<(), ConfigError> {
        let start = self.pos;
        let mut depth = 0usize;

        while let Some(ch) = self.peek() {
            match ch {
                '"' | '\'' | '`' => {
                    self.skip_string()?;
                    continue;
                }
                '{' | '[' | '(' => depth += 1,
                '}' | ']' | ')' => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                ',' if depth == 0 => break,
                _ => {}
            }
            self.advance();
        }

        if depth != 0 {
            return Err(ConfigError::parse("Unbalanced brackets in expression"));
        }
        if self.pos == start {
            return Err(ConfigError::parse(format!(
                "Expected a value at position {}",
                self.pos
            )));
        }
        Ok(())
    }

    /// Skip a quoted string without decoding it, including `${...}` parts of
    /// template literals.
    fn skip_string(&mut self) -> Result<(), ConfigError> {
        let Some(quote) = self.advance() else {
            return Err(ConfigError::parse("Unexpected end of input"));
        };

        loop {
            match self.advance() {
                Some('\\') => {
                    if self.advance().is_none() {
                        return Err(ConfigError::parse("Unterminated string escape"));
                    }
                }
                Some('$') if quote == '`' && self.peek() == Some('{') => {
                    self.advance();
                    loop {
                        self.skip_expression()?;
                        match self.advance() {
                            Some('}') => break,
                            Some(',') => {}
                            _ => return Err(ConfigError::parse("Unterminated template literal")),
                        }
                    }
                }
                Some(ch) if ch == quote => return Ok(()),
                Some(_) => {}
                None => return Err(ConfigError::parse("Unterminated string")),
            }
        }
    }

    fn parse_object(&mut self) -> Result<Value, ConfigError> {
        self.advance(); // '{'
        let mut map = Map::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('}') => {
                    self.advance();
                    return Ok(Value::Object(map));
                }
                None => return Err(ConfigError::parse("Unterminated object")),
                // Spread and computed keys can't be resolved statically
                Some('.') if self.peek_at(1) == Some('.') && self.peek_at(2) == Some('.') => {
                    self.skip_expression()?;
                }
                Some('[') => self.skip_expression()?,
                _ => {
                    let key = self.parse_key()?;
                    self.skip_whitespace();

                    match self.peek() {
                        Some(':') => {
                            self.advance();
                            let value = self.parse_value()?;
                            map.insert(key, value);
                        }
                        // Shorthand property
                        Some(',' | '}') => {
                            map.insert(key, Value::Null);
                        }
                        // Method, getter or `async` method
                        Some(ch) if ch == '(' || ch.is_alphabetic() || ch == '_' || ch == '$' => {
                            self.skip_expression()?;
                            map.insert(key, Value::Null);
                        }
                        other => {
                            return Err(ConfigError::parse(format!(
                                "Expected ':' after key '{key}', got {other:?}"
                            )))
                        }
                    }
                }
            }

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some('}') => {}
                None => return Err(ConfigError::parse("Unterminated object")),
                Some(ch) => {
                    return Err(ConfigError::parse(format!(
                        "Expected ',' or '}}' in object, got '{ch}'"
                    )))
                }
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value, ConfigError> {
        self.advance(); // '['
        let mut arr = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(']') => {
                    self.advance();
                    return Ok(Value::Array(arr));
                }
                None => return Err(ConfigError::parse("Unterminated array")),
                _ => {}
            }

            arr.push(self.parse_value()?);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some(']') => {}
                None => return Err(ConfigError::parse("Unterminated array")),
                Some(ch) => {
                    return Err(ConfigError::parse(format!(
                        "Expected ',' or ']' in array, got '{ch}'"
                    )))
                }
            }
        }
    }

    fn parse_key(&mut self) -> Result<String, ConfigError> {
        self.skip_whitespace();
        match self.peek() {
            Some('"' | '\'') => self
                .parse_string()?
                .ok_or_else(|| ConfigError::parse("Expected string key")),
            Some(ch) if ch.is_alphanumeric() || ch == '_' || ch == '$' => {
                let mut key = String::new();
                while let Some(ch) = self.peek() {
                    if ch.is_alphanumeric() || ch == '_' || ch == '$' {
                        key.push(ch);
                        self.advance();
                    } else {
                        break;
                    }
                }
                Ok(key)
            }
            other => Err(ConfigError::parse(format!(
                "Expected object key, got {other:?}"
            ))),
        }
    }

    /// Decode a quoted string. Returns `None` for a template literal with
    /// `${...}` interpolation, which is skipped whole.
    fn parse_string(&mut self) -> Result<Option<String>, ConfigError> {
        let start = self.pos;
        let Some(quote) = self.advance() else {
            return Err(ConfigError::parse("Unexpected end of input"));
        };
        let mut s = String::new();

        loop {
            match self.advance() {
                Some(ch) if ch == quote => return Ok(Some(s)),
                Some('$') if quote == '`' && self.peek() == Some('{') => {
                    self.pos = start;
                    self.skip_string()?;
                    return Ok(None);
                }
                Some('\\') => match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('r') => s.push('\r'),
                    Some('\\') => s.push('\\'),
                    Some(ch @ ('\'' | '"' | '`')) => s.push(ch),
                    // Line continuation
                    Some('\n') => {}
                    Some(ch) => {
                        s.push('\\');
                        s.push(ch);
                    }
                    None => return Err(ConfigError::parse("Unterminated string escape")),
                },
                Some(ch) => s.push(ch),
                None => return Err(ConfigError::parse("Unterminated string")),
            }
        }
    }

    fn parse_number(&mut self) -> Result<Value, ConfigError> {
        let start = self.pos;
        let mut num_str = String::new();
        let mut has_dot = false;

        if self.peek() == Some('-') {
            num_str.push('-');
            self.advance();
        }

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // `-x`, `0x1f`, `1e3` and `10_000` are left to the runtime
        if num_str == "-" || self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.pos = start;
            self.skip_expression()?;
            return Ok(Value::Null);
        }

        let invalid = || ConfigError::parse(format!("Invalid number '{num_str}'"));
        if has_dot {
            let n = num_str.parse::<f64>().map_err(|_| invalid())?;
            serde_json::Number::from_f64(n)
                .map(Value::Number)
                .ok_or_else(invalid)
        } else {
            num_str
                .parse::<i64>()
                .map(|n| Value::Number(n.into()))
                .map_err(|_| invalid())
        }
    }

    /// Consume `word` if it appears at the cursor as a whole identifier.
    fn consume_keyword(&mut self, word: &str) -> bool {
        let end = self.pos + word.chars().count();
        if end > self.chars.len() {
            return false;
        }
        let matches = self.chars[self.pos..end].iter().copied().eq(word.chars());
        let boundary = !self
            .chars
            .get(end)
            .is_some_and(|c| c.is_alphanumeric() || *c == '_' || *c == '$');
        if matches && boundary {
            self.pos = end;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT_CONFIG: &str = r"import { defineConfig } from 'vite';

export default defineConfig({
  server: {
    origin: 'http://localhost:5173',
  },
  build: {
    // generate .vite/manifest.json in outDir
    manifest: true,
    rollupOptions: {
      // overwrite default .html entry
      input: '/resources/main.js',
    },
  },
});
";

    #[test]
    fn test_find_config_file_priority() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_config_file(dir.path()).is_none());

        std::fs::write(dir.path().join("vite.config.ts"), "export default {}").unwrap();
        assert_eq!(
            find_config_file(dir.path()).unwrap(),
            dir.path().join("vite.config.ts")
        );

        std::fs::write(dir.path().join("vite.config.js"), "export default {}").unwrap();
        assert_eq!(
            find_config_file(dir.path()).unwrap(),
            dir.path().join("vite.config.js")
        );
    }

    #[test]
    fn test_parse_project_config() {
        let config = parse_config_source(PROJECT_CONFIG).unwrap();
        assert_eq!(config.origin(), "http://localhost:5173");
        assert!(config.manifest());
        assert_eq!(config.input(), "/resources/main.js");
        assert_eq!(config, ViteConfig::default());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let a = parse_config_source(PROJECT_CONFIG).unwrap();
        let b = parse_config_source(PROJECT_CONFIG).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_plain_object_export() {
        let source = r#"
            export default {
                server: { "origin": "https://cdn.example.com" },
                build: { manifest: false, rollupOptions: { input: `/src/app.ts` } },
            };
        "#;
        let config = parse_config_source(source).unwrap();
        assert_eq!(config.origin(), "https://cdn.example.com");
        assert!(!config.manifest());
        assert_eq!(config.input(), "/src/app.ts");
    }

    #[test]
    fn test_unknown_options_ignored() {
        let source = r"
            export default defineConfig({
                plugins: [],
                server: { origin: 'http://localhost:5173', port: 5173, strictPort: true },
                build: { manifest: true, outDir: 'dist', rollupOptions: { input: '/resources/main.js' } },
            });
        ";
        assert_eq!(parse_config_source(source).unwrap(), ViteConfig::default());
    }

    #[test]
    fn test_manifest_must_be_boolean() {
        let source = r"
            export default {
                server: { origin: 'http://localhost:5173' },
                build: { manifest: 'true', rollupOptions: { input: '/resources/main.js' } },
            };
        ";
        let err = parse_config_source(source).unwrap_err();
        assert_eq!(err.code(), codes::CONFIG_FIELD_TYPE);
        assert!(err.message().contains("build.manifest"));
    }

    #[test]
    fn test_origin_must_be_string() {
        let source = r"
            export default {
                server: { origin: 5173 },
                build: { manifest: true, rollupOptions: { input: '/resources/main.js' } },
            };
        ";
        let err = parse_config_source(source).unwrap_err();
        assert_eq!(err.code(), codes::CONFIG_FIELD_TYPE);
        assert!(err.message().contains("server.origin"));
    }

    #[test]
    fn test_missing_input() {
        let source = r"
            export default {
                server: { origin: 'http://localhost:5173' },
                build: { manifest: true, rollupOptions: {} },
            };
        ";
        let err = parse_config_source(source).unwrap_err();
        assert_eq!(err.code(), codes::CONFIG_FIELD_MISSING);
        assert!(err.message().contains("build.rollupOptions.input"));
    }

    #[test]
    fn test_invalid_origin_value() {
        let source = r"
            export default {
                server: { origin: 'localhost:5173' },
                build: { manifest: true, rollupOptions: { input: '/resources/main.js' } },
            };
        ";
        let err = parse_config_source(source).unwrap_err();
        assert_eq!(err.code(), codes::ORIGIN_INVALID);
    }

    #[test]
    fn test_no_default_export() {
        let err = parse_config_source("const config = {};").unwrap_err();
        assert_eq!(err.code(), codes::CONFIG_NO_DEFAULT_EXPORT);

        // Marker inside a comment does not count
        let err = parse_config_source("// export default {}\nmodule.exports = {};").unwrap_err();
        assert_eq!(err.code(), codes::CONFIG_NO_DEFAULT_EXPORT);
    }

    #[test]
    fn test_unterminated_object() {
        let err = parse_config_source("export default { server: { origin: 'x' }").unwrap_err();
        assert_eq!(err.code(), codes::CONFIG_NO_DEFAULT_EXPORT);
    }

    #[test]
    fn test_template_interpolation_is_not_a_string() {
        let source = r"
            export default {
                server: { origin: `http://${host}:5173` },
                build: { manifest: true, rollupOptions: { input: '/resources/main.js' } },
            };
        ";
        let err = parse_config_source(source).unwrap_err();
        assert_eq!(err.code(), codes::CONFIG_FIELD_TYPE);
        assert!(err.message().contains("server.origin"));
    }

    #[test]
    fn test_keyword_boundary() {
        let source = r"
            export default {
                server: { origin: 'http://localhost:5173' },
                build: { manifest: trueish, rollupOptions: { input: '/resources/main.js' } },
            };
        ";
        let err = parse_config_source(source).unwrap_err();
        assert_eq!(err.code(), codes::CONFIG_FIELD_TYPE);
        assert!(err.message().contains("build.manifest"));
    }

    #[test]
    fn test_runtime_values_are_skipped() {
        let source = r"
            import { fileURLToPath, URL } from 'node:url';
            import { defineConfig } from 'vite';
            import laravel from 'laravel-vite-plugin';
            import vue from '@vitejs/plugin-vue';

            export default defineConfig({
              plugins: [laravel({ input: ['resources/main.js'], refresh: true }), vue()],
              resolve: {
                alias: { '@': fileURLToPath(new URL('./src', import.meta.url)) },
              },
              define: { __APP_VERSION__: JSON.stringify(process.env.npm_package_version), ...extra },
              server: {
                origin: 'http://localhost:5173',
                port: Number(process.env.PORT) || 5173,
                cors: true,
              },
              build: {
                manifest: true,
                chunkSizeWarningLimit: 2 * 1024,
                rollupOptions: {
                  input: '/resources/main.js',
                  output: { manualChunks(id) { if (id.includes('node_modules')) { return 'vendor'; } } },
                },
              },
              optimizeDeps: { include: [`lib-${name}`], exclude },
              [computed]: 1,
            });
        ";
        assert_eq!(parse_config_source(source).unwrap(), ViteConfig::default());
    }

    #[test]
    fn test_runtime_value_for_record_field_is_type_error() {
        let source = r"
            export default defineConfig({
                server: { origin: process.env.ORIGIN },
                build: { manifest: true, rollupOptions: { input: '/resources/main.js' } },
            });
        ";
        let err = parse_config_source(source).unwrap_err();
        assert_eq!(err.code(), codes::CONFIG_FIELD_TYPE);
        assert!(err.message().contains("server.origin"));
    }

    #[test]
    fn test_escaped_backslash_before_comment() {
        let source = r"
            export default defineConfig({
                define: { SEP: '\\' }, // it's a separator
                server: { origin: 'http://localhost:5173' },
                build: { manifest: true, rollupOptions: { input: '/resources/main.js' } },
            });
        ";
        assert_eq!(parse_config_source(source).unwrap(), ViteConfig::default());

        let stripped = strip_comments(source);
        assert!(!stripped.contains("separator"));
    }

    #[test]
    fn test_to_js_source_round_trip() {
        let config = ViteConfig::new("https://localhost:8443", false, "/src/main.tsx").unwrap();
        assert_eq!(parse_config_source(&config.to_js_source()).unwrap(), config);
    }

    #[test]
    fn test_to_js_source_escapes_quotes() {
        let config = ViteConfig::new("http://localhost:5173", true, "/it's\\here.js").unwrap();
        assert_eq!(config.input(), "/it's\\here.js");
        assert_eq!(parse_config_source(&config.to_js_source()).unwrap(), config);
    }

    #[test]
    fn test_load_config_discovers_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vite.config.js"), PROJECT_CONFIG).unwrap();

        let (path, config) = load_config(dir.path(), None).unwrap().unwrap();
        assert_eq!(path, dir.path().join("vite.config.js"));
        assert_eq!(config, ViteConfig::default());
    }

    #[test]
    fn test_load_config_none_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(dir.path(), None).unwrap().is_none());
    }

    #[test]
    fn test_load_config_explicit_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("custom.config.js"), PROJECT_CONFIG).unwrap();

        let (path, _) = load_config(dir.path(), Some(Path::new("custom.config.js")))
            .unwrap()
            .unwrap();
        assert_eq!(path, dir.path().join("custom.config.js"));
    }

    #[test]
    fn test_load_config_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path(), Some(Path::new("nope.config.js"))).unwrap_err();
        assert_eq!(err.code(), codes::CONFIG_NOT_FOUND);
    }

    #[test]
    fn test_load_error_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vite.config.js");
        std::fs::write(&path, "export default { server: {} };").unwrap();

        let err = load_config(dir.path(), None).unwrap_err();
        assert_eq!(err.code(), codes::CONFIG_FIELD_MISSING);
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[test]
    fn test_strip_comments_keeps_urls_in_strings() {
        let input = "origin: 'http://localhost:5173', // trailing\n/* block */ x";
        let result = strip_comments(input);
        assert!(result.contains("'http://localhost:5173'"));
        assert!(!result.contains("trailing"));
        assert!(!result.contains("block"));
    }
}
