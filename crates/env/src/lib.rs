//! Environment lookups layered over an optional `KEY=VALUE` file.
//!
//! The process environment always wins: the file only supplies keys the process environment does
//! not define. The process environment itself is never modified.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvFileError {
    #[error("failed to read env file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parsed contents of a `KEY=VALUE` env file.
#[derive(Debug, Clone, Default)]
pub struct EnvFile {
    vars: HashMap<String, String>,
}

impl EnvFile {
    /// Load and parse an env file. A missing file yields an empty `EnvFile`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load(path: &Path) -> Result<Self, EnvFileError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let file = Self::parse(&contents);
                tracing::debug!(path = %path.display(), keys = file.len(), "loaded env file");
                Ok(file)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(EnvFileError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse env-file contents.
    ///
    /// Blank lines, `#` comments and lines without `=` are skipped. Keys and values are trimmed,
    /// and one layer of matching surrounding quotes is removed from values. When a key repeats,
    /// the first occurrence wins.
    #[must_use]
    pub fn parse(contents: &str) -> Self {
        let mut vars = HashMap::new();
        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            vars.entry(key.to_string())
                .or_insert_with(|| unquote(value.trim()).to_string());
        }
        Self { vars }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

fn unquote(value: &str) -> &str {
    for q in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Process environment lookup used by [`EnvLayer::new`].
#[must_use]
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Process environment first, env file second.
#[derive(Debug, Clone)]
pub struct EnvLayer {
    file: EnvFile,
    process: fn(&str) -> Option<String>,
}

impl Default for EnvLayer {
    fn default() -> Self {
        Self::new(EnvFile::default())
    }
}

impl EnvLayer {
    #[must_use]
    pub fn new(file: EnvFile) -> Self {
        Self::with_process_lookup(file, process_env)
    }

    /// Build a layer with a custom process lookup (tests substitute a fake environment here).
    #[must_use]
    pub fn with_process_lookup(file: EnvFile, process: fn(&str) -> Option<String>) -> Self {
        Self { file, process }
    }

    /// Resolve `key`. A key present in the process environment wins even if its value is empty.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        (self.process)(key).or_else(|| self.file.get(key).map(str::to_string))
    }

    /// Resolve `key`, falling back to an empty string.
    #[must_use]
    pub fn get_or_empty(&self, key: &str) -> String {
        self.get(key).unwrap_or_default()
    }
}
