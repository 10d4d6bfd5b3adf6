//! Filter configuration for the organizer.
//!
//! An optional TOML file controls which directory entries the organizer is
//! allowed to touch. The default configuration matches the built-in behavior
//! exactly: hidden files are left alone and everything else is organized.
//!
//! ```toml
//! organize_hidden = false
//!
//! [exclude]
//! filenames = [".DS_Store", "Thumbs.db"]
//! extensions = ["tmp", "part"]
//! globs = ["*.crdownload"]
//! regex = ['^~\$']
//!
//! [include]
//! globs = []
//! ```

use glob::Pattern;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised while loading or compiling a filter configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    NotFound(PathBuf),
    /// The file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// The file is not valid TOML for this schema.
    Parse(String),
    /// A glob pattern failed to compile.
    BadGlob(String),
    /// A regex pattern failed to compile.
    BadRegex { pattern: String, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) => {
                write!(f, "configuration file not found: {}", path.display())
            }
            ConfigError::Io { path, source } => {
                write!(f, "cannot read configuration {}: {}", path.display(), source)
            }
            ConfigError::Parse(msg) => write!(f, "invalid configuration: {}", msg),
            ConfigError::BadGlob(pattern) => write!(f, "invalid glob pattern '{}'", pattern),
            ConfigError::BadRegex { pattern, reason } => {
                write!(f, "invalid regex pattern '{}': {}", pattern, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Deserialized filter rules, straight from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    /// Organize hidden files too (names starting with `.`). Off by default.
    #[serde(default)]
    pub organize_hidden: bool,

    #[serde(default)]
    pub exclude: ExcludeRules,

    #[serde(default)]
    pub include: IncludeRules,
}

/// Entries matching any of these rules are left in place.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExcludeRules {
    /// Exact file names, e.g. `"Thumbs.db"`.
    #[serde(default)]
    pub filenames: Vec<String>,
    /// Extensions without the dot, matched case-insensitively.
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Glob patterns matched against the file name.
    #[serde(default)]
    pub globs: Vec<String>,
    /// Regex patterns matched against the file name.
    #[serde(default)]
    pub regex: Vec<String>,
}

/// Whitelist globs; a match here overrides every exclude rule.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncludeRules {
    #[serde(default)]
    pub globs: Vec<String>,
}

impl FilterConfig {
    /// Loads a configuration, trying in order: the explicit `path`, a
    /// `.tidydesk.toml` in the current directory, then
    /// `~/.config/tidydesk/config.toml`, falling back to the defaults.
    ///
    /// Only an explicitly provided path is required to exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load_file(path);
        }

        let local = PathBuf::from(".tidydesk.toml");
        if local.exists() {
            return Self::load_file(&local);
        }

        if let Ok(home) = std::env::var("HOME") {
            let user = PathBuf::from(home)
                .join(".config")
                .join("tidydesk")
                .join("config.toml");
            if user.exists() {
                return Self::load_file(&user);
            }
        }

        Ok(Self::default())
    }

    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validates and compiles all patterns into a matcher.
    pub fn compile(self) -> Result<FileFilters, ConfigError> {
        let exclude_globs = compile_globs(&self.exclude.globs)?;
        let include_globs = compile_globs(&self.include.globs)?;
        let exclude_regex = self
            .exclude
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::BadRegex {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FileFilters {
            organize_hidden: self.organize_hidden,
            exclude_filenames: self.exclude.filenames.into_iter().collect(),
            exclude_extensions: self
                .exclude
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            exclude_globs,
            exclude_regex,
            include_globs,
        })
    }
}

fn compile_globs(patterns: &[String]) -> Result<Vec<Pattern>, ConfigError> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).map_err(|_| ConfigError::BadGlob(p.clone())))
        .collect()
}

/// Compiled filter rules; patterns are validated once, matching is per name.
pub struct FileFilters {
    organize_hidden: bool,
    exclude_filenames: HashSet<String>,
    exclude_extensions: HashSet<String>,
    exclude_globs: Vec<Pattern>,
    exclude_regex: Vec<Regex>,
    include_globs: Vec<Pattern>,
}

impl Default for FileFilters {
    /// The built-in rules: skip hidden files, organize everything else.
    fn default() -> Self {
        Self {
            organize_hidden: false,
            exclude_filenames: HashSet::new(),
            exclude_extensions: HashSet::new(),
            exclude_globs: Vec::new(),
            exclude_regex: Vec::new(),
            include_globs: Vec::new(),
        }
    }
}

impl FileFilters {
    /// Whether the organizer may touch the file named `file_name`.
    ///
    /// Rule order, first hit wins: include whitelist, hidden-file skip, exact
    /// filename, extension, glob, regex; otherwise the file is organized.
    pub fn should_organize(&self, file_name: &str) -> bool {
        if self.include_globs.iter().any(|g| g.matches(file_name)) {
            return true;
        }
        if !self.organize_hidden && file_name.starts_with('.') {
            return false;
        }
        if self.exclude_filenames.contains(file_name) {
            return false;
        }
        if let Some(ext) = Path::new(file_name).extension() {
            let ext = ext.to_string_lossy().to_lowercase();
            if self.exclude_extensions.contains(&ext) {
                return false;
            }
        }
        if self.exclude_globs.iter().any(|g| g.matches(file_name)) {
            return false;
        }
        if self.exclude_regex.iter().any(|r| r.is_match(file_name)) {
            return false;
        }
        true
    }
}
