//! Configuration management for navdex.
//!
//! Parses `navdex.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `index.source` supports `${VAR}` and `${VAR:-default}` expansion before
//! the path is resolved against the config file directory.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

use navdex_index::{Level, LintOptions};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override index source file.
    pub source: Option<PathBuf>,
    /// Override script variable name.
    pub variable: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "navdex.toml";

/// Default index source, relative to the config directory.
const DEFAULT_SOURCE: &str = "html/index.js";

/// Default script variable name.
const DEFAULT_VARIABLE: &str = "index";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Index configuration (paths are relative strings from TOML).
    #[serde(rename = "index")]
    index_raw: IndexConfigRaw,
    /// Lint rule levels.
    pub lint: LintConfig,

    /// Resolved index configuration (set after loading).
    #[serde(skip)]
    pub index: IndexConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw index configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct IndexConfigRaw {
    source: Option<String>,
    variable: Option<String>,
}

/// Resolved index configuration with absolute paths.
#[derive(Debug, Default)]
pub struct IndexConfig {
    /// Index file to load.
    pub source: PathBuf,
    /// Variable name used when writing the script form.
    pub variable: String,
}

/// Lint configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Level for repeated links.
    pub duplicate_links: Level,
    /// Level for page paths without `.html` suffix.
    pub html_suffix: Level,
    /// Level for anchors into pages without their own entry.
    pub orphan_fragments: Level,
    /// Level for entries with neither link nor children.
    pub unlinked_leaves: Level,
}

impl Default for LintConfig {
    fn default() -> Self {
        let defaults = LintOptions::default();
        Self {
            duplicate_links: defaults.duplicate_links,
            html_suffix: defaults.html_suffix,
            orphan_fragments: defaults.orphan_fragments,
            unlinked_leaves: defaults.unlinked_leaves,
        }
    }
}

impl LintConfig {
    /// Lint options for [`navdex_index::lint`].
    ///
    /// With `strict`, every enabled rule is promoted to [`Level::Deny`].
    #[must_use]
    pub fn options(&self, strict: bool) -> LintOptions {
        let level = |level: Level| {
            if strict && level == Level::Warn {
                Level::Deny
            } else {
                level
            }
        };
        LintOptions {
            duplicate_links: level(self.duplicate_links),
            html_suffix: level(self.html_suffix),
            orphan_fragments: level(self.orphan_fragments),
            unlinked_leaves: level(self.unlinked_leaves),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`index.source`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a string to be a valid JavaScript identifier.
fn require_identifier(value: &str, field: &str) -> Result<(), ConfigError> {
    let mut chars = value.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        return Err(ConfigError::Validation(format!(
            "{field} must be a valid identifier, got '{value}'"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `navdex.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        tracing::debug!(
            config = ?config.config_path,
            source = %config.index.source.display(),
            "Loaded configuration"
        );

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source) = &settings.source {
            self.index.source.clone_from(source);
        }
        if let Some(variable) = &settings.variable {
            self.index.variable.clone_from(variable);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_config_from(&cwd)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            index_raw: IndexConfigRaw::default(),
            lint: LintConfig::default(),
            index: IndexConfig {
                source: base.join(DEFAULT_SOURCE),
                variable: DEFAULT_VARIABLE.to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.index.variable, "index.variable")?;
        require_identifier(&self.index.variable, "index.variable")?;
        if self.index.source.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "index.source cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref source) = self.index_raw.source {
            self.index_raw.source = Some(expand::expand_env(source, "index.source")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.index = IndexConfig {
            source: config_dir.join(self.index_raw.source.as_deref().unwrap_or(DEFAULT_SOURCE)),
            variable: self
                .index_raw
                .variable
                .clone()
                .unwrap_or_else(|| DEFAULT_VARIABLE.to_owned()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.index.source, PathBuf::from("/test/html/index.js"));
        assert_eq!(config.index.variable, "index");
        assert_eq!(config.lint.duplicate_links, Level::Warn);
        assert_eq!(config.lint.orphan_fragments, Level::Allow);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.lint.html_suffix, Level::Warn);
        assert!(config.index_raw.source.is_none());
    }

    #[test]
    fn test_parse_lint_config() {
        let toml = r#"
[lint]
duplicate_links = "deny"
html_suffix = "allow"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.lint.duplicate_links, Level::Deny);
        assert_eq!(config.lint.html_suffix, Level::Allow);
        assert_eq!(config.lint.unlinked_leaves, Level::Warn);
    }

    #[test]
    fn test_parse_invalid_lint_level() {
        let toml = r#"
[lint]
duplicate_links = "loud"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[index]
source = "build/html/navtreedata.js"
variable = "NAVTREE"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.index.source,
            PathBuf::from("/project/build/html/navtreedata.js")
        );
        assert_eq!(config.index.variable, "NAVTREE");
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.index.source, PathBuf::from("/project/html/index.js"));
        assert_eq!(config.index.variable, "index");
    }

    #[test]
    fn test_lint_options_strict_promotes_warnings() {
        let lint = LintConfig::default();

        let options = lint.options(true);

        assert_eq!(options.duplicate_links, Level::Deny);
        assert_eq!(options.html_suffix, Level::Deny);
        assert_eq!(options.orphan_fragments, Level::Allow);
        assert_eq!(lint.options(false), LintOptions::default());
    }

    #[test]
    fn test_apply_cli_settings_source() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source: Some(PathBuf::from("/custom/index.js")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.index.source, PathBuf::from("/custom/index.js"));
        assert_eq!(config.index.variable, "index"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.index.source, PathBuf::from("/test/html/index.js"));
        assert_eq!(config.index.variable, "index");
    }

    #[test]
    fn test_expand_env_vars_source() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("NAVDEX_TEST_BUILD_DIR", "out");
        }

        let toml = r#"
[index]
source = "${NAVDEX_TEST_BUILD_DIR}/html/index.js"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.index.source,
            PathBuf::from("/project/out/html/index.js")
        );

        unsafe {
            std::env::remove_var("NAVDEX_TEST_BUILD_DIR");
        }
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navdex.toml");
        std::fs::write(&path, "[index]\nsource = \"docs/index.js\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.index.source, dir.path().join("docs/index.js"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_explicit_path_missing() {
        let dir = tempfile::tempdir().unwrap();

        let err = Config::load(Some(&dir.path().join("navdex.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_with_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navdex.toml");
        std::fs::write(&path, "").unwrap();
        let settings = CliSettings {
            variable: Some("1nvalid".to_owned()),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("index.variable"));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("navdex.toml"), "").unwrap();

        let found = Config::discover_config_from(&nested).unwrap();

        assert_eq!(found, dir.path().join("navdex.toml"));
    }

    #[test]
    fn test_validate_rejects_bad_variable() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.index.variable = "nav-tree".to_owned();

        let err = config.validate().unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("identifier"));
    }

    #[test]
    fn test_validate_rejects_empty_variable() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.index.variable = String::new();

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }
}
