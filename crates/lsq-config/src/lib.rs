//! Configuration management for lsq.
//!
//! Parses `lsq.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [graph]
//! dir = "graph"
//!
//! [blog]
//! dir = "blog"
//! unquoted_properties = ["date", "public", "slug"]
//!
//! [assets]
//! prefix = "/images"
//! output_dir = "static/images"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! All string values support `${VAR}` and `${VAR:-default}`.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override graph directory.
    pub graph_dir: Option<PathBuf>,
    /// Override blog directory.
    pub blog_dir: Option<PathBuf>,
    /// Override the unquoted frontmatter properties.
    pub unquoted_properties: Option<Vec<String>>,
    /// Override the image URL prefix.
    pub image_prefix: Option<String>,
    /// Override the asset output directory (relative to the blog directory).
    pub asset_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "lsq.toml";

/// Default URL prefix for rewritten image links.
const DEFAULT_IMAGE_PREFIX: &str = "/images";

/// Application configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Graph section (paths are relative strings from TOML).
    graph: GraphConfigRaw,
    /// Blog section (paths are relative strings from TOML).
    blog: BlogConfigRaw,
    /// Assets section.
    assets: AssetsConfigRaw,

    /// Resolved export configuration (set after loading).
    #[serde(skip)]
    pub export: ExportConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct GraphConfigRaw {
    dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BlogConfigRaw {
    dir: Option<String>,
    unquoted_properties: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct AssetsConfigRaw {
    prefix: Option<String>,
    output_dir: Option<String>,
}

/// Resolved export configuration.
///
/// Paths from the config file are resolved against its directory; CLI
/// overrides are kept as given.
#[derive(Debug)]
pub struct ExportConfig {
    /// Root of the outline graph.
    pub graph_dir: Option<PathBuf>,
    /// Destination root for published pages.
    pub blog_dir: Option<PathBuf>,
    /// Attribute names written without quotes in frontmatter.
    pub unquoted_properties: Vec<String>,
    /// URL prefix for rewritten image links.
    pub image_prefix: String,
    /// Asset output directory, relative to the blog directory.
    pub asset_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            graph_dir: None,
            blog_dir: None,
            unquoted_properties: Vec::new(),
            image_prefix: DEFAULT_IMAGE_PREFIX.to_owned(),
            asset_dir: None,
        }
    }
}

impl ExportConfig {
    /// Graph and blog directories, both required for an export.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if either is unset or they are equal.
    pub fn require_dirs(&self) -> Result<(&Path, &Path), ConfigError> {
        let graph_dir = self.graph_dir.as_deref().ok_or_else(|| {
            ConfigError::Validation("graph.dir is required (config or --graph-dir)".to_owned())
        })?;
        let blog_dir = self.blog_dir.as_deref().ok_or_else(|| {
            ConfigError::Validation("blog.dir is required (config or --blog-dir)".to_owned())
        })?;
        if graph_dir == blog_dir {
            return Err(ConfigError::Validation(
                "graph.dir and blog.dir must be different directories".to_owned(),
            ));
        }
        Ok((graph_dir, blog_dir))
    }

    /// Absolute asset output directory, if asset copying is enabled.
    #[must_use]
    pub fn asset_output_dir(&self) -> Option<PathBuf> {
        let asset_dir = self.asset_dir.as_ref()?;
        let blog_dir = self.blog_dir.as_ref()?;
        Some(blog_dir.join(asset_dir))
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
        /// Config field path (e.g., "`graph.dir`").
        field: String,
        /// Error message (e.g., "${`GRAPH_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `lsq.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, so CLI
    /// arguments take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
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
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let export = &mut self.export;
        if let Some(graph_dir) = &settings.graph_dir {
            export.graph_dir = Some(graph_dir.clone());
        }
        if let Some(blog_dir) = &settings.blog_dir {
            export.blog_dir = Some(blog_dir.clone());
        }
        if let Some(unquoted) = &settings.unquoted_properties {
            export.unquoted_properties.clone_from(unquoted);
        }
        if let Some(prefix) = &settings.image_prefix {
            export.image_prefix.clone_from(prefix);
        }
        if let Some(asset_dir) = &settings.asset_dir {
            export.asset_dir = Some(asset_dir.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefix = &self.export.image_prefix;
        // A relative prefix would be picked up again as a relative asset link.
        if prefix.starts_with("./") || prefix.starts_with("../") {
            return Err(ConfigError::Validation(format!(
                "assets.prefix must not be a ./ or ../ relative path, got {prefix:?}"
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_opt(&mut self.graph.dir, "graph.dir")?;
        expand::expand_opt(&mut self.blog.dir, "blog.dir")?;
        expand::expand_opt(&mut self.assets.prefix, "assets.prefix")?;
        expand::expand_opt(&mut self.assets.output_dir, "assets.output_dir")?;
        if let Some(props) = &mut self.blog.unquoted_properties {
            for prop in props.iter_mut() {
                *prop = expand::expand_env(prop, "blog.unquoted_properties")?;
            }
        }
        Ok(())
    }

    /// Resolve raw values into [`ExportConfig`], with paths relative to the
    /// config file directory.
    fn resolve(&mut self, config_dir: &Path) {
        self.export = ExportConfig {
            graph_dir: self.graph.dir.as_deref().map(|d| config_dir.join(d)),
            blog_dir: self.blog.dir.as_deref().map(|d| config_dir.join(d)),
            unquoted_properties: self.blog.unquoted_properties.clone().unwrap_or_default(),
            image_prefix: self
                .assets
                .prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGE_PREFIX.to_owned()),
            asset_dir: self.assets.output_dir.as_deref().map(PathBuf::from),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.export.graph_dir.is_none());
        assert!(config.export.blog_dir.is_none());
        assert!(config.export.unquoted_properties.is_empty());
        assert_eq!(config.export.image_prefix, "/images");
        assert!(config.export.asset_output_dir().is_none());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve(Path::new("/project"));
        assert!(config.export.graph_dir.is_none());
        assert_eq!(config.export.image_prefix, "/images");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[graph]
dir = "notes"

[blog]
dir = "site/content"
unquoted_properties = ["date", "public"]

[assets]
prefix = "/img"
output_dir = "static/img"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/project"));

        assert_eq!(config.export.graph_dir, Some(PathBuf::from("/project/notes")));
        assert_eq!(
            config.export.blog_dir,
            Some(PathBuf::from("/project/site/content"))
        );
        assert_eq!(config.export.unquoted_properties, ["date", "public"]);
        assert_eq!(config.export.image_prefix, "/img");
        assert_eq!(
            config.export.asset_output_dir(),
            Some(PathBuf::from("/project/site/content/static/img"))
        );
    }

    #[test]
    fn test_absolute_dirs_kept() {
        let toml = r#"
[graph]
dir = "/data/graph"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/project"));
        assert_eq!(config.export.graph_dir, Some(PathBuf::from("/data/graph")));
    }

    #[test]
    fn test_invalid_unquoted_properties_type() {
        let toml = r#"
[blog]
unquoted_properties = "date"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            graph_dir: Some(PathBuf::from("/graph")),
            blog_dir: Some(PathBuf::from("/blog")),
            unquoted_properties: Some(vec!["date".to_owned()]),
            image_prefix: Some("/static".to_owned()),
            asset_dir: Some(PathBuf::from("static")),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.export.graph_dir, Some(PathBuf::from("/graph")));
        assert_eq!(config.export.blog_dir, Some(PathBuf::from("/blog")));
        assert_eq!(config.export.unquoted_properties, ["date"]);
        assert_eq!(config.export.image_prefix, "/static");
        assert_eq!(
            config.export.asset_output_dir(),
            Some(PathBuf::from("/blog/static"))
        );
    }

    #[test]
    fn test_apply_cli_settings_partial() {
        let toml = r#"
[blog]
dir = "blog"
unquoted_properties = ["date"]
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/project"));
        config.apply_cli_settings(&CliSettings {
            image_prefix: Some("/pics".to_owned()),
            ..Default::default()
        });

        assert_eq!(config.export.blog_dir, Some(PathBuf::from("/project/blog")));
        assert_eq!(config.export.unquoted_properties, ["date"]); // Unchanged
        assert_eq!(config.export.image_prefix, "/pics");
    }

    #[test]
    fn test_require_dirs() {
        let mut config = Config::default();
        let err = config.export.require_dirs().unwrap_err();
        assert!(err.to_string().contains("graph.dir"));

        config.export.graph_dir = Some(PathBuf::from("/graph"));
        let err = config.export.require_dirs().unwrap_err();
        assert!(err.to_string().contains("blog.dir"));

        config.export.blog_dir = Some(PathBuf::from("/graph"));
        assert!(config.export.require_dirs().is_err());

        config.export.blog_dir = Some(PathBuf::from("/blog"));
        let (graph, blog) = config.export.require_dirs().unwrap();
        assert_eq!(graph, Path::new("/graph"));
        assert_eq!(blog, Path::new("/blog"));
    }

    #[test]
    fn test_validate_rejects_relative_prefix() {
        let mut config = Config::default();
        config.export.image_prefix = "../images".to_owned();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        config.export.image_prefix = "./images".to_owned();
        assert!(config.validate().is_err());

        config.export.image_prefix = "images".to_owned();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lsq.toml");
        std::fs::write(&path, "[graph]\ndir = \"graph\"\n[blog]\ndir = \"blog\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.export.graph_dir, Some(dir.path().join("graph")));
        assert_eq!(config.export.blog_dir, Some(dir.path().join("blog")));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/lsq.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lsq.toml");
        std::fs::write(&path, "[graph\n").unwrap();

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_validates_cli_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lsq.toml");
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            image_prefix: Some("./img".to_owned()),
            ..Default::default()
        };
        let result = Config::load(Some(&path), Some(&settings));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
