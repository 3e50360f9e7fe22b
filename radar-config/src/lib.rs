//! Loader for yt-radar configuration with YAML + environment overlays.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. built-in defaults (every field has one)
//! 2. an optional YAML file, `<config_dir>/yt-radar/radar.yaml` by default
//! 3. `RADAR__`-prefixed environment variables, `__` separating sections
//!    (`RADAR__SEARCH__PAGES=3`)
//!
//! String values may reference the environment as `${VAR}` and start with
//! `~` for the home directory; both are expanded after merging. The API key is not part of this file, see
//! [`credentials`].
use config::{Config, ConfigError, Environment, File};
use radar_common::observability::LogFormat;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub mod credentials;

pub use credentials::{KeySource, ResolvedKey, resolve_api_key, save_api_key};

/// Rounds of expansion before a self-referencing variable is given up on.
const MAX_EXPANSION_ROUNDS: usize = 8;
pub const CONFIG_FILE: &str = "radar.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub search: SearchDefaults,
    pub comments: CommentDefaults,
    pub log: LogSettings,
}

/// Defaults for the `search` command and the search half of `analyze`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchDefaults {
    pub pages: u32,
    pub per_page: u32,
    pub top: usize,
    /// `views` or `comments`.
    pub sort: String,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            pages: 2,
            per_page: 25,
            top: 20,
            sort: "views".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommentDefaults {
    pub top_videos: usize,
    pub comments_per_video: usize,
    /// `any` or `all`.
    #[serde(rename = "match")]
    pub match_mode: String,
    pub samples_to_show: usize,
}

impl Default for CommentDefaults {
    fn default() -> Self {
        Self {
            top_videos: 10,
            comments_per_video: 200,
            match_mode: "any".into(),
            samples_to_show: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub format: LogFormat,
    pub dir: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".into(),
            format: LogFormat::Text,
            dir: None,
        }
    }
}

/// `<config_dir>/yt-radar/radar.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(credentials::APP_DIR).join(CONFIG_FILE))
}

/// Expand `~` and `$VAR` in every string of the merged tree.
fn expand_placeholders(v: &mut Value) {
    match v {
        Value::String(s) if s.contains(['$', '~']) => *s = expand_str(s),
        Value::Array(items) => items.iter_mut().for_each(expand_placeholders),
        Value::Object(map) => map.values_mut().for_each(expand_placeholders),
        _ => {}
    }
}

/// A variable may name another one, so expansion repeats until the text is
/// stable. Unknown variables leave the text as it was.
fn expand_str(raw: &str) -> String {
    let mut cur = raw.to_string();
    for _ in 0..MAX_EXPANSION_ROUNDS {
        let next = match shellexpand::full(&cur) {
            Ok(next) if next != cur => next.into_owned(),
            _ => break,
        };
        cur = next;
    }
    cur
}

/// Builder hiding the `config` crate wiring.
pub struct RadarConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for RadarConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl RadarConfigLoader {
    /// Defaults plus `RADAR__` environment overrides; no file yet.
    ///
    /// ```
    /// use radar_config::RadarConfigLoader;
    ///
    /// let cfg = RadarConfigLoader::new().load().expect("defaults load");
    /// assert_eq!(cfg.search.pages, 2);
    /// assert_eq!(cfg.comments.match_mode, "any");
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by
    /// suffix. A missing file is skipped.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Attach the per-user default file when the platform has a config dir.
    pub fn with_default_file(self) -> Self {
        match default_config_path() {
            Some(path) => self.with_file(path),
            None => self,
        }
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use radar_config::RadarConfigLoader;
    ///
    /// let cfg = RadarConfigLoader::new()
    ///     .with_yaml_str("search:\n  sort: comments\ncomments:\n  match: all\n")
    ///     .load()
    ///     .unwrap();
    /// assert_eq!(cfg.search.sort, "comments");
    /// assert_eq!(cfg.search.top, 20);
    /// assert_eq!(cfg.comments.match_mode, "all");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Merge every source, expand `${VAR}` placeholders and deserialize.
    pub fn load(self) -> Result<RadarConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("RADAR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_placeholders(&mut v);

        let typed: RadarConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        tracing::debug!(
            target: "radar.config",
            pages = typed.search.pages,
            per_page = typed.search.per_page,
            sort = %typed.search.sort,
            "config.loaded"
        );
        Ok(typed)
    }
}
