//! API key discovery.
//!
//! Lookup order, first non-empty value wins:
//!
//! 1. the `YOUTUBE_API_KEY` process environment variable
//! 2. a `.env` file at the repository root (nearest ancestor holding `.git`)
//! 3. the per-user file `<config_dir>/yt-radar/config.env`
//!
//! Files are read, never sourced: the process environment is left untouched.
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use radar_common::{ApiKey, RadarError, Result};

pub const KEY_NAME: &str = "YOUTUBE_API_KEY";
pub const APP_DIR: &str = "yt-radar";
pub const USER_ENV_FILE: &str = "config.env";

/// Where a key came from. Shown to the user instead of the key itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    Environment,
    RepoEnvFile(PathBuf),
    UserConfig(PathBuf),
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::Environment => write!(f, "environment ({KEY_NAME})"),
            KeySource::RepoEnvFile(p) => write!(f, "{}", p.display()),
            KeySource::UserConfig(p) => write!(f, "{}", p.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedKey {
    pub key: ApiKey,
    pub source: KeySource,
}

/// `<config_dir>/yt-radar/config.env`, or `None` on platforms without a
/// config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(USER_ENV_FILE))
}

/// `.env` next to the nearest ancestor of `start` that contains `.git`;
/// `start/.env` when no repository root is found.
pub fn repo_env_path(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .unwrap_or(start)
        .join(".env")
}

/// Resolve the key from the real environment and the default file locations.
pub fn resolve_api_key() -> Result<ResolvedKey> {
    let from_env = std::env::var(KEY_NAME).ok();
    let repo_env = std::env::current_dir().ok().map(|cwd| repo_env_path(&cwd));
    let user_env = user_config_path();
    resolve_api_key_from(from_env.as_deref(), repo_env.as_deref(), user_env.as_deref())
}

/// Same as [`resolve_api_key`] with every input supplied by the caller.
pub fn resolve_api_key_from(
    from_env: Option<&str>,
    repo_env: Option<&Path>,
    user_env: Option<&Path>,
) -> Result<ResolvedKey> {
    if let Some(key) = from_env.and_then(ApiKey::new) {
        tracing::debug!(target: "radar.config", source = "environment", "config.api_key.resolved");
        return Ok(ResolvedKey {
            key,
            source: KeySource::Environment,
        });
    }

    let candidates = [
        repo_env.map(|p| (p, KeySource::RepoEnvFile(p.to_path_buf()))),
        user_env.map(|p| (p, KeySource::UserConfig(p.to_path_buf()))),
    ];
    for (path, source) in candidates.into_iter().flatten() {
        if let Some(key) = read_key_file(path) {
            tracing::debug!(target: "radar.config", source = %source, "config.api_key.resolved");
            return Ok(ResolvedKey { key, source });
        }
    }

    let shown = user_env
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| format!("~/.config/{APP_DIR}/{USER_ENV_FILE}"));
    Err(RadarError::MissingApiKey {
        name: KEY_NAME.to_string(),
        path: shown,
    })
}

/// Persist `raw` to the per-user config file. A blank key is ignored.
/// Returns the file written, if any.
pub fn save_api_key(raw: &str) -> Result<Option<PathBuf>> {
    let path = user_config_path()
        .ok_or_else(|| RadarError::Config("no per-user config directory".into()))?;
    save_api_key_to(&path, raw)
}

pub fn save_api_key_to(path: &Path, raw: &str) -> Result<Option<PathBuf>> {
    let Some(key) = ApiKey::new(raw) else {
        return Ok(None);
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{KEY_NAME}={}\n", key.expose()))?;
    tracing::info!(target: "radar.config", path = %path.display(), "config.api_key.saved");
    Ok(Some(path.to_path_buf()))
}

/// Last non-empty `YOUTUBE_API_KEY` assignment in a dotenv file.
/// Unparseable lines are skipped.
fn read_key_file(path: &Path) -> Option<ApiKey> {
    let pairs = dotenvy::from_path_iter(path).ok()?;
    pairs
        .filter_map(std::result::Result::ok)
        .filter(|(name, _)| name == KEY_NAME)
        .filter_map(|(_, value)| ApiKey::new(&value))
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key_file(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn reads_dotenv_lines() {
        let tmp = TempDir::new().unwrap();
        let path = key_file(
            &tmp,
            "a.env",
            "# comment\n\nOTHER=1\nexport YOUTUBE_API_KEY=\"abc\"\n",
        );
        assert_eq!(read_key_file(&path).unwrap().expose(), "abc");

        let path = key_file(&tmp, "b.env", "YOUTUBE_API_KEY='x y'\n");
        assert_eq!(read_key_file(&path).unwrap().expose(), "x y");

        let path = key_file(&tmp, "c.env", "YOUTUBE_API_KEY=\n#YOUTUBE_API_KEY=zzz\n");
        assert!(read_key_file(&path).is_none());
        assert!(read_key_file(&tmp.path().join("missing.env")).is_none());
    }

    #[test]
    fn last_assignment_wins_and_env_is_untouched() {
        let tmp = TempDir::new().unwrap();
        let path = key_file(
            &tmp,
            "d.env",
            "YOUTUBE_API_KEY=first\nYOUTUBE_API_KEY=second\n",
        );
        temp_env::with_var_unset(KEY_NAME, || {
            assert_eq!(read_key_file(&path).unwrap().expose(), "second");
            assert!(std::env::var(KEY_NAME).is_err());
        });
    }

    #[test]
    fn env_wins_over_files() {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join("repo.env");
        fs::write(&repo, "YOUTUBE_API_KEY=from-repo").unwrap();
        let got = resolve_api_key_from(Some("from-env"), Some(&repo), None).unwrap();
        assert_eq!(got.key.expose(), "from-env");
        assert_eq!(got.source, KeySource::Environment);
    }

    #[test]
    fn blank_env_falls_through_to_repo_then_user() {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join("missing.env");
        let user = tmp.path().join("config.env");
        fs::write(&user, "YOUTUBE_API_KEY=from-user\n").unwrap();

        let got = resolve_api_key_from(Some("  "), Some(&repo), Some(&user)).unwrap();
        assert_eq!(got.key.expose(), "from-user");
        assert_eq!(got.source, KeySource::UserConfig(user.clone()));

        fs::write(&repo, "YOUTUBE_API_KEY=from-repo\n").unwrap();
        let got = resolve_api_key_from(None, Some(&repo), Some(&user)).unwrap();
        assert_eq!(got.source, KeySource::RepoEnvFile(repo));
    }

    #[test]
    fn missing_key_names_the_user_file() {
        let tmp = TempDir::new().unwrap();
        let user = tmp.path().join("config.env");
        let err = resolve_api_key_from(None, None, Some(&user)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("YOUTUBE_API_KEY not set."));
        assert!(msg.contains(&user.display().to_string()));
    }

    #[test]
    fn repo_env_is_found_at_git_root() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        let nested = tmp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(repo_env_path(&nested), tmp.path().join(".env"));
    }

    #[test]
    fn save_writes_and_blank_is_noop() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("config.env");
        assert_eq!(save_api_key_to(&path, "   ").unwrap(), None);
        assert!(!path.exists());

        assert_eq!(save_api_key_to(&path, " k3y ").unwrap(), Some(path.clone()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "YOUTUBE_API_KEY=k3y\n");
        let got = resolve_api_key_from(None, None, Some(&path)).unwrap();
        assert_eq!(got.key.expose(), "k3y");
    }
}
