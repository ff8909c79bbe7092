//! Credential and client settings resolution.
//!
//! Priority: command-line flags, then environment (handled by clap's `env`),
//! then the JSON config file.

use log::warn;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Args;
use crate::client::{DEFAULT_LANGUAGE, Session};

pub const CONFIG_PATH_ENV: &str = "GENSHINSTATS_CONFIG";

/// Contents of `config.json`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct FileConfig {
    pub account_id: Option<u64>,
    pub cookie_token: Option<String>,
    pub lang: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub account_id: Option<u64>,
    pub cookie_token: Option<String>,
    pub language: String,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Session carrying the configured language and, when both halves are
    /// known, the login cookie.
    pub fn session(&self) -> Session {
        let mut session = Session::with_language(&self.language);
        if let (Some(id), Some(token)) = (self.account_id, self.cookie_token.as_deref()) {
            session.set_cookie(id, token);
        }
        session
    }
}

pub fn config_path_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(p) = env::var(CONFIG_PATH_ENV) {
        let p = p.trim();
        if !p.is_empty() {
            candidates.push(PathBuf::from(p));
        }
    }
    if let Some(b) = directories::BaseDirs::new() {
        candidates.push(b.config_dir().join("genshinstats").join("config.json"));
    }
    candidates
}

/// First readable config file, if any. Unparseable files are skipped with a
/// warning rather than aborting the command.
pub fn read_config_file() -> Option<FileConfig> {
    config_path_candidates()
        .into_iter()
        .filter(|path| path.is_file())
        .find_map(|path| parse_config_file(&path))
}

fn parse_config_file(path: &Path) -> Option<FileConfig> {
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<FileConfig>(&content) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                warn!("ignoring {}: {}", path.display(), e);
                None
            }
        },
        Err(e) => {
            warn!("cannot read {}: {}", path.display(), e);
            None
        }
    }
}

pub fn resolve_config(args: &Args) -> Config {
    let file = read_config_file().unwrap_or_default();
    merge(args, file)
}

fn merge(args: &Args, file: FileConfig) -> Config {
    let language = args
        .lang
        .clone()
        .or(file.lang)
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    Config {
        account_id: args.account_id.or(file.account_id),
        cookie_token: args.cookie_token.clone().or(file.cookie_token),
        language,
        timeout: args
            .timeout_secs
            .or(file.timeout_secs)
            .filter(|s| *s > 0)
            .map(Duration::from_secs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["genshinstats"];
        argv.extend_from_slice(extra);
        argv.extend_from_slice(&["search", "hu tao"]);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_cli_beats_file() {
        let file = FileConfig {
            account_id: Some(1),
            cookie_token: Some("file".to_string()),
            lang: Some("zh-cn".to_string()),
            timeout_secs: Some(30),
        };
        let cfg = merge(
            &args(&["--account-id", "2", "--cookie-token", "cli", "--lang", "ja-jp"]),
            file,
        );
        assert_eq!(cfg.account_id, Some(2));
        assert_eq!(cfg.cookie_token.as_deref(), Some("cli"));
        assert_eq!(cfg.language, "ja-jp");
        assert_eq!(cfg.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_defaults_without_anything() {
        let cfg = merge(&args(&[]), FileConfig::default());
        assert_eq!(cfg.language, "en-us");
        assert_eq!(cfg.timeout, None);
        assert!(cfg.session().cookie().is_none());
    }

    #[test]
    fn test_session_needs_both_cookie_halves() {
        let cfg = merge(
            &args(&[]),
            FileConfig {
                account_id: Some(7),
                ..Default::default()
            },
        );
        assert!(cfg.session().cookie().is_none());

        let cfg = merge(
            &args(&["--cookie-token", "tok"]),
            FileConfig {
                account_id: Some(7),
                ..Default::default()
            },
        );
        assert_eq!(
            cfg.session().cookie(),
            Some("account_id=7; cookie_token=tok")
        );
    }

    #[test]
    #[serial_test::serial]
    fn test_read_config_file_from_env_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"account_id": 71234567, "cookie_token": "abc", "timeout_secs": 5}"#,
        )
        .unwrap();
        // SAFETY: Test runs serially, no concurrent env access
        unsafe { env::set_var(CONFIG_PATH_ENV, path.to_str().unwrap()) };

        let cfg = read_config_file().unwrap();
        assert_eq!(cfg.account_id, Some(71234567));
        assert_eq!(cfg.cookie_token.as_deref(), Some("abc"));
        assert_eq!(cfg.timeout_secs, Some(5));

        unsafe { env::remove_var(CONFIG_PATH_ENV) };
    }

    #[test]
    fn test_malformed_config_file_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(parse_config_file(&path), None);
        assert_eq!(parse_config_file(&temp_dir.path().join("missing.json")), None);
    }

    #[test]
    #[serial_test::serial]
    fn test_env_path_is_first_candidate() {
        // SAFETY: Test runs serially, no concurrent env access
        unsafe { env::set_var(CONFIG_PATH_ENV, "/tmp/genshinstats-test.json") };
        let candidates = config_path_candidates();
        assert_eq!(
            candidates.first(),
            Some(&PathBuf::from("/tmp/genshinstats-test.json"))
        );
        unsafe { env::remove_var(CONFIG_PATH_ENV) };
    }
}
