//! # Config Module
//!
//! Locates and parses the YAML config file, then merges it with command-line
//! flags into the immutable [`Settings`] used for the rest of the run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::cli::{Args, OutputFormatArg};
use crate::display::{OutputFormat, TimeMode};
use crate::error::ConfigError;

pub const APP_DIR: &str = "twitchlive";
const CONFIG_FILE_NAMES: [&str; 2] = ["config.yaml", "config.yml"];

/// Raw contents of `config.yaml`. Every key is optional at this level;
/// required values are enforced by [`Settings::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, alias = "user_name")]
    pub username: String,
}

/// Everything a run needs, fixed before the first network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub client_id: String,
    pub token: Option<String>,
    pub username: String,
    pub delimiter: String,
    pub output_format: OutputFormat,
    pub time_mode: TimeMode,
}

impl Settings {
    pub fn resolve(args: &Args, file: ConfigFile) -> Result<Self, ConfigError> {
        let client_id = file.client_id.trim().to_string();
        if client_id.is_empty() {
            return Err(ConfigError::MissingClientId);
        }

        let token = file
            .token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        // flag wins over the config file
        let username = args
            .username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(file.username.trim())
            .to_string();
        if username.is_empty() {
            return Err(ConfigError::MissingUsername);
        }

        let output_format = match args.output_format {
            OutputFormatArg::Basic => OutputFormat::Basic,
            OutputFormatArg::Table => OutputFormat::Table,
            OutputFormatArg::Json => OutputFormat::Json,
        };

        Ok(Settings {
            client_id,
            token,
            username,
            delimiter: args.delimiter.clone(),
            output_format,
            time_mode: TimeMode::from_flags(args.timestamp, args.timestamp_seconds),
        })
    }
}

/// Directories searched for the config file, most specific first:
/// the platform config dir (`$XDG_CONFIG_HOME` on Linux), then `~/.config`.
pub fn default_search_dirs() -> Vec<PathBuf> {
    let Some(base) = directories::BaseDirs::new() else {
        return Vec::new();
    };
    search_dirs(Some(base.config_dir()), Some(base.home_dir()))
}

pub fn search_dirs(config_home: Option<&Path>, home: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    if let Some(dir) = config_home {
        dirs.push(dir.join(APP_DIR));
    }
    if let Some(home) = home {
        let fallback = home.join(".config").join(APP_DIR);
        if !dirs.contains(&fallback) {
            dirs.push(fallback);
        }
    }
    dirs
}

/// First existing `config.yaml`/`config.yml` across `dirs`.
pub fn find_config_file(dirs: &[PathBuf]) -> Result<PathBuf, ConfigError> {
    let mut searched = Vec::new();
    for dir in dirs {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Ok(candidate);
            }
            searched.push(candidate);
        }
    }
    Err(ConfigError::NotFound { searched })
}

pub fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    // an empty file parses as YAML null
    if raw.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the config named on the command line, or the first one found on the
/// default search path, and merge it with the flags.
pub fn load_settings(args: &Args) -> Result<Settings, ConfigError> {
    let path = match args.config.as_ref() {
        Some(explicit) => explicit.clone(),
        None => find_config_file(&default_search_dirs())?,
    };
    debug!(path = %path.display(), "reading config file");
    let file = load_config_file(&path)?;
    Settings::resolve(args, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["twitchlive"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn file(client_id: &str, username: &str) -> ConfigFile {
        ConfigFile {
            client_id: client_id.to_string(),
            token: None,
            username: username.to_string(),
        }
    }

    #[test]
    fn flag_username_overrides_file() {
        let settings = Settings::resolve(&args(&["--username", "flaguser"]), file("cid", "fileuser"))
            .unwrap();
        assert_eq!(settings.username, "flaguser");
        assert_eq!(settings.client_id, "cid");
    }

    #[test]
    fn empty_flag_falls_back_to_file() {
        let settings =
            Settings::resolve(&args(&["--username", ""]), file("cid", "fileuser")).unwrap();
        assert_eq!(settings.username, "fileuser");
    }

    #[test]
    fn missing_values_are_errors() {
        assert!(matches!(
            Settings::resolve(&args(&[]), file("", "someone")),
            Err(ConfigError::MissingClientId)
        ));
        assert!(matches!(
            Settings::resolve(&args(&[]), file("cid", "")),
            Err(ConfigError::MissingUsername)
        ));
    }

    #[test]
    fn blank_token_is_dropped() {
        let mut f = file("cid", "u");
        f.token = Some("  ".to_string());
        let settings = Settings::resolve(&args(&[]), f).unwrap();
        assert_eq!(settings.token, None);
    }

    #[test]
    fn seconds_flag_wins_over_timestamp() {
        let settings = Settings::resolve(
            &args(&["--timestamp", "--timestamp-seconds"]),
            file("cid", "u"),
        )
        .unwrap();
        assert_eq!(settings.time_mode, TimeMode::EpochSeconds);
    }

    #[test]
    fn search_dirs_dedupes_identical_locations() {
        let home = Path::new("/home/me");
        let dirs = search_dirs(Some(&home.join(".config")), Some(home));
        assert_eq!(dirs, vec![PathBuf::from("/home/me/.config/twitchlive")]);

        let dirs = search_dirs(Some(Path::new("/xdg")), Some(home));
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/xdg/twitchlive"),
                PathBuf::from("/home/me/.config/twitchlive")
            ]
        );
    }
}
