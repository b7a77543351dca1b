//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.jotter/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! Loading and resolution run before the logger exists (the log file and
//! level are config values), so their diagnostics go into [`Notices`] and
//! are replayed by the caller once logging is up.

use log::Level;
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct JotterConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub notes_dir: Option<String>,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ViewerConfig {
    pub code_theme: Option<String>,
    pub wrap_width: Option<u16>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const NOTES_DIR_ENV: &str = "JOTTER_NOTES_DIR";
pub const LOG_FILE_ENV: &str = "JOTTER_LOG_FILE";
pub const LOG_LEVEL_ENV: &str = "JOTTER_LOG_LEVEL";

pub const DEFAULT_NOTES_DIR: &str = ".jotter";
pub const DEFAULT_LOG_FILE: &str = "jotter.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
pub const DEFAULT_CODE_THEME: &str = "base16-ocean.dark";
pub const DEFAULT_WRAP_WIDTH: u16 = 120;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub notes_dir: PathBuf,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub code_theme: String,
    pub wrap_width: u16,
}

// ============================================================================
// Startup Notices
// ============================================================================

/// Log records produced while loading config, held until a logger exists.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Notices(Vec<(Level, String)>);

impl Notices {
    fn push(&mut self, level: Level, message: String) {
        self.0.push((level, message));
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Level, String)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Send every held record to the installed logger, in order.
    pub fn replay(self) {
        for (level, message) in self.0 {
            log::log!(level, "{message}");
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.jotter/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".jotter").join("config.toml"))
}

/// Load config from `~/.jotter/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `JotterConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config(notices: &mut Notices) -> Result<JotterConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            notices.push(
                Level::Warn,
                "Could not determine home directory, using default config".to_string(),
            );
            return Ok(JotterConfig::default());
        }
    };
    load_config_from(&path, notices)
}

fn load_config_from(path: &Path, notices: &mut Notices) -> Result<JotterConfig, ConfigError> {
    if !path.exists() {
        notices.push(
            Level::Info,
            format!("No config file found, generating default at {}", path.display()),
        );
        generate_default_config(path, notices);
        return Ok(JotterConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: JotterConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    notices.push(Level::Info, format!("Loaded config from {}", path.display()));
    notices.push(Level::Debug, format!("Config: {config:?}"));
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path, notices: &mut Notices) {
    let default_content = r#"# Jotter Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# notes_dir = ".jotter"              # Or set JOTTER_NOTES_DIR, or pass --notes-dir
# log_file = "jotter.log"            # Or set JOTTER_LOG_FILE
# log_level = "debug"                # "off", "error", "warn", "info", "debug", "trace"

# [viewer]
# code_theme = "base16-ocean.dark"   # Any syntect default theme
# wrap_width = 120
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        notices.push(Level::Warn, format!("Failed to create config directory: {e}"));
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        notices.push(Level::Warn, format!("Failed to write default config: {e}"));
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_notes_dir` is the `--notes-dir` flag (None = not specified).
pub fn resolve(
    config: &JotterConfig,
    cli_notes_dir: Option<&str>,
    notices: &mut Notices,
) -> ResolvedConfig {
    resolve_with_env(config, cli_notes_dir, |key| std::env::var(key).ok(), notices)
}

fn resolve_with_env(
    config: &JotterConfig,
    cli_notes_dir: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
    notices: &mut Notices,
) -> ResolvedConfig {
    // Notes directory: CLI → env → config → default
    let notes_dir = cli_notes_dir
        .map(|s| s.to_string())
        .or_else(|| env(NOTES_DIR_ENV).filter(|dir| !dir.is_empty()))
        .or_else(|| config.general.notes_dir.clone())
        .unwrap_or_else(|| DEFAULT_NOTES_DIR.to_string());

    // Log file: env → config → default
    let log_file = env(LOG_FILE_ENV)
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    // Log level: env → config → default; unparseable values fall back
    let log_level = env(LOG_LEVEL_ENV)
        .or_else(|| config.general.log_level.clone())
        .and_then(|level| match level.parse::<LevelFilter>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                notices.push(
                    Level::Warn,
                    format!("Unknown log level {level:?}, using {DEFAULT_LOG_LEVEL}"),
                );
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        notes_dir: PathBuf::from(notes_dir),
        log_file: PathBuf::from(log_file),
        log_level,
        code_theme: config
            .viewer
            .code_theme
            .clone()
            .unwrap_or_else(|| DEFAULT_CODE_THEME.to_string()),
        wrap_width: config
            .viewer
            .wrap_width
            .filter(|width| *width > 0)
            .unwrap_or(DEFAULT_WRAP_WIDTH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = JotterConfig::default();
        assert!(config.general.notes_dir.is_none());
        assert!(config.viewer.code_theme.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved =
            resolve_with_env(&JotterConfig::default(), None, no_env, &mut Notices::default());
        assert_eq!(resolved.notes_dir, PathBuf::from(DEFAULT_NOTES_DIR));
        assert_eq!(resolved.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(resolved.code_theme, DEFAULT_CODE_THEME);
        assert_eq!(resolved.wrap_width, DEFAULT_WRAP_WIDTH);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = JotterConfig {
            general: GeneralConfig {
                notes_dir: Some("/tmp/notes".to_string()),
                log_file: Some("/tmp/jotter.log".to_string()),
                log_level: Some("warn".to_string()),
            },
            viewer: ViewerConfig {
                code_theme: Some("InspiredGitHub".to_string()),
                wrap_width: Some(80),
            },
        };
        let resolved = resolve_with_env(&config, None, no_env, &mut Notices::default());
        assert_eq!(resolved.notes_dir, PathBuf::from("/tmp/notes"));
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/jotter.log"));
        assert_eq!(resolved.log_level, LevelFilter::Warn);
        assert_eq!(resolved.code_theme, "InspiredGitHub");
        assert_eq!(resolved.wrap_width, 80);
    }

    #[test]
    fn test_env_overrides_config_file() {
        let config = JotterConfig {
            general: GeneralConfig {
                notes_dir: Some("from-file".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env: HashMap<&str, &str> = HashMap::from([(NOTES_DIR_ENV, "from-env")]);
        let resolved = resolve_with_env(
            &config,
            None,
            |key| env.get(key).map(|v| v.to_string()),
            &mut Notices::default(),
        );
        assert_eq!(resolved.notes_dir, PathBuf::from("from-env"));
    }

    #[test]
    fn test_empty_env_var_is_ignored() {
        let resolved = resolve_with_env(
            &JotterConfig::default(),
            None,
            |_| Some(String::new()),
            &mut Notices::default(),
        );
        assert_eq!(resolved.notes_dir, PathBuf::from(DEFAULT_NOTES_DIR));
    }

    #[test]
    fn test_resolve_cli_notes_dir_wins() {
        let env: HashMap<&str, &str> = HashMap::from([(NOTES_DIR_ENV, "from-env")]);
        let resolved = resolve_with_env(
            &JotterConfig::default(),
            Some("from-cli"),
            |key| env.get(key).map(|v| v.to_string()),
            &mut Notices::default(),
        );
        assert_eq!(resolved.notes_dir, PathBuf::from("from-cli"));
    }

    #[test]
    fn test_bad_log_level_falls_back() {
        let config = JotterConfig {
            general: GeneralConfig {
                log_level: Some("loud".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut notices = Notices::default();
        let resolved = resolve_with_env(&config, None, no_env, &mut notices);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);

        // Held for the caller to log once the logger is installed
        let held: Vec<_> = notices.iter().cloned().collect();
        assert_eq!(held.len(), 1);
        assert_eq!(held[0].0, Level::Warn);
        assert!(held[0].1.contains("\"loud\""));
    }

    #[test]
    fn test_valid_settings_leave_no_notices() {
        let mut notices = Notices::default();
        resolve_with_env(&JotterConfig::default(), None, no_env, &mut notices);
        assert!(notices.is_empty());
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[viewer]
wrap_width = 72
"#;
        let config: JotterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.viewer.wrap_width, Some(72));
        assert!(config.viewer.code_theme.is_none());
        assert!(config.general.notes_dir.is_none());
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut notices = Notices::default();
        let config = load_config_from(&path, &mut notices).unwrap();

        assert!(config.general.notes_dir.is_none());
        let generated = fs::read_to_string(&path).unwrap();
        assert!(generated.starts_with("# Jotter Configuration"));
        // The generated file is all comments, so it must parse back to defaults
        let reparsed: JotterConfig = toml::from_str(&generated).unwrap();
        assert!(reparsed.general.log_file.is_none());
        assert!(notices.iter().any(|(level, message)| {
            *level == Level::Info && message.contains("generating default")
        }));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\nnotes_dir = 1").unwrap();

        let result = load_config_from(&path, &mut Notices::default());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
