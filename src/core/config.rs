//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.agentchat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;

use crate::Theme;
use crate::backend::client::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
use crate::core::agents::{Agent, default_agents};
use crate::reply::{DEFAULT_REPLY_DELAY, DEFAULT_REPLY_TEXT};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    /// Seed agents. Empty means the built-in defaults.
    #[serde(default)]
    pub agents: Vec<Agent>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub theme: Option<Theme>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    pub reply_delay_ms: Option<u64>,
    pub reply_text: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub sync_created_agents: Option<bool>,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub theme: Option<Theme>,
    pub reply_delay_ms: Option<u64>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub theme: Theme,
    pub reply_delay: Duration,
    pub reply_text: String,
    pub base_url: String,
    pub request_timeout: Duration,
    pub sync_created_agents: bool,
    pub agents: Vec<Agent>,
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

/// Returns the path to `~/.agentchat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".agentchat").join("config.toml"))
}

/// Load config from `~/.agentchat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AppConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(AppConfig::default());
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AppConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# agentchat configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults -> this file -> env vars -> CLI flags.

# [general]
# theme = "lavender"                 # "lavender" or "slate" (or AGENTCHAT_THEME)

# [chat]
# reply_delay_ms = 1000
# reply_text = "This is a simulated AI response."

# [backend]
# base_url = "http://localhost:8000" # Or set AGENTCHAT_BASE_URL
# request_timeout_secs = 30
# sync_created_agents = false        # Add created agents to the sidebar

# [[agents]]
# id = "1"
# name = "General Assistant"
# description = "A general-purpose AI assistant"

# [[agents]]
# id = "2"
# name = "Code Helper"
# description = "Specialized in coding assistance"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_TEMPLATE) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &AppConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &AppConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("AGENTCHAT_BASE_URL"))
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Theme: CLI → env → config → default. Unknown env values are ignored.
    let env_theme = env("AGENTCHAT_THEME").and_then(|raw| match Theme::from_str(&raw, true) {
        Ok(theme) => Some(theme),
        Err(e) => {
            warn!("Ignoring AGENTCHAT_THEME: {e}");
            None
        }
    });
    let theme = cli
        .theme
        .or(env_theme)
        .or(config.general.theme)
        .unwrap_or_default();

    let reply_delay = cli
        .reply_delay_ms
        .or(config.chat.reply_delay_ms)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_REPLY_DELAY);

    let agents = if config.agents.is_empty() {
        default_agents()
    } else {
        config.agents.clone()
    };

    ResolvedConfig {
        theme,
        reply_delay,
        reply_text: config
            .chat
            .reply_text
            .clone()
            .unwrap_or_else(|| DEFAULT_REPLY_TEXT.to_string()),
        base_url,
        request_timeout: config
            .backend
            .request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        sync_created_agents: config.backend.sync_created_agents.unwrap_or(false),
        agents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert!(config.agents.is_empty());
        assert!(config.backend.base_url.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&AppConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, "http://localhost:8000");
        assert_eq!(resolved.reply_delay, Duration::from_millis(1000));
        assert_eq!(resolved.reply_text, DEFAULT_REPLY_TEXT);
        assert_eq!(resolved.request_timeout, Duration::from_secs(30));
        assert_eq!(resolved.theme, Theme::Lavender);
        assert!(!resolved.sync_created_agents);
        assert_eq!(resolved.agents, default_agents());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = AppConfig {
            general: GeneralConfig {
                theme: Some(Theme::Slate),
            },
            chat: ChatConfig {
                reply_delay_ms: Some(250),
                reply_text: Some("Canned.".to_string()),
            },
            backend: BackendConfig {
                base_url: Some("http://10.0.0.2:9000".to_string()),
                request_timeout_secs: Some(5),
                sync_created_agents: Some(true),
            },
            agents: vec![Agent::new("a", "Alpha", "First")],
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.theme, Theme::Slate);
        assert_eq!(resolved.reply_delay, Duration::from_millis(250));
        assert_eq!(resolved.reply_text, "Canned.");
        assert_eq!(resolved.base_url, "http://10.0.0.2:9000");
        assert_eq!(resolved.request_timeout, Duration::from_secs(5));
        assert!(resolved.sync_created_agents);
        assert_eq!(resolved.agents.len(), 1);
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = AppConfig {
            backend: BackendConfig {
                base_url: Some("http://from-config".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "AGENTCHAT_BASE_URL" => Some("http://from-env".to_string()),
            "AGENTCHAT_THEME" => Some("SLATE".to_string()),
            _ => None,
        };

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.base_url, "http://from-env");
        assert_eq!(resolved.theme, Theme::Slate);

        let cli = CliOverrides {
            base_url: Some("http://from-cli".to_string()),
            theme: Some(Theme::Lavender),
            reply_delay_ms: Some(10),
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.base_url, "http://from-cli");
        assert_eq!(resolved.theme, Theme::Lavender);
        assert_eq!(resolved.reply_delay, Duration::from_millis(10));
    }

    #[test]
    fn test_unknown_env_theme_is_ignored() {
        let env = |key: &str| (key == "AGENTCHAT_THEME").then(|| "neon".to_string());
        let resolved = resolve_with_env(&AppConfig::default(), &CliOverrides::default(), env);
        assert_eq!(resolved.theme, Theme::Lavender);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
theme = "slate"

[chat]
reply_delay_ms = 1500

[backend]
base_url = "http://192.168.1.100:8000"
sync_created_agents = true

[[agents]]
id = "r"
name = "Researcher"
description = "Finds things"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.theme, Some(Theme::Slate));
        assert_eq!(config.chat.reply_delay_ms, Some(1500));
        assert!(config.chat.reply_text.is_none());
        assert_eq!(config.backend.sync_created_agents, Some(true));
        assert_eq!(config.agents, vec![Agent::new("r", "Researcher", "Finds things")]);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config: AppConfig = toml::from_str("[chat]\nreply_text = \"hi\"\n").unwrap();
        assert_eq!(config.chat.reply_text.as_deref(), Some("hi"));
        assert!(config.general.theme.is_none());
        assert!(config.agents.is_empty());
    }

    #[test]
    fn test_generated_template_is_valid_toml() {
        let config: AppConfig = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert!(config.backend.base_url.is_none());
    }

    #[test]
    fn test_load_config_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\ntheme = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));

        fs::write(&path, "[general]\ntheme = \"slate\"\n").unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.general.theme, Some(Theme::Slate));
    }
}
