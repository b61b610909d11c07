use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dailyquote_core::badge::BadgeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Keymap {
    pub quit: String,
    pub new_quote: String,
    pub toggle_favorite: String,
    pub share: String,
    pub show_home: String,
    pub show_favorites: String,
    pub select_up: String,
    pub select_down: String,
    pub remove_favorite: String,
    pub clear_favorites: String,
    pub help: String,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            new_quote: "n".to_string(),
            toggle_favorite: "f".to_string(),
            share: "s".to_string(),
            show_home: "1".to_string(),
            show_favorites: "2".to_string(),
            select_up: "up".to_string(),
            select_down: "down".to_string(),
            remove_favorite: "d".to_string(),
            clear_favorites: "ctrl-d".to_string(),
            help: "?".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    #[default]
    Local,
    Remote,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct QuotesConfig {
    pub source: QuoteSource,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            source: QuoteSource::Local,
            base_url: dailyquote_core::remote::DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BadgeSync {
    #[default]
    Push,
    Poll,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BadgeConfig {
    pub mode: BadgeSync,
    pub poll_interval_ms: u64,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            mode: BadgeSync::Push,
            poll_interval_ms: 500,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ShareConfig {
    /// Program and arguments; the quote is written to its stdin
    pub command: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub keymap: Keymap,
    pub quotes: QuotesConfig,
    pub badge: BadgeConfig,
    pub share: ShareConfig,
}

impl Config {
    pub fn badge_mode(&self) -> BadgeMode {
        match self.badge.mode {
            BadgeSync::Push => BadgeMode::Push,
            BadgeSync::Poll => BadgeMode::Poll(Duration::from_millis(self.badge.poll_interval_ms)),
        }
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.quotes.timeout_secs)
    }
}

/// Load the config file, writing the defaults first if it does not exist
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        let config = Config::default();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let toml = toml::to_string(&config).context("Failed to serialize default config")?;
        fs::write(path, toml)
            .with_context(|| format!("Failed to write default config {}", path.display()))?;
        return Ok(config);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config file {}", path.display()))
}

/// Does `key` match a binding such as `"q"`, `"ctrl-d"` or `"enter"`?
///
/// Shift is ignored for character keys, so `"?"` matches however the
/// terminal reports it.
pub fn key_matches(binding: &str, key: &KeyEvent) -> bool {
    let binding = binding.trim().to_lowercase();
    let mut parts: Vec<&str> = binding.split('-').collect();
    let name = match parts.pop() {
        Some(name) if !name.is_empty() => name,
        _ => return false,
    };

    let mut wanted = KeyModifiers::NONE;
    for part in parts {
        match part {
            "ctrl" => wanted |= KeyModifiers::CONTROL,
            "alt" => wanted |= KeyModifiers::ALT,
            "shift" => wanted |= KeyModifiers::SHIFT,
            _ => return false,
        }
    }

    let code_matches = match (name, key.code) {
        ("enter", KeyCode::Enter)
        | ("esc", KeyCode::Esc)
        | ("tab", KeyCode::Tab)
        | ("backspace", KeyCode::Backspace)
        | ("delete", KeyCode::Delete)
        | ("up", KeyCode::Up)
        | ("down", KeyCode::Down)
        | ("left", KeyCode::Left)
        | ("right", KeyCode::Right)
        | ("pageup", KeyCode::PageUp)
        | ("pagedown", KeyCode::PageDown)
        | ("space", KeyCode::Char(' ')) => true,
        (name, KeyCode::Char(c)) => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(expected), None) => c.to_lowercase().eq(expected.to_lowercase()),
                _ => false,
            }
        }
        _ => false,
    };

    let mut relevant = KeyModifiers::CONTROL | KeyModifiers::ALT;
    if !matches!(key.code, KeyCode::Char(_)) {
        relevant |= KeyModifiers::SHIFT;
    }
    code_matches && (key.modifiers & relevant) == (wanted & relevant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_missing_config_is_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_config(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.keymap.quit, "q");
        assert_eq!(config.badge_mode(), BadgeMode::Push);
    }

    #[test]
    fn test_partial_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[quotes]\nsource = \"remote\"\n\n[badge]\nmode = \"poll\"\npoll_interval_ms = 250\n\n[keymap]\nquit = \"ctrl-q\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.quotes.source, QuoteSource::Remote);
        assert_eq!(config.quotes.timeout_secs, 10);
        assert_eq!(config.badge_mode(), BadgeMode::Poll(Duration::from_millis(250)));
        assert_eq!(config.keymap.quit, "ctrl-q");
        assert_eq!(config.keymap.share, "s");
        assert!(config.share.command.is_none());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[badge]\nmode = \"sometimes\"\n").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_key_matches() {
        assert!(key_matches("q", &key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(key_matches("q", &key(KeyCode::Char('Q'), KeyModifiers::SHIFT)));
        assert!(!key_matches("q", &key(KeyCode::Char('q'), KeyModifiers::CONTROL)));
        assert!(key_matches("ctrl-d", &key(KeyCode::Char('d'), KeyModifiers::CONTROL)));
        assert!(!key_matches("ctrl-d", &key(KeyCode::Char('d'), KeyModifiers::NONE)));
        assert!(key_matches("?", &key(KeyCode::Char('?'), KeyModifiers::SHIFT)));
        assert!(key_matches("up", &key(KeyCode::Up, KeyModifiers::NONE)));
        assert!(!key_matches("up", &key(KeyCode::Up, KeyModifiers::SHIFT)));
        assert!(key_matches("space", &key(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert!(!key_matches("hyper-x", &key(KeyCode::Char('x'), KeyModifiers::NONE)));
        assert!(!key_matches("", &key(KeyCode::Char('x'), KeyModifiers::NONE)));
    }
}
