use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::resolve::{self, SharedResolver};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Environment variable naming an overlay file to use instead of
/// `~/.config/shline/config.toml`.
pub const CONFIG_ENV: &str = "SHLINE_CONFIG";

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub env: EnvConfig,
}

/// How variable references are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Expansion {
    /// Process environment; missing names expand to the empty string.
    #[default]
    Env,
    /// Process environment; a missing name aborts.
    Strict,
    /// Nothing resolves.
    Empty,
    /// References are left as written.
    Disabled,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub expansion: Expansion,
    #[serde(default)]
    pub command_log: bool,
    #[serde(default)]
    pub command_log_prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct EnvConfig {
    #[serde(default)]
    pub vars: BTreeMap<String, String>,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    env: EnvOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    expansion: Option<Expansion>,
    command_log: Option<bool>,
    command_log_prefix: Option<String>,
    dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct EnvOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    vars: BTreeMap<String, String>,
    #[serde(default)]
    remove: Vec<String>,
}

// ── Merge logic ──

/// Merge user vars into the default vars.
/// In replace mode: user vars replace the defaults entirely.
/// In merge mode: remove names first, then insert additions (user wins).
fn merge_vars(
    base: &mut BTreeMap<String, String>,
    add: BTreeMap<String, String>,
    remove: &[String],
    replace: bool,
) {
    if replace {
        *base = add;
    } else {
        base.retain(|name, _| !remove.contains(name));
        base.extend(add);
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge the user overlay (`$SHLINE_CONFIG`, else
    ///    `~/.config/shline/config.toml`), if it exists
    ///
    /// A missing overlay is normal; an unreadable or invalid one is logged
    /// and ignored.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    fn overlay_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        let home = std::env::var_os("HOME")?;
        Some(PathBuf::from(home).join(".config/shline/config.toml"))
    }

    fn load_overlay() -> Option<ConfigOverlay> {
        let path = Self::overlay_path()?;
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("cannot read {}: {e}", path.display());
                return None;
            }
        };
        match toml::from_str(&content) {
            Ok(overlay) => {
                log::debug!("loaded config overlay {}", path.display());
                Some(overlay)
            }
            Err(e) => {
                log::warn!("config parse error in {}: {e}", path.display());
                None
            }
        }
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        // Settings: scalar overrides
        let s = overlay.settings;
        if let Some(v) = s.expansion {
            self.settings.expansion = v;
        }
        if let Some(v) = s.command_log {
            self.settings.command_log = v;
        }
        if let Some(v) = s.command_log_prefix {
            self.settings.command_log_prefix = v;
        }
        if s.dir.is_some() {
            self.settings.dir = s.dir;
        }

        // Env
        let e = overlay.env;
        merge_vars(&mut self.env.vars, e.vars, &e.remove, e.replace);
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }

    /// The resolver selected by `settings.expansion`.
    pub fn resolver(&self) -> SharedResolver {
        match self.settings.expansion {
            Expansion::Env => resolve::env(),
            Expansion::Strict => resolve::chain([resolve::env(), resolve::fail()]),
            Expansion::Empty => resolve::not_found(),
            Expansion::Disabled => resolve::disabled(),
        }
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|e| format!("# cannot render config: {e}\n"))
    }
}
