//! Configuration loading for script-gate
//!
//! The entire rule surface is data: the deny-listed system-capability
//! modules, the dynamic-execution primitive names, and the per-domain
//! {import -> required invariant call} mapping all come from TOML and can be
//! overridden without touching the engine.

use serde::Deserialize;
use std::path::PathBuf;

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Interpreter used to run the external syntax check
    pub python: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
        }
    }
}

/// Pattern rule configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// System-capability modules whose import requires confirmation
    pub restricted_modules: Vec<String>,

    /// Dynamic code-evaluation primitives whose call requires confirmation
    pub dynamic_primitives: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            restricted_modules: vec![
                "os".to_string(),
                "subprocess".to_string(),
                "sys".to_string(),
                "shutil".to_string(),
            ],
            dynamic_primitives: vec!["eval".to_string(), "exec".to_string()],
        }
    }
}

/// One domain library and the safety-invariant call its scripts must make
#[derive(Debug, Clone, Deserialize)]
pub struct DomainConfig {
    /// Import name that activates this rule
    pub module: String,

    /// Call that must appear somewhere in the source when the module is used
    pub required_call: String,

    /// Human-readable name of the check, used in the ask message
    #[serde(default)]
    pub check_name: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub rules: RulesConfig,
    pub domains: Vec<DomainConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            rules: RulesConfig::default(),
            domains: vec![
                DomainConfig {
                    module: "cadquery".to_string(),
                    required_call: "isValid".to_string(),
                    check_name: "geometric validity check".to_string(),
                },
                DomainConfig {
                    module: "skidl".to_string(),
                    required_call: "ERC".to_string(),
                    check_name: "electrical rule check".to_string(),
                },
            ],
        }
    }
}

impl Config {
    /// Load configuration from the standard locations or use defaults
    pub fn load() -> Self {
        let config_paths = [
            // User-specific config
            dirs::home_dir().map(|p| p.join(".claude/script-gate/config.toml")),
            // System-wide config
            Some(PathBuf::from("/etc/script-gate/config.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if path.exists() {
                if let Ok(content) = std::fs::read_to_string(&path) {
                    match toml::from_str(&content) {
                        Ok(config) => return config,
                        Err(e) => {
                            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                        }
                    }
                }
            }
        }

        // Return defaults
        Config::default()
    }

    /// Load from a specific path
    pub fn load_from(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if path.starts_with("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(&path[2..]);
            }
        }
        PathBuf::from(path)
    }
}

/// Embedded default configuration
pub const DEFAULT_CONFIG_TOML: &str = r#"
[general]
python = "python3"

[rules]
restricted_modules = ["os", "subprocess", "sys", "shutil"]
dynamic_primitives = ["eval", "exec"]

[[domains]]
module = "cadquery"
required_call = "isValid"
check_name = "geometric validity check"

[[domains]]
module = "skidl"
required_call = "ERC"
check_name = "electrical rule check"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config
            .rules
            .restricted_modules
            .contains(&"subprocess".to_string()));
        assert!(config.rules.dynamic_primitives.contains(&"eval".to_string()));
        assert_eq!(config.domains.len(), 2);
        assert_eq!(config.general.python, "python3");
    }

    #[test]
    fn test_parse_embedded_config() {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config.rules.restricted_modules.len(), 4);
        assert_eq!(config.domains[0].module, "cadquery");
        assert_eq!(config.domains[0].required_call, "isValid");
        assert_eq!(config.domains[1].module, "skidl");
        assert_eq!(config.domains[1].required_call, "ERC");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [rules]
            restricted_modules = ["socket"]
            "#,
        )
        .unwrap();
        assert_eq!(config.rules.restricted_modules, vec!["socket"]);
        // Unspecified sections fall back to defaults
        assert_eq!(config.rules.dynamic_primitives, vec!["eval", "exec"]);
        assert_eq!(config.general.python, "python3");
        assert_eq!(config.domains.len(), 2);
    }

    #[test]
    fn test_expand_path() {
        let expanded = Config::expand_path("~/.claude/script-gate/config.toml");
        assert!(!expanded.to_string_lossy().starts_with('~'));
    }
}
