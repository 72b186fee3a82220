use crate::domain::CompiledPattern;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "buildversion.toml";

/// Represents the complete configuration for git-buildversion.
///
/// Contains the static fallback versions, changelog rendering settings and the
/// per-variant output settings.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub default_config: DefaultConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub variants: BTreeMap<String, OutputConfig>,
}

impl Config {
    /// Output settings for a variant, falling back to defaults when unconfigured
    pub fn output_for(&self, variant: &str) -> OutputConfig {
        self.variants.get(variant).cloned().unwrap_or_default()
    }
}

/// Static versions used when tags are not the source of versions
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct DefaultConfig {
    #[serde(default)]
    pub version_code: Option<u64>,

    #[serde(default)]
    pub version_name: Option<String>,
}

/// Configuration for changelog rendering.
///
/// Issue references are rewritten into links only when both the pattern and
/// the URL prefix are set.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default)]
    pub issue_number_pattern: Option<String>,

    #[serde(default)]
    pub issue_url_prefix: Option<String>,

    #[serde(default)]
    pub commit_message_key: Option<String>,
}

/// Returns the default base name of produced artifacts.
fn default_base_file_name() -> String {
    "app".to_string()
}

fn default_true() -> bool {
    true
}

/// Per-variant output configuration.
///
/// Controls where versions come from and how a variant's build tags look.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_base_file_name")]
    pub base_file_name: String,

    #[serde(default = "default_true")]
    pub use_versions_from_tag: bool,

    #[serde(default = "default_true")]
    pub use_stubs_for_tag_as_fallback: bool,

    #[serde(default = "default_true")]
    pub use_defaults_for_versions_as_fallback: bool,

    /// Token descriptors such as `literal:v` or `build_version`
    #[serde(default)]
    pub tag_pattern: Option<Vec<String>>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            base_file_name: default_base_file_name(),
            use_versions_from_tag: true,
            use_stubs_for_tag_as_fallback: true,
            use_defaults_for_versions_as_fallback: true,
            tag_pattern: None,
        }
    }
}

impl OutputConfig {
    /// Compile this variant's tag pattern, or the default pattern when unset
    pub fn compile_pattern(&self, variant: &str) -> Result<CompiledPattern> {
        CompiledPattern::from_descriptors(self.tag_pattern.as_deref(), variant)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `buildversion.toml` in current directory
/// 3. `.buildversion.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse configuration from TOML text
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str)?;
    Ok(config)
}
