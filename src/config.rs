//! Layered configuration
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults
//! 2. TOML file: `--config` path, else `BASIC_CONFIG_PATH`, else `./basic.toml` if present
//! 3. Environment: `BASIC_<SECTION>__<KEY>`, e.g. `BASIC_INPUT__PROMPT`

use std::collections::HashMap;
use std::path::PathBuf;

use ::config::{Environment, File, FileFormat};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::interpreter::executor::console::DEFAULT_INPUT_PROMPT;

const ENV_PREFIX: &str = "BASIC";
const CONFIG_PATH_VAR: &str = "BASIC_CONFIG_PATH";
const DEFAULT_CONFIG_FILE: &str = "basic.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub repl: ReplConfig,
    pub input: InputConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplConfig {
    /// Written before each REPL read; empty for none
    pub prompt: String,
    /// Print a one-line greeting when the REPL starts
    pub banner: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Written before each INPUT read
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, used when RUST_LOG is unset
    pub filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repl: ReplConfig {
                prompt: String::new(),
                banner: false,
            },
            input: InputConfig {
                prompt: DEFAULT_INPUT_PROMPT.to_string(),
            },
            log: LogConfig {
                filter: "warn".to_string(),
            },
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Load from the default search path and the process environment
    pub fn load() -> Result<Self> {
        Self::builder().build()
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration as TOML")
    }
}

/// Builder for loading a [`Config`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    env_source: Option<HashMap<String, String>>,
}

impl ConfigBuilder {
    /// Explicit config file; it must exist when set
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Read overrides from this map instead of the process environment
    pub fn env_source(mut self, vars: HashMap<String, String>) -> Self {
        self.env_source = Some(vars);
        self
    }

    pub fn build(self) -> Result<Config> {
        let defaults = Config::default();

        let mut builder = ::config::Config::builder()
            .set_default("repl.prompt", defaults.repl.prompt)?
            .set_default("repl.banner", defaults.repl.banner)?
            .set_default("input.prompt", defaults.input.prompt)?
            .set_default("log.filter", defaults.log.filter)?;

        let explicit = self
            .config_path
            .or_else(|| std::env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from));

        builder = match &explicit {
            Some(path) => builder.add_source(
                File::from(path.clone())
                    .format(FileFormat::Toml)
                    .required(true),
            ),
            None => builder.add_source(
                File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
            ),
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(self.env_source),
        );

        let settings = builder.build().with_context(|| match &explicit {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Failed to load configuration".to_string(),
        })?;

        settings
            .try_deserialize::<Config>()
            .context("Invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;
    use std::io::Write;

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "basic-core-{}-{}.toml",
            name,
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::builder()
            .env_source(HashMap::new())
            .build()
            .unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.input.prompt, " ? ");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = temp_config(
            "file",
            r#"
            [repl]
            prompt = "] "

            [log]
            filter = "debug"
            "#,
        );

        let config = Config::builder()
            .config_path(Some(path.clone()))
            .env_source(HashMap::new())
            .build()
            .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.repl.prompt, "] ");
        assert_eq!(config.log.filter, "debug");
        assert_eq!(config.input.prompt, " ? ");
    }

    #[test]
    fn test_env_overrides_file() {
        let path = temp_config("env", "[input]\nprompt = \"from file\"\n");

        let config = Config::builder()
            .config_path(Some(path.clone()))
            .env_source(hashmap! {
                "BASIC_INPUT__PROMPT".to_string() => "from env".to_string(),
                "BASIC_REPL__BANNER".to_string() => "true".to_string(),
            })
            .build()
            .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.input.prompt, "from env");
        assert!(config.repl.banner);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Config::builder()
            .config_path(Some(PathBuf::from("/nonexistent/basic.toml")))
            .env_source(HashMap::new())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_to_toml_lists_every_section() {
        let rendered = Config::default().to_toml().unwrap();
        assert!(rendered.contains("[repl]"));
        assert!(rendered.contains("[input]"));
        assert!(rendered.contains("[log]"));
        assert!(rendered.contains(" ? "));
        assert!(rendered.contains("warn"));
    }
}
