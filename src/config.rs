use crate::error::{ConfigError, Result};
use crate::sources::DEFAULT_DATASET_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub aws: AwsConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AwsConfig {
    /// Region used when `--region` is not given
    pub region: Option<String>,
    /// Named profile from ~/.aws/config
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub dataset_url: String,
    /// Local copy of the dataset; takes precedence over `dataset_url`
    pub dataset_path: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            dataset_path: None,
            timeout_secs: 60,
        }
    }
}

impl PricingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Also print one table per (instance type, term, offering, payment option)
    #[serde(default)]
    pub group_by_offer: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Markdown,
    Json,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            // Try .rdsri.toml in current dir, then ~/.config/rdsri/config.toml
            let local = PathBuf::from(".rdsri.toml");
            if local.exists() {
                local
            } else {
                dirs::config_dir()
                    .map(|d| d.join("rdsri").join("config.toml"))
                    .unwrap_or_else(|| PathBuf::from(".rdsri.toml"))
            }
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                let mut err = format!("{}: {}", config_path.display(), e);
                err.push_str("\n  Common issues:");
                err.push_str("\n    - Invalid TOML syntax");
                err.push_str("\n    - Incorrect value types");
                err.push_str("\n  Tip: Run 'rdsri init' to create a new config file");
                ConfigError::ParseError(err)
            })?;
            config.validate()?;
            Ok(config)
        } else {
            if path.is_some() {
                eprintln!("WARNING: Config file not found: {}", config_path.display());
                eprintln!("   Using default configuration. Run 'rdsri init' to create a config file.");
            }
            Ok(Config::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pricing.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pricing.timeout_secs".to_string(),
                reason: "must be at least 1 second".to_string(),
            }
            .into());
        }
        if self.pricing.dataset_url.trim().is_empty() && self.pricing.dataset_path.is_none() {
            return Err(ConfigError::InvalidValue {
                field: "pricing.dataset_url".to_string(),
                reason: "must not be empty unless pricing.dataset_path is set".to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(format!("cannot serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

pub fn init_config(output: &Path) -> Result<()> {
    let config = Config::default();
    config.save(output)?;
    println!("Created config file: {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.aws.region.is_none());
        assert_eq!(config.pricing.dataset_url, DEFAULT_DATASET_URL);
        assert_eq!(config.pricing.timeout(), Duration::from_secs(60));
        assert_eq!(config.output.format, OutputFormat::Table);
        assert!(!config.output.group_by_offer);
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test_config.toml");

        let mut config = Config::default();
        config.aws.region = Some("eu-west-1".to_string());
        config.output.format = OutputFormat::Markdown;
        assert!(config.save(&config_path).is_ok());

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded.aws.region.as_deref(), Some("eu-west-1"));
        assert_eq!(loaded.output.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        std::fs::write(&config_path, "[aws]\nregion = \"us-west-2\"\n").unwrap();

        let config = Config::load(Some(&config_path)).unwrap();
        assert_eq!(config.aws.region.as_deref(), Some("us-west-2"));
        assert_eq!(config.pricing.timeout_secs, 60);
    }

    #[test]
    fn test_config_load_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let fake_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load(Some(&fake_path)).unwrap();
        assert_eq!(config.pricing.dataset_url, DEFAULT_DATASET_URL);
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("invalid.toml");
        std::fs::write(&config_path, "invalid toml content {").unwrap();

        let err = Config::load(Some(&config_path)).unwrap_err();
        assert!(matches!(
            err,
            crate::error::RdsriError::Config(ConfigError::ParseError(_))
        ));
        assert!(err.to_string().contains("rdsri init"));
    }

    #[test]
    fn test_config_load_invalid_toml_exits_with_config_code() {
        use crate::exit_codes::{codes, exit_code_for_anyhow};

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("invalid.toml");
        std::fs::write(&config_path, "invalid toml {").unwrap();

        let err = anyhow::Error::from(Config::load(Some(&config_path)).unwrap_err());
        assert_eq!(exit_code_for_anyhow(&err), codes::CONFIG_ERROR);
    }

    #[test]
    fn test_config_zero_timeout_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("zero_timeout.toml");
        std::fs::write(&config_path, "[pricing]\ntimeout_secs = 0\n").unwrap();

        let err = Config::load(Some(&config_path)).unwrap_err();
        assert!(matches!(
            err,
            crate::error::RdsriError::Config(ConfigError::InvalidValue { ref field, .. })
                if field == "pricing.timeout_secs"
        ));
    }

    #[test]
    fn test_config_save_to_missing_dir_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("missing").join("config.toml");

        let err = Config::default().save(&config_path).unwrap_err();
        assert!(matches!(err, crate::error::RdsriError::Io(_)));
    }

    #[test]
    fn test_init_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("init_test.toml");

        assert!(init_config(&config_path).is_ok());
        let config = Config::load(Some(&config_path)).unwrap();
        assert_eq!(config.pricing.timeout_secs, 60);
    }
}
