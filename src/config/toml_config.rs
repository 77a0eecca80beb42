use crate::domain::model::{DEFAULT_CURRENCY, DEFAULT_LOCALE};
use crate::domain::ports::FormatConfigProvider;
use crate::utils::error::{FormatError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub format: FormatSection,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatSection {
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub minimum_fraction_digits: u8,
    pub maximum_fraction_digits: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for FormatSection {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            currency: default_currency(),
            minimum_fraction_digits: 0,
            maximum_fraction_digits: None,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(FormatError::InvalidConfigValueError {
                field: "config".to_string(),
                value: String::new(),
                reason: "Path cannot be empty".to_string(),
            });
        }

        tracing::debug!("Loading format config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FormatError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TWD_LOCALE})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FormatError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_locale("format.locale", &self.format.locale)?;
        validation::validate_currency("format.currency", &self.format.currency)?;
        validation::validate_fraction_digits(
            "format",
            self.format.minimum_fraction_digits,
            self.format.maximum_fraction_digits,
        )?;
        Ok(())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.json)
            .unwrap_or(false)
    }
}

impl FormatConfigProvider for TomlConfig {
    fn locale(&self) -> &str {
        &self.format.locale
    }

    fn currency(&self) -> &str {
        &self.format.currency
    }

    fn minimum_fraction_digits(&self) -> u8 {
        self.format.minimum_fraction_digits
    }

    fn maximum_fraction_digits(&self) -> Option<u8> {
        self.format.maximum_fraction_digits
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
