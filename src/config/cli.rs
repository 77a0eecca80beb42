use crate::domain::model::{DEFAULT_CURRENCY, DEFAULT_LOCALE};
use crate::domain::ports::FormatConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "twd-format")]
#[command(about = "Format amounts as New Taiwan Dollars")]
pub struct CliConfig {
    /// Amounts to format; read from stdin (one per line) when omitted
    #[arg(allow_negative_numbers = true)]
    pub amounts: Vec<String>,

    #[arg(long, help = "TOML config file; overrides the format flags")]
    pub config: Option<String>,

    #[arg(long, default_value = DEFAULT_LOCALE)]
    pub locale: String,

    #[arg(long, default_value = DEFAULT_CURRENCY)]
    pub currency: String,

    #[arg(long, default_value = "0")]
    pub min_fraction_digits: u8,

    #[arg(long)]
    pub max_fraction_digits: Option<u8>,

    #[arg(long, help = "Print results as a JSON array")]
    pub json: bool,

    #[arg(long, help = "Write log lines as JSON")]
    pub log_json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl FormatConfigProvider for CliConfig {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn currency(&self) -> &str {
        &self.currency
    }

    fn minimum_fraction_digits(&self) -> u8 {
        self.min_fraction_digits
    }

    fn maximum_fraction_digits(&self) -> Option<u8> {
        self.max_fraction_digits
    }
}

impl CliConfig {
    /// 與預設值不同的格式旗標；使用 `--config` 時這些旗標會被設定檔取代
    pub fn overridden_format_flags(&self) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if self.locale != DEFAULT_LOCALE {
            flags.push("--locale");
        }
        if self.currency != DEFAULT_CURRENCY {
            flags.push("--currency");
        }
        if self.min_fraction_digits != 0 {
            flags.push("--min-fraction-digits");
        }
        if self.max_fraction_digits.is_some() {
            flags.push("--max-fraction-digits");
        }
        flags
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_locale("--locale", &self.locale)?;
        validation::validate_currency("--currency", &self.currency)?;
        validation::validate_fraction_digits(
            "--fraction-digits",
            self.min_fraction_digits,
            self.max_fraction_digits,
        )
    }
}
