pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::TomlConfig;
pub use crate::core::formatter::{default_formatter, format_currency, CurrencyFormatter};
pub use domain::model::{Amount, FormatOptions, FormattedAmount};
pub use utils::error::{FormatError, Result};
