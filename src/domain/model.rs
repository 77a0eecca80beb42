use crate::utils::error::FormatError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 小數位數上限 (與 ECMA-402 早期版本一致)
pub const MAX_FRACTION_DIGITS: u8 = 20;

pub const DEFAULT_LOCALE: &str = "zh-TW";
pub const DEFAULT_CURRENCY: &str = "TWD";

/// 待格式化的金額。浮點數保留原始二進位值，整數與 `Decimal` 則精確表示。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    Float(f64),
    Decimal(Decimal),
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Float(value)
    }
}

impl From<f32> for Amount {
    fn from(value: f32) -> Self {
        Amount::Float(f64::from(value))
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Amount::Decimal(Decimal::from(value))
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::Decimal(Decimal::from(value))
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Amount::Decimal(Decimal::from(value))
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount::Decimal(Decimal::from(value))
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::Decimal(value)
    }
}

impl FromStr for Amount {
    type Err = FormatError;

    /// 先以十進位解析 (保留精確值)，失敗時再嘗試浮點表示法，例如 `1e3`、`NaN`、`inf`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(decimal) = Decimal::from_str(trimmed) {
            return Ok(Amount::Decimal(decimal));
        }

        trimmed
            .parse::<f64>()
            .map(Amount::Float)
            .map_err(|_| FormatError::InvalidAmount {
                input: s.to_string(),
            })
    }
}

/// 語系的數字慣例。所有內建語系的貨幣樣式皆為 `¤#,##0.##`，負號置於符號前。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleData {
    pub tag: &'static str,
    pub group_separator: &'static str,
    pub decimal_separator: &'static str,
    pub minus_sign: &'static str,
    symbols: &'static [(&'static str, &'static str)],
}

const LOCALES: &[LocaleData] = &[
    LocaleData {
        tag: "zh-TW",
        group_separator: ",",
        decimal_separator: ".",
        minus_sign: "-",
        symbols: &[("TWD", "$"), ("USD", "US$"), ("JPY", "¥")],
    },
    LocaleData {
        tag: "en-US",
        group_separator: ",",
        decimal_separator: ".",
        minus_sign: "-",
        symbols: &[("TWD", "NT$"), ("USD", "$"), ("JPY", "¥")],
    },
];

impl LocaleData {
    /// 精確比對語系標籤 (不分大小寫，接受 `_` 作為分隔)，不做任何語系協商
    pub fn lookup(tag: &str) -> Option<&'static LocaleData> {
        let normalized = tag.trim().replace('_', "-");
        LOCALES
            .iter()
            .find(|locale| locale.tag.eq_ignore_ascii_case(&normalized))
    }

    pub fn supported_tags() -> Vec<&'static str> {
        LOCALES.iter().map(|locale| locale.tag).collect()
    }

    /// 找不到在地符號時使用 ISO 代碼
    pub fn currency_symbol(&self, currency: &CurrencyData) -> &'static str {
        self.symbols
            .iter()
            .find(|(code, _)| *code == currency.code)
            .map(|(_, symbol)| *symbol)
            .unwrap_or(currency.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyData {
    pub code: &'static str,
    /// ISO 4217 標準小數位數
    pub digits: u8,
}

const CURRENCIES: &[CurrencyData] = &[
    CurrencyData {
        code: "TWD",
        digits: 2,
    },
    CurrencyData {
        code: "USD",
        digits: 2,
    },
    CurrencyData {
        code: "JPY",
        digits: 0,
    },
];

impl CurrencyData {
    pub fn lookup(code: &str) -> Option<&'static CurrencyData> {
        let code = code.trim();
        CURRENCIES
            .iter()
            .find(|currency| currency.code.eq_ignore_ascii_case(code))
    }

    pub fn supported_codes() -> Vec<&'static str> {
        CURRENCIES.iter().map(|currency| currency.code).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    pub locale: String,
    pub currency: String,
    pub minimum_fraction_digits: u8,
    /// 未設定時為 `max(minimum_fraction_digits, 幣別小數位數)`
    pub maximum_fraction_digits: Option<u8>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            minimum_fraction_digits: 0,
            maximum_fraction_digits: None,
        }
    }
}

/// CLI JSON 輸出的單筆結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedAmount {
    pub input: String,
    pub formatted: String,
}
