use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Amount is not a number")]
    NotANumber,

    #[error("Amount is not finite: {value}")]
    NonFinite { value: f64 },

    #[error("Invalid amount '{input}'")]
    InvalidAmount { input: String },

    #[error("Unsupported locale: {locale}")]
    UnsupportedLocale { locale: String },

    #[error("Unsupported currency: {code}")]
    UnsupportedCurrency { code: String },

    #[error("Invalid fraction digits (min {minimum}, max {maximum}): {reason}")]
    InvalidFractionDigits {
        minimum: u8,
        maximum: u8,
        reason: String,
    },

    #[error("Number format error: {0}")]
    NumberFormat(#[from] num_format::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl FormatError {
    /// 是否為設定相關錯誤 (決定 CLI 的退出碼)
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            FormatError::UnsupportedLocale { .. }
                | FormatError::UnsupportedCurrency { .. }
                | FormatError::InvalidFractionDigits { .. }
                | FormatError::NumberFormat(_)
                | FormatError::ConfigError { .. }
                | FormatError::InvalidConfigValueError { .. }
        )
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            FormatError::NotANumber => "金額不是數字".to_string(),
            FormatError::NonFinite { .. } => "金額必須是有限數值".to_string(),
            FormatError::InvalidAmount { input } => format!("無法解析金額: {}", input),
            FormatError::UnsupportedLocale { locale } => format!("不支援的語系: {}", locale),
            FormatError::UnsupportedCurrency { code } => format!("不支援的幣別: {}", code),
            FormatError::InvalidFractionDigits { .. } => "小數位數設定不正確".to_string(),
            FormatError::IoError(e) => format!("檔案讀寫失敗: {}", e),
            FormatError::ConfigError { message } => format!("設定檔錯誤: {}", message),
            FormatError::InvalidConfigValueError { field, .. } => {
                format!("設定值不正確: {}", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FormatError::NotANumber
            | FormatError::NonFinite { .. }
            | FormatError::InvalidAmount { .. } => "請輸入有效的數字，例如 1000 或 -500.5",
            FormatError::UnsupportedLocale { .. } => "支援的語系: zh-TW, en-US",
            FormatError::UnsupportedCurrency { .. } => "支援的幣別: TWD, USD, JPY",
            FormatError::InvalidFractionDigits { .. } => {
                "小數位數需介於 0 到 20，且最大值不可小於最小值"
            }
            FormatError::IoError(_) => "請確認檔案路徑存在且具有讀取權限",
            FormatError::ConfigError { .. } | FormatError::InvalidConfigValueError { .. } => {
                "請檢查 TOML 設定檔的內容與格式"
            }
            FormatError::NumberFormat(_) | FormatError::SerializationError(_) => {
                "請回報此問題"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FormatError>;
