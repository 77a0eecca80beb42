use crate::domain::model::FormatOptions;

/// 提供格式化設定的來源 (CLI 參數或 TOML 設定檔)
pub trait FormatConfigProvider: Send + Sync {
    fn locale(&self) -> &str;
    fn currency(&self) -> &str;
    fn minimum_fraction_digits(&self) -> u8;
    fn maximum_fraction_digits(&self) -> Option<u8>;

    fn format_options(&self) -> FormatOptions {
        FormatOptions {
            locale: self.locale().to_string(),
            currency: self.currency().to_string(),
            minimum_fraction_digits: self.minimum_fraction_digits(),
            maximum_fraction_digits: self.maximum_fraction_digits(),
        }
    }
}
