use crate::domain::model::{
    Amount, CurrencyData, FormatOptions, FormattedAmount, LocaleData, MAX_FRACTION_DIGITS,
};
use crate::domain::ports::FormatConfigProvider;
use crate::utils::error::{FormatError, Result};
use num_format::{CustomFormat, Grouping, ToFormattedString};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// 低於此值的浮點數在 20 位小數內必定四捨五入為零
const ZERO_THRESHOLD: f64 = 1e-21;

/// 依語系與幣別設定格式化金額。建立後不可變，可跨執行緒共用。
#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    locale: &'static LocaleData,
    currency: &'static CurrencyData,
    minimum_fraction_digits: u8,
    maximum_fraction_digits: u8,
    number_format: CustomFormat,
}

impl CurrencyFormatter {
    pub fn new(options: FormatOptions) -> Result<Self> {
        let locale =
            LocaleData::lookup(&options.locale).ok_or_else(|| FormatError::UnsupportedLocale {
                locale: options.locale.clone(),
            })?;
        let currency = CurrencyData::lookup(&options.currency).ok_or_else(|| {
            FormatError::UnsupportedCurrency {
                code: options.currency.clone(),
            }
        })?;

        let minimum = options.minimum_fraction_digits;
        let maximum = options
            .maximum_fraction_digits
            .unwrap_or_else(|| minimum.max(currency.digits));

        if minimum > MAX_FRACTION_DIGITS || maximum > MAX_FRACTION_DIGITS {
            return Err(FormatError::InvalidFractionDigits {
                minimum,
                maximum,
                reason: format!("must be between 0 and {}", MAX_FRACTION_DIGITS),
            });
        }
        if maximum < minimum {
            return Err(FormatError::InvalidFractionDigits {
                minimum,
                maximum,
                reason: "maximum is smaller than minimum".to_string(),
            });
        }

        let number_format = CustomFormat::builder()
            .grouping(Grouping::Standard)
            .separator(locale.group_separator)
            .minus_sign(locale.minus_sign)
            .build()?;

        tracing::debug!(
            locale = locale.tag,
            currency = currency.code,
            minimum_fraction_digits = minimum,
            maximum_fraction_digits = maximum,
            "Currency formatter ready"
        );

        Ok(Self {
            locale,
            currency,
            minimum_fraction_digits: minimum,
            maximum_fraction_digits: maximum,
            number_format,
        })
    }

    pub fn from_provider<P: FormatConfigProvider + ?Sized>(provider: &P) -> Result<Self> {
        Self::new(provider.format_options())
    }

    pub fn locale(&self) -> &'static str {
        self.locale.tag
    }

    pub fn currency(&self) -> &'static str {
        self.currency.code
    }

    pub fn symbol(&self) -> &'static str {
        self.locale.currency_symbol(self.currency)
    }

    pub fn minimum_fraction_digits(&self) -> u8 {
        self.minimum_fraction_digits
    }

    pub fn maximum_fraction_digits(&self) -> u8 {
        self.maximum_fraction_digits
    }

    /// 格式化金額。只有 `NaN` 與無限大會回傳錯誤，金額大小不設上限。
    pub fn format(&self, amount: impl Into<Amount>) -> Result<String> {
        match amount.into() {
            Amount::Decimal(value) => Ok(self.format_decimal(value)),
            Amount::Float(value) => self.format_f64(value),
        }
    }

    /// 解析文字金額後格式化，結果保留原始輸入
    pub fn format_str(&self, input: &str) -> Result<FormattedAmount> {
        let amount: Amount = input.parse()?;
        Ok(FormattedAmount {
            input: input.trim().to_string(),
            formatted: self.format(amount)?,
        })
    }

    pub fn format_decimal(&self, amount: Decimal) -> String {
        self.render(amount.is_sign_negative(), amount)
    }

    /// 浮點數以最短還原字串 (shortest round-trip) 的十進位值為準，
    /// 因此 `1.005` 視為 1.005 而非其二進位近似值
    fn format_f64(&self, amount: f64) -> Result<String> {
        if amount.is_nan() {
            return Err(FormatError::NotANumber);
        }
        if amount.is_infinite() {
            return Err(FormatError::NonFinite { value: amount });
        }

        // 負零與捨入後為零的負數仍保留負號
        let negative = amount.is_sign_negative();
        let magnitude = amount.abs();
        if magnitude < ZERO_THRESHOLD {
            return Ok(self.render(negative, Decimal::ZERO));
        }

        // f64 的 Display 不使用指數表示法
        let text = magnitude.to_string();
        let decimal = Decimal::from_str(&text).ok().or_else(|| {
            // 小數位超過 Decimal 精度的極小值
            if magnitude < 1.0 {
                Decimal::from_f64_retain(magnitude)
            } else {
                None
            }
        });

        match decimal {
            Some(decimal) => Ok(self.render(negative, decimal)),
            // 超出 Decimal 範圍的值必為整數
            None => Ok(self.assemble(negative, self.group_digits(&text), String::new())),
        }
    }

    fn render(&self, negative: bool, amount: Decimal) -> String {
        let rounded = amount.abs().round_dp_with_strategy(
            u32::from(self.maximum_fraction_digits),
            RoundingStrategy::MidpointAwayFromZero,
        );

        let scale = rounded.scale();
        let divisor = 10i128.pow(scale);
        let mantissa = rounded.mantissa();
        let integer = (mantissa / divisor).unsigned_abs();

        let fraction = if scale > 0 {
            format!(
                "{:0width$}",
                (mantissa % divisor).unsigned_abs(),
                width = scale as usize
            )
        } else {
            String::new()
        };

        let output = self.assemble(
            negative,
            integer.to_formatted_string(&self.number_format),
            fraction,
        );
        tracing::trace!(%amount, formatted = %output, "Formatted amount");
        output
    }

    /// 整數位數字串分組；`u128` 以內交給 num-format，更大的值每三位插入分隔符
    fn group_digits(&self, digits: &str) -> String {
        if let Ok(value) = digits.parse::<u128>() {
            return value.to_formatted_string(&self.number_format);
        }

        let separator = self.locale.group_separator;
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push_str(separator);
            }
            grouped.push(ch);
        }
        grouped
    }

    fn assemble(&self, negative: bool, integer: String, mut fraction: String) -> String {
        let minimum = usize::from(self.minimum_fraction_digits);
        while fraction.len() > minimum && fraction.ends_with('0') {
            fraction.pop();
        }
        while fraction.len() < minimum {
            fraction.push('0');
        }

        let mut output = String::new();
        if negative {
            output.push_str(self.locale.minus_sign);
        }
        output.push_str(self.symbol());
        output.push_str(&integer);
        if !fraction.is_empty() {
            output.push_str(self.locale.decimal_separator);
            output.push_str(&fraction);
        }
        output
    }
}

/// `zh-TW` 語系、新台幣、最少 0 位小數的格式器
pub fn default_formatter() -> Result<CurrencyFormatter> {
    CurrencyFormatter::new(FormatOptions::default())
}

/// 將金額格式化為新台幣字串，例如 `format_currency(1000)` 得到 `"$1,000"`
pub fn format_currency(amount: impl Into<Amount>) -> Result<String> {
    default_formatter()?.format(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter(locale: &str, currency: &str, min: u8, max: Option<u8>) -> CurrencyFormatter {
        CurrencyFormatter::new(FormatOptions {
            locale: locale.to_string(),
            currency: currency.to_string(),
            minimum_fraction_digits: min,
            maximum_fraction_digits: max,
        })
        .unwrap()
    }

    #[test]
    fn test_default_formatter_settings() {
        let f = default_formatter().unwrap();
        assert_eq!(f.locale(), "zh-TW");
        assert_eq!(f.currency(), "TWD");
        assert_eq!(f.symbol(), "$");
        assert_eq!(f.minimum_fraction_digits(), 0);
        assert_eq!(f.maximum_fraction_digits(), 2);
    }

    #[test]
    fn test_whole_amounts() {
        assert_eq!(format_currency(1000).unwrap(), "$1,000");
        assert_eq!(format_currency(0).unwrap(), "$0");
        assert_eq!(format_currency(-500).unwrap(), "-$500");
        assert_eq!(format_currency(999).unwrap(), "$999");
        assert_eq!(format_currency(1_234_567_i64).unwrap(), "$1,234,567");
        assert_eq!(format_currency(1000.0).unwrap(), "$1,000");
    }

    #[test]
    fn test_fraction_is_kept_up_to_two_digits() {
        assert_eq!(format_currency(0.5).unwrap(), "$0.5");
        assert_eq!(format_currency(1234.5).unwrap(), "$1,234.5");
        assert_eq!(format_currency(1234.56).unwrap(), "$1,234.56");
        assert_eq!(format_currency(1234567.891).unwrap(), "$1,234,567.89");
        assert_eq!(format_currency(0.1).unwrap(), "$0.1");
    }

    #[test]
    fn test_rounding_uses_shortest_decimal_and_half_away_from_zero() {
        assert_eq!(format_currency(0.125).unwrap(), "$0.13");
        assert_eq!(format_currency(-0.125).unwrap(), "-$0.13");
        // 1.005 的二進位值略小於 1.005，但以十進位 1.005 捨入
        assert_eq!(format_currency(1.005).unwrap(), "$1.01");
        assert_eq!(format_currency(1.255).unwrap(), "$1.26");
        assert_eq!(format_currency(2.675).unwrap(), "$2.68");
        assert_eq!(format_currency(123456.785).unwrap(), "$123,456.79");
        assert_eq!(format_currency(999.999).unwrap(), "$1,000");
        assert_eq!(
            format_currency(Decimal::from_str("2.675").unwrap()).unwrap(),
            "$2.68"
        );
    }

    #[test]
    fn test_no_binary_noise_with_many_fraction_digits() {
        let f = formatter("zh-TW", "TWD", 0, Some(20));
        assert_eq!(f.format(0.1).unwrap(), "$0.1");
        assert_eq!(f.format(1.1e-7).unwrap(), "$0.00000011");
    }

    #[test]
    fn test_large_amounts_are_not_limited() {
        assert_eq!(
            format_currency(1e28).unwrap(),
            "$10,000,000,000,000,000,000,000,000,000"
        );
        assert_eq!(
            format_currency(8e28).unwrap(),
            "$80,000,000,000,000,000,000,000,000,000"
        );
        assert_eq!(
            format_currency(-1e30).unwrap(),
            "-$1,000,000,000,000,000,000,000,000,000,000"
        );
        assert_eq!(
            formatter("zh-TW", "TWD", 2, None).format(1e30).unwrap(),
            "$1,000,000,000,000,000,000,000,000,000,000.00"
        );

        let max = format_currency(f64::MAX).unwrap();
        assert!(max.starts_with("$179,769,313,486,231,570,000,"));
        assert_eq!(max.chars().filter(|c| c.is_ascii_digit()).count(), 309);
        assert!(!max.contains('.'));
    }

    #[test]
    fn test_group_digits_beyond_u128() {
        let f = default_formatter().unwrap();
        assert_eq!(f.group_digits("1234"), "1,234");
        let digits = format!("1{}", "0".repeat(40));
        let grouped = f.group_digits(&digits);
        assert!(grouped.starts_with("10,000,"));
        assert!(grouped.split(',').skip(1).all(|g| g == "000"));
        assert_eq!(grouped.replace(',', ""), digits);
    }

    #[test]
    fn test_negative_zero_keeps_sign() {
        assert_eq!(format_currency(-0.0).unwrap(), "-$0");
        assert_eq!(format_currency(-0.001).unwrap(), "-$0");
        assert_eq!(format_currency(1e-30).unwrap(), "$0");
    }

    #[test]
    fn test_non_numeric_input_is_rejected() {
        assert!(matches!(
            format_currency(f64::NAN),
            Err(FormatError::NotANumber)
        ));
        assert!(matches!(
            format_currency(f64::INFINITY),
            Err(FormatError::NonFinite { .. })
        ));
        assert!(matches!(
            format_currency(f64::NEG_INFINITY),
            Err(FormatError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_minimum_fraction_digits_pads() {
        let f = formatter("zh-TW", "TWD", 2, None);
        assert_eq!(f.format(1000).unwrap(), "$1,000.00");
        assert_eq!(f.format(0.5).unwrap(), "$0.50");
    }

    #[test]
    fn test_maximum_fraction_digits_limits() {
        let f = formatter("zh-TW", "TWD", 0, Some(0));
        assert_eq!(f.format(1234.5).unwrap(), "$1,235");
        assert_eq!(f.format(-1234.5).unwrap(), "-$1,235");

        let f = formatter("zh-TW", "TWD", 1, Some(4));
        assert_eq!(f.format(0.123456).unwrap(), "$0.1235");
        assert_eq!(f.format(3).unwrap(), "$3.0");
    }

    #[test]
    fn test_other_locales_and_currencies() {
        assert_eq!(formatter("en-US", "TWD", 0, None).format(1000).unwrap(), "NT$1,000");
        assert_eq!(formatter("zh-TW", "USD", 0, None).format(-20.5).unwrap(), "-US$20.5");
        assert_eq!(formatter("zh-TW", "JPY", 0, None).format(1500.7).unwrap(), "¥1,501");
    }

    #[test]
    fn test_format_str() {
        let f = default_formatter().unwrap();
        let result = f.format_str(" 1234.5 ").unwrap();
        assert_eq!(result.input, "1234.5");
        assert_eq!(result.formatted, "$1,234.5");
        assert_eq!(f.format_str("1e3").unwrap().formatted, "$1,000");
        assert!(matches!(
            f.format_str("twelve"),
            Err(FormatError::InvalidAmount { .. })
        ));
        assert!(matches!(f.format_str("NaN"), Err(FormatError::NotANumber)));
        assert_eq!(
            f.format_str("79228162514264337593543950336").unwrap().formatted,
            "$79,228,162,514,264,340,000,000,000,000"
        );
    }

    #[test]
    fn test_invalid_options() {
        let unsupported_locale = CurrencyFormatter::new(FormatOptions {
            locale: "fr-FR".to_string(),
            ..FormatOptions::default()
        });
        assert!(matches!(
            unsupported_locale,
            Err(FormatError::UnsupportedLocale { .. })
        ));

        let unsupported_currency = CurrencyFormatter::new(FormatOptions {
            currency: "EUR".to_string(),
            ..FormatOptions::default()
        });
        assert!(matches!(
            unsupported_currency,
            Err(FormatError::UnsupportedCurrency { .. })
        ));

        let inverted = CurrencyFormatter::new(FormatOptions {
            minimum_fraction_digits: 3,
            maximum_fraction_digits: Some(1),
            ..FormatOptions::default()
        });
        assert!(matches!(
            inverted,
            Err(FormatError::InvalidFractionDigits { .. })
        ));

        let too_many = CurrencyFormatter::new(FormatOptions {
            minimum_fraction_digits: 21,
            ..FormatOptions::default()
        });
        assert!(matches!(
            too_many,
            Err(FormatError::InvalidFractionDigits { .. })
        ));
    }
}
