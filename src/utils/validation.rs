use crate::domain::model::{CurrencyData, LocaleData, MAX_FRACTION_DIGITS};
use crate::utils::error::{FormatError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_locale(field_name: &str, locale: &str) -> Result<()> {
    if LocaleData::lookup(locale).is_some() {
        return Ok(());
    }

    Err(FormatError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: locale.to_string(),
        reason: format!(
            "Unsupported locale. Valid locales: {}",
            LocaleData::supported_tags().join(", ")
        ),
    })
}

pub fn validate_currency(field_name: &str, code: &str) -> Result<()> {
    if CurrencyData::lookup(code).is_some() {
        return Ok(());
    }

    Err(FormatError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: code.to_string(),
        reason: format!(
            "Unsupported currency. Valid currencies: {}",
            CurrencyData::supported_codes().join(", ")
        ),
    })
}

pub fn validate_fraction_digits(field_name: &str, minimum: u8, maximum: Option<u8>) -> Result<()> {
    if minimum > MAX_FRACTION_DIGITS {
        return Err(FormatError::InvalidConfigValueError {
            field: format!("{}.minimum_fraction_digits", field_name),
            value: minimum.to_string(),
            reason: format!("Value must be at most {}", MAX_FRACTION_DIGITS),
        });
    }

    if let Some(maximum) = maximum {
        if maximum > MAX_FRACTION_DIGITS {
            return Err(FormatError::InvalidConfigValueError {
                field: format!("{}.maximum_fraction_digits", field_name),
                value: maximum.to_string(),
                reason: format!("Value must be at most {}", MAX_FRACTION_DIGITS),
            });
        }
        if maximum < minimum {
            return Err(FormatError::InvalidConfigValueError {
                field: format!("{}.maximum_fraction_digits", field_name),
                value: maximum.to_string(),
                reason: format!("Value must be at least minimum_fraction_digits ({})", minimum),
            });
        }
    }

    Ok(())
}
