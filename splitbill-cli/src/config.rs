use rust_decimal::Decimal;
use splitbill_application::BillConfig;
use splitbill_domain::{DisplayContext, RoundingMode, SurchargeRateError, SurchargeRates};
use std::env;
use thiserror::Error;

const GST_RATE_KEY: &str = "SPLITBILL_GST_RATE";
const SERVICE_CHARGE_RATE_KEY: &str = "SPLITBILL_SERVICE_CHARGE_RATE";
const ROUNDING_KEY: &str = "SPLITBILL_ROUNDING";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key} must be a decimal fraction such as 0.09, got '{value}'")]
    InvalidRate { key: &'static str, value: String },
    #[error(transparent)]
    Rate(#[from] SurchargeRateError),
    #[error("{key} must be 'half_up' or 'half_even', got '{value}'")]
    InvalidRounding { key: &'static str, value: String },
}

/// Settings read from the environment (and `.env`, when present).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub rates: SurchargeRates,
    pub rounding_mode: RoundingMode,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = SurchargeRates::default();
        let gst = read_rate(&lookup, GST_RATE_KEY)?.unwrap_or(defaults.gst());
        let service_charge =
            read_rate(&lookup, SERVICE_CHARGE_RATE_KEY)?.unwrap_or(defaults.service_charge());
        let rates = SurchargeRates::try_new(gst, service_charge)?;

        let rounding_mode = match lookup(ROUNDING_KEY) {
            None => RoundingMode::default(),
            Some(value) => parse_rounding(&value).ok_or(ConfigError::InvalidRounding {
                key: ROUNDING_KEY,
                value,
            })?,
        };

        Ok(Self {
            rates,
            rounding_mode,
        })
    }

    pub fn bill_config(&self) -> BillConfig {
        BillConfig {
            rates: self.rates,
            display: DisplayContext::cents().with_rounding_mode(self.rounding_mode),
        }
    }
}

fn read_rate(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<Decimal>, ConfigError> {
    let Some(value) = lookup(key) else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<Decimal>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidRate { key, value })
}

fn parse_rounding(value: &str) -> Option<RoundingMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "half_up" => Some(RoundingMode::HalfUp),
        "half_even" => Some(RoundingMode::HalfEven),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[rstest]
    fn test_defaults_when_unset() {
        assert_eq!(load(&[]), Ok(AppConfig::default()));
    }

    #[rstest]
    fn test_reads_rates_and_rounding() {
        let config = load(&[
            (GST_RATE_KEY, "0.08"),
            (SERVICE_CHARGE_RATE_KEY, " 0.1 "),
            (ROUNDING_KEY, "HALF_EVEN"),
        ])
        .expect("valid config");

        assert_eq!(config.rates.gst(), Decimal::new(8, 2));
        assert_eq!(config.rates.service_charge(), Decimal::new(1, 1));
        assert_eq!(config.rounding_mode, RoundingMode::HalfEven);
        assert_eq!(
            config.bill_config().display,
            DisplayContext::cents().with_rounding_mode(RoundingMode::HalfEven)
        );
    }

    #[rstest]
    #[case::not_a_number(
        &[(GST_RATE_KEY, "nine")],
        ConfigError::InvalidRate { key: GST_RATE_KEY, value: "nine".to_string() }
    )]
    #[case::negative(
        &[(SERVICE_CHARGE_RATE_KEY, "-0.1")],
        ConfigError::Rate(SurchargeRateError::Negative {
            kind: "service charge",
            rate: Decimal::new(-1, 1),
        })
    )]
    #[case::percent_instead_of_fraction(
        &[(GST_RATE_KEY, "9")],
        ConfigError::Rate(SurchargeRateError::TooLarge {
            kind: "GST",
            rate: Decimal::from(9),
        })
    )]
    #[case::unknown_rounding(
        &[(ROUNDING_KEY, "down")],
        ConfigError::InvalidRounding { key: ROUNDING_KEY, value: "down".to_string() }
    )]
    fn test_invalid_values(#[case] vars: &[(&str, &str)], #[case] expected: ConfigError) {
        assert_eq!(load(vars), Err(expected));
    }
}
