use serde::{Deserialize, Serialize};

use crate::error::SplitError;

pub const REFERENCE_CURRENCY: &str = "TWD";

/// `rate` is how many reference units one unit of `code` is worth.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ExchangeRate {
    pub code: String,
    #[serde(default)]
    pub name: String,
    pub rate: f64,
    #[serde(default)]
    pub symbol: String,
}

impl ExchangeRate {
    fn new(code: &str, name: &str, rate: f64, symbol: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            rate,
            symbol: symbol.to_string(),
        }
    }
}

pub fn default_rates() -> Vec<ExchangeRate> {
    vec![
        ExchangeRate::new(REFERENCE_CURRENCY, "New Taiwan Dollar", 1.0, "NT$"),
        ExchangeRate::new("USD", "US Dollar", 32.5, "$"),
        ExchangeRate::new("JPY", "Japanese Yen", 0.215, "¥"),
        ExchangeRate::new("KRW", "South Korean Won", 0.024, "₩"),
        ExchangeRate::new("EUR", "Euro", 34.2, "€"),
    ]
}

/// Live rate table used when new expenses are entered.
///
/// Changing a rate here never touches expenses already built, since each one
/// keeps the rate it was entered with.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RateTable {
    rates: Vec<ExchangeRate>,
}

impl RateTable {
    /// Builds a table from configured rates. The reference currency is always
    /// present with a rate of exactly 1.
    pub fn new(rates: Vec<ExchangeRate>) -> Result<Self, SplitError> {
        let mut table = Self { rates: Vec::new() };
        for rate in rates {
            validate_rate(&rate.code, rate.rate)?;
            match table.rates.iter_mut().find(|r| r.code == rate.code) {
                Some(existing) => *existing = rate,
                None => table.rates.push(rate),
            }
        }
        match table.rates.iter_mut().find(|r| r.code == REFERENCE_CURRENCY) {
            Some(reference) => reference.rate = 1.0,
            None => table.rates.insert(
                0,
                ExchangeRate::new(REFERENCE_CURRENCY, "New Taiwan Dollar", 1.0, "NT$"),
            ),
        }
        Ok(table)
    }

    pub fn reference(&self) -> &str {
        REFERENCE_CURRENCY
    }

    pub fn rates(&self) -> &[ExchangeRate] {
        &self.rates
    }

    pub fn lookup(&self, code: &str) -> Result<&ExchangeRate, SplitError> {
        self.rates
            .iter()
            .find(|r| r.code == code)
            .ok_or_else(|| SplitError::UnknownCurrency(code.to_string()))
    }

    pub fn set_rate(&mut self, code: &str, rate: f64) -> Result<(), SplitError> {
        if code == REFERENCE_CURRENCY {
            return Err(SplitError::InvalidRate(format!(
                "{REFERENCE_CURRENCY} is the reference currency"
            )));
        }
        validate_rate(code, rate)?;
        let entry = self
            .rates
            .iter_mut()
            .find(|r| r.code == code)
            .ok_or_else(|| SplitError::UnknownCurrency(code.to_string()))?;
        tracing::debug!(code, old = entry.rate, new = rate, "exchange rate updated");
        entry.rate = rate;
        Ok(())
    }

    pub fn reset_to_defaults(&mut self) {
        self.rates = default_rates();
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            rates: default_rates(),
        }
    }
}

fn validate_rate(code: &str, rate: f64) -> Result<(), SplitError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(())
    } else {
        Err(SplitError::InvalidRate(format!("{code}: {rate}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_table_has_reference_at_one() {
        let table = RateTable::default();

        assert_eq!(table.lookup("TWD").unwrap().rate, 1.0);
        assert_eq!(table.lookup("USD").unwrap().rate, 32.5);
        assert_eq!(table.rates().len(), 5);
    }

    #[test]
    fn unknown_currency_is_rejected() {
        assert_eq!(
            RateTable::default().lookup("GBP"),
            Err(SplitError::UnknownCurrency("GBP".to_string()))
        );
    }

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-3.0)]
    #[case::nan(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    fn bad_rates_are_rejected(#[case] rate: f64) {
        let mut table = RateTable::default();

        assert!(matches!(table.set_rate("JPY", rate), Err(SplitError::InvalidRate(_))));
        assert_eq!(table.lookup("JPY").unwrap().rate, 0.215);
    }

    #[test]
    fn reference_rate_cannot_change() {
        let mut table = RateTable::default();

        assert!(table.set_rate("TWD", 2.0).is_err());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut table = RateTable::default();
        table.set_rate("USD", 30.0).unwrap();
        assert_eq!(table.lookup("USD").unwrap().rate, 30.0);

        table.reset_to_defaults();
        assert_eq!(table, RateTable::default());
    }

    #[test]
    fn configured_table_pins_reference() {
        let table = RateTable::new(vec![
            ExchangeRate::new("TWD", "", 5.0, ""),
            ExchangeRate::new("THB", "Baht", 0.9, "฿"),
        ])
        .unwrap();

        assert_eq!(table.lookup("TWD").unwrap().rate, 1.0);
        assert_eq!(table.lookup("THB").unwrap().rate, 0.9);
    }

    #[test]
    fn configured_table_adds_missing_reference() {
        let table = RateTable::new(vec![ExchangeRate::new("USD", "", 31.0, "$")]).unwrap();

        assert_eq!(table.rates()[0].code, "TWD");
        assert_eq!(table.lookup("USD").unwrap().rate, 31.0);
    }
}
