use std::sync::{Arc, PoisonError, RwLock};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use rentbook_config::Config;
use rentbook_domain::YearMonth;

/// Money and date rendering driven by the live configuration.
#[derive(Clone)]
pub struct CliFormatters {
    config: Arc<RwLock<Config>>,
}

impl CliFormatters {
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self { config }
    }

    /// `1650.00 EUR`, rounded to the configured precision.
    pub fn amount(&self, amount: Decimal) -> String {
        let config = self.config.read().unwrap_or_else(PoisonError::into_inner);
        let precision = usize::from(config.currency_precision);
        let rounded = amount.round_dp(u32::from(config.currency_precision));
        format!("{rounded:.precision$} {}", config.currency)
    }

    pub fn date(&self, date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    pub fn period(&self, period: YearMonth) -> String {
        match period.first_day() {
            Some(day) => day.format("%b %Y").to_string(),
            None => period.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn amount_uses_configured_precision_and_currency() {
        let config = Arc::new(RwLock::new(Config::default()));
        let formatters = CliFormatters::new(config.clone());
        assert_eq!(formatters.amount(dec!(450)), "450.00 EUR");

        {
            let mut cfg = config.write().unwrap();
            cfg.currency = "DKK".into();
            cfg.currency_precision = 0;
        }
        assert_eq!(formatters.amount(dec!(1199.6)), "1200 DKK");
    }

    #[test]
    fn period_reads_as_month_and_year() {
        let formatters = CliFormatters::new(Arc::new(RwLock::new(Config::default())));
        assert_eq!(formatters.period(YearMonth::new(2025, 4).unwrap()), "Apr 2025");
        assert_eq!(
            formatters.period(YearMonth::new(300_000, 1).unwrap()),
            "300000-01"
        );
    }
}
