use crate::model::amount::{Amount, AmountError};
use crate::model::currency::CryptoCurrency;

/// Read-only snapshot of available balances, supplied by the embedding screen
/// when the withdrawal form opens. Never refreshed or mutated by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balances {
    usdt: Amount,
    wbtc: Amount,
}

impl Balances {
    pub fn new(usdt: Amount, wbtc: Amount) -> Self {
        Self {
            usdt: usdt.with_unit_name(CryptoCurrency::Usdt.symbol()),
            wbtc: wbtc.with_unit_name(CryptoCurrency::Wbtc.symbol()),
        }
    }

    /// Builds a snapshot from decimal strings, e.g. `Balances::parse("50", "0.01")`.
    pub fn parse(usdt: &str, wbtc: &str) -> Result<Self, AmountError> {
        Ok(Self::new(
            CryptoCurrency::Usdt.parse_amount(usdt)?,
            CryptoCurrency::Wbtc.parse_amount(wbtc)?,
        ))
    }

    pub fn available(&self, currency: CryptoCurrency) -> &Amount {
        match currency {
            CryptoCurrency::Usdt => &self.usdt,
            CryptoCurrency::Wbtc => &self.wbtc,
        }
    }
}

impl Default for Balances {
    fn default() -> Self {
        Self::new(
            Amount::new(0, CryptoCurrency::Usdt.decimal_places()),
            Amount::new(0, CryptoCurrency::Wbtc.decimal_places()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_balances() {
        let balances = Balances::parse("50", "0.01").unwrap();
        assert_eq!(balances.available(CryptoCurrency::Usdt).to_string(), "50 USDT");
        assert_eq!(balances.available(CryptoCurrency::Wbtc).value(), 1_000_000);
        assert!(Balances::parse("fifty", "0").is_err());
    }
}
