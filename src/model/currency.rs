use crate::model::amount::{Amount, AmountError};
use enum_iterator::Sequence;
use std::fmt::{self, Display};

/// Crypto assets that can be withdrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Sequence)]
pub enum CryptoCurrency {
    #[default]
    Usdt,
    Wbtc,
}

impl CryptoCurrency {
    pub fn symbol(&self) -> &'static str {
        match self {
            CryptoCurrency::Usdt => "USDT",
            CryptoCurrency::Wbtc => "WBTC",
        }
    }

    /// Precision used when parsing user input and balances.
    pub fn decimal_places(&self) -> u8 {
        match self {
            CryptoCurrency::Usdt => 6,
            CryptoCurrency::Wbtc => 8,
        }
    }

    /// Parses `input` as an amount of this currency.
    pub fn parse_amount(&self, input: &str) -> Result<Amount, AmountError> {
        Amount::parse_with_decimals(input, self.decimal_places())
            .map(|amount| amount.with_unit_name(self.symbol()))
    }

    /// Parses user input, flooring anything finer than this currency's precision.
    pub fn parse_amount_rounded_down(&self, input: &str) -> Result<Amount, AmountError> {
        Amount::parse_rounded_down(input, self.decimal_places())
            .map(|amount| amount.with_unit_name(self.symbol()))
    }
}

impl Display for CryptoCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Fiat currency the withdrawal is converted to.
///
/// Only TWD has a rate; selecting `Other` changes the label, not the computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Sequence)]
pub enum FiatTarget {
    #[default]
    Twd,
    Other,
}

impl FiatTarget {
    pub fn label(&self) -> &'static str {
        match self {
            FiatTarget::Twd => "TWD",
            FiatTarget::Other => "Other",
        }
    }
}

impl Display for FiatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Static conversion rates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRateTable {
    pub usdt_to_twd: Amount,
    pub wbtc_to_twd: Amount,
    pub wbtc_to_usdt: Amount,
}

pub const EXCHANGE_RATES: ExchangeRateTable = ExchangeRateTable {
    usdt_to_twd: Amount::new(313, 1),
    wbtc_to_twd: Amount::new(2_850_000, 0),
    // Approx. 2,850,000 / 31.3
    wbtc_to_usdt: Amount::new(91_054, 0),
};

/// Decimal places of displayed fiat amounts. Fiat values are floored to whole units.
pub const FIAT_DECIMAL_PLACES: u8 = 0;

impl ExchangeRateTable {
    /// Rate from `currency` to TWD.
    pub fn fiat_rate(&self, currency: CryptoCurrency) -> &Amount {
        match currency {
            CryptoCurrency::Usdt => &self.usdt_to_twd,
            CryptoCurrency::Wbtc => &self.wbtc_to_twd,
        }
    }

    /// `floor(amount * rate[currency -> TWD])`
    pub fn fiat_equivalent(
        &self,
        amount: &Amount,
        currency: CryptoCurrency,
    ) -> Result<Amount, AmountError> {
        amount
            .convert(self.fiat_rate(currency), FIAT_DECIMAL_PLACES)
            .map(|fiat| fiat.with_unit_name(FiatTarget::Twd.label()))
    }

    /// Value of `amount` expressed in USDT, used for the minimum withdrawal check.
    pub fn usdt_equivalent(
        &self,
        amount: &Amount,
        currency: CryptoCurrency,
    ) -> Result<Amount, AmountError> {
        let usdt = CryptoCurrency::Usdt;
        let converted = match currency {
            CryptoCurrency::Usdt => Ok(amount.clone()),
            CryptoCurrency::Wbtc => amount.convert(&self.wbtc_to_usdt, usdt.decimal_places()),
        };
        converted.map(|value| value.with_unit_name(usdt.symbol()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fiat_equivalent() {
        let hundred_usdt = CryptoCurrency::Usdt.parse_amount("100").unwrap();
        let fiat = EXCHANGE_RATES
            .fiat_equivalent(&hundred_usdt, CryptoCurrency::Usdt)
            .unwrap();
        assert_eq!(fiat.value(), 3130);
        assert_eq!(fiat.to_string(), "3130 TWD");

        let twenty_usdt = CryptoCurrency::Usdt.parse_amount("20").unwrap();
        let fiat = EXCHANGE_RATES
            .fiat_equivalent(&twenty_usdt, CryptoCurrency::Usdt)
            .unwrap();
        assert_eq!(fiat.value(), 626);

        let wbtc = CryptoCurrency::Wbtc.parse_amount("0.01").unwrap();
        let fiat = EXCHANGE_RATES
            .fiat_equivalent(&wbtc, CryptoCurrency::Wbtc)
            .unwrap();
        assert_eq!(fiat.value(), 28_500);
        assert_eq!(fiat.to_grouped_string(), "28,500");
    }

    #[test]
    fn test_usdt_equivalent() {
        let usdt = CryptoCurrency::Usdt.parse_amount("5").unwrap();
        assert_eq!(
            EXCHANGE_RATES
                .usdt_equivalent(&usdt, CryptoCurrency::Usdt)
                .unwrap()
                .value(),
            5_000_000
        );

        // 0.0001 WBTC is about 9.1 USDT
        let wbtc = CryptoCurrency::Wbtc.parse_amount("0.0001").unwrap();
        let usdt_value = EXCHANGE_RATES
            .usdt_equivalent(&wbtc, CryptoCurrency::Wbtc)
            .unwrap();
        assert_eq!(usdt_value.to_string(), "9.1054 USDT");
    }

    #[test]
    fn test_currency_precision() {
        assert!(CryptoCurrency::Usdt.parse_amount("0.0000001").is_err());
        assert!(CryptoCurrency::Wbtc.parse_amount("0.0000001").is_ok());
        assert_eq!(
            enum_iterator::all::<CryptoCurrency>().collect::<Vec<_>>(),
            vec![CryptoCurrency::Usdt, CryptoCurrency::Wbtc]
        );
    }
}
