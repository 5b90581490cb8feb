//! Fiat display conversion.
//!
//! A static rate table against USD, matching the rates shown in the app. This
//! is presentation math only; the on-chain amounts never pass through here.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Rough ETH/USD rate used only for the headline total.
const NATIVE_USD_RATE: u64 = 2000;

/// Supported display currencies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Fiat {
    #[default]
    Usd,
    Ngn,
    Mad,
    Eur,
    Gbp,
}

impl Fiat {
    /// All supported currencies, in display order.
    pub const ALL: [Fiat; 5] = [Fiat::Usd, Fiat::Ngn, Fiat::Mad, Fiat::Eur, Fiat::Gbp];

    /// Fixed multiplier against USD.
    pub fn rate(&self) -> Decimal {
        match self {
            Fiat::Usd => Decimal::ONE,
            Fiat::Ngn => Decimal::new(1650, 0),
            Fiat::Mad => Decimal::new(102, 1),
            Fiat::Eur => Decimal::new(92, 2),
            Fiat::Gbp => Decimal::new(79, 2),
        }
    }

    /// Currency symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Fiat::Usd => "$",
            Fiat::Ngn => "₦",
            Fiat::Mad => "DH",
            Fiat::Eur => "€",
            Fiat::Gbp => "£",
        }
    }

    /// ISO-style code.
    pub fn code(&self) -> &'static str {
        match self {
            Fiat::Usd => "USD",
            Fiat::Ngn => "NGN",
            Fiat::Mad => "MAD",
            Fiat::Eur => "EUR",
            Fiat::Gbp => "GBP",
        }
    }
}

impl fmt::Display for Fiat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Fiat {
    type Err = crate::PayzeroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Fiat::Usd),
            "NGN" => Ok(Fiat::Ngn),
            "MAD" => Ok(Fiat::Mad),
            "EUR" => Ok(Fiat::Eur),
            "GBP" => Ok(Fiat::Gbp),
            other => Err(crate::PayzeroError::validation(format!(
                "unknown currency: {}",
                other
            ))),
        }
    }
}

/// Convert a USD-denominated decimal string to the selected fiat, formatted to
/// two decimal places. A non-numeric or out-of-range amount is treated as 0.
pub fn convert(usd_amount: &str, fiat: Fiat) -> String {
    let amount = Decimal::from_str(usd_amount.trim()).unwrap_or(Decimal::ZERO);
    let converted = amount.checked_mul(fiat.rate()).unwrap_or(Decimal::ZERO);
    format!("{:.2}", converted)
}

/// Headline USD total for a balance: stablecoin face value plus the native
/// asset at a fixed reference rate. Falls back to 0 when the arithmetic
/// leaves `Decimal` range.
pub fn total_usd(native: &str, token: &str) -> Decimal {
    let native = Decimal::from_str(native.trim()).unwrap_or(Decimal::ZERO);
    let token = Decimal::from_str(token.trim()).unwrap_or(Decimal::ZERO);
    native
        .checked_mul(Decimal::from(NATIVE_USD_RATE))
        .and_then(|n| token.checked_add(n))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_with_static_rates() {
        assert_eq!(convert("100", Fiat::Ngn), "165000.00");
        assert_eq!(convert("100", Fiat::Eur), "92.00");
        assert_eq!(convert("100", Fiat::Gbp), "79.00");
        assert_eq!(convert("10", Fiat::Mad), "102.00");
        assert_eq!(convert("42.5", Fiat::Usd), "42.50");
    }

    #[test]
    fn zero_and_garbage_amounts() {
        assert_eq!(convert("0", Fiat::Ngn), "0.00");
        assert_eq!(convert("not a number", Fiat::Usd), "0.00");
        assert_eq!(convert("", Fiat::Eur), "0.00");
    }

    #[test]
    fn out_of_range_amounts_do_not_panic() {
        let max = Decimal::MAX.to_string();
        assert_eq!(convert(&max, Fiat::Ngn), "0.00");
        assert_eq!(total_usd(&max, "1"), Decimal::ZERO);
    }

    #[test]
    fn headline_total() {
        // 25 USDC + 0.01 ETH * 2000 = 45 USD
        assert_eq!(total_usd("0.01", "25"), Decimal::new(45, 0));
        assert_eq!(total_usd("junk", "junk"), Decimal::ZERO);
    }

    #[test]
    fn fiat_parsing() {
        assert_eq!("ngn".parse::<Fiat>().unwrap(), Fiat::Ngn);
        assert!("XYZ".parse::<Fiat>().is_err());
    }
}
