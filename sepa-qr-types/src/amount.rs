use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// A money value as it appears in a credit transfer.
///
/// The value is kept exactly as given; rounding only happens when it is
/// written out with two decimals.
#[derive(PartialEq, Clone, Copy, Default, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    pub const ZERO: Amount = Amount(0.0);

    /// Smallest amount a credit transfer can carry.
    pub const MIN_TRANSFER: Amount = Amount(0.01);

    /// Largest amount a credit transfer can carry.
    pub const MAX_TRANSFER: Amount = Amount(999_999_999.99);

    pub fn new(units: i32, cents: i32) -> Self {
        let cents = cents as f64 / 100.0;
        let units = units as f64;
        Amount(units + cents)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// true when the amount lies within [`Amount::MIN_TRANSFER`, `Amount::MAX_TRANSFER`]
    pub fn is_transferable(&self) -> bool {
        *self >= Self::MIN_TRANSFER && *self <= Self::MAX_TRANSFER
    }

    /// Whole cents, half away from zero. The scaled value is first cut to 15
    /// significant digits so that e.g. 1.005 counts as 100.5 cents and not as
    /// the 100.49999999999999 its binary form multiplies out to.
    pub fn cents(&self) -> i64 {
        let scaled = self.0 * 100.0;
        let pre_rounded = format!("{:.14e}", scaled)
            .parse::<f64>()
            .unwrap_or(scaled);
        pre_rounded.round() as i64
    }

    /// two decimals, `.` as separator, no grouping
    pub fn decimal_string(&self) -> String {
        let cents = self.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.unsigned_abs();
        format!("{sign}{}.{:02}", cents / 100, cents % 100)
    }

    /// rounds to the nearest cent
    fn round(mut self) -> Self {
        self.0 = (self.0 * 100.0).round() / 100.0;
        self
    }
}

impl FromStr for Amount {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = if s.contains(',') && !s.contains('.') {
            s.replace(',', ".")
        } else {
            s.to_string()
        };
        let f = s.parse::<f64>().map_err(|_| "Invalid amount format")?;
        if !f.is_finite() {
            return Err("Invalid amount format");
        }
        Ok(Amount::from(f))
    }
}

impl From<(i32, i32)> for Amount {
    fn from((units, cents): (i32, i32)) -> Self {
        Amount::new(units, cents).round()
    }
}

macro_rules! from_integer_type {
    ($($t:ty),* $(,)?) => {
        $(impl From<$t> for Amount {
            fn from(value: $t) -> Self {
                Amount(value as f64)
            }
        })*
    };
}

from_integer_type!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

/// Goes through the shortest decimal form of the `f32`, so `0.01f32` stays
/// 0.01 instead of widening to 0.009999999776.
impl From<f32> for Amount {
    fn from(value: f32) -> Self {
        let widened = value.to_string().parse::<f64>().unwrap_or(value as f64);
        Self::from(widened)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount(value)
    }
}

impl Debug for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Amount").field(&self.0).finish()
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.decimal_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match AmountRepr::deserialize(deserializer)? {
            AmountRepr::Number(n) => Ok(Amount(n)),
            AmountRepr::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.decimal_string().serialize(serializer)
    }
}
