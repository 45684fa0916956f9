//! Builds the text carried by an EPC "SEPA credit transfer" QR code.
//!
//! A [`Payload`] collects the fields one setter at a time and rejects bad
//! values straight away. Whether the mandatory fields are present is only
//! checked when the payload is rendered, so a payload can be filled in
//! incrementally.
//!
//! ```
//! use sepa_qr_payload::Payload;
//!
//! let mut payload = Payload::create();
//! payload
//!     .set_name("Test")?
//!     .set_iban("ABC")?
//!     .set_amount(1075.25)?
//!     .set_remittance_text("DEF")?;
//! assert_eq!(
//!     payload.render()?,
//!     "BCD\n002\n1\nSCT\n\nTest\nABC\nEUR1075.25\n\n\nDEF"
//! );
//! # Ok::<(), sepa_qr_payload::PayloadError>(())
//! ```

mod error;
mod payload;

use sepa_qr_config::Config;
use sepa_qr_types::Amount;

pub use error::{InvalidField, MissingField, PayloadError};
pub use payload::{Payload, PayloadLines, Remittance};
pub use sepa_qr_types::{CharacterSet, Version};

pub const SERVICE_TAG: &str = "BCD";
pub const IDENTIFICATION: &str = "SCT";
pub const DEFAULT_CURRENCY: &str = "EUR";

pub const BIC_LENGTHS: [usize; 2] = [8, 11];
pub const NAME_MAX: usize = 70;
pub const IBAN_MAX: usize = 34;
pub const CURRENCY_LENGTH: usize = 3;
pub const PURPOSE_LENGTH: usize = 4;
pub const REMITTANCE_REFERENCE_MAX: usize = 35;
pub const REMITTANCE_TEXT_MAX: usize = 140;
pub const INFORMATION_MAX: usize = 70;

/// Formats the amount line of a payload: the upper-cased currency, followed by
/// the amount with two decimals. A zero or negative amount is left out
/// entirely, so the reader of the code gets to fill it in.
pub fn format_money(currency: &str, amount: impl Into<Amount>) -> String {
    let amount = amount.into();
    let mut money = currency.to_uppercase();
    if amount.is_positive() {
        money.push_str(&amount.decimal_string());
    }
    money
}

/// Renders the standing payload described by a config, without an amount or
/// remittance information. Useful for a fixed "pay us" code on a poster.
pub fn render_config(config: &Config) -> Result<String, PayloadError> {
    Ok(Payload::from_config(config)?.render()?)
}
