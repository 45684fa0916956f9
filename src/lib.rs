//! SEPA credit transfer QR payloads, as described by the EPC guidelines.
//!
//! The text produced here is what goes into the QR code; drawing the code
//! itself is left to whichever QR library the caller prefers.

pub use sepa_qr_config::{BeneficiaryConfig, Config, ConfigError, PayloadDefaults};
pub use sepa_qr_payload::*;
pub use sepa_qr_types::Amount;
