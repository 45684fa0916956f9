use sepa_qr_types::Amount;

use crate::{
    BIC_LENGTHS, CURRENCY_LENGTH, INFORMATION_MAX, NAME_MAX, IBAN_MAX, PURPOSE_LENGTH,
    REMITTANCE_REFERENCE_MAX, REMITTANCE_TEXT_MAX,
};

/// A value was rejected by a setter. The payload keeps its previous value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidField {
    #[error("Invalid service tag: {0:?}")]
    ServiceTag(String),
    #[error("Invalid version: {0}")]
    Version(u8),
    #[error("Invalid character set: {0}")]
    CharacterSet(u8),
    #[error("Invalid identification code: {0:?}")]
    Identification(String),
    #[error("BIC of the beneficiary can only be {} or {} characters, got {0}", BIC_LENGTHS[0], BIC_LENGTHS[1])]
    Bic(usize),
    #[error("Name of the beneficiary cannot be longer than {} characters, got {0}", NAME_MAX)]
    Name(usize),
    #[error("Account number of the beneficiary cannot be longer than {} characters, got {0}", IBAN_MAX)]
    Iban(usize),
    #[error("Currency of the credit transfer can only be a {} letter ISO 4217 code, got {0:?}", CURRENCY_LENGTH)]
    Currency(String),
    #[error("Amount of the credit transfer cannot be smaller than {}, got {0}", Amount::MIN_TRANSFER)]
    AmountTooSmall(Amount),
    #[error("Amount of the credit transfer cannot be higher than {}, got {0}", Amount::MAX_TRANSFER)]
    AmountTooLarge(Amount),
    #[error("Purpose code can only be {} characters, got {0:?}", PURPOSE_LENGTH)]
    Purpose(String),
    #[error("Structured remittance information cannot be longer than {} characters, got {0}", REMITTANCE_REFERENCE_MAX)]
    RemittanceReference(usize),
    #[error("Unstructured remittance information cannot be longer than {} characters, got {0}", REMITTANCE_TEXT_MAX)]
    RemittanceText(usize),
    #[error("Use either structured or unstructured remittance information")]
    RemittanceConflict,
    #[error("Beneficiary to originator information cannot be longer than {} characters, got {0}", INFORMATION_MAX)]
    Information(usize),
}

/// A mandatory field was still empty when the payload was rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MissingField {
    #[error("Missing BIC of the beneficiary bank")]
    Bic,
    #[error("Missing name of the beneficiary")]
    Name,
    #[error("Missing account number of the beneficiary")]
    Iban,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PayloadError {
    #[error("InvalidField: {0}")]
    Invalid(#[from] InvalidField),
    #[error("MissingField: {0}")]
    Missing(#[from] MissingField),
}
