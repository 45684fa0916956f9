use serde::{Deserialize, Serialize};

/// The account that receives the transfer. Empty strings mean "not configured".
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct BeneficiaryConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub iban: String,
    #[serde(default)]
    pub bic: String,
}

impl BeneficiaryConfig {
    pub fn new(name: impl ToString, iban: impl ToString, bic: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            iban: iban.to_string(),
            bic: bic.to_string(),
        }
    }
}
