use crate::{format_money, MissingField, DEFAULT_CURRENCY};

use super::{Payload, Remittance};

/// A payload with every field turned into the text of its line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadLines {
    pub(super) service_tag: String,
    /// three digits, e.g. `002`
    pub(super) version: String,
    pub(super) character_set: String,
    pub(super) identification: String,
    pub(super) bic: String,
    pub(super) name: String,
    pub(super) iban: String,
    /// currency and amount, e.g. `EUR12.50`
    pub(super) money: String,
    pub(super) purpose: String,
    pub(super) remittance_reference: String,
    pub(super) remittance_text: String,
    pub(super) information: String,
}

impl PayloadLines {
    pub fn into_lines(self) -> [String; 12] {
        [
            self.service_tag,
            self.version,
            self.character_set,
            self.identification,
            self.bic,
            self.name,
            self.iban,
            self.money,
            self.purpose,
            self.remittance_reference,
            self.remittance_text,
            self.information,
        ]
    }

    /// Joins the lines with `\n`. Empty lines at the end are dropped together
    /// with their separators; empty lines in between stay.
    pub fn render(self) -> String {
        let mut rendered = self.into_lines().join("\n");
        let end = rendered.trim_end_matches('\n').len();
        rendered.truncate(end);
        rendered
    }
}

impl TryFrom<&Payload> for PayloadLines {
    type Error = MissingField;

    fn try_from(value: &Payload) -> Result<Self, Self::Error> {
        let bic = value.bic().unwrap_or_default();
        let name = value.name().unwrap_or_default();
        let iban = value.iban().unwrap_or_default();

        if value.version().requires_bic() && bic.is_empty() {
            return Err(MissingField::Bic);
        }
        if name.is_empty() {
            return Err(MissingField::Name);
        }
        if iban.is_empty() {
            return Err(MissingField::Iban);
        }

        let (remittance_reference, remittance_text) = match value.remittance() {
            Some(Remittance::Reference(r)) => (r.clone(), String::new()),
            Some(Remittance::Text(t)) => (String::new(), t.clone()),
            None => (String::new(), String::new()),
        };

        Ok(Self {
            service_tag: value.service_tag().to_string(),
            version: value.version().to_string(),
            character_set: value.character_set().to_string(),
            identification: value.identification().to_string(),
            bic: bic.to_string(),
            name: name.to_string(),
            iban: iban.to_string(),
            money: format_money(
                value.currency().unwrap_or(DEFAULT_CURRENCY),
                value.amount().unwrap_or_default(),
            ),
            purpose: value.purpose().unwrap_or_default().to_string(),
            remittance_reference,
            remittance_text,
            information: value.information().unwrap_or_default().to_string(),
        })
    }
}
