use sepa_qr_config::Config;
use sepa_qr_types::{Amount, CharacterSet, Version};

use crate::{
    InvalidField, MissingField, BIC_LENGTHS, CURRENCY_LENGTH, IDENTIFICATION, IBAN_MAX,
    INFORMATION_MAX, NAME_MAX, PURPOSE_LENGTH, REMITTANCE_REFERENCE_MAX, REMITTANCE_TEXT_MAX,
    SERVICE_TAG,
};

pub use self::payload_lines::PayloadLines;

mod payload_lines;

/// Remittance information is either a structured creditor reference or free
/// text, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remittance {
    Reference(String),
    Text(String),
}

/// The fields of a SEPA credit transfer QR code.
///
/// Every setter validates its argument and leaves the payload untouched when
/// it fails. Mandatory fields are checked by [`Payload::render`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    version: Version,
    character_set: CharacterSet,
    bic: Option<String>,
    name: Option<String>,
    iban: Option<String>,
    currency: Option<String>,
    amount: Option<Amount>,
    purpose: Option<String>,
    remittance: Option<Remittance>,
    information: Option<String>,
}

fn check(ok: bool, err: impl FnOnce() -> InvalidField) -> Result<(), InvalidField> {
    if ok {
        Ok(())
    } else {
        let err = err();
        tracing::debug!(error = %err, "rejected payload field");
        Err(err)
    }
}

/// Limits are in bytes of the encoded text.
fn length(value: &str) -> usize {
    value.len()
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create() -> Self {
        Self::new()
    }

    /// Starts a payload from the beneficiary and defaults in a config. Every
    /// configured value goes through the regular setter.
    pub fn from_config(config: &Config) -> Result<Self, InvalidField> {
        let defaults = config.defaults();
        let beneficiary = config.beneficiary();

        let mut payload = Self::create();
        payload
            .with_version(defaults.version)
            .with_character_set(defaults.character_set)
            .set_currency(defaults.currency.as_str())?;
        if let Some(purpose) = &defaults.purpose {
            payload.set_purpose(purpose.as_str())?;
        }
        if let Some(information) = &defaults.information {
            payload.set_information(information.as_str())?;
        }
        if !beneficiary.name.is_empty() {
            payload.set_name(beneficiary.name.as_str())?;
        }
        if !beneficiary.iban.is_empty() {
            payload.set_iban(beneficiary.iban.as_str())?;
        }
        if !beneficiary.bic.is_empty() {
            payload.set_bic(beneficiary.bic.as_str())?;
        }
        Ok(payload)
    }

    pub fn set_service_tag(&mut self, service_tag: &str) -> Result<&mut Self, InvalidField> {
        check(service_tag == SERVICE_TAG, || {
            InvalidField::ServiceTag(service_tag.to_string())
        })?;
        Ok(self)
    }

    pub fn set_version(&mut self, version: u8) -> Result<&mut Self, InvalidField> {
        let parsed = Version::from_code(version);
        check(parsed.is_some(), || InvalidField::Version(version))?;
        Ok(self.with_version(parsed.unwrap_or_default()))
    }

    pub fn with_version(&mut self, version: Version) -> &mut Self {
        self.version = version;
        self
    }

    pub fn set_character_set(&mut self, character_set: u8) -> Result<&mut Self, InvalidField> {
        let parsed = CharacterSet::from_code(character_set);
        check(parsed.is_some(), || InvalidField::CharacterSet(character_set))?;
        Ok(self.with_character_set(parsed.unwrap_or_default()))
    }

    pub fn with_character_set(&mut self, character_set: CharacterSet) -> &mut Self {
        self.character_set = character_set;
        self
    }

    pub fn set_identification(&mut self, identification: &str) -> Result<&mut Self, InvalidField> {
        check(identification == IDENTIFICATION, || {
            InvalidField::Identification(identification.to_string())
        })?;
        Ok(self)
    }

    pub fn set_bic(&mut self, bic: impl Into<String>) -> Result<&mut Self, InvalidField> {
        let bic = bic.into();
        let len = length(&bic);
        check(BIC_LENGTHS.contains(&len), || InvalidField::Bic(len))?;
        self.bic = Some(bic);
        Ok(self)
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<&mut Self, InvalidField> {
        let name = name.into();
        let len = length(&name);
        check(len <= NAME_MAX, || InvalidField::Name(len))?;
        self.name = Some(name);
        Ok(self)
    }

    pub fn set_iban(&mut self, iban: impl Into<String>) -> Result<&mut Self, InvalidField> {
        let iban = iban.into();
        let len = length(&iban);
        check(len <= IBAN_MAX, || InvalidField::Iban(len))?;
        self.iban = Some(iban);
        Ok(self)
    }

    /// Only the length is checked, the code itself is not looked up.
    pub fn set_currency(&mut self, currency: impl Into<String>) -> Result<&mut Self, InvalidField> {
        let currency = currency.into();
        check(length(&currency) == CURRENCY_LENGTH, || {
            InvalidField::Currency(currency.clone())
        })?;
        self.currency = Some(currency);
        Ok(self)
    }

    pub fn set_amount(&mut self, amount: impl Into<Amount>) -> Result<&mut Self, InvalidField> {
        let amount = amount.into();
        check(amount <= Amount::MAX_TRANSFER || amount.value().is_nan(), || {
            InvalidField::AmountTooLarge(amount)
        })?;
        check(amount.is_transferable(), || InvalidField::AmountTooSmall(amount))?;
        self.amount = Some(amount);
        Ok(self)
    }

    pub fn set_purpose(&mut self, purpose: impl Into<String>) -> Result<&mut Self, InvalidField> {
        let purpose = purpose.into();
        check(length(&purpose) == PURPOSE_LENGTH, || {
            InvalidField::Purpose(purpose.clone())
        })?;
        self.purpose = Some(purpose);
        Ok(self)
    }

    pub fn set_remittance_reference(
        &mut self,
        reference: impl Into<String>,
    ) -> Result<&mut Self, InvalidField> {
        let reference = reference.into();
        let len = length(&reference);
        check(len <= REMITTANCE_REFERENCE_MAX, || {
            InvalidField::RemittanceReference(len)
        })?;
        check(
            !matches!(self.remittance, Some(Remittance::Text(_))),
            || InvalidField::RemittanceConflict,
        )?;
        self.remittance = Some(Remittance::Reference(reference));
        Ok(self)
    }

    pub fn set_remittance_text(&mut self, text: impl Into<String>) -> Result<&mut Self, InvalidField> {
        let text = text.into();
        let len = length(&text);
        check(len <= REMITTANCE_TEXT_MAX, || InvalidField::RemittanceText(len))?;
        check(
            !matches!(self.remittance, Some(Remittance::Reference(_))),
            || InvalidField::RemittanceConflict,
        )?;
        self.remittance = Some(Remittance::Text(text));
        Ok(self)
    }

    pub fn set_information(
        &mut self,
        information: impl Into<String>,
    ) -> Result<&mut Self, InvalidField> {
        let information = information.into();
        let len = length(&information);
        check(len <= INFORMATION_MAX, || InvalidField::Information(len))?;
        self.information = Some(information);
        Ok(self)
    }

    pub fn service_tag(&self) -> &'static str {
        SERVICE_TAG
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn character_set(&self) -> CharacterSet {
        self.character_set
    }

    pub fn identification(&self) -> &'static str {
        IDENTIFICATION
    }

    pub fn bic(&self) -> Option<&str> {
        self.bic.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn iban(&self) -> Option<&str> {
        self.iban.as_deref()
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    pub fn purpose(&self) -> Option<&str> {
        self.purpose.as_deref()
    }

    pub fn remittance(&self) -> Option<&Remittance> {
        self.remittance.as_ref()
    }

    pub fn information(&self) -> Option<&str> {
        self.information.as_deref()
    }

    /// The twelve lines of the payload, in order, before joining.
    pub fn lines(&self) -> Result<[String; 12], MissingField> {
        Ok(PayloadLines::try_from(self)?.into_lines())
    }

    /// Renders the payload text. Trailing empty lines are dropped, so the
    /// result ends with the last field that has a value.
    pub fn render(&self) -> Result<String, MissingField> {
        let rendered = PayloadLines::try_from(self)?.render();
        tracing::debug!(bytes = rendered.len(), "rendered payload");
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn minimal() -> Payload {
        let mut payload = Payload::create();
        payload.set_name("Test").unwrap().set_iban("ABC").unwrap();
        payload
    }

    #[test]
    fn create_has_defaults() {
        let payload = Payload::create();
        assert_eq!(payload.service_tag(), "BCD");
        assert_eq!(payload.version(), Version::V2);
        assert_eq!(payload.character_set(), CharacterSet::Utf8);
        assert_eq!(payload.identification(), "SCT");
        assert_eq!(payload.name(), None);
        assert_eq!(payload.amount(), None);
    }

    #[test]
    fn service_tag_and_identification_are_fixed() {
        let mut payload = Payload::create();
        payload.set_service_tag("BCD").unwrap();
        payload.set_identification("SCT").unwrap();
        assert_eq!(
            payload.set_service_tag("bcd"),
            Err(InvalidField::ServiceTag("bcd".to_string()))
        );
        assert!(payload.set_identification("INST").is_err());
    }

    #[test]
    fn set_version() {
        let mut payload = Payload::create();
        payload.set_version(1).unwrap();
        assert_eq!(payload.version(), Version::V1);
        assert_eq!(payload.set_version(3), Err(InvalidField::Version(3)));
        assert_eq!(payload.set_version(0), Err(InvalidField::Version(0)));
        assert_eq!(payload.version(), Version::V1);
    }

    #[test]
    fn set_character_set() {
        let mut payload = Payload::create();
        payload.set_character_set(2).unwrap();
        assert_eq!(payload.character_set(), CharacterSet::Iso8859_1);
        assert!(payload.set_character_set(0).is_err());
        assert!(payload.set_character_set(9).is_err());
        assert_eq!(payload.character_set(), CharacterSet::Iso8859_1);
    }

    #[test]
    fn set_currency() {
        let mut payload = Payload::create();
        payload.set_currency("USD").unwrap();
        assert!(payload.set_currency("ABCDEF").is_err());
        assert!(payload.set_currency("EU").is_err());
        assert_eq!(payload.currency(), Some("USD"));
    }

    #[test]
    fn set_purpose() {
        let mut payload = Payload::create();
        payload.set_purpose("ACMT").unwrap();
        assert_eq!(
            payload.set_purpose("custom"),
            Err(InvalidField::Purpose("custom".to_string()))
        );
        assert_eq!(payload.purpose(), Some("ACMT"));
    }

    #[test]
    fn length_limits() {
        let mut payload = Payload::create();
        payload.set_name("a".repeat(70)).unwrap();
        assert_eq!(payload.set_name("a".repeat(71)), Err(InvalidField::Name(71)));
        payload.set_iban("N".repeat(34)).unwrap();
        assert_eq!(payload.set_iban("N".repeat(35)), Err(InvalidField::Iban(35)));
        payload.set_information("i".repeat(70)).unwrap();
        assert!(payload.set_information("i".repeat(71)).is_err());
        assert_eq!(payload.name(), Some("a".repeat(70).as_str()));
    }

    #[test]
    fn lengths_count_bytes() {
        let mut payload = Payload::create();
        payload.set_name("é".repeat(35)).unwrap();
        assert_eq!(payload.set_name("é".repeat(70)), Err(InvalidField::Name(140)));
        assert_eq!(payload.set_name("é".repeat(36)), Err(InvalidField::Name(72)));
        payload.set_bic("ÄBCDEFG").unwrap();
        assert_eq!(payload.set_bic("ÄBCDEFGH"), Err(InvalidField::Bic(9)));
        payload.set_purpose("ÄCM").unwrap();
        assert!(payload.set_purpose("ÄCMT").is_err());
        assert_eq!(payload.name(), Some("é".repeat(35).as_str()));
    }

    #[test]
    fn amount_rounding_in_money_line() {
        let mut payload = minimal();
        payload.set_amount(1.005).unwrap();
        assert_eq!(payload.lines().unwrap()[7], "EUR1.01");
        payload.set_amount(2.675).unwrap();
        assert_eq!(payload.lines().unwrap()[7], "EUR2.68");
        payload.set_amount(0.01f32).unwrap();
        assert_eq!(payload.lines().unwrap()[7], "EUR0.01");
    }

    #[test]
    fn remittance_reference_then_text_fails() {
        let mut payload = Payload::create();
        payload.set_remittance_reference("ABC").unwrap();
        assert_eq!(
            payload.set_remittance_text("DEF"),
            Err(InvalidField::RemittanceConflict)
        );
        assert_eq!(
            payload.remittance(),
            Some(&Remittance::Reference("ABC".to_string()))
        );
        payload.set_remittance_reference("XYZ").unwrap();
    }

    #[test]
    fn remittance_text_then_reference_fails() {
        let mut payload = Payload::create();
        payload.set_remittance_text("DEF").unwrap();
        assert_eq!(
            payload.set_remittance_reference("ABC"),
            Err(InvalidField::RemittanceConflict)
        );
    }

    #[test]
    fn remittance_length_checked_first() {
        let mut payload = Payload::create();
        payload.set_remittance_text("DEF").unwrap();
        assert_eq!(
            payload.set_remittance_reference("r".repeat(36)),
            Err(InvalidField::RemittanceReference(36))
        );
        assert!(payload.set_remittance_text("t".repeat(140)).is_ok());
        assert_eq!(
            payload.set_remittance_text("t".repeat(141)),
            Err(InvalidField::RemittanceText(141))
        );
    }

    #[test]
    fn amount_bounds() {
        let mut payload = Payload::create();
        payload.set_amount(0.01).unwrap();
        payload.set_amount(999_999_999.99).unwrap();
        assert_eq!(payload.amount(), Some(Amount::MAX_TRANSFER));
        assert!(matches!(
            payload.set_amount(0),
            Err(InvalidField::AmountTooSmall(_))
        ));
        assert!(matches!(
            payload.set_amount(-1.5),
            Err(InvalidField::AmountTooSmall(_))
        ));
        assert!(matches!(
            payload.set_amount(0.009),
            Err(InvalidField::AmountTooSmall(_))
        ));
        assert!(matches!(
            payload.set_amount(1_000_000_000),
            Err(InvalidField::AmountTooLarge(_))
        ));
        assert!(payload.set_amount(f64::NAN).is_err());
        assert_eq!(payload.amount(), Some(Amount::MAX_TRANSFER));
    }

    #[test]
    fn missing_name_and_iban() {
        let mut payload = Payload::create();
        assert_eq!(payload.render(), Err(MissingField::Name));
        payload.set_name("Test").unwrap();
        assert_eq!(payload.render(), Err(MissingField::Iban));
        payload.set_iban("ABC").unwrap();
        assert!(payload.render().is_ok());
    }

    #[test]
    fn empty_name_is_missing() {
        let mut payload = minimal();
        payload.set_name("").unwrap();
        assert_eq!(payload.render(), Err(MissingField::Name));
    }

    #[test]
    fn bic_only_required_for_version_1() {
        let mut payload = minimal();
        assert!(payload.render().is_ok());
        payload.set_version(1).unwrap();
        assert_eq!(payload.render(), Err(MissingField::Bic));
        payload.set_bic("ABCDEFGH").unwrap();
        assert_eq!(
            payload.render().unwrap(),
            "BCD\n001\n1\nSCT\nABCDEFGH\nTest\nABC\nEUR"
        );
    }

    #[test]
    fn bic_checked_before_name() {
        let mut payload = Payload::create();
        payload.set_version(1).unwrap();
        assert_eq!(payload.render(), Err(MissingField::Bic));
    }

    #[test]
    fn encode_message() {
        let mut payload = minimal();
        payload
            .set_amount(1075.25)
            .unwrap()
            .set_remittance_text("DEF")
            .unwrap();
        let message = payload.render().unwrap();

        assert!(message.contains("1075.25"));
        assert_eq!(message.split('\n').count(), 11);
        assert!(message.ends_with("DEF"));
        assert_eq!(message, "BCD\n002\n1\nSCT\n\nTest\nABC\nEUR1075.25\n\n\nDEF");
    }

    #[test]
    fn every_field() {
        let mut payload = Payload::create();
        payload
            .set_version(1)
            .unwrap()
            .set_character_set(8)
            .unwrap()
            .set_bic("ABCDNL2AXXX")
            .unwrap()
            .set_name("Stichting Test")
            .unwrap()
            .set_iban("NL12ABCD0123456789")
            .unwrap()
            .set_currency("usd")
            .unwrap()
            .set_amount(12)
            .unwrap()
            .set_purpose("CHAR")
            .unwrap()
            .set_remittance_reference("RF18539007547034")
            .unwrap()
            .set_information("Thanks")
            .unwrap();
        assert_eq!(
            payload.lines().unwrap(),
            [
                "BCD",
                "001",
                "8",
                "SCT",
                "ABCDNL2AXXX",
                "Stichting Test",
                "NL12ABCD0123456789",
                "USD12.00",
                "CHAR",
                "RF18539007547034",
                "",
                "Thanks",
            ]
        );
        assert_eq!(
            payload.render().unwrap(),
            "BCD\n001\n8\nSCT\nABCDNL2AXXX\nStichting Test\nNL12ABCD0123456789\nUSD12.00\nCHAR\nRF18539007547034\n\nThanks"
        );
    }

    #[test]
    fn create_gives_independent_instances() {
        let mut a = Payload::create();
        let b = Payload::create();
        a.set_name("Changed").unwrap();
        assert_eq!(b.name(), None);
        assert_ne!(a, b);
    }

    #[test]
    fn rerender_after_change() {
        let mut payload = minimal();
        let first = payload.render().unwrap();
        payload.set_information("later").unwrap();
        let second = payload.render().unwrap();
        assert_ne!(first, second);
        assert!(second.ends_with("\nlater"));
    }

    proptest! {
        #[test]
        fn bic_lengths(len in 0usize..20) {
            let mut payload = Payload::create();
            let result = payload.set_bic("B".repeat(len));
            prop_assert_eq!(result.is_ok(), len == 8 || len == 11);
        }

        #[test]
        fn render_is_idempotent(
            name in "[A-Za-z ]{1,70}",
            iban in "[A-Z0-9]{1,34}",
            cents in proptest::option::of(1i64..=99_999_999_999),
            text in proptest::option::of("[a-z]{0,140}"),
        ) {
            let mut payload = Payload::create();
            payload.set_name(name).unwrap().set_iban(iban).unwrap();
            if let Some(cents) = cents {
                payload.set_amount(cents as f64 / 100.0).unwrap();
            }
            if let Some(text) = text {
                payload.set_remittance_text(text).unwrap();
            }
            let first = payload.render().unwrap();
            prop_assert_eq!(&first, &payload.render().unwrap());
            prop_assert!(!first.ends_with('\n'));
        }
    }
}
