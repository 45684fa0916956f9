use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Encoding tag carried in the third line of a payload.
///
/// The tag only tells the reading app how to decode the text; nothing in
/// this workspace re-encodes strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterSet {
    #[default]
    Utf8 = 1,
    Iso8859_1 = 2,
    Iso8859_2 = 3,
    Iso8859_4 = 4,
    Iso8859_5 = 5,
    Iso8859_7 = 6,
    Iso8859_10 = 7,
    Iso8859_15 = 8,
}

impl CharacterSet {
    pub const ALL: [CharacterSet; 8] = [
        CharacterSet::Utf8,
        CharacterSet::Iso8859_1,
        CharacterSet::Iso8859_2,
        CharacterSet::Iso8859_4,
        CharacterSet::Iso8859_5,
        CharacterSet::Iso8859_7,
        CharacterSet::Iso8859_10,
        CharacterSet::Iso8859_15,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            CharacterSet::Utf8 => "UTF-8",
            CharacterSet::Iso8859_1 => "ISO-8859-1",
            CharacterSet::Iso8859_2 => "ISO-8859-2",
            CharacterSet::Iso8859_4 => "ISO-8859-4",
            CharacterSet::Iso8859_5 => "ISO-8859-5",
            CharacterSet::Iso8859_7 => "ISO-8859-7",
            CharacterSet::Iso8859_10 => "ISO-8859-10",
            CharacterSet::Iso8859_15 => "ISO-8859-15",
        }
    }
}

impl Display for CharacterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for CharacterSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for CharacterSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u8::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown character set {code}")))
    }
}
