use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Canonical JSON in, TOON out.
    ToCompactFormat,
    /// TOON in, canonical JSON out.
    ToCanonicalJson,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::ToCompactFormat => "json-to-toon",
            Direction::ToCanonicalJson => "toon-to-json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Delimiter {
    #[default]
    #[serde(rename = ",")]
    Comma,
    #[serde(rename = "\t")]
    Tab,
    #[serde(rename = "|")]
    Pipe,
}

impl Delimiter {
    pub fn as_str(self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }

    /// Parses either the delimiter itself or its name (`comma`, `tab`, `pipe`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "," => Some(Delimiter::Comma),
            "\t" => Some(Delimiter::Tab),
            "|" => Some(Delimiter::Pipe),
            other => match other.trim().to_ascii_lowercase().as_str() {
                "comma" => Some(Delimiter::Comma),
                "tab" => Some(Delimiter::Tab),
                "pipe" => Some(Delimiter::Pipe),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("indent size must be between {min} and {max}, got {0}", min = IndentSize::MIN, max = IndentSize::MAX)]
pub struct InvalidIndentSize(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct IndentSize(u8);

impl IndentSize {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;

    pub fn new(value: u8) -> Result<Self, InvalidIndentSize> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidIndentSize(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for IndentSize {
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<u8> for IndentSize {
    type Error = InvalidIndentSize;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IndentSize> for u8 {
    fn from(value: IndentSize) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ConversionOptions {
    pub indent: IndentSize,
    pub delimiter: Delimiter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DataFormat {
    #[default]
    #[serde(rename = "JSON")]
    Json,
    #[serde(rename = "TOON")]
    Toon,
}

impl DataFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            DataFormat::Json => "JSON",
            DataFormat::Toon => "TOON",
        }
    }
}
