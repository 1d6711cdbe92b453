use std::fmt;

use serde::{Deserialize, Serialize};

pub const DECK_ID_MAX_LEN: usize = 64;
pub const NEW_DECK_SEGMENT: &str = "new";

pub fn is_valid_deck_id(value: &str) -> bool {
    DeckId::parse(value).is_ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeckId(String);

impl DeckId {
    pub fn parse(value: &str) -> Result<Self, DeckIdError> {
        if value.is_empty() {
            return Err(DeckIdError::Empty);
        }
        if value.len() > DECK_ID_MAX_LEN {
            return Err(DeckIdError::TooLong {
                max: DECK_ID_MAX_LEN,
                found: value.len(),
            });
        }
        for (idx, ch) in value.chars().enumerate() {
            if !ch.is_ascii_alphanumeric() {
                return Err(DeckIdError::InvalidCharacter { ch, index: idx });
            }
        }
        // "new" addresses a fresh deck on the service, never an existing one.
        if value.eq_ignore_ascii_case(NEW_DECK_SEGMENT) {
            return Err(DeckIdError::Reserved);
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for DeckId {
    type Err = DeckIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for DeckId {
    type Error = DeckIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DeckId> for String {
    fn from(value: DeckId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckIdError {
    Empty,
    TooLong { max: usize, found: usize },
    InvalidCharacter { ch: char, index: usize },
    Reserved,
}

impl fmt::Display for DeckIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckIdError::Empty => write!(f, "deck id cannot be empty"),
            DeckIdError::TooLong { max, found } => {
                write!(f, "deck id must be at most {max} chars, got {found}")
            }
            DeckIdError::InvalidCharacter { ch, index } => {
                write!(f, "invalid character '{ch}' at position {index}")
            }
            DeckIdError::Reserved => write!(f, "'{NEW_DECK_SEGMENT}' is not a deck id"),
        }
    }
}

impl std::error::Error for DeckIdError {}
