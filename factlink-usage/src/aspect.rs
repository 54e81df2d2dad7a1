//! Aspect vocabulary and the aspect-key codec
//!
//! An aspect names one facet of an entity that page content can depend on.
//! An aspect key pairs an aspect with an optional modifier (typically a
//! language code) that narrows it to a sub-facet, and has a canonical
//! encoded form such as `L.de` or `T`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Separator between an aspect code and its modifier in the encoded form.
/// Not legal inside an aspect code.
pub const MODIFIER_SEPARATOR: char = '.';

/// Errors raised at the usage-tracking parse boundaries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    /// The string does not decompose into a known aspect code plus an
    /// optional non-empty modifier.
    #[error("malformed aspect key: {0:?}")]
    MalformedKey(String),
}

/// A named facet of an entity that page content can depend on
///
/// The vocabulary is closed; every site that branches on an aspect matches
/// exhaustively. Each aspect has a fixed single-letter code used in encoded
/// aspect keys and usage identity strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aspect {
    /// Label text, may be narrowed to one language
    Label,
    /// Description text, may be narrowed to one language
    Description,
    /// The local page title derived from the entity's sitelink
    Title,
    /// Sitelink targets of the entity
    Sitelink,
    /// Statement (claim) data
    Statement,
    /// Wildcard: any and every aspect of the entity
    All,
}

impl Aspect {
    /// The single-letter code used in encoded keys
    pub fn code(self) -> &'static str {
        match self {
            Aspect::Label => "L",
            Aspect::Description => "D",
            Aspect::Title => "T",
            Aspect::Sitelink => "S",
            Aspect::Statement => "C",
            Aspect::All => "X",
        }
    }

    /// Inverse of [`Aspect::code`]
    pub fn from_code(code: &str) -> Result<Self, UsageError> {
        match code {
            "L" => Ok(Aspect::Label),
            "D" => Ok(Aspect::Description),
            "T" => Ok(Aspect::Title),
            "S" => Ok(Aspect::Sitelink),
            "C" => Ok(Aspect::Statement),
            "X" => Ok(Aspect::All),
            _ => Err(UsageError::MalformedKey(code.to_string())),
        }
    }

    /// Whether keys with this aspect may carry a modifier
    ///
    /// The wildcard stands for every aspect at once and cannot be narrowed.
    pub fn accepts_modifier(self) -> bool {
        !matches!(self, Aspect::All)
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An aspect together with its optional modifier
///
/// The unmodified form (`L`) covers the whole aspect; the modified form
/// (`L.de`) covers one sub-facet. Ordering is lexicographic over the
/// encoded form, which is the canonical order used wherever a deterministic
/// sequence of keys is produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AspectKey {
    aspect: Aspect,
    modifier: Option<String>,
}

impl AspectKey {
    /// The unmodified key for `aspect`
    pub fn new(aspect: Aspect) -> Self {
        AspectKey {
            aspect,
            modifier: None,
        }
    }

    /// The key for `aspect` narrowed by `modifier`
    ///
    /// Fails with [`UsageError::MalformedKey`] when the aspect does not
    /// accept a modifier or the modifier is empty.
    pub fn modified(aspect: Aspect, modifier: impl Into<String>) -> Result<Self, UsageError> {
        let modifier = modifier.into();
        if !aspect.accepts_modifier() || modifier.is_empty() {
            return Err(UsageError::MalformedKey(format!(
                "{}{}{}",
                aspect.code(),
                MODIFIER_SEPARATOR,
                modifier
            )));
        }
        Ok(AspectKey {
            aspect,
            modifier: Some(modifier),
        })
    }

    // Constructor for crate call sites that pair known-compatible aspects
    // and modifiers. Empty modifiers collapse to the unmodified form.
    pub(crate) fn from_parts(aspect: Aspect, modifier: Option<String>) -> Self {
        let modifier = modifier.filter(|m| !m.is_empty());
        debug_assert!(modifier.is_none() || aspect.accepts_modifier());
        AspectKey { aspect, modifier }
    }

    /// The aspect this key belongs to
    pub fn aspect(&self) -> Aspect {
        self.aspect
    }

    /// The modifier, if any
    pub fn modifier(&self) -> Option<&str> {
        self.modifier.as_deref()
    }

    /// The aspect alone, independent of whether a modifier is present
    pub fn strip_modifier(&self) -> Aspect {
        self.aspect
    }

    /// Whether this key carries a modifier
    pub fn is_modified(&self) -> bool {
        self.modifier.is_some()
    }

    /// The canonical encoded form, e.g. `L.de` or `T`
    pub fn encode(&self) -> String {
        match &self.modifier {
            Some(modifier) => format!(
                "{}{}{}",
                self.aspect.code(),
                MODIFIER_SEPARATOR,
                modifier
            ),
            None => self.aspect.code().to_string(),
        }
    }

    /// Exact inverse of [`AspectKey::encode`]
    ///
    /// The key is split on the first separator, so a modifier may itself
    /// contain `.` and survives the round trip verbatim.
    pub fn parse(key: &str) -> Result<Self, UsageError> {
        let malformed = || UsageError::MalformedKey(key.to_string());

        match key.split_once(MODIFIER_SEPARATOR) {
            None => {
                let aspect = Aspect::from_code(key).map_err(|_| malformed())?;
                Ok(AspectKey::new(aspect))
            }
            Some((code, modifier)) => {
                let aspect = Aspect::from_code(code).map_err(|_| malformed())?;
                AspectKey::modified(aspect, modifier).map_err(|_| malformed())
            }
        }
    }
}

impl fmt::Display for AspectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for AspectKey {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AspectKey::parse(s)
    }
}

impl PartialOrd for AspectKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AspectKey {
    // No aspect code is a prefix of another, so comparing (code, modifier)
    // with None before Some is the lexicographic order of the encoded form.
    fn cmp(&self, other: &Self) -> Ordering {
        self.aspect
            .code()
            .cmp(other.aspect.code())
            .then_with(|| self.modifier.cmp(&other.modifier))
    }
}

impl Serialize for AspectKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for AspectKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        AspectKey::parse(&key).map_err(serde::de::Error::custom)
    }
}
