//! Identifier management using string interning for efficient storage and comparison
//!
//! This module provides the [`ArtifactId`] type, the identity of one artifact
//! on the canvas. Identifiers are interned once and compared as symbols.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// The interned identity of an artifact in the current view.
///
/// Two `ArtifactId`s created from the same name compare equal and hash
/// identically, which makes them cheap map keys for position and override
/// maps.
///
/// # Examples
///
/// ```
/// use atelier_core::identifier::ArtifactId;
///
/// let home = ArtifactId::new("01-home");
/// let again = ArtifactId::new("01-home");
/// assert_eq!(home, again);
/// assert_eq!(home, "01-home");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtifactId(DefaultSymbol);

impl ArtifactId {
    /// Creates an `ArtifactId` from a name, interning it if new.
    pub fn new(name: &str) -> Self {
        let mut interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let symbol = interner.get_or_intern(name);
        Self(symbol)
    }

    /// Returns the interned name as an owned string.
    pub fn name(&self) -> String {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        interner
            .resolve(self.0)
            .expect("Symbol should exist in interner")
            .to_owned()
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ArtifactId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for ArtifactId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for ArtifactId {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let self_str = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        self_str == other
    }
}

impl PartialEq<&str> for ArtifactId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for ArtifactId {
    /// Serializes as the plain identifier string.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ArtifactId {
    /// Deserializes from a plain string, interning it.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl de::Visitor<'_> for IdVisitor {
            type Value = ArtifactId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an artifact identifier string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(ArtifactId::new(value))
            }
        }

        deserializer.deserialize_str(IdVisitor)
    }
}
