use crate::Data;
use std::{fmt, ops::Deref};
use string_cache::DefaultAtom;

/// Interned strings. Used for assign keys and other identifiers.
///
/// Comparison is case-sensitive.
#[derive(Clone, Eq, PartialEq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Atom(DefaultAtom);

impl Atom {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Atom {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Atom {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Data for Atom {
    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

impl From<&str> for Atom {
    fn from(value: &str) -> Self {
        Atom(DefaultAtom::from(value))
    }
}

impl From<String> for Atom {
    fn from(value: String) -> Self {
        Atom(DefaultAtom::from(value))
    }
}

impl From<&String> for Atom {
    fn from(value: &String) -> Self {
        Atom(DefaultAtom::from(value.as_str()))
    }
}

impl From<&Atom> for Atom {
    fn from(value: &Atom) -> Self {
        value.clone()
    }
}

impl PartialEq<str> for Atom {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Atom {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
