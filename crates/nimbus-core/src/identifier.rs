//! Identifier management using string interning for efficient string storage and comparison
//!
//! This module provides the [`Id`] type used to name nodes and clusters inside
//! a diagram. Identifiers are what end up as node and subgraph names in the
//! generated DOT source.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<T>(f: impl FnOnce(&mut DefaultStringInterner) -> T) -> T {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Efficient identifier type using string interning
///
/// # Examples
///
/// ```
/// use nimbus_core::identifier::Id;
///
/// let node_id = Id::new("route53");
/// assert_eq!(node_id, "route53");
///
/// let indexed = Id::indexed("node", 4);
/// assert_eq!(indexed, "node_4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates an identifier of the form `<prefix>_<idx>`.
    ///
    /// Builders use this to hand out stable, diagram-local names for the
    /// elements they create.
    ///
    /// # Examples
    ///
    /// ```
    /// use nimbus_core::identifier::Id;
    ///
    /// assert_eq!(Id::indexed("cluster", 0), "cluster_0");
    /// ```
    pub fn indexed(prefix: &str, idx: usize) -> Self {
        Self::new(&format!("{prefix}_{idx}"))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_interner(|interner| {
            let str_value = interner
                .resolve(self.0)
                .expect("Symbol should exist in interner");
            write!(f, "{str_value}")
        })
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                == other
        })
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
