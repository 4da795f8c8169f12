//! Named integer sets: enumerations and bitflags
//!
//! ```
//! use nark_domain::value_objects::FlagSet;
//!
//! let flags = FlagSet::new(["ONE", "TWO", "THREE"]).unwrap();
//! let both = flags["ONE"] | flags["TWO"];
//! assert!(both.contains(flags["ONE"]));
//! assert!(!both.contains(flags["THREE"]));
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Index};

use serde::{Deserialize, Serialize};

use crate::constants::MAX_FLAG_COUNT;
use crate::error::{Error, Result};

/// A fixed set of names mapped to distinct integers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration {
    values: BTreeMap<String, u64>,
}

impl Enumeration {
    /// Sequential values starting at zero, in the order given
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .fold(EnumerationBuilder::default(), EnumerationBuilder::name)
            .build()
    }

    /// Builder for enumerations that mix sequential and explicit values
    pub fn builder() -> EnumerationBuilder {
        EnumerationBuilder::default()
    }

    /// Value for `name`
    pub fn get(&self, name: &str) -> Option<u64> {
        self.values.get(name).copied()
    }

    /// Name carrying `value`
    pub fn name_of(&self, value: u64) -> Option<&str> {
        self.values
            .iter()
            .find(|(_, v)| **v == value)
            .map(|(name, _)| name.as_str())
    }

    /// Number of names
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the enumeration has no names
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(name, value)` pairs ordered by value
    ///
    /// For sequential enumerations this is declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        let mut pairs: Vec<_> = self
            .values
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();
        pairs.sort_unstable_by_key(|&(_, value)| value);
        pairs.into_iter()
    }
}

impl Index<&str> for Enumeration {
    type Output = u64;

    fn index(&self, name: &str) -> &u64 {
        match self.values.get(name) {
            Some(value) => value,
            None => panic!("no enumeration value named '{name}'"),
        }
    }
}

/// Builder for [`Enumeration`]
///
/// Names added with [`name`](Self::name) continue counting from the last
/// value assigned, explicit or not.
#[derive(Debug, Default)]
pub struct EnumerationBuilder {
    entries: Vec<(String, Option<u64>)>,
}

impl EnumerationBuilder {
    /// Add a name with the next sequential value
    #[must_use]
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.entries.push((name.into(), None));
        self
    }

    /// Add a name with an explicit value
    #[must_use]
    pub fn value<S: Into<String>>(mut self, name: S, value: u64) -> Self {
        self.entries.push((name.into(), Some(value)));
        self
    }

    /// Assign values, rejecting duplicate names or values
    pub fn build(self) -> Result<Enumeration> {
        let mut values = BTreeMap::new();
        let mut seen = HashSet::new();
        let mut next = 0u64;
        for (name, explicit) in self.entries {
            let value = explicit.unwrap_or(next);
            if !seen.insert(value) {
                return Err(Error::invalid_argument(format!(
                    "duplicate enumeration value {value} for '{name}'"
                )));
            }
            if values.insert(name.clone(), value).is_some() {
                return Err(Error::invalid_argument(format!(
                    "duplicate enumeration name '{name}'"
                )));
            }
            next = value.wrapping_add(1);
        }
        Ok(Enumeration { values })
    }
}

/// A combination of bitflags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flag(u64);

impl Flag {
    /// The empty combination
    pub const EMPTY: Flag = Flag(0);

    /// Wrap raw bits
    pub fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Raw bits
    pub fn bits(self) -> u64 {
        self.0
    }

    /// Whether every bit of `other` is set in `self`
    pub fn contains(self, other: Flag) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether any bit of `other` is set in `self`
    pub fn intersects(self, other: Flag) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether no bits are set
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Flag {
    type Output = Flag;

    fn bitor(self, rhs: Flag) -> Flag {
        Flag(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flag {
    fn bitor_assign(&mut self, rhs: Flag) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Flag {
    type Output = Flag;

    fn bitand(self, rhs: Flag) -> Flag {
        Flag(self.0 & rhs.0)
    }
}

impl BitAndAssign for Flag {
    fn bitand_assign(&mut self, rhs: Flag) {
        self.0 &= rhs.0;
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}

/// A fixed set of names mapped to power-of-two flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSet {
    names: Vec<String>,
}

impl FlagSet {
    /// One bit per name, in the order given (`1, 2, 4, ...`)
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collected: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if collected.contains(&name) {
                return Err(Error::invalid_argument(format!(
                    "duplicate flag name '{name}'"
                )));
            }
            collected.push(name);
        }
        if collected.len() > MAX_FLAG_COUNT {
            return Err(Error::invalid_argument(format!(
                "at most {MAX_FLAG_COUNT} flags are supported, got {}",
                collected.len()
            )));
        }
        Ok(Self { names: collected })
    }

    /// Flag for `name`
    pub fn get(&self, name: &str) -> Option<Flag> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .map(|bit| Flag(1 << bit))
    }

    /// Union of every flag in the set
    pub fn all(&self) -> Flag {
        self.names
            .iter()
            .enumerate()
            .fold(Flag::EMPTY, |acc, (bit, _)| acc | Flag(1 << bit))
    }

    /// Names whose flag is set in `value`, in declaration order
    pub fn names_in(&self, value: Flag) -> Vec<&str> {
        self.names
            .iter()
            .enumerate()
            .filter(|(bit, _)| value.contains(Flag(1 << bit)))
            .map(|(_, name)| name.as_str())
            .collect()
    }

    /// Number of flags
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set has no flags
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Index<&str> for FlagSet {
    type Output = Flag;

    fn index(&self, name: &str) -> &Flag {
        // Flags are computed, so hand out references into a static table.
        static TABLE: [Flag; MAX_FLAG_COUNT] = {
            let mut table = [Flag(0); MAX_FLAG_COUNT];
            let mut bit = 0;
            while bit < MAX_FLAG_COUNT {
                table[bit] = Flag(1 << bit);
                bit += 1;
            }
            table
        };
        match self.names.iter().position(|candidate| candidate == name) {
            Some(bit) => &TABLE[bit],
            None => panic!("no flag named '{name}'"),
        }
    }
}
