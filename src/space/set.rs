//! Discrete token sets.

use std::collections::BTreeSet;
use std::fmt;

use super::Space;
use crate::verdict::{Incompatible, VerdictTrail};

/// A finite set of tokens read either as an allow-list or a deny-list.
///
/// An allow-list admits exactly its items; a deny-list admits every token
/// except its items. The empty deny-list admits everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiscreteSet {
    items: BTreeSet<String>,
    is_allow_list: bool,
}

impl DiscreteSet {
    /// Build a set from items and polarity.
    pub fn new<I, S>(items: I, is_allow_list: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            is_allow_list,
        }
    }

    /// Admit exactly `items`.
    pub fn allow<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(items, true)
    }

    /// Admit everything except `items`.
    pub fn deny<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(items, false)
    }

    /// Admit every token.
    pub fn any() -> Self {
        Self {
            items: BTreeSet::new(),
            is_allow_list: false,
        }
    }

    /// The listed tokens (admitted or excluded depending on polarity).
    pub fn items(&self) -> &BTreeSet<String> {
        &self.items
    }

    /// Whether the items are the admitted tokens.
    pub fn is_allow_list(&self) -> bool {
        self.is_allow_list
    }

    /// The admitted tokens when they form a finite set.
    ///
    /// `None` for deny-lists: their complement is unbounded, so a derived
    /// deny-list has no concrete minimum even though it is compatible.
    pub fn finite_items(&self) -> Option<&BTreeSet<String>> {
        self.is_allow_list.then_some(&self.items)
    }

    /// Whether `token` is admitted.
    pub fn admits(&self, token: &str) -> bool {
        self.items.contains(token) == self.is_allow_list
    }

    /// Effective intersection of two sets.
    fn meet(&self, other: &DiscreteSet) -> DiscreteSet {
        match (self.is_allow_list, other.is_allow_list) {
            (true, true) => DiscreteSet {
                items: self.items.intersection(&other.items).cloned().collect(),
                is_allow_list: true,
            },
            (true, false) => DiscreteSet {
                items: self.items.difference(&other.items).cloned().collect(),
                is_allow_list: true,
            },
            (false, true) => DiscreteSet {
                items: other.items.difference(&self.items).cloned().collect(),
                is_allow_list: true,
            },
            (false, false) => DiscreteSet {
                items: self.items.union(&other.items).cloned().collect(),
                is_allow_list: false,
            },
        }
    }

    fn is_empty(&self) -> bool {
        self.is_allow_list && self.items.is_empty()
    }

    fn mismatch_reason(&self, capability: &DiscreteSet) -> String {
        format!("requires {}, capability offers {}", self, capability)
    }
}

impl Default for DiscreteSet {
    fn default() -> Self {
        Self::any()
    }
}

impl fmt::Display for DiscreteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<&str> = self.items.iter().map(String::as_str).collect();
        match (self.is_allow_list, items.is_empty()) {
            (true, true) => write!(f, "nothing"),
            (true, false) => write!(f, "{{{}}}", items.join(", ")),
            (false, true) => write!(f, "any"),
            (false, false) => write!(f, "any except {{{}}}", items.join(", ")),
        }
    }
}

impl Space for DiscreteSet {
    fn unbounded() -> Self {
        Self::any()
    }

    fn check(&self, capability: &Self) -> VerdictTrail {
        if self.meet(capability).is_empty() {
            VerdictTrail::fail(self.mismatch_reason(capability))
        } else {
            VerdictTrail::pass()
        }
    }

    fn derive_minimum(&self, capability: &Self) -> Result<Self, Incompatible> {
        let meet = self.meet(capability);
        if meet.is_empty() {
            Err(Incompatible::because(self.mismatch_reason(capability)))
        } else {
            Ok(meet)
        }
    }
}
