//! Count spaces: a union of ranges.
//!
//! Count dimensions (cores, memory, disks) accept either one range or a set
//! of alternatives such as "2 to 4, or 16 to 32". A single-range count space
//! behaves exactly like its [`Range`].

use std::fmt;

use super::{Range, Space};
use crate::error::{EnvMatchError, Result};
use crate::verdict::{Incompatible, VerdictTrail};

/// A non-empty union of [`Range`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountSpace {
    ranges: Vec<Range>,
}

impl CountSpace {
    /// Build a union, rejecting an empty one.
    pub fn new(ranges: Vec<Range>) -> Result<Self> {
        if ranges.is_empty() {
            return Err(EnvMatchError::EmptyCountSpace);
        }
        Ok(Self { ranges })
    }

    /// Exactly `value`.
    pub fn exact(value: u64) -> Self {
        Range::exact(value).into()
    }

    /// The alternatives, in declaration order.
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// The single exact value, if this space denotes one.
    pub fn as_exact(&self) -> Option<u64> {
        match self.ranges.as_slice() {
            [only] if only.is_exact() => Some(only.min()),
            _ => None,
        }
    }

    /// Whether `value` lies in any alternative.
    pub fn contains(&self, value: u64) -> bool {
        self.ranges.iter().any(|r| r.contains(value))
    }

    /// Smallest value admitted by both spaces.
    fn meet_lower(&self, capability: &CountSpace) -> Option<u64> {
        self.ranges
            .iter()
            .flat_map(|req| capability.ranges.iter().filter_map(|cap| req.meet_lower(cap)))
            .min()
    }

    fn mismatch_reason(&self, capability: &CountSpace) -> String {
        match (self.ranges.as_slice(), capability.ranges.as_slice()) {
            ([req], [cap]) => req.mismatch_reason(cap),
            _ => format!("requires {}, capability offers {}", self, capability),
        }
    }
}

impl From<Range> for CountSpace {
    fn from(range: Range) -> Self {
        Self {
            ranges: vec![range],
        }
    }
}

impl From<u64> for CountSpace {
    fn from(value: u64) -> Self {
        Self::exact(value)
    }
}

impl fmt::Display for CountSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.ranges.iter().map(|r| r.to_string()).collect();
        write!(f, "{}", parts.join(" or "))
    }
}

impl Space for CountSpace {
    fn unbounded() -> Self {
        Range::any().into()
    }

    fn check(&self, capability: &Self) -> VerdictTrail {
        if self.meet_lower(capability).is_some() {
            VerdictTrail::pass()
        } else {
            VerdictTrail::fail(self.mismatch_reason(capability))
        }
    }

    fn derive_minimum(&self, capability: &Self) -> std::result::Result<Self, Incompatible> {
        self.meet_lower(capability)
            .map(CountSpace::exact)
            .ok_or_else(|| Incompatible::because(self.mismatch_reason(capability)))
    }
}
