//! Numeric ranges.

use std::fmt;

use super::Space;
use crate::error::{EnvMatchError, Result};
use crate::verdict::{Incompatible, VerdictTrail};

/// An interval over unsigned counts.
///
/// The lower bound is always inclusive; an absent lower bound means
/// unbounded below, which for counts is `0`. An absent upper bound means
/// unbounded above. `min == max` with an inclusive upper bound is an exact
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    min: u64,
    max: Option<u64>,
    max_inclusive: bool,
}

impl Range {
    /// Build a range, rejecting bounds that admit no value.
    pub fn new(min: Option<u64>, max: Option<u64>, max_inclusive: bool) -> Result<Self> {
        let lower = min.unwrap_or(0);
        if let Some(max) = max {
            if lower > max {
                return Err(EnvMatchError::InvalidRange {
                    message: format!("min {} is greater than max {}", lower, max),
                });
            }
            if lower == max && !max_inclusive {
                return Err(EnvMatchError::InvalidRange {
                    message: format!("min {} is equal to the exclusive max {}", lower, max),
                });
            }
        }
        Ok(Self {
            min: lower,
            max,
            max_inclusive: max.is_none() || max_inclusive,
        })
    }

    /// The fully open range.
    pub fn any() -> Self {
        Self {
            min: 0,
            max: None,
            max_inclusive: true,
        }
    }

    /// Exactly `value`.
    pub fn exact(value: u64) -> Self {
        Self {
            min: value,
            max: Some(value),
            max_inclusive: true,
        }
    }

    /// `value` or more.
    pub fn at_least(value: u64) -> Self {
        Self {
            min: value,
            max: None,
            max_inclusive: true,
        }
    }

    /// At most `value`, inclusive.
    pub fn at_most(value: u64) -> Self {
        Self {
            min: 0,
            max: Some(value),
            max_inclusive: true,
        }
    }

    /// Inclusive `[min, max]`.
    pub fn between(min: u64, max: u64) -> Result<Self> {
        Self::new(Some(min), Some(max), true)
    }

    /// Lower bound (inclusive).
    pub fn min(&self) -> u64 {
        self.min
    }

    /// Upper bound, if any.
    pub fn max(&self) -> Option<u64> {
        self.max
    }

    /// Whether the upper bound itself is admitted.
    pub fn max_inclusive(&self) -> bool {
        self.max_inclusive
    }

    /// Whether this range denotes a single value.
    pub fn is_exact(&self) -> bool {
        self.max == Some(self.min) && self.max_inclusive
    }

    /// Whether `value` lies in the range.
    pub fn contains(&self, value: u64) -> bool {
        value >= self.min
            && match self.max {
                None => true,
                Some(max) if self.max_inclusive => value <= max,
                Some(max) => value < max,
            }
    }

    /// Smallest value admitted by both ranges.
    pub fn meet_lower(&self, other: &Range) -> Option<u64> {
        let lower = self.min.max(other.min);
        let upper = match (self.upper(), other.upper()) {
            (None, bound) | (bound, None) => bound,
            (Some((a, a_incl)), Some((b, b_incl))) => {
                if a < b {
                    Some((a, a_incl))
                } else if b < a {
                    Some((b, b_incl))
                } else {
                    Some((a, a_incl && b_incl))
                }
            }
        };
        match upper {
            None => Some(lower),
            Some((max, true)) if lower <= max => Some(lower),
            Some((max, false)) if lower < max => Some(lower),
            _ => None,
        }
    }

    fn upper(&self) -> Option<(u64, bool)> {
        self.max.map(|max| (max, self.max_inclusive))
    }

    pub(crate) fn mismatch_reason(&self, capability: &Range) -> String {
        if capability.is_exact() {
            format!("{} not in {}", capability, self)
        } else {
            format!("requires {}, capability offers {}", self, capability)
        }
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::any()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_exact() {
            return write!(f, "{}", self.min);
        }
        match self.max {
            None => write!(f, "[{}, inf)", self.min),
            Some(max) if self.max_inclusive => write!(f, "[{}, {}]", self.min, max),
            Some(max) => write!(f, "[{}, {})", self.min, max),
        }
    }
}

impl Space for Range {
    fn unbounded() -> Self {
        Self::any()
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
            .map(Range::exact)
            .ok_or_else(|| Incompatible::because(self.mismatch_reason(capability)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(min: u64, max: u64) -> Range {
        Range::between(min, max).unwrap()
    }

    fn r_excl(min: u64, max: u64) -> Range {
        Range::new(Some(min), Some(max), false).unwrap()
    }

    #[test]
    fn rejects_min_above_max() {
        let err = Range::between(6, 4).unwrap_err();
        assert!(err.to_string().contains("greater than"));
    }

    #[test]
    fn rejects_empty_exclusive_range() {
        let err = Range::new(Some(5), Some(5), false).unwrap_err();
        assert!(err.to_string().contains("equal to"));
        assert!(Range::new(None, Some(0), false).is_err());
    }

    #[test]
    fn degenerate_range_is_exact() {
        assert!(r(5, 5).is_exact());
        assert_eq!(r(5, 5), Range::exact(5));
        assert!(!Range::at_least(5).is_exact());
    }

    #[test]
    fn contains_respects_exclusive_upper_bound() {
        let range = r_excl(10, 15);
        assert!(range.contains(10));
        assert!(range.contains(14));
        assert!(!range.contains(15));
        assert!(!range.contains(9));
    }

    #[test]
    fn inclusive_requirement_matrix() {
        let req = r(10, 15);
        let cases = [
            (Range::exact(12), Some(12)),
            (Range::exact(10), Some(10)),
            (Range::exact(15), Some(15)),
            (Range::exact(20), None),
            (r(5, 11), Some(10)),
            (r(5, 10), Some(10)),
            (r_excl(5, 10), None),
            (r(15, 20), Some(15)),
            (r(1, 5), None),
            (r(20, 100), None),
        ];
        for (cap, expected) in cases {
            assert_eq!(req.check(&cap).is_pass(), expected.is_some(), "cap {}", cap);
            assert_eq!(
                req.derive_minimum(&cap).ok(),
                expected.map(Range::exact),
                "cap {}",
                cap
            );
        }
    }

    #[test]
    fn exclusive_requirement_matrix() {
        let req = r_excl(10, 15);
        let cases = [
            (Range::exact(12), Some(12)),
            (Range::exact(10), Some(10)),
            (Range::exact(15), None),
            (r(5, 11), Some(10)),
            (r_excl(5, 10), None),
            (r(15, 20), None),
        ];
        for (cap, expected) in cases {
            assert_eq!(req.check(&cap).is_pass(), expected.is_some(), "cap {}", cap);
            assert_eq!(req.derive_minimum(&cap).ok(), expected.map(Range::exact));
        }
    }

    #[test]
    fn open_bounds_meet_at_capability_floor() {
        let req = Range::at_least(5);
        assert!(!req.check(&Range::at_most(4)).is_pass());
        assert_eq!(
            req.derive_minimum(&Range::at_least(2)).unwrap(),
            Range::exact(5)
        );
        assert_eq!(
            Range::any().derive_minimum(&Range::at_least(3)).unwrap(),
            Range::exact(3)
        );
    }

    #[test]
    fn derive_fails_on_disjoint_ranges() {
        let err = Range::at_least(5).derive_minimum(&Range::at_most(4)).unwrap_err();
        assert!(err.to_string().contains("requires [5, inf)"));
    }

    #[test]
    fn reason_names_exact_capability() {
        let trail = r(4, 8).check(&Range::exact(10));
        assert_eq!(trail.reasons(), ["10 not in [4, 8]".to_string()]);
    }

    #[test]
    fn display_forms() {
        assert_eq!(Range::exact(6).to_string(), "6");
        assert_eq!(r(4, 8).to_string(), "[4, 8]");
        assert_eq!(r_excl(4, 8).to_string(), "[4, 8)");
        assert_eq!(Range::at_least(2).to_string(), "[2, inf)");
        assert_eq!(Range::any().to_string(), "[0, inf)");
    }
}
