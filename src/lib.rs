//! envmatch - Capability matching for test environments.
//!
//! envmatch decides whether the environment a test case asks for can be
//! served by a platform, explains why not when it cannot, and derives the
//! smallest concrete request that satisfies both sides.
//!
//! # Modules
//!
//! - [`space`] - Value spaces (ranges, counts, discrete sets) and the [`Space`] trait
//! - [`machine`] - Per-machine descriptors (cores, memory, GPUs, disks, NICs)
//! - [`fleet`] - Ordered multisets of machines
//! - [`case`] - Whole-environment descriptors for a test case or platform
//! - [`planner`] - Evaluating and planning a case against many platforms
//! - [`verdict`] - Match verdicts and diagnostic trails
//! - [`config`] - Catalog loading, merging, and validation
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use envmatch::{CaseSpec, MachineSpec, Range};
//!
//! let requirement = CaseSpec::new(
//!     MachineSpec::new().with_core_count(Range::between(4, 8).unwrap()),
//! );
//! let capability = CaseSpec::new(MachineSpec::new().with_core_count(6u64));
//!
//! assert!(requirement.check(&capability).is_pass());
//!
//! let request = requirement.derive_minimum(&capability).unwrap();
//! let node = &request.fleet().nodes()[0];
//! assert_eq!(node.core_count().and_then(|c| c.as_exact()), Some(6));
//! ```
//!
//! For file-based catalogs, see the [`config`] module and the integration tests.

pub mod case;
pub mod cli;
pub mod config;
pub mod error;
pub mod fleet;
pub mod machine;
pub mod planner;
pub mod space;
pub mod ui;
pub mod verdict;

pub use case::CaseSpec;
pub use error::{EnvMatchError, Result};
pub use fleet::FleetSpec;
pub use machine::{DiskSpec, MachineSpec, NicSpec};
pub use planner::{compatible, evaluate, plan, plan_first, Candidate, Plan};
pub use space::{CountSpace, DiscreteSet, Range, Space};
pub use verdict::{Incompatible, VerdictTrail};
