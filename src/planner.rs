//! Matching one requirement against a pool of named capabilities.
//!
//! These helpers sit between the engine and a scheduler: they evaluate a
//! test case against every platform snapshot, and turn the chosen platform
//! into a concrete request. Capabilities are visited in the order given; a
//! caller that wants a different preference sorts before calling.

use serde::Serialize;
use tracing::{debug, info};

use crate::case::CaseSpec;
use crate::verdict::{Incompatible, VerdictTrail};

/// The verdict of one requirement against one named capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub name: String,
    pub verdict: VerdictTrail,
}

impl Candidate {
    pub fn is_compatible(&self) -> bool {
        self.verdict.is_pass()
    }
}

/// A platform choice and the minimal request to send to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub platform: String,
    pub request: CaseSpec,
}

/// Check `requirement` against each capability, in input order.
pub fn evaluate<'a, I, N>(requirement: &CaseSpec, capabilities: I) -> Vec<Candidate>
where
    I: IntoIterator<Item = (N, &'a CaseSpec)>,
    N: Into<String>,
{
    capabilities
        .into_iter()
        .map(|(name, capability)| {
            let name = name.into();
            let verdict = requirement.check(capability);
            debug!(platform = %name, compatible = verdict.is_pass(), "evaluated platform");
            Candidate { name, verdict }
        })
        .collect()
}

/// Names of the capabilities that satisfy `requirement`.
pub fn compatible<'a, I, N>(requirement: &CaseSpec, capabilities: I) -> Vec<String>
where
    I: IntoIterator<Item = (N, &'a CaseSpec)>,
    N: Into<String>,
{
    evaluate(requirement, capabilities)
        .into_iter()
        .filter(Candidate::is_compatible)
        .map(|c| c.name)
        .collect()
}

/// Derive the request for a specific platform.
pub fn plan(
    requirement: &CaseSpec,
    name: impl Into<String>,
    capability: &CaseSpec,
) -> Result<Plan, Incompatible> {
    let platform = name.into();
    let request = requirement.derive_minimum(capability)?;
    info!(platform = %platform, machines = request.fleet().machine_count(), "planned request");
    Ok(Plan { platform, request })
}

/// Plan against the first compatible capability.
///
/// When none fits, the returned trail carries each platform's failure under
/// its name.
pub fn plan_first<'a, I, N>(requirement: &CaseSpec, capabilities: I) -> Result<Plan, Incompatible>
where
    I: IntoIterator<Item = (N, &'a CaseSpec)>,
    N: Into<String>,
{
    let mut rejected = VerdictTrail::pass();
    let mut seen = false;
    for (name, capability) in capabilities {
        seen = true;
        let name = name.into();
        match plan(requirement, name.clone(), capability) {
            Ok(plan) => return Ok(plan),
            Err(err) => rejected.merge(name, err.into_trail()),
        }
    }
    if !seen {
        return Err(Incompatible::because("no platforms to plan against"));
    }
    Err(Incompatible::new(rejected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::FleetSpec;
    use crate::machine::MachineSpec;
    use crate::space::{CountSpace, DiscreteSet, Range};

    fn platform(cores: &[u64]) -> CaseSpec {
        CaseSpec::new(
            cores
                .iter()
                .map(|&c| MachineSpec::new().with_core_count(CountSpace::exact(c)))
                .collect::<FleetSpec>(),
        )
    }

    fn pool() -> Vec<(&'static str, CaseSpec)> {
        vec![
            ("small", platform(&[2])),
            ("pair", platform(&[6, 6])),
            ("big", platform(&[16, 16, 16])),
        ]
    }

    fn needs_two_mid_nodes() -> CaseSpec {
        CaseSpec::new(
            MachineSpec::repeated(2)
                .unwrap()
                .with_core_count(Range::between(4, 8).unwrap()),
        )
    }

    fn refs<'a>(pool: &'a [(&'static str, CaseSpec)]) -> impl Iterator<Item = (&'static str, &'a CaseSpec)> {
        pool.iter().map(|(n, c)| (*n, c))
    }

    #[test]
    fn evaluate_keeps_input_order() {
        let pool = pool();
        let candidates = evaluate(&needs_two_mid_nodes(), refs(&pool));
        let names: Vec<_> = candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["small", "pair", "big"]);
        assert!(!candidates[0].is_compatible());
        assert!(candidates[1].is_compatible());
        assert!(!candidates[2].is_compatible());
    }

    #[test]
    fn compatible_lists_passing_names() {
        let pool = pool();
        assert_eq!(compatible(&needs_two_mid_nodes(), refs(&pool)), ["pair"]);
    }

    #[test]
    fn plan_first_takes_first_fit() {
        let pool = pool();
        let req = CaseSpec::new(MachineSpec::new().with_core_count(Range::at_least(2)));
        let plan = plan_first(&req, refs(&pool)).unwrap();
        assert_eq!(plan.platform, "small");
        assert_eq!(
            plan.request.fleet().nodes()[0].core_count(),
            Some(&CountSpace::exact(2))
        );
    }

    #[test]
    fn plan_first_reports_every_rejection() {
        let pool = pool();
        let req = needs_two_mid_nodes().with_operating_system(DiscreteSet::allow(["windows"]));
        let err = plan_first(&req, refs(&pool)).unwrap_err();
        let trail = err.trail();
        assert!(trail.branch("small").is_some());
        assert!(trail.branch("pair").is_some());
        assert!(trail.branch("big").is_some());
    }

    #[test]
    fn plan_first_on_empty_pool() {
        let err = plan_first(&needs_two_mid_nodes(), std::iter::empty::<(&str, &CaseSpec)>())
            .unwrap_err();
        assert_eq!(err.trail().reasons(), ["no platforms to plan against".to_string()]);
    }

    #[test]
    fn candidates_can_be_evaluated_concurrently() {
        let pool = pool();
        let req = needs_two_mid_nodes();
        let serial = evaluate(&req, refs(&pool));

        let parallel: Vec<Candidate> = std::thread::scope(|scope| {
            let handles: Vec<_> = pool
                .iter()
                .map(|(name, cap)| {
                    let req = &req;
                    scope.spawn(move || evaluate(req, [(*name, cap)]).remove(0))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(serial, parallel);
    }
}
