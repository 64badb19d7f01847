use crate::model::{AgentId, AgentSnapshot, AssignMethod, DegradedPrecision, Request};
use crate::store::RequestRepository;

use super::neighborhood::{locality, locality_eq};
use super::tier::TierMatcher;
use super::workload::select_least_loaded;

/// City-wide broadcast: the last-resort tier.
///
/// Applies when the request carries a non-empty city. Any agent serving the
/// same city (case-insensitive) qualifies; the least-loaded one wins. A win
/// here means no GPS or neighborhood confirmation exists, so the assignment
/// carries a degraded-precision note for the agent to confirm the location
/// with the customer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CityMatch;

impl TierMatcher for CityMatch {
    fn method(&self) -> AssignMethod {
        AssignMethod::CityBroadcast
    }

    fn select(
        &self,
        request: &Request,
        candidates: &[AgentSnapshot],
        repo: &dyn RequestRepository,
    ) -> Option<AgentId> {
        let city = locality(&request.city)?;

        let matches: Vec<&AgentSnapshot> = candidates
            .iter()
            .filter(|agent| locality(&agent.city).is_some_and(|c| locality_eq(c, city)))
            .collect();

        select_least_loaded(&matches, repo)
    }

    fn degraded_note(&self) -> Option<DegradedPrecision> {
        Some(DegradedPrecision::CityBroadcast)
    }
}
