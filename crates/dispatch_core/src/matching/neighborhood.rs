use crate::model::{AgentId, AgentSnapshot, AssignMethod, Request};
use crate::store::RequestRepository;

use super::tier::TierMatcher;
use super::workload::select_least_loaded;

/// Case-insensitive exact comparison of locality names. No fuzzy matching:
/// "Tampouy" and "Tampuy" are different neighborhoods.
pub(super) fn locality_eq(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// A non-empty locality field, if present.
pub(super) fn locality(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Neighborhood matching: agents serving the request's exact city and
/// neighborhood.
///
/// Applies only when the request carries both a non-empty city and a
/// non-empty neighborhood. Multiple matches are narrowed by workload.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeighborhoodMatch;

impl TierMatcher for NeighborhoodMatch {
    fn method(&self) -> AssignMethod {
        AssignMethod::Neighborhood
    }

    fn select(
        &self,
        request: &Request,
        candidates: &[AgentSnapshot],
        repo: &dyn RequestRepository,
    ) -> Option<AgentId> {
        let city = locality(&request.city)?;
        let neighborhood = locality(&request.neighborhood)?;

        let matches: Vec<&AgentSnapshot> = candidates
            .iter()
            .filter(|agent| {
                locality(&agent.city).is_some_and(|c| locality_eq(c, city))
                    && locality(&agent.neighborhood).is_some_and(|n| locality_eq(n, neighborhood))
            })
            .collect();

        select_least_loaded(&matches, repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerId, NewRequest, RequestId, RequestStatus};
    use crate::store::MemoryStore;

    fn request_in(city: Option<&str>, neighborhood: Option<&str>) -> Request {
        Request {
            id: RequestId(1),
            customer: CustomerId(1),
            agent: None,
            status: RequestStatus::Pending,
            pickup_lat: None,
            pickup_lon: None,
            city: city.map(str::to_owned),
            neighborhood: neighborhood.map(str::to_owned),
            precision_note: None,
            created_at_ms: 0,
        }
    }

    fn agent_in(id: u64, city: &str, neighborhood: &str) -> AgentSnapshot {
        AgentSnapshot {
            id: AgentId(id),
            online: true,
            current_request: None,
            lat: None,
            lon: None,
            city: Some(city.to_owned()),
            neighborhood: Some(neighborhood.to_owned()),
        }
    }

    #[test]
    fn matches_city_and_neighborhood_case_insensitively() {
        let store = MemoryStore::new();
        let request = request_in(Some("Ouagadougou"), Some("Tampouy"));
        let candidates = vec![
            agent_in(1, "ouagadougou", "TAMPOUY"),
            agent_in(2, "Ouagadougou", "Gounghin"),
        ];
        let selected = NeighborhoodMatch.select(&request, &candidates, &store);
        assert_eq!(selected, Some(AgentId(1)));
    }

    #[test]
    fn requires_both_city_and_neighborhood_on_request() {
        let store = MemoryStore::new();
        let candidates = vec![agent_in(1, "Ouagadougou", "Tampouy")];
        let matcher = NeighborhoodMatch;

        assert_eq!(
            matcher.select(&request_in(Some("Ouagadougou"), None), &candidates, &store),
            None
        );
        assert_eq!(
            matcher.select(&request_in(None, Some("Tampouy")), &candidates, &store),
            None
        );
        assert_eq!(
            matcher.select(&request_in(Some("Ouagadougou"), Some("  ")), &candidates, &store),
            None
        );
    }

    #[test]
    fn no_fuzzy_matching_on_neighborhood() {
        let store = MemoryStore::new();
        let request = request_in(Some("Ouagadougou"), Some("Tampouy"));
        let candidates = vec![agent_in(1, "Ouagadougou", "Tampuy")];
        assert_eq!(NeighborhoodMatch.select(&request, &candidates, &store), None);
    }

    #[test]
    fn multiple_matches_narrowed_by_workload() {
        let store = MemoryStore::new();
        // Agent 1 carries two active assignments; agent 2 carries none.
        for _ in 0..2 {
            let r = store.create_pending(NewRequest {
                customer: CustomerId(5),
                ..NewRequest::default()
            });
            store.bind_agent(r.id, AgentId(1), None);
        }
        let request = request_in(Some("Ouagadougou"), Some("Tampouy"));
        let candidates = vec![
            agent_in(1, "Ouagadougou", "Tampouy"),
            agent_in(2, "Ouagadougou", "Tampouy"),
        ];
        let selected = NeighborhoodMatch.select(&request, &candidates, &store);
        assert_eq!(selected, Some(AgentId(2)));
    }
}
