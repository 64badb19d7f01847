use crate::model::{AgentId, AgentSnapshot};
use crate::store::RequestRepository;

/// Pick the candidate with the fewest active assignments.
///
/// Workload is the number of requests currently bound to the agent with
/// status assigned or in-progress, read from the repository. Strict minimum;
/// ties resolve to the lower agent id so selection is stable across runs.
/// Returns `None` only for an empty candidate set.
pub fn select_least_loaded(
    candidates: &[&AgentSnapshot],
    repo: &dyn RequestRepository,
) -> Option<AgentId> {
    candidates
        .iter()
        .map(|agent| (repo.active_count_for_agent(agent.id), agent.id))
        .min()
        .map(|(_, id)| id)
}
