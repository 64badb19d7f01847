use crate::model::{AgentId, AgentSnapshot, AssignMethod, DegradedPrecision, Request};
use crate::store::RequestRepository;

/// Trait for one tier of the fallback matching strategy.
///
/// Tiers are tried in fixed priority order; the first tier to yield a
/// candidate wins and later tiers are not evaluated. Each tier inspects the
/// same pool (online agents with no active request) and returns at most one
/// agent, or `None` when the tier does not apply to the request or no
/// candidate qualifies.
///
/// # Examples
///
/// ```rust,no_run
/// use dispatch_core::matching::{GeoMatch, TierMatcher};
/// use dispatch_core::store::{MemoryStore, RequestRepository};
/// use dispatch_core::model::NewRequest;
///
/// let store = MemoryStore::new();
/// let request = store.create_pending(NewRequest::default());
/// let agent = GeoMatch::default().select(&request, &[], &store);
/// assert!(agent.is_none());
/// ```
pub trait TierMatcher: Send + Sync {
    /// The assignment method this tier reports on success.
    fn method(&self) -> AssignMethod;

    /// Pick the best candidate for the request, if any.
    ///
    /// `candidates` is a point-in-time snapshot of eligible agents; a stale
    /// entry is harmless because the commit re-checks the agent's lock.
    /// `repo` backs workload lookups for tiers that break ties by active
    /// assignment count. Selection must be deterministic: equal scores
    /// resolve to the lower agent id.
    fn select(
        &self,
        request: &Request,
        candidates: &[AgentSnapshot],
        repo: &dyn RequestRepository,
    ) -> Option<AgentId>;

    /// The precision note a win at this tier attaches to the request.
    /// Only the last-resort tier degrades precision.
    fn degraded_note(&self) -> Option<DegradedPrecision> {
        None
    }
}
