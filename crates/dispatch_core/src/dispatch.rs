//! The assignment coordinator: runs the tier fallback chain over a snapshot
//! of available agents and commits the winning match atomically.

use crate::matching::{default_tiers, TierMatcher};
use crate::model::{AssignmentResult, Request};
use crate::store::{AgentDirectory, RequestRepository};
use crate::telemetry::{DispatchEvent, DispatchTelemetry, UnassignedReason};

/// Dispatches one pending request to an agent.
///
/// Invoked synchronously by the request-creation workflow, exactly once per
/// request, after the request is persisted in `Pending` status. Multiple
/// dispatches may run concurrently against the same directory; the commit
/// relies on [`AgentDirectory::try_lock_agent`] for per-agent mutual
/// exclusion, never on the pool snapshot being fresh.
pub struct Dispatcher<'a> {
    directory: &'a dyn AgentDirectory,
    requests: &'a dyn RequestRepository,
    tiers: Vec<Box<dyn TierMatcher>>,
    telemetry: DispatchTelemetry,
}

impl<'a> Dispatcher<'a> {
    /// Dispatcher with the production tier stack (geo, neighborhood, city).
    pub fn new(directory: &'a dyn AgentDirectory, requests: &'a dyn RequestRepository) -> Self {
        Self::with_tiers(directory, requests, default_tiers())
    }

    pub fn with_tiers(
        directory: &'a dyn AgentDirectory,
        requests: &'a dyn RequestRepository,
        tiers: Vec<Box<dyn TierMatcher>>,
    ) -> Self {
        Self {
            directory,
            requests,
            tiers,
            telemetry: DispatchTelemetry::new(),
        }
    }

    pub fn telemetry(&self) -> &DispatchTelemetry {
        &self.telemetry
    }

    /// Select and commit an agent for the request.
    ///
    /// Tiers run in strict priority order; the first tier to yield a
    /// candidate attempts the commit. A failed lock means another dispatch
    /// claimed the agent between snapshot and commit; the claimed agent is
    /// dropped from the pool and the same tier reruns, so the retry is
    /// bounded by the pool size. When every tier is exhausted the request
    /// stays `Pending`, an unassigned event is recorded, and the caller
    /// decides if and when to re-dispatch.
    pub fn dispatch(&self, request: &Request) -> AssignmentResult {
        let mut pool = self.directory.available_agents();

        for tier in &self.tiers {
            while let Some(agent) = tier.select(request, &pool, self.requests) {
                if self.directory.try_lock_agent(agent, request.id) {
                    let note = tier.degraded_note();
                    let degraded = note.is_some();
                    self.requests.bind_agent(request.id, agent, note);
                    self.telemetry.record(DispatchEvent::Assigned {
                        request: request.id,
                        agent,
                        method: tier.method(),
                        degraded,
                    });
                    return AssignmentResult {
                        agent: Some(agent),
                        method: tier.method(),
                        degraded,
                    };
                }
                // Claimed concurrently; retry this tier with the next-best
                // candidate. The agent stays out of later tiers too.
                pool.retain(|candidate| candidate.id != agent);
            }
        }

        self.telemetry.record(DispatchEvent::Unassigned {
            request: request.id,
            reason: UnassignedReason::NoEligibleAgent,
        });
        AssignmentResult::unassigned()
    }
}
