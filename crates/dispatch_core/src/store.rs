//! Storage seams the dispatch engine runs against: the agent directory and
//! the request repository, plus `MemoryStore`, the in-process implementation
//! used by tests and single-node deployments.
//!
//! The directory is shared mutable state across concurrent dispatches, so
//! agent locking is a compare-and-set: `try_lock_agent` checks and claims in
//! one critical section. A read-then-write split here would let two
//! dispatches claim the same agent between selection and commit.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::model::{
    AgentId, AgentSnapshot, DegradedPrecision, NewRequest, Request, RequestId, RequestStatus,
};

/// Read/lock access to field agents.
pub trait AgentDirectory: Send + Sync {
    /// Agents eligible for dispatch: online with no active request.
    fn available_agents(&self) -> Vec<AgentSnapshot>;

    /// Atomically claim an agent for a request. Succeeds only if the agent
    /// is still online and unlocked; a `false` return means another dispatch
    /// won the race and the caller should fall back to its next candidate.
    fn try_lock_agent(&self, agent: AgentId, request: RequestId) -> bool;

    /// Number of requests currently bound to the agent with a status that
    /// counts toward workload.
    fn active_assignment_count(&self, agent: AgentId) -> usize;
}

/// Read/write access to persisted requests.
pub trait RequestRepository: Send + Sync {
    /// Persist a new request in `Pending` status with no bound agent.
    fn create_pending(&self, fields: NewRequest) -> Request;

    /// Bind an agent to a request and set status `Assigned`, recording the
    /// precision note when the match was made without fine-grained
    /// location confirmation.
    fn bind_agent(&self, request: RequestId, agent: AgentId, note: Option<DegradedPrecision>);

    /// Same count as [`AgentDirectory::active_assignment_count`]; both seams
    /// expose it because the workload selector only sees the repository.
    fn active_count_for_agent(&self, agent: AgentId) -> usize;
}

#[derive(Debug, Default)]
struct StoreInner {
    agents: BTreeMap<AgentId, AgentSnapshot>,
    requests: BTreeMap<RequestId, Request>,
    next_request_id: u64,
}

impl StoreInner {
    fn workload(&self, agent: AgentId) -> usize {
        self.requests
            .values()
            .filter(|r| r.agent == Some(agent) && r.status.counts_toward_workload())
            .count()
    }
}

/// In-memory agent directory and request repository sharing one lock, so a
/// lock claim or a terminal release is a single transaction.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<StoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, StoreInner> {
        // A panic while holding the guard leaves the data consistent enough
        // to keep serving; recover instead of propagating the poison.
        self.inner.lock().unwrap_or_else(|err| err.into_inner())
    }

    /// Register an agent. Replaces any existing record with the same id.
    pub fn add_agent(&self, agent: AgentSnapshot) {
        self.guard().agents.insert(agent.id, agent);
    }

    pub fn set_online(&self, agent: AgentId, online: bool) {
        if let Some(record) = self.guard().agents.get_mut(&agent) {
            record.online = online;
        }
    }

    pub fn agent(&self, id: AgentId) -> Option<AgentSnapshot> {
        self.guard().agents.get(&id).cloned()
    }

    pub fn request(&self, id: RequestId) -> Option<Request> {
        self.guard().requests.get(&id).cloned()
    }

    /// Transition a request's status. Driven by the external fulfilment
    /// workflow, not by dispatch. A terminal status releases the bound
    /// agent's lock and unbinds the request inside the same critical
    /// section, upholding the "never permanently locked" contract.
    pub fn update_status(&self, id: RequestId, status: RequestStatus) {
        let mut inner = self.guard();
        let Some(request) = inner.requests.get_mut(&id) else {
            return;
        };
        request.status = status;
        if !status.is_terminal() {
            return;
        }
        let released = request.agent.take();
        if let Some(agent_id) = released {
            if let Some(agent) = inner.agents.get_mut(&agent_id) {
                if agent.current_request == Some(id) {
                    agent.current_request = None;
                }
            }
        }
    }
}

impl AgentDirectory for MemoryStore {
    fn available_agents(&self) -> Vec<AgentSnapshot> {
        let mut inner = self.guard();
        // Self-heal phantom locks: an agent pointing at a request that no
        // longer exists (or already reached a terminal status) is unlocked
        // rather than left stranded.
        let phantoms: Vec<AgentId> = inner
            .agents
            .values()
            .filter_map(|agent| {
                let request_id = agent.current_request?;
                let stale = match inner.requests.get(&request_id) {
                    Some(request) => !request.status.holds_agent(),
                    None => true,
                };
                stale.then_some(agent.id)
            })
            .collect();
        for id in phantoms {
            if let Some(agent) = inner.agents.get_mut(&id) {
                agent.current_request = None;
            }
        }

        inner
            .agents
            .values()
            .filter(|agent| agent.online && agent.current_request.is_none())
            .cloned()
            .collect()
    }

    fn try_lock_agent(&self, agent: AgentId, request: RequestId) -> bool {
        let mut inner = self.guard();
        match inner.agents.get_mut(&agent) {
            Some(record) if record.online && record.current_request.is_none() => {
                record.current_request = Some(request);
                true
            }
            _ => false,
        }
    }

    fn active_assignment_count(&self, agent: AgentId) -> usize {
        self.guard().workload(agent)
    }
}

impl RequestRepository for MemoryStore {
    fn create_pending(&self, fields: NewRequest) -> Request {
        let mut inner = self.guard();
        inner.next_request_id += 1;
        let request = Request {
            id: RequestId(inner.next_request_id),
            customer: fields.customer,
            agent: None,
            status: RequestStatus::Pending,
            pickup_lat: fields.pickup_lat,
            pickup_lon: fields.pickup_lon,
            city: fields.city,
            neighborhood: fields.neighborhood,
            precision_note: None,
            created_at_ms: fields.created_at_ms,
        };
        inner.requests.insert(request.id, request.clone());
        request
    }

    fn bind_agent(&self, request: RequestId, agent: AgentId, note: Option<DegradedPrecision>) {
        let mut inner = self.guard();
        if let Some(record) = inner.requests.get_mut(&request) {
            record.agent = Some(agent);
            record.status = RequestStatus::Assigned;
            record.precision_note = note;
        }
    }

    fn active_count_for_agent(&self, agent: AgentId) -> usize {
        self.guard().workload(agent)
    }
}
