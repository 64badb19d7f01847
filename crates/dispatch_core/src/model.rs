//! Core entities of the dispatch engine: requests, agents, and the
//! assignment result handed back to the request-creation workflow.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(pub u64);

/// Request lifecycle. The dispatch engine only performs `Pending → Assigned`;
/// later transitions are driven by the fulfilment workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Assigned,
    InProgress,
    /// Work done, agent still bound, awaiting handoff to the customer.
    Ready,
    Completed,
    Cancelled,
}

impl RequestStatus {
    /// Statuses that keep an agent bound to the request.
    pub fn holds_agent(&self) -> bool {
        matches!(self, Self::Assigned | Self::InProgress | Self::Ready)
    }

    /// Statuses counted toward an agent's workload when breaking ties.
    pub fn counts_toward_workload(&self) -> bool {
        matches!(self, Self::Assigned | Self::InProgress)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// How an assignment was made, in tier priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignMethod {
    Geo,
    Neighborhood,
    CityBroadcast,
    Unassigned,
}

impl AssignMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Geo => "geo",
            Self::Neighborhood => "neighborhood",
            Self::CityBroadcast => "city_broadcast",
            Self::Unassigned => "none",
        }
    }
}

/// Why an assignment carries degraded location precision.
///
/// Structured rather than free text so callers can branch on the kind while
/// still having a canonical message to forward to the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegradedPrecision {
    /// Matched on city alone; no GPS or neighborhood confirmation exists.
    CityBroadcast,
}

impl DegradedPrecision {
    pub fn message(&self) -> &'static str {
        match self {
            Self::CityBroadcast => "location approximate - agent should confirm with customer",
        }
    }
}

/// A customer's pickup request as persisted by the request repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub customer: CustomerId,
    pub agent: Option<AgentId>,
    pub status: RequestStatus,
    /// Raw client-reported coordinate; validate via [`Request::pickup_point`].
    pub pickup_lat: Option<f64>,
    pub pickup_lon: Option<f64>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub precision_note: Option<DegradedPrecision>,
    pub created_at_ms: u64,
}

impl Request {
    /// The pickup coordinate, if usable for geographic matching.
    pub fn pickup_point(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.pickup_lat, self.pickup_lon)
    }
}

/// Fields supplied by the request-creation workflow; the repository assigns
/// the id, `Pending` status, and leaves the agent unbound.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRequest {
    pub customer: CustomerId,
    pub pickup_lat: Option<f64>,
    pub pickup_lon: Option<f64>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub created_at_ms: u64,
}

/// Point-in-time view of one field agent as returned by the agent directory.
///
/// Slightly stale by construction: an agent that goes offline or gets locked
/// after the snapshot simply fails the commit check and the dispatcher falls
/// back to the next candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: AgentId,
    pub online: bool,
    pub current_request: Option<RequestId>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Self-reported service area.
    pub city: Option<String>,
    pub neighborhood: Option<String>,
}

impl AgentSnapshot {
    pub fn position(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.lat, self.lon)
    }
}

/// Outcome of one dispatch attempt. Ephemeral: returned to the caller,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub agent: Option<AgentId>,
    pub method: AssignMethod,
    pub degraded: bool,
}

impl AssignmentResult {
    pub fn unassigned() -> Self {
        Self {
            agent: None,
            method: AssignMethod::Unassigned,
            degraded: false,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.agent.is_some()
    }
}
