//! Dispatch telemetry: records each dispatch outcome for observability.
//!
//! Unassigned requests stay `Pending` and are only visible through these
//! events; whatever re-dispatch trigger the deployment uses (periodic sweep,
//! manual retry) starts from here.

use std::sync::Mutex;

use crate::model::{AgentId, AssignMethod, RequestId};

/// Why a dispatch attempt ended without an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnassignedReason {
    /// Every tier was exhausted without an eligible agent.
    NoEligibleAgent,
}

/// One dispatch outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchEvent {
    Assigned {
        request: RequestId,
        agent: AgentId,
        method: AssignMethod,
        degraded: bool,
    },
    Unassigned {
        request: RequestId,
        reason: UnassignedReason,
    },
}

/// Collects dispatch events. Shared across concurrent dispatches.
#[derive(Debug, Default)]
pub struct DispatchTelemetry {
    events: Mutex<Vec<DispatchEvent>>,
}

impl DispatchTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: DispatchEvent) {
        self.events
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .push(event);
    }

    pub fn events(&self) -> Vec<DispatchEvent> {
        self.events
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
    }

    pub fn assigned_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, DispatchEvent::Assigned { .. }))
            .count()
    }

    pub fn unassigned_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, DispatchEvent::Unassigned { .. }))
            .count()
    }
}
