#![allow(dead_code)]

use dispatch_core::model::{AgentId, AgentSnapshot, CustomerId, NewRequest, Request};
use dispatch_core::store::{MemoryStore, RequestRepository};

/// Pickup point used across tests: central Ouagadougou.
pub const PICKUP: (f64, f64) = (12.3714, -1.5197);

/// An agent ~0.9 km from [`PICKUP`].
pub const NEARBY: (f64, f64) = (12.3650, -1.5250);

/// An agent well outside the 5 km search radius (Bobo-Dioulasso).
pub const FAR_AWAY: (f64, f64) = (11.1771, -4.2979);

/// Builder for agent fixtures. Defaults to an online, unlocked agent with
/// no position and no service area.
#[derive(Debug, Clone)]
pub struct AgentBuilder {
    snapshot: AgentSnapshot,
}

impl AgentBuilder {
    pub fn new(id: u64) -> Self {
        Self {
            snapshot: AgentSnapshot {
                id: AgentId(id),
                online: true,
                current_request: None,
                lat: None,
                lon: None,
                city: None,
                neighborhood: None,
            },
        }
    }

    pub fn offline(mut self) -> Self {
        self.snapshot.online = false;
        self
    }

    pub fn at(mut self, (lat, lon): (f64, f64)) -> Self {
        self.snapshot.lat = Some(lat);
        self.snapshot.lon = Some(lon);
        self
    }

    pub fn serving(mut self, city: &str, neighborhood: &str) -> Self {
        self.snapshot.city = Some(city.to_owned());
        self.snapshot.neighborhood = Some(neighborhood.to_owned());
        self
    }

    pub fn serving_city(mut self, city: &str) -> Self {
        self.snapshot.city = Some(city.to_owned());
        self
    }

    pub fn insert(self, store: &MemoryStore) -> AgentId {
        let id = self.snapshot.id;
        store.add_agent(self.snapshot);
        id
    }
}

/// Builder for pending request fixtures.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    fields: NewRequest,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            fields: NewRequest {
                customer: CustomerId(100),
                ..NewRequest::default()
            },
        }
    }

    pub fn pickup_at(mut self, (lat, lon): (f64, f64)) -> Self {
        self.fields.pickup_lat = Some(lat);
        self.fields.pickup_lon = Some(lon);
        self
    }

    pub fn in_area(mut self, city: &str, neighborhood: &str) -> Self {
        self.fields.city = Some(city.to_owned());
        self.fields.neighborhood = Some(neighborhood.to_owned());
        self
    }

    pub fn in_city(mut self, city: &str) -> Self {
        self.fields.city = Some(city.to_owned());
        self
    }

    pub fn create(self, store: &MemoryStore) -> Request {
        store.create_pending(self.fields)
    }
}
