use rayon::prelude::*;

use crate::geo::{distance_km, GeoPoint};
use crate::model::{AgentId, AgentSnapshot, AssignMethod, Request};
use crate::store::RequestRepository;

use super::tier::TierMatcher;

/// Default search radius around the pickup point (km).
const SEARCH_RADIUS_KM: f64 = 5.0;

/// Pool size above which the distance scan fans out across threads.
/// Distance is a pure function per candidate, so the scan parallelizes
/// without shared mutation.
const PARALLEL_SCAN_THRESHOLD: usize = 64;

/// GPS precision matching: nearest agent within the search radius.
///
/// Applies only when the request carries a usable pickup coordinate.
/// Candidates without a usable coordinate are skipped. Proximity dominates
/// at this tier: workload is not consulted, and a distance tie resolves to
/// the lower agent id.
#[derive(Debug, Clone, Copy)]
pub struct GeoMatch {
    pub radius_km: f64,
}

impl Default for GeoMatch {
    fn default() -> Self {
        Self {
            radius_km: SEARCH_RADIUS_KM,
        }
    }
}

impl GeoMatch {
    fn nearest_in_radius(
        &self,
        pickup: GeoPoint,
        candidates: &[AgentSnapshot],
    ) -> Option<AgentId> {
        let in_radius: Vec<(f64, AgentId)> = if candidates.len() >= PARALLEL_SCAN_THRESHOLD {
            candidates
                .par_iter()
                .filter_map(|agent| self.scored(pickup, agent))
                .collect()
        } else {
            candidates
                .iter()
                .filter_map(|agent| self.scored(pickup, agent))
                .collect()
        };

        in_radius
            .into_iter()
            .min_by(|(dist_a, id_a), (dist_b, id_b)| {
                dist_a
                    .partial_cmp(dist_b)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(id_a.cmp(id_b))
            })
            .map(|(_, id)| id)
    }

    fn scored(&self, pickup: GeoPoint, agent: &AgentSnapshot) -> Option<(f64, AgentId)> {
        let position = agent.position()?;
        let dist = distance_km(pickup, position);
        (dist <= self.radius_km).then_some((dist, agent.id))
    }
}

impl TierMatcher for GeoMatch {
    fn method(&self) -> AssignMethod {
        AssignMethod::Geo
    }

    fn select(
        &self,
        request: &Request,
        candidates: &[AgentSnapshot],
        _repo: &dyn RequestRepository,
    ) -> Option<AgentId> {
        let pickup = request.pickup_point()?;
        self.nearest_in_radius(pickup, candidates)
    }
}
