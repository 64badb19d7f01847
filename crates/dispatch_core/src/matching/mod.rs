pub mod city;
pub mod geo_match;
pub mod neighborhood;
pub mod tier;
pub mod workload;

pub use city::CityMatch;
pub use geo_match::GeoMatch;
pub use neighborhood::NeighborhoodMatch;
pub use tier::TierMatcher;
pub use workload::select_least_loaded;

/// The production tier stack, in strict fallback order:
/// GPS precision, then neighborhood, then city-wide broadcast.
pub fn default_tiers() -> Vec<Box<dyn TierMatcher>> {
    vec![
        Box::new(GeoMatch::default()),
        Box::new(NeighborhoodMatch),
        Box::new(CityMatch),
    ]
}
