pub mod dispatch;
pub mod geo;
pub mod matching;
pub mod model;
pub mod store;
pub mod telemetry;
