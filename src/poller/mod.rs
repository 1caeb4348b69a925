//! Polling side of the dashboard: sources and the controller that drives them

pub mod controller;
pub mod http_source;
pub mod simulated;
pub mod source;

pub use controller::Controller;
pub use http_source::HttpSource;
pub use simulated::SimulatedSource;
pub use source::{FetchError, SampleSource};
