pub mod config;
pub mod model;
pub mod platform;
pub mod poll;
pub mod provider;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{Configuration, LocationRequest, PollConfig};
pub use model::{Accuracy, CoordinateResult, Fix};
pub use platform::{Platform, SimulatedPlatform};
pub use poll::{PollController, PollState};
pub use provider::{LocationError, LocationProvider};
pub use view::LocationView;
