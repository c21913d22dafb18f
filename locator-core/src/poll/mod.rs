mod controller;
mod runner;
mod state;

pub use controller::PollController;
pub use state::PollState;
