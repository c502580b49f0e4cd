//! Live market board: state machine plus the controller that drives it.

pub mod controller;
pub mod state;

pub use controller::{DEFAULT_POLL_INTERVAL, PollingController, PollingHandle};
pub use state::{BoardSnapshot, BoardState, FETCH_FAILED};
