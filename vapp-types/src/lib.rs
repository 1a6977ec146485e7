//! Part of [vapp](https://crates.io/crates/vapp), a small development library for vehicle applications
//! that bridge a vehicle data broker with an MQTT topic bus.
//!
//! This library defines the shared vocabulary: signals, values, data points and topics.

pub mod constants;

pub mod topic;

pub mod utils;

mod signal;
mod value;

pub use signal::*;
pub use value::*;
