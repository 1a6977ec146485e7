//! Part of [vapp](https://crates.io/crates/vapp), a development library for vehicle applications.
//!
//! This library defines the interface a vehicle app uses to read and subscribe to vehicle signals,
//! along with an in memory broker and a simple signal simulator.

mod error;
mod memory;
mod simulator;
mod traits;

pub use error::BrokerError;
pub use memory::MemoryDataBroker;
pub use simulator::SignalSimulator;
pub use traits::{DataBroker, DynDataBroker, SignalStream};
