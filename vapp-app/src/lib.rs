//! Part of [vapp](https://crates.io/crates/vapp), a development library for vehicle applications.
//!
//! This library defines a framework for implementing vehicle apps that react to vehicle signal
//! changes from a data broker and to messages on MQTT topics.

mod app;
mod config;
mod error;
mod eventloop;

pub use app::*;
pub use config::*;
pub use error::*;
pub use eventloop::*;
