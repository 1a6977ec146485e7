//! Part of [vapp](https://crates.io/crates/vapp), a development library for vehicle applications.
//!
//! A [vapp_client::Client] and [vapp_client::EventLoop] implementation using [rumqttc].

mod client;
mod options;

pub use client::{Client, EventLoop};
pub use options::*;
