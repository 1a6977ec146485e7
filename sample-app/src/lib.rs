//! A sample vehicle app.
//!
//! The app subscribes to the `Vehicle.Speed` signal of the data broker, republishes every change on
//! an MQTT topic, simulates random crash events on the same trigger and answers requests for the
//! current speed.

mod app;
mod config;
mod crash;
mod diagnostic;
mod payloads;

pub use app::*;
pub use config::Config;
pub use crash::{CrashSimulator, InvalidProbability};
pub use diagnostic::{DiagnosticLog, DiagnosticLogError, SPEED_LOGGER_NAME, SPEED_LOG_PATH};
pub use payloads::*;
