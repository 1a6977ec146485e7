//! A development framework for vehicle applications that bridge a vehicle data broker with an MQTT topic bus.
//!
//! # Feature Flags
//!
//! - `app`: the [app] framework. Enabled by default.
//! - `databroker`: the [databroker] abstraction and in memory broker. Enabled by default.
//! - `rumqtt-client`: the [rumqttc](https://crates.io/crates/rumqttc) based client. Enabled by default.
//! - `channel-client`: the channel based client used for testing.

#[cfg(feature = "app")]
pub use vapp_app as app;
#[cfg(feature = "databroker")]
pub use vapp_databroker as databroker;
pub use vapp_types as types;
pub mod client {
  pub use vapp_client::*;

  #[cfg(feature = "rumqtt-client")]
  pub mod mqtt_client {
    pub use vapp_client_rumqtt as rumqtt;
  }
}
