use async_trait::async_trait;
use futures::stream::BoxStream;
use vapp_types::{DataPoint, DataPointReply, Signal, Value};

use crate::BrokerError;

/// A stream of notifications produced by a signal subscription
pub type SignalStream = BoxStream<'static, DataPointReply>;

#[async_trait]
pub trait DataBroker {

  /// Read the current value of a signal.
  ///
  /// # Returns
  ///
  /// - `Err(BrokerError::UnknownSignal)` if the broker does not know about the signal
  /// - `Err(BrokerError::NotAvailable)` if the signal has not been given a value yet
  async fn get(&self, signal: &Signal) -> Result<DataPoint, BrokerError>;

  /// Subscribe to changes of one or more signals.
  ///
  /// Every time one of the signals changes the stream yields a [DataPointReply] containing the new value.
  async fn subscribe(&self, signals: Vec<Signal>) -> Result<SignalStream, BrokerError>;

  /// Update the value of a signal, notifying all subscribers.
  async fn set(&self, signal: &Signal, value: Value) -> Result<(), BrokerError>;
}

pub type DynDataBroker = dyn DataBroker + Send + Sync;
