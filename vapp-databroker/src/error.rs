use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BrokerError {
  #[error("Unknown signal {0}")]
  UnknownSignal(String),
  #[error("Signal {0} has no value available")]
  NotAvailable(String),
  #[error("Signal {path} type mismatch: {reason}")]
  TypeMismatch { path: String, reason: String },
  #[error("Subscription requires at least one signal")]
  EmptySubscription,
}
