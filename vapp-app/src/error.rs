use thiserror::Error;
use vapp_databroker::BrokerError;
use vapp_types::topic::TopicError;

#[derive(Error, Debug)]
pub enum AppError {
  #[error("Invalid app id: {0}")]
  InvalidAppId(String),
  #[error("Invalid topic: {0}")]
  InvalidTopic(#[from] TopicError),
  #[error("Data broker error: {0}")]
  Broker(#[from] BrokerError),
}

#[derive(Error, Debug)]
pub enum PublishError {
  #[error("Invalid topic: {0}")]
  InvalidTopic(#[from] TopicError),
  #[error("Unable to serialize payload: {0}")]
  Serialize(#[from] serde_json::Error),
  #[error("The client did not accept the message")]
  Rejected,
}
