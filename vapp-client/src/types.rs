use std::string::FromUtf8Error;

use thiserror::Error;
use vapp_types::topic::QoS;

/// Error types for inbound message processing.
#[derive(Error, Debug, PartialEq)]
pub enum MessageError {
    #[error("The topic was empty")]
    EmptyTopic,
    #[error("Topic utf8 decode error: {0}")]
    TopicUtf8Error(FromUtf8Error),
}

impl From<FromUtf8Error> for MessageError {
    fn from(e: FromUtf8Error) -> Self {
        MessageError::TopicUtf8Error(e)
    }
}

/// A message received on a subscribed topic
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub topic: String,
    pub payload: Vec<u8>,
}

impl Message {
    pub fn new<S: Into<String>, P: Into<Vec<u8>>>(topic: S, payload: P) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }

    /// The payload as a string, replacing any invalid utf8 sequences
    pub fn payload_string(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

/// A message to be published by a [Client](crate::Client)
#[derive(Debug, Clone, PartialEq)]
pub struct PublishMessage {
    pub topic: String,
    pub qos: QoS,
    pub retain: bool,
    pub payload: Vec<u8>,
}

impl PublishMessage {
    /// Create a new message published at [QoS::AtMostOnce] and not retained
    pub fn new<S: Into<String>, P: Into<Vec<u8>>>(topic: S, payload: P) -> Self {
        Self {
            topic: topic.into(),
            qos: QoS::AtMostOnce,
            retain: false,
            payload: payload.into(),
        }
    }
}

/// An enum that represents the different types of events an [EventLoop](crate::EventLoop) implementation can produce.
#[derive(Debug, PartialEq)]
pub enum Event {
    Offline,
    Online,
    Message(Message),
    InvalidPublish {
        reason: MessageError,
        topic: Vec<u8>,
        payload: Vec<u8>,
    },
}
