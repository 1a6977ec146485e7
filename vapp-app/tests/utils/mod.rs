#![allow(dead_code)]

use std::time::Duration;

use tokio::time::timeout;
use vapp_client::channel::{ChannelBroker, OutboundMessage};
use vapp_client::PublishMessage;
use vapp_types::topic::TopicFilter;

pub async fn recv_outbound(broker: &mut ChannelBroker) -> OutboundMessage {
  timeout(Duration::from_secs(1), broker.rx_outbound.recv())
    .await
    .unwrap()
    .unwrap()
}

pub async fn recv_subscriptions(broker: &mut ChannelBroker) -> Vec<TopicFilter> {
  match recv_outbound(broker).await {
    OutboundMessage::Subscribe(filters) => filters,
    message => panic!("got {message:?}")
  }
}

pub async fn recv_publish(broker: &mut ChannelBroker) -> PublishMessage {
  match recv_outbound(broker).await {
    OutboundMessage::Publish(message) => message,
    message => panic!("got {message:?}")
  }
}

/// Assert nothing is sent by the client within a short window
pub async fn assert_no_outbound(broker: &mut ChannelBroker) {
  if let Ok(message) = timeout(Duration::from_millis(100), broker.rx_outbound.recv()).await {
    panic!("expected no outbound message, got {message:?}")
  }
}
