use async_trait::async_trait;
use log::{error, trace};
use rumqttc::{v5::{mqttbytes::{v5::{Filter, Packet}, QoS}, AsyncClient as RuClient, EventLoop as RuEventLoop, MqttOptions as RuMqttOptions}, Outgoing};
use vapp_types::topic::TopicFilter;

use vapp_client::{topic_and_payload_to_event, Event, PublishMessage};

fn qos_to_mqtt_qos(qos: vapp_types::topic::QoS) -> QoS {
  match qos {
    vapp_types::topic::QoS::AtMostOnce => QoS::AtMostOnce,
    vapp_types::topic::QoS::AtLeastOnce => QoS::AtLeastOnce,
    vapp_types::topic::QoS::ExactlyOnce => QoS::ExactlyOnce,
  }
}

fn topic_filter_to_mqtt_filter(topic_filter: TopicFilter) -> Filter {
  Filter::new(topic_filter.topic, qos_to_mqtt_qos(topic_filter.qos))
}

/// A [vapp_client::Client] implementation using [rumqttc]
#[derive(Clone)]
pub struct Client {
  client: RuClient
}

#[async_trait]
impl vapp_client::Client for Client {

  async fn disconnect(&self) -> Result<(),()> {
    match self.client.disconnect().await {
      Ok(_) => Ok(()),
      Err(_) => Err(()),
    }
  }

  async fn publish(&self, message: PublishMessage) -> Result<(),()> {
    let qos = qos_to_mqtt_qos(message.qos);
    match self.client.publish(message.topic, qos, message.retain, message.payload).await {
      Ok(_) => Ok(()),
      Err(e) => {
        error!("Publish failed: {e}");
        Err(())
      },
    }
  }

  async fn subscribe_many(&self, topics: Vec<TopicFilter>) -> Result<(),()> {
    let filters: Vec<Filter> = topics.into_iter().map(topic_filter_to_mqtt_filter).collect();
    match self.client.subscribe_many(filters).await {
      Ok(_) => Ok(()),
      Err(_) => Err(()),
    }
  }

}

enum ConnectionState {
  Disconnected,
  ManualDisconnected,
  Connected,
}

/// An [vapp_client::EventLoop] implementation using [rumqttc]
pub struct EventLoop {
  state: ConnectionState,
  el: RuEventLoop
}

impl EventLoop {

  /// Create a new `Eventloop`.
  ///
  /// `options` are the mqtt options to create the rumqtt client with. Clean start is always enabled, subscriptions
  /// are re-established by the application each time the connection comes online.
  ///
  /// `cap` specifies the capacity of the bounded async channel for the client handle.
  pub fn new<O: Into<RuMqttOptions>>(options: O, cap: usize) -> (Self, Client) {
    let mut options = options.into();
    options.set_clean_start(true);

    let (client, eventloop) = RuClient::new(options, cap);
    (EventLoop{el: eventloop, state: ConnectionState::Disconnected}, Client{client})
  }

  async fn poll_rumqtt(&mut self) -> Option<Event>
  {
    let event = self.el.poll().await;
    match event {
      Ok(event) => {
        trace!("{event:?}");
        match event {
          rumqttc::v5::Event::Incoming(Packet::ConnAck(_)) => {
            self.state = ConnectionState::Connected;
            Some(Event::Online)
          },
          rumqttc::v5::Event::Incoming(Packet::Disconnect(_)) => {
            self.state = ConnectionState::Disconnected;
            Some(Event::Offline)
          },
          rumqttc::v5::Event::Incoming(Packet::Publish(publish)) => Some(topic_and_payload_to_event(publish.topic.to_vec(), publish.payload.to_vec())),
          rumqttc::v5::Event::Outgoing(Outgoing::Disconnect) => {
            self.state = ConnectionState::ManualDisconnected;
            Some(Event::Offline)
          }
          _ => None
        }
      },
      Err(e) => {
        match self.state {
            ConnectionState::Connected=>{
              error!("Client error: {e}");
              self.state = ConnectionState::Disconnected;
              Some(Event::Offline)
            },
            ConnectionState::Disconnected=>{
              error!("Client error on reconnect attempt: {e}");
              tokio::time::sleep(tokio::time::Duration::from_secs(1)).await;
              None
            }
            ConnectionState::ManualDisconnected => {
              /* stay quiet until the application stops polling */
              tokio::time::sleep(tokio::time::Duration::from_secs(1)).await;
              None
            },
        }
      },
    }
  }
}

#[async_trait]
impl vapp_client::EventLoop for EventLoop
{
  async fn poll(&mut self) -> Event {
    loop {
      if let Some(event) = self.poll_rumqtt().await {
        return event
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn qos_mapping() {
    assert_eq!(qos_to_mqtt_qos(vapp_types::topic::QoS::AtMostOnce), QoS::AtMostOnce);
    assert_eq!(qos_to_mqtt_qos(vapp_types::topic::QoS::AtLeastOnce), QoS::AtLeastOnce);
    assert_eq!(qos_to_mqtt_qos(vapp_types::topic::QoS::ExactlyOnce), QoS::ExactlyOnce);
  }

  #[test]
  fn filter_mapping() {
    let filter = topic_filter_to_mqtt_filter(TopicFilter::new_with_qos("sampleapp/getSpeed", vapp_types::topic::QoS::AtLeastOnce));
    assert_eq!(filter.path, "sampleapp/getSpeed");
    assert_eq!(filter.qos, QoS::AtLeastOnce);
  }
}
