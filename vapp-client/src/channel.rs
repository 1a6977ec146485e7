use crate::{Event, PublishMessage};
use async_trait::async_trait;
use vapp_types::topic::TopicFilter;
use tokio::sync::mpsc;

/// A [Client](crate::Client) implementation that uses channels for message passing.
///
/// # Examples
///
/// See [ChannelEventLoop]
#[derive(Clone)]
pub struct ChannelClient {
    tx: mpsc::UnboundedSender<OutboundMessage>,
}

impl ChannelClient {
    fn send(&self, message: OutboundMessage) -> Result<(), ()> {
        match self.tx.send(message) {
            Ok(_) => Ok(()),
            Err(_) => Err(()),
        }
    }
}

#[async_trait]
impl crate::Client for ChannelClient {
    async fn disconnect(&self) -> Result<(), ()> {
        self.send(OutboundMessage::Disconnect)
    }

    async fn publish(&self, message: PublishMessage) -> Result<(), ()> {
        self.send(OutboundMessage::Publish(message))
    }

    async fn subscribe_many(&self, topics: Vec<TopicFilter>) -> Result<(), ()> {
        self.send(OutboundMessage::Subscribe(topics))
    }
}

/// An Enum representing different messages and requests a [ChannelClient] can send to the [ChannelBroker]
#[derive(Clone, Debug, PartialEq)]
pub enum OutboundMessage {
    Disconnect,
    Publish(PublishMessage),
    Subscribe(Vec<TopicFilter>),
}

/// A "broker" that manages the communication between a [ChannelClient] and an [ChannelEventLoop].
///
/// Used to send messages to the eventloop and inspect messages/requests produced by the client
///
/// # Examples
///
/// ```no_run
/// use vapp_client::{Event, Message, channel::{ChannelEventLoop, ChannelClient}};
/// use tokio::runtime::Runtime;
///
/// let rt = Runtime::new().unwrap();
/// rt.block_on(async {
///     let (mut eventloop, client, mut broker) = ChannelEventLoop::new();
///
///     //create application that uses the EventLoop and client
///
///     //Send an event to the EventLoop
///     broker.tx_event.send(Event::Online).unwrap();
///     broker.tx_event.send(Event::Message(Message::new("sampleapp/getSpeed", "{}"))).unwrap();
///
///     //Receive a message or request from the Client
///     let message = broker.rx_outbound.recv().await.unwrap();
/// });
/// ```
pub struct ChannelBroker {
    pub rx_outbound: mpsc::UnboundedReceiver<OutboundMessage>,
    pub tx_event: mpsc::UnboundedSender<Event>,
}

/// An [EventLoop](crate::EventLoop) implementation that uses channels
///
/// # Examples
///
/// See [ChannelBroker]
pub struct ChannelEventLoop {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl ChannelEventLoop {
    /// Creates a new event loop along with the corresponding client and broker.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> (Self, ChannelClient, ChannelBroker) {
        let (tx_event, rx_event) = mpsc::unbounded_channel();
        let (tx_outbound, rx_outbound) = mpsc::unbounded_channel();
        let el = Self { rx: rx_event };
        (
            el,
            ChannelClient { tx: tx_outbound },
            ChannelBroker {
                rx_outbound,
                tx_event,
            },
        )
    }
}

#[async_trait]
impl crate::EventLoop for ChannelEventLoop {
    async fn poll(&mut self) -> Event {
        match self.rx.recv().await {
            Some(event) => event,
            /* broker dropped, nothing more will ever arrive */
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Client, EventLoop, Message};

    #[tokio::test]
    async fn client_requests_reach_broker() {
        let (_eventloop, client, mut broker) = ChannelEventLoop::new();
        client
            .subscribe(TopicFilter::new("sampleapp/getSpeed"))
            .await
            .unwrap();
        client
            .publish(PublishMessage::new("sampleapp/currentSpeed", "{}"))
            .await
            .unwrap();
        client.disconnect().await.unwrap();

        assert_eq!(
            broker.rx_outbound.recv().await.unwrap(),
            OutboundMessage::Subscribe(vec![TopicFilter::new("sampleapp/getSpeed")])
        );
        assert_eq!(
            broker.rx_outbound.recv().await.unwrap(),
            OutboundMessage::Publish(PublishMessage::new("sampleapp/currentSpeed", "{}"))
        );
        assert_eq!(
            broker.rx_outbound.recv().await.unwrap(),
            OutboundMessage::Disconnect
        );
    }

    #[tokio::test]
    async fn broker_events_reach_eventloop() {
        let (mut eventloop, _client, broker) = ChannelEventLoop::new();
        broker.tx_event.send(Event::Online).unwrap();
        broker
            .tx_event
            .send(Event::Message(Message::new("a/b", "c")))
            .unwrap();
        assert_eq!(eventloop.poll().await, Event::Online);
        assert_eq!(
            eventloop.poll().await,
            Event::Message(Message::new("a/b", "c"))
        );
    }

    #[tokio::test]
    async fn publish_fails_after_broker_dropped() {
        let (_eventloop, client, broker) = ChannelEventLoop::new();
        drop(broker);
        assert!(client
            .publish(PublishMessage::new("sampleapp/currentSpeed", "{}"))
            .await
            .is_err());
    }
}
