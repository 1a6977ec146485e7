use async_trait::async_trait;
use vapp_types::topic::TopicFilter;

use crate::{Event, PublishMessage};

#[async_trait]
pub trait Client {

  /// Disconnects the client.
  ///
  /// # Returns
  ///
  /// - `Ok(())` if the disconnection was successful
  /// - `Err(())` if the disconnection failed
  async fn disconnect(&self) -> Result<(),()>;

  /// Publishes a message.
  ///
  /// This method will yield to the async runtime until the message is accepted by the client
  ///
  /// # Returns
  ///
  /// - `Ok(())` if the message was successfully published
  /// - `Err(())` if the publication failed
  async fn publish(&self, message: PublishMessage) -> Result<(),()>;

  /// Subscribes to a single topic.
  ///
  /// This is a convenience method that calls `subscribe_many` with a single topic.
  async fn subscribe(&self, topic: TopicFilter) -> Result<(),()> {self.subscribe_many(vec![topic]).await}

  /// Subscribes to multiple topics in a single operation.
  ///
  /// # Returns
  ///
  /// - `Ok(())` if all subscriptions were successful
  /// - `Err(())` if any subscription failed
  async fn subscribe_many(&self, topics: Vec<TopicFilter>) -> Result<(),()>;
}

pub type DynClient = dyn Client + Send + Sync;

#[async_trait]
pub trait EventLoop
{
  /// Progress the connection and return the next event.
  async fn poll(&mut self) -> Event;
}

pub type DynEventLoop = dyn EventLoop + Send;
