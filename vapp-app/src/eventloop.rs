use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use log::{debug, info, warn};
use serde::Serialize;
use vapp_client::{
    Client, DynClient, DynEventLoop, Event, EventLoop, Message, MessageError, PublishMessage,
};
use vapp_types::{
    topic::{validate_topic_name, TopicFilter},
    utils,
};

use crate::{config::SubscriptionConfig, AppError, PublishError};

use tokio::{
    select,
    sync::mpsc::{self, Receiver},
    task,
    time::timeout,
};

struct Shutdown;

struct AppState {
    app_id: String,
    online: AtomicBool,
}

/// The client to interact with the [AppEventLoop] and publish events from.
#[derive(Clone)]
pub struct AppClient {
    client: Arc<DynClient>,
    sender: mpsc::Sender<Shutdown>,
    state: Arc<AppState>,
}

impl AppClient {
    /// Stop all operations and disconnect from the broker.
    ///
    /// This will produce an [AppEvent::Cancelled] event on the [AppEventLoop] after the application has disconnected
    pub async fn cancel(&self) {
        info!("App {} stopping", self.state.app_id);
        _ = self.sender.send(Shutdown).await;
        if self.client.disconnect().await.is_err() {
            debug!("Unable to disconnect client on exit");
        }
    }

    /// The id the application was created with
    pub fn app_id(&self) -> &str {
        &self.state.app_id
    }

    /// Is the application currently connected to the MQTT broker
    pub fn is_online(&self) -> bool {
        self.state.online.load(Ordering::SeqCst)
    }

    /// Publish a message. Uses the `publish` method from the [vapp_client::Client] trait.
    pub async fn publish(&self, message: PublishMessage) -> Result<(), PublishError> {
        validate_topic_name(&message.topic)?;
        self.client
            .publish(message)
            .await
            .map_err(|_| PublishError::Rejected)
    }

    /// Publish an event payload on a topic, not retained and at most once.
    pub async fn publish_event<S: Into<String>, P: Into<Vec<u8>>>(
        &self,
        topic: S,
        payload: P,
    ) -> Result<(), PublishError> {
        self.publish(PublishMessage::new(topic, payload)).await
    }

    /// Serialize `payload` as JSON and publish it with [AppClient::publish_event]
    pub async fn publish_json<S: Into<String>, T: Serialize>(
        &self,
        topic: S,
        payload: &T,
    ) -> Result<(), PublishError> {
        let payload = serde_json::to_vec(payload)?;
        self.publish_event(topic, payload).await
    }
}

/// A vehicle app EventLoop
///
/// On top of [vapp_client::EventLoop] functionality, AppEventLoop provides:
///
/// * Topic subscription setup, re-established every time the connection comes online
/// * Graceful cancellation via [AppClient::cancel]
pub struct AppEventLoop {
    online: bool,
    state: Arc<AppState>,
    subscription_config: SubscriptionConfig,
    client: AppClient,
    eventloop: Box<DynEventLoop>,
    shutdown_rx: Receiver<Shutdown>,
}

impl AppEventLoop {
    /// Creates a new instance along with an associated client.
    pub fn new<
        S: Into<String>,
        E: EventLoop + Send + 'static,
        C: Client + Send + Sync + 'static,
    >(
        app_id: S,
        subscription_config: SubscriptionConfig,
        eventloop: E,
        client: C,
    ) -> Result<(Self, AppClient), AppError> {
        let (tx, rx) = mpsc::channel(1);

        let app_id: String = app_id.into();
        if let Err(e) = utils::validate_name(&app_id) {
            return Err(AppError::InvalidAppId(e));
        };
        subscription_config.validate()?;

        let app_state = Arc::new(AppState {
            app_id,
            online: AtomicBool::new(false),
        });
        let client = AppClient {
            client: Arc::new(client),
            sender: tx,
            state: app_state.clone(),
        };
        let app = Self {
            online: false,
            state: app_state,
            client: client.clone(),
            eventloop: Box::new(eventloop),
            subscription_config,
            shutdown_rx: rx,
        };
        Ok((app, client))
    }

    /// Add a topic subscription. If the application is already online the subscription is made immediately.
    pub fn subscribe(&mut self, filter: TopicFilter) {
        self.subscription_config.add(filter.clone());
        if self.online {
            let client = self.client.client.clone();
            task::spawn(async move {
                if client.subscribe(filter).await.is_err() {
                    warn!("Unable to subscribe");
                }
            });
        }
    }

    pub fn subscription_config(&self) -> &SubscriptionConfig {
        &self.subscription_config
    }

    fn handle_online(&mut self) -> Option<AppEvent> {
        if self.online {
            return None;
        }
        info!("App Online");
        self.online = true;
        self.state.online.store(true, Ordering::SeqCst);
        if !self.subscription_config.is_empty() {
            let client = self.client.client.clone();
            let topics: Vec<TopicFilter> = self.subscription_config.clone().into();
            task::spawn(async move {
                if client.subscribe_many(topics).await.is_err() {
                    warn!("Unable to subscribe to topics");
                }
            });
        }
        Some(AppEvent::Online)
    }

    fn handle_offline(&mut self) -> Option<AppEvent> {
        if !self.online {
            return None;
        }
        info!("App Offline");
        self.online = false;
        self.state.online.store(false, Ordering::SeqCst);
        Some(AppEvent::Offline)
    }

    fn handle_event(&mut self, event: Event) -> Option<AppEvent> {
        match event {
            Event::Offline => self.handle_offline(),
            Event::Online => self.handle_online(),
            Event::Message(message) => Some(AppEvent::Message(message)),
            Event::InvalidPublish {
                reason,
                topic: _,
                payload: _,
            } => Some(AppEvent::InvalidMessage(reason)),
        }
    }

    async fn poll_until_offline(&mut self) {
        while self.online {
            if Event::Offline == self.eventloop.poll().await {
                self.handle_offline();
            }
        }
    }

    async fn poll_until_offline_with_timeout(&mut self) {
        _ = timeout(Duration::from_secs(1), self.poll_until_offline()).await;
    }

    /// Progress the App. Continuing to poll will reconnect the application if there is a disconnection.
    /// **NOTE** Don't block this while iterating.
    pub async fn poll(&mut self) -> AppEvent {
        loop {
            select! {
                event = self.eventloop.poll() => {
                    if let Some(app_event) = self.handle_event(event) {
                        return app_event
                    }
                }
                Some(_) = self.shutdown_rx.recv() => {
                    self.poll_until_offline_with_timeout().await;
                    self.online = false;
                    self.state.online.store(false, Ordering::SeqCst);
                    return AppEvent::Cancelled
                },
            }
        }
    }
}

/// An event produced by the [AppEventLoop]
#[derive(Debug, PartialEq)]
pub enum AppEvent {
    /// Application is online and connected to the broker
    Online,
    /// Application is offline and has disconnected from the broker
    Offline,
    /// A message was received on one of the subscribed topics
    Message(Message),
    /// A publish was received that could not be turned into a message
    InvalidMessage(MessageError),
    Cancelled,
}
