use std::{future::Future, pin::Pin, sync::Arc};

use futures::StreamExt;
use log::{debug, error, info, warn};
use tokio::task::{self, JoinHandle};
use vapp_client::{Client, EventLoop, Message};
use vapp_databroker::{DataBroker, DynDataBroker};
use vapp_types::{
    topic::{QoS, TopicFilter},
    DataPointReply, Signal,
};

use crate::{AppClient, AppError, AppEvent, AppEventLoop, SubscriptionConfig};

type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

pub type TopicCallback = Arc<dyn Fn(Message) -> BoxFuture + Send + Sync>;
pub type SignalCallback = Arc<dyn Fn(DataPointReply) -> BoxFuture + Send + Sync>;
pub type LifecycleCallback = Box<dyn FnOnce() -> BoxFuture + Send>;
pub type OnlineCallback = Box<dyn Fn() + Send>;
pub type OfflineCallback = Box<dyn Fn() + Send>;

struct TopicHandler {
    filter: TopicFilter,
    callback: TopicCallback,
}

struct SignalHandler {
    signals: Vec<Signal>,
    callback: SignalCallback,
}

#[derive(Default)]
struct AppCallbacks {
    start: Option<LifecycleCallback>,
    stop: Option<LifecycleCallback>,
    online: Option<OnlineCallback>,
    offline: Option<OfflineCallback>,
}

/// A vehicle application.
///
/// Register callbacks for vehicle signal changes and for messages on MQTT topics, then [VehicleApp::run] the app.
/// Every signal notification and every matching topic message invokes its callback as an independent task.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use vapp_app::VehicleApp;
/// use vapp_client::channel::ChannelEventLoop;
/// use vapp_databroker::MemoryDataBroker;
/// use vapp_types::Signal;
///
/// # async fn example() -> Result<(), vapp_app::AppError> {
/// let (eventloop, client, _broker) = ChannelEventLoop::new();
/// let databroker = Arc::new(MemoryDataBroker::with_signals([Signal::vehicle_speed()]));
/// let (mut app, app_client) = VehicleApp::new("sampleapp", eventloop, client, databroker)?;
///
/// let publisher = app_client.clone();
/// app.subscribe_signal(vec![Signal::vehicle_speed()], move |reply| {
///     let publisher = publisher.clone();
///     async move {
///         if let Some(datapoint) = reply.get(&Signal::vehicle_speed()) {
///             _ = publisher.publish_event("sampleapp/currentSpeed", datapoint.value.to_string()).await;
///         }
///     }
/// })
/// .subscribe_topic("sampleapp/getSpeed", |message| async move {
///     println!("request {}", message.payload_string());
/// });
///
/// app.run().await
/// # }
/// ```
pub struct VehicleApp {
    eventloop: AppEventLoop,
    client: AppClient,
    broker: Arc<DynDataBroker>,
    topic_handlers: Vec<TopicHandler>,
    signal_handlers: Vec<SignalHandler>,
    callbacks: AppCallbacks,
}

impl VehicleApp {
    /// Creates a new app along with the client used to publish events and cancel the app.
    pub fn new<
        S: Into<String>,
        E: EventLoop + Send + 'static,
        C: Client + Send + Sync + 'static,
    >(
        app_id: S,
        eventloop: E,
        client: C,
        broker: Arc<DynDataBroker>,
    ) -> Result<(Self, AppClient), AppError> {
        let (eventloop, client) =
            AppEventLoop::new(app_id, SubscriptionConfig::new(), eventloop, client)?;
        let app = Self {
            eventloop,
            client: client.clone(),
            broker,
            topic_handlers: Vec::new(),
            signal_handlers: Vec::new(),
            callbacks: AppCallbacks::default(),
        };
        Ok((app, client))
    }

    /// Called once, after all signal subscriptions have been established.
    pub fn on_start<F, Fut>(&mut self, cb: F) -> &mut Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.callbacks.start = Some(Box::new(move || -> BoxFuture { Box::pin(cb()) }));
        self
    }

    /// Called once, after the app has been cancelled.
    pub fn on_stop<F, Fut>(&mut self, cb: F) -> &mut Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.callbacks.stop = Some(Box::new(move || -> BoxFuture { Box::pin(cb()) }));
        self
    }

    pub fn on_online<F>(&mut self, cb: F) -> &mut Self
    where
        F: Fn() + Send + 'static,
    {
        self.callbacks.online = Some(Box::new(cb));
        self
    }

    pub fn on_offline<F>(&mut self, cb: F) -> &mut Self
    where
        F: Fn() + Send + 'static,
    {
        self.callbacks.offline = Some(Box::new(cb));
        self
    }

    /// Register a callback for changes of one or more vehicle signals.
    ///
    /// Each registration creates its own data broker subscription when the app is run.
    pub fn subscribe_signal<F, Fut>(&mut self, signals: Vec<Signal>, cb: F) -> &mut Self
    where
        F: Fn(DataPointReply) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let callback: SignalCallback =
            Arc::new(move |reply: DataPointReply| -> BoxFuture { Box::pin(cb(reply)) });
        self.signal_handlers.push(SignalHandler { signals, callback });
        self
    }

    /// Register a callback for messages on an MQTT topic filter, subscribed with [QoS::AtMostOnce].
    pub fn subscribe_topic<S, F, Fut>(&mut self, topic: S, cb: F) -> &mut Self
    where
        S: Into<String>,
        F: Fn(Message) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.subscribe_topic_with_qos(TopicFilter::new_with_qos(topic, QoS::AtMostOnce), cb)
    }

    pub fn subscribe_topic_with_qos<F, Fut>(&mut self, filter: TopicFilter, cb: F) -> &mut Self
    where
        F: Fn(Message) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let callback: TopicCallback =
            Arc::new(move |message: Message| -> BoxFuture { Box::pin(cb(message)) });
        self.eventloop.subscribe(filter.clone());
        self.topic_handlers.push(TopicHandler { filter, callback });
        self
    }

    async fn subscribe_signals(
        broker: Arc<DynDataBroker>,
        handlers: Vec<(Vec<Signal>, SignalCallback)>,
    ) -> Result<Vec<JoinHandle<()>>, AppError> {
        let mut tasks: Vec<JoinHandle<()>> = Vec::with_capacity(handlers.len());
        for (signals, callback) in handlers {
            let mut stream = match broker.subscribe(signals.clone()).await {
                Ok(stream) => stream,
                Err(e) => {
                    tasks.iter().for_each(|t| t.abort());
                    return Err(e.into());
                }
            };
            debug!(
                "Subscribed to signals {:?}",
                signals.iter().map(Signal::path).collect::<Vec<_>>()
            );
            tasks.push(task::spawn(async move {
                while let Some(reply) = stream.next().await {
                    task::spawn(callback(reply));
                }
                warn!("Signal subscription ended");
            }));
        }
        Ok(tasks)
    }

    fn dispatch(&self, message: Message) {
        let mut handled = false;
        let handlers = self
            .topic_handlers
            .iter()
            .filter(|h| h.filter.matches(&message.topic));
        for handler in handlers {
            handled = true;
            task::spawn((handler.callback)(message.clone()));
        }
        if !handled {
            debug!("No handler for message on topic {}", message.topic);
        }
    }

    /// Run the app until it is cancelled via [AppClient::cancel].
    ///
    /// Returns an error if a data broker subscription could not be established.
    pub async fn run(&mut self) -> Result<(), AppError> {
        self.eventloop.subscription_config().validate()?;

        let handlers = self
            .signal_handlers
            .iter()
            .map(|h| (h.signals.clone(), h.callback.clone()))
            .collect();
        let signal_tasks = Self::subscribe_signals(self.broker.clone(), handlers).await?;
        info!("App {} started", self.client.app_id());
        if let Some(cb) = self.callbacks.start.take() {
            cb().await;
        }

        loop {
            match self.eventloop.poll().await {
                AppEvent::Online => {
                    if let Some(cb) = &self.callbacks.online {
                        cb()
                    }
                }
                AppEvent::Offline => {
                    if let Some(cb) = &self.callbacks.offline {
                        cb()
                    }
                }
                AppEvent::Message(message) => self.dispatch(message),
                AppEvent::InvalidMessage(e) => error!("Received invalid message: {e}"),
                AppEvent::Cancelled => break,
            }
        }

        for t in signal_tasks {
            t.abort();
        }
        if let Some(cb) = self.callbacks.stop.take() {
            cb().await;
        }
        info!("App {} stopped", self.client.app_id());
        Ok(())
    }
}
