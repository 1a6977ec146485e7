use std::sync::Arc;

use log::{debug, error, info, warn};
use vapp::{
    app::{AppClient, VehicleApp},
    client::Message,
    databroker::{DataBroker, DynDataBroker},
    types::{DataPointReply, Signal},
};

use crate::{
    crash::CrashSimulator,
    diagnostic::DiagnosticLog,
    payloads::{CrashEvent, SpeedEvent, SpeedResponse},
};

pub const GET_SPEED_REQUEST_TOPIC: &str = "sampleapp/getSpeed";
pub const GET_SPEED_RESPONSE_TOPIC: &str = "sampleapp/getSpeed/response";
pub const DATABROKER_SUBSCRIPTION_TOPIC_SPEED: &str = "sampleapp/currentSpeed";
pub const DATABROKER_SUBSCRIPTION_TOPIC_CRASHED: &str = "sampleapp/crashed";

struct Inner {
    client: AppClient,
    broker: Arc<DynDataBroker>,
    crash: CrashSimulator,
    diagnostic: Option<DiagnosticLog>,
}

/// The sample app.
///
/// Republishes every `Vehicle.Speed` change on [DATABROKER_SUBSCRIPTION_TOPIC_SPEED], simulates crashes on
/// [DATABROKER_SUBSCRIPTION_TOPIC_CRASHED] and answers requests on [GET_SPEED_REQUEST_TOPIC].
#[derive(Clone)]
pub struct SampleApp {
    inner: Arc<Inner>,
}

impl SampleApp {
    pub fn new(
        client: AppClient,
        broker: Arc<DynDataBroker>,
        crash: CrashSimulator,
        diagnostic: Option<DiagnosticLog>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                broker,
                crash,
                diagnostic,
            }),
        }
    }

    /// Register the signal and topic handlers with the [VehicleApp]
    pub fn register(&self, app: &mut VehicleApp) {
        let speed_app = self.clone();
        let crash_app = self.clone();
        let request_app = self.clone();
        let start_app = self.clone();

        app.subscribe_signal(vec![Signal::vehicle_speed()], move |reply| {
            let app = speed_app.clone();
            async move { app.on_speed_change(reply).await }
        })
        .subscribe_signal(vec![Signal::vehicle_speed()], move |reply| {
            let app = crash_app.clone();
            async move { app.on_crashed_change(reply).await }
        })
        .subscribe_topic(GET_SPEED_REQUEST_TOPIC, move |message| {
            let app = request_app.clone();
            async move { app.on_get_speed_request_received(message).await }
        })
        .on_start(move || async move {
            info!(
                "Sample app {} subscribed to {}",
                start_app.inner.client.app_id(),
                Signal::vehicle_speed().path()
            );
        });
    }

    /// Publish the new speed and record it in the diagnostic log
    pub async fn on_speed_change(&self, reply: DataPointReply) {
        let vehicle_speed = match reply.get(&Signal::vehicle_speed()) {
            Some(datapoint) => datapoint.value.clone(),
            None => {
                warn!("Speed notification without a speed value");
                return;
            }
        };

        if let Some(diagnostic) = &self.inner.diagnostic {
            if let Err(e) = diagnostic.record(format_args!("vehicle_speed {vehicle_speed}")) {
                warn!("Unable to write diagnostic log: {e}");
            }
        }

        let event = SpeedEvent {
            speed: vehicle_speed,
        };
        if let Err(e) = self
            .inner
            .client
            .publish_json(DATABROKER_SUBSCRIPTION_TOPIC_SPEED, &event)
            .await
        {
            error!("Unable to publish speed: {e}");
        }
    }

    /// Run a crash trial, publishing a crash event when it fires
    pub async fn on_crashed_change(&self, _reply: DataPointReply) {
        if !self.inner.crash.random_vehicle_crash() {
            return;
        }
        info!("Simulated vehicle crash");
        if let Err(e) = self
            .inner
            .client
            .publish_json(
                DATABROKER_SUBSCRIPTION_TOPIC_CRASHED,
                &CrashEvent { crashed: true },
            )
            .await
        {
            error!("Unable to publish crash event: {e}");
        }
    }

    /// Read the current speed from the data broker and publish it on the response topic
    pub async fn on_get_speed_request_received(&self, message: Message) {
        debug!(
            "PubSub event for the Topic: {} -> is received with the data: {}",
            message.topic,
            message.payload_string()
        );

        let response = match self.inner.broker.get(&Signal::vehicle_speed()).await {
            Ok(datapoint) => SpeedResponse::ok(&datapoint.value),
            Err(e) => {
                warn!("Unable to read current speed: {e}");
                SpeedResponse::error(&e)
            }
        };

        if let Err(e) = self
            .inner
            .client
            .publish_json(GET_SPEED_RESPONSE_TOPIC, &response)
            .await
        {
            error!("Unable to publish speed response: {e}");
        }
    }
}
