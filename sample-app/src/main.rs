use std::{error::Error, sync::Arc, time::Duration};

use clap::Parser;
use log::{info, warn};
use sample_app::{Config, CrashSimulator, DiagnosticLog, SampleApp, SPEED_LOGGER_NAME};
use vapp::{
    app::{AppClient, VehicleApp},
    client::mqtt_client::rumqtt,
    databroker::{DynDataBroker, MemoryDataBroker, SignalSimulator},
    types::Signal,
};

async fn wait_for_shutdown(client: AppClient) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut terminate = match signal(SignalKind::terminate()) {
            Ok(terminate) => terminate,
            Err(e) => {
                warn!("Unable to listen for SIGTERM: {e}");
                _ = tokio::signal::ctrl_c().await;
                client.cancel().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => info!("Received interrupt"),
            _ = terminate.recv() => info!("Received terminate"),
        }
    }
    #[cfg(not(unix))]
    {
        _ = tokio::signal::ctrl_c().await;
        info!("Received interrupt");
    }
    client.cancel().await;
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    info!("Starting SampleApp...");

    let diagnostic = DiagnosticLog::create(&config.diagnostic_log_dir, SPEED_LOGGER_NAME)?;
    let crash = CrashSimulator::new(config.crash_probability)?;

    let opts = rumqtt::MqttOptions::from_address(config.app_id.clone(), &config.mqtt_address)?;
    let (eventloop, client) = rumqtt::EventLoop::new(opts, 10);

    let databroker: Arc<DynDataBroker> =
        Arc::new(MemoryDataBroker::with_signals([Signal::vehicle_speed()]));
    if config.simulate_speed {
        let simulator = SignalSimulator::new(
            databroker.clone(),
            Signal::vehicle_speed(),
            Duration::from_millis(config.simulation_period_ms),
        );
        tokio::spawn(simulator.run());
    }

    let (mut app, app_client) =
        VehicleApp::new(config.app_id, eventloop, client, databroker.clone())?;
    let sample = SampleApp::new(app_client.clone(), databroker, crash, Some(diagnostic));
    sample.register(&mut app);

    tokio::spawn(wait_for_shutdown(app_client));

    app.run().await?;
    info!("SampleApp stopped");
    Ok(())
}
