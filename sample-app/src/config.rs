use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::{crash::DEFAULT_CRASH_PROBABILITY, diagnostic::SPEED_LOG_PATH};

/// Sample vehicle app
#[derive(Parser, Debug, Clone)]
#[command(name = "sample-app", version, about)]
pub struct Config {
    /// Application id, used as the MQTT client id
    #[arg(long, env = "SDV_APP_ID", default_value = "sampleapp")]
    pub app_id: String,

    /// Address of the MQTT broker
    #[arg(long, env = "SDV_MQTT_ADDRESS", default_value = "mqtt://localhost:1883")]
    pub mqtt_address: String,

    /// Directory the rotating speed diagnostic log is written to
    #[arg(long, env = "SDV_DIAGNOSTIC_LOG_DIR", default_value = SPEED_LOG_PATH)]
    pub diagnostic_log_dir: PathBuf,

    /// Probability a speed change is treated as a crash
    #[arg(long, default_value_t = DEFAULT_CRASH_PROBABILITY)]
    pub crash_probability: f64,

    /// Drive Vehicle.Speed from a built in simulator
    #[arg(long, env = "SDV_SIMULATE_SPEED", default_value_t = true, action = ArgAction::Set)]
    pub simulate_speed: bool,

    /// Period between simulated speed updates in milliseconds
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    pub simulation_period_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_arguments() {
        let config = Config::try_parse_from([
            "sample-app",
            "--app-id",
            "speedapp",
            "--mqtt-address",
            "mqtt://broker:1884",
            "--diagnostic-log-dir",
            "/tmp/diag",
            "--crash-probability",
            "0.5",
            "--simulate-speed",
            "false",
            "--simulation-period-ms",
            "250",
        ])
        .unwrap();
        assert_eq!(config.app_id, "speedapp");
        assert_eq!(config.mqtt_address, "mqtt://broker:1884");
        assert_eq!(config.diagnostic_log_dir, PathBuf::from("/tmp/diag"));
        assert_eq!(config.crash_probability, 0.5);
        assert!(!config.simulate_speed);
        assert_eq!(config.simulation_period_ms, 250);
    }

    #[test]
    fn rejects_non_numeric_probability() {
        assert!(Config::try_parse_from(["sample-app", "--crash-probability", "often"]).is_err());
    }

    #[test]
    fn rejects_zero_simulation_period() {
        assert!(Config::try_parse_from(["sample-app", "--simulation-period-ms", "0"]).is_err());
        let config = Config::try_parse_from(["sample-app", "--simulation-period-ms", "1"]).unwrap();
        assert_eq!(config.simulation_period_ms, 1);
    }

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["sample-app"]).unwrap();
        assert_eq!(config.simulation_period_ms, 1000);
        assert_eq!(config.crash_probability, DEFAULT_CRASH_PROBABILITY);
        assert_eq!(config.diagnostic_log_dir, PathBuf::from(SPEED_LOG_PATH));
    }

    #[test]
    fn command_is_well_formed() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
