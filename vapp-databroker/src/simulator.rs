use std::{sync::Arc, time::Duration};

use log::{info, warn};
use tokio::time::{interval, MissedTickBehavior};
use vapp_types::{Signal, Value};

use crate::DynDataBroker;

const DEFAULT_MIN: f32 = 0.0;
const DEFAULT_MAX: f32 = 100.0;
const DEFAULT_STEP: f32 = 5.0;

/// Feeds a float signal with a value ramping up and down between two bounds.
///
/// Stands in for a vehicle when there is no real provider attached to the broker.
pub struct SignalSimulator {
    broker: Arc<DynDataBroker>,
    signal: Signal,
    period: Duration,
    min: f32,
    max: f32,
    step: f32,
    value: f32,
    direction: f32,
}

impl SignalSimulator {
    /// Create a simulator ramping between 0 and 100 in steps of 5 every `period`
    pub fn new(broker: Arc<DynDataBroker>, signal: Signal, period: Duration) -> Self {
        Self {
            broker,
            signal,
            period,
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: DEFAULT_STEP,
            value: DEFAULT_MIN,
            direction: 1.0,
        }
    }

    pub fn with_range(mut self, min: f32, max: f32, step: f32) -> Self {
        self.min = min;
        self.max = max;
        self.step = step;
        self.value = min;
        self
    }

    /// Advance the ramp and return the new value
    pub fn next_value(&mut self) -> f32 {
        self.value += self.step * self.direction;
        if self.value >= self.max {
            self.value = self.max;
            self.direction = -1.0;
        } else if self.value <= self.min {
            self.value = self.min;
            self.direction = 1.0;
        }
        self.value
    }

    /// Publish a new value to the broker every period. Runs until the task is dropped.
    pub async fn run(mut self) {
        info!(
            "Simulating {} every {:?}",
            self.signal.path(),
            self.period
        );
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let value = self.next_value();
            if let Err(e) = self.broker.set(&self.signal, Value::Float(value)).await {
                warn!("Simulator unable to set {}: {e}", self.signal.path());
            }
        }
    }
}
