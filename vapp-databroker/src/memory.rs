use std::{collections::HashMap, mem::discriminant, sync::Arc};

use async_trait::async_trait;
use futures::{channel::mpsc, StreamExt};
use log::{debug, trace};
use tokio::sync::Mutex;
use vapp_types::{DataPoint, DataPointReply, Signal, Value};

use crate::{BrokerError, DataBroker, SignalStream};

#[derive(Default)]
struct SignalEntry {
    datapoint: Option<DataPoint>,
    subscribers: Vec<mpsc::UnboundedSender<DataPointReply>>,
}

impl SignalEntry {
    fn notify(&mut self, datapoint: &DataPoint) {
        self.subscribers
            .retain(|tx| tx.unbounded_send(DataPointReply::from(datapoint.clone())).is_ok());
    }
}

/// A [DataBroker] that holds signal values in memory.
///
/// Signals must be registered before they can be read, written or subscribed to.
/// Cloning produces another handle to the same broker.
#[derive(Clone, Default)]
pub struct MemoryDataBroker {
    signals: Arc<Mutex<HashMap<String, SignalEntry>>>,
}

impl MemoryDataBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a broker that knows about the provided signals
    pub fn with_signals<I: IntoIterator<Item = Signal>>(signals: I) -> Self {
        let map = signals
            .into_iter()
            .map(|s| (s.path().to_string(), SignalEntry::default()))
            .collect();
        Self {
            signals: Arc::new(Mutex::new(map)),
        }
    }

    /// Number of live subscriptions for a signal
    pub async fn subscriber_count(&self, signal: &Signal) -> usize {
        let mut signals = self.signals.lock().await;
        match signals.get_mut(signal.path()) {
            Some(entry) => {
                entry.subscribers.retain(|tx| !tx.is_closed());
                entry.subscribers.len()
            }
            None => 0,
        }
    }
}

#[async_trait]
impl DataBroker for MemoryDataBroker {
    async fn get(&self, signal: &Signal) -> Result<DataPoint, BrokerError> {
        let signals = self.signals.lock().await;
        let entry = signals
            .get(signal.path())
            .ok_or_else(|| BrokerError::UnknownSignal(signal.path().into()))?;
        entry
            .datapoint
            .clone()
            .ok_or_else(|| BrokerError::NotAvailable(signal.path().into()))
    }

    async fn subscribe(&self, signals: Vec<Signal>) -> Result<SignalStream, BrokerError> {
        if signals.is_empty() {
            return Err(BrokerError::EmptySubscription);
        }
        let mut known = self.signals.lock().await;
        if let Some(unknown) = signals.iter().find(|s| !known.contains_key(s.path())) {
            return Err(BrokerError::UnknownSignal(unknown.path().into()));
        }

        let (tx, rx) = mpsc::unbounded();
        let mut initial = DataPointReply::new();
        for signal in &signals {
            if let Some(entry) = known.get_mut(signal.path()) {
                if let Some(datapoint) = &entry.datapoint {
                    initial.insert(datapoint.clone());
                }
                entry.subscribers.push(tx.clone());
            }
        }
        if !initial.is_empty() {
            _ = tx.unbounded_send(initial);
        }
        debug!(
            "New subscription for {:?}",
            signals.iter().map(Signal::path).collect::<Vec<_>>()
        );
        Ok(rx.boxed())
    }

    async fn set(&self, signal: &Signal, value: Value) -> Result<(), BrokerError> {
        let mut signals = self.signals.lock().await;
        let entry = signals
            .get_mut(signal.path())
            .ok_or_else(|| BrokerError::UnknownSignal(signal.path().into()))?;

        if let Some(current) = &entry.datapoint {
            if discriminant(&current.value) != discriminant(&value) {
                return Err(BrokerError::TypeMismatch {
                    path: signal.path().into(),
                    reason: format!("current value {:?}, new value {:?}", current.value, value),
                });
            }
        }

        trace!("{} = {}", signal.path(), value);
        let datapoint = DataPoint::new(signal, value);
        entry.notify(&datapoint);
        entry.datapoint = Some(datapoint);
        Ok(())
    }
}
