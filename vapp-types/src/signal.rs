use std::collections::HashMap;

use crate::{constants::VEHICLE_SPEED, utils::timestamp, Value};

/// Identifies a vehicle signal held by the data broker, e.g. `Vehicle.Speed`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signal {
    path: String,
}

impl Signal {
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self { path: path.into() }
    }

    /// The `Vehicle.Speed` signal
    pub fn vehicle_speed() -> Self {
        Self::new(VEHICLE_SPEED)
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl From<&str> for Signal {
    fn from(value: &str) -> Self {
        Signal::new(value)
    }
}

/// The value of a signal at a point in time
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub path: String,
    pub value: Value,
    /// milliseconds since epoch
    pub timestamp: u64,
}

impl DataPoint {
    pub fn new<V: Into<Value>>(signal: &Signal, value: V) -> Self {
        Self::new_with_timestamp(signal, value, timestamp())
    }

    pub fn new_with_timestamp<V: Into<Value>>(signal: &Signal, value: V, timestamp: u64) -> Self {
        Self {
            path: signal.path.clone(),
            value: value.into(),
            timestamp,
        }
    }
}

/// The set of data points delivered by a single subscription notification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataPointReply {
    datapoints: HashMap<String, DataPoint>,
}

impl DataPointReply {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, datapoint: DataPoint) {
        self.datapoints.insert(datapoint.path.clone(), datapoint);
    }

    pub fn get(&self, signal: &Signal) -> Option<&DataPoint> {
        self.datapoints.get(signal.path())
    }

    pub fn len(&self) -> usize {
        self.datapoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datapoints.is_empty()
    }
}

impl From<DataPoint> for DataPointReply {
    fn from(value: DataPoint) -> Self {
        let mut reply = DataPointReply::new();
        reply.insert(value);
        reply
    }
}

impl FromIterator<DataPoint> for DataPointReply {
    fn from_iter<T: IntoIterator<Item = DataPoint>>(iter: T) -> Self {
        let mut reply = DataPointReply::new();
        for datapoint in iter {
            reply.insert(datapoint);
        }
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_lookup_by_signal() {
        let speed = Signal::vehicle_speed();
        let other = Signal::new("Vehicle.Cabin.Door.Row1.Left.IsOpen");
        let reply: DataPointReply = vec![
            DataPoint::new_with_timestamp(&speed, 42.0f32, 1),
            DataPoint::new_with_timestamp(&other, true, 2),
        ]
        .into_iter()
        .collect();

        assert_eq!(reply.len(), 2);
        assert_eq!(reply.get(&speed).unwrap().value, Value::Float(42.0));
        assert_eq!(reply.get(&other).unwrap().timestamp, 2);
        assert!(reply.get(&Signal::new("Vehicle.Unknown")).is_none());
    }

    #[test]
    fn newer_datapoint_replaces_older_for_same_path() {
        let speed = Signal::vehicle_speed();
        let mut reply = DataPointReply::from(DataPoint::new_with_timestamp(&speed, 1.0f32, 1));
        reply.insert(DataPoint::new_with_timestamp(&speed, 2.0f32, 2));
        assert_eq!(reply.len(), 1);
        assert_eq!(reply.get(&speed).unwrap().value, Value::Float(2.0));
    }
}
