use std::{sync::Arc, time::Duration};

use futures::StreamExt;
use tokio::time::timeout;
use vapp_databroker::{DataBroker, MemoryDataBroker, SignalSimulator};
use vapp_types::{Signal, Value};

#[tokio::test]
async fn simulator_drives_subscribers() {
  let speed = Signal::vehicle_speed();
  let broker = MemoryDataBroker::with_signals([speed.clone()]);
  let mut stream = broker.subscribe(vec![speed.clone()]).await.unwrap();

  let simulator = SignalSimulator::new(Arc::new(broker.clone()), speed.clone(), Duration::from_millis(5));
  let task = tokio::spawn(simulator.run());

  let mut received = Vec::new();
  for _ in 0..3 {
    let reply = timeout(Duration::from_secs(1), stream.next())
      .await
      .unwrap()
      .unwrap();
    received.push(reply.get(&speed).unwrap().value.clone());
  }
  task.abort();

  assert_eq!(received, vec![Value::Float(5.0), Value::Float(10.0), Value::Float(15.0)]);
}
