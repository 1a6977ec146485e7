use crate::{Event, Message, MessageError};

fn topic_and_payload_to_message(topic: Vec<u8>, payload: Vec<u8>) -> Result<Message, (MessageError, Vec<u8>, Vec<u8>)> {
  if topic.is_empty() {
    return Err((MessageError::EmptyTopic, topic, payload));
  }
  match String::from_utf8(topic) {
    Ok(topic) => Ok(Message { topic, payload }),
    Err(e) => {
      let topic = e.as_bytes().to_vec();
      Err((MessageError::from(e), topic, payload))
    }
  }
}

/// Convert the raw topic and payload of an MQTT publish into an [Event]
pub fn topic_and_payload_to_event(topic: Vec<u8>, payload: Vec<u8>) -> Event
{
  match topic_and_payload_to_message(topic, payload) {
    Ok(message) => Event::Message(message),
    Err((reason, topic, payload)) => Event::InvalidPublish { reason, topic, payload },
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn valid_publish_becomes_message() {
    let event = topic_and_payload_to_event(b"sampleapp/getSpeed".to_vec(), b"anything".to_vec());
    assert_eq!(event, Event::Message(Message::new("sampleapp/getSpeed", "anything")));
  }

  #[test]
  fn empty_topic_is_invalid() {
    let event = topic_and_payload_to_event(vec![], b"x".to_vec());
    assert!(matches!(event, Event::InvalidPublish { reason: MessageError::EmptyTopic, .. }));
  }

  #[test]
  fn non_utf8_topic_is_invalid() {
    let topic = vec![b's', 0xff, 0xfe];
    match topic_and_payload_to_event(topic.clone(), b"x".to_vec()) {
      Event::InvalidPublish { reason: MessageError::TopicUtf8Error(_), topic: t, payload } => {
        assert_eq!(t, topic);
        assert_eq!(payload, b"x".to_vec());
      },
      event => panic!("got {event:?}")
    }
  }
}
