use thiserror::Error;

use crate::constants::{MULTI_LEVEL_WILDCARD, SINGLE_LEVEL_WILDCARD, TOPIC_LEVEL_SEPARATOR};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QoS {
  AtMostOnce,
  AtLeastOnce,
  ExactlyOnce
}

#[derive(Error, Debug, PartialEq)]
pub enum TopicError {
  #[error("Topic must not be empty")]
  Empty,
  #[error("Topic name {0} must not contain wildcard characters")]
  WildcardInName(String),
  #[error("Topic filter {0} has a misplaced wildcard")]
  InvalidWildcard(String),
}

/// A subscription filter along with the QoS it should be subscribed with
#[derive(Clone, Debug, PartialEq)]
pub struct TopicFilter {
  pub topic: String,
  pub qos: QoS
}

impl TopicFilter {

  pub fn new<S: Into<String>>(topic: S) -> Self {
    Self::new_with_qos(topic, QoS::AtMostOnce)
  }

  pub fn new_with_qos<S: Into<String>>(topic: S, qos: QoS) -> Self {
    Self {topic: topic.into(), qos}
  }

  /// Check if a topic name that a message was published on is matched by this filter
  pub fn matches(&self, topic_name: &str) -> bool {
    filter_matches(&self.topic, topic_name)
  }
}

/// Validate a topic name used to publish with. Names must be non empty and contain no wildcards.
pub fn validate_topic_name(topic: &str) -> Result<(), TopicError> {
  if topic.is_empty() {
    return Err(TopicError::Empty)
  }
  if topic.contains([SINGLE_LEVEL_WILDCARD, MULTI_LEVEL_WILDCARD]) {
    return Err(TopicError::WildcardInName(topic.into()))
  }
  Ok(())
}

/// Validate a subscription filter.
///
/// `+` must occupy a whole level and `#` must occupy the whole final level.
pub fn validate_topic_filter(filter: &str) -> Result<(), TopicError> {
  if filter.is_empty() {
    return Err(TopicError::Empty)
  }
  let levels: Vec<&str> = filter.split(TOPIC_LEVEL_SEPARATOR).collect();
  let last = levels.len() - 1;
  for (i, level) in levels.iter().enumerate() {
    let has_single = level.contains(SINGLE_LEVEL_WILDCARD);
    let has_multi = level.contains(MULTI_LEVEL_WILDCARD);
    if has_single && level.len() != 1 {
      return Err(TopicError::InvalidWildcard(filter.into()))
    }
    if has_multi && (level.len() != 1 || i != last) {
      return Err(TopicError::InvalidWildcard(filter.into()))
    }
  }
  Ok(())
}

/// Check if `topic_name` is matched by the MQTT subscription `filter`
pub fn filter_matches(filter: &str, topic_name: &str) -> bool {
  let mut filter_levels = filter.split(TOPIC_LEVEL_SEPARATOR);
  let mut topic_levels = topic_name.split(TOPIC_LEVEL_SEPARATOR);

  /* topics starting with $ are not matched by filters beginning with a wildcard */
  if topic_name.starts_with('$') && filter.starts_with([SINGLE_LEVEL_WILDCARD, MULTI_LEVEL_WILDCARD]) {
    return false
  }

  loop {
    match (filter_levels.next(), topic_levels.next()) {
      (Some("#"), _) => return true,
      (Some("+"), Some(_)) => continue,
      (Some(f), Some(t)) => {
        if f != t { return false }
      },
      (None, None) => return true,
      _ => return false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn exact_filter_matches() {
    assert!(filter_matches("sampleapp/getSpeed", "sampleapp/getSpeed"));
    assert!(!filter_matches("sampleapp/getSpeed", "sampleapp/getSpeed/response"));
    assert!(!filter_matches("sampleapp/getSpeed/response", "sampleapp/getSpeed"));
  }

  #[test]
  fn single_level_wildcard() {
    assert!(filter_matches("sampleapp/+", "sampleapp/getSpeed"));
    assert!(filter_matches("+/getSpeed", "sampleapp/getSpeed"));
    assert!(!filter_matches("sampleapp/+", "sampleapp/getSpeed/response"));
    assert!(filter_matches("sampleapp/+/response", "sampleapp/getSpeed/response"));
  }

  #[test]
  fn multi_level_wildcard() {
    assert!(filter_matches("sampleapp/#", "sampleapp/getSpeed/response"));
    assert!(filter_matches("sampleapp/#", "sampleapp"));
    assert!(filter_matches("#", "a/b/c"));
    assert!(!filter_matches("#", "$SYS/broker"));
  }

  #[test]
  fn topic_name_validation() {
    assert!(validate_topic_name("sampleapp/currentSpeed").is_ok());
    assert_eq!(validate_topic_name(""), Err(TopicError::Empty));
    assert!(validate_topic_name("sampleapp/+").is_err());
    assert!(validate_topic_name("sampleapp/#").is_err());
  }

  #[test]
  fn topic_filter_validation() {
    assert!(validate_topic_filter("sampleapp/getSpeed").is_ok());
    assert!(validate_topic_filter("sampleapp/+/response").is_ok());
    assert!(validate_topic_filter("sampleapp/#").is_ok());
    assert!(validate_topic_filter("sampleapp/#/response").is_err());
    assert!(validate_topic_filter("sampleapp/get+").is_err());
    assert!(validate_topic_filter("sampleapp/a#").is_err());
  }
}
