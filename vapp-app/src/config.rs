use vapp_types::topic::{validate_topic_filter, TopicError, TopicFilter};

/// The set of topic filters an application subscribes to each time it comes online
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubscriptionConfig {
    filters: Vec<TopicFilter>,
}

impl SubscriptionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: TopicFilter) -> Self {
        self.add(filter);
        self
    }

    /// Add a filter. A filter for an already present topic replaces the existing one.
    pub fn add(&mut self, filter: TopicFilter) {
        match self.filters.iter_mut().find(|f| f.topic == filter.topic) {
            Some(existing) => *existing = filter,
            None => self.filters.push(filter),
        }
    }

    pub fn validate(&self) -> Result<(), TopicError> {
        for filter in &self.filters {
            validate_topic_filter(&filter.topic)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn filters(&self) -> &[TopicFilter] {
        &self.filters
    }
}

impl From<SubscriptionConfig> for Vec<TopicFilter> {
    fn from(value: SubscriptionConfig) -> Self {
        value.filters
    }
}
