//! Domain event publishing.
//!
//! Events go to NATS when a client is configured. Without one, publishing
//! only logs. A failed publish is logged and never fails the request.

use crate::domain::events::DomainEvent;

#[derive(Clone, Default)]
pub struct EventPublisher {
    nats: Option<async_nats::Client>,
}

impl EventPublisher {
    pub fn new(nats: Option<async_nats::Client>) -> Self { Self { nats } }

    /// Connects to `url`, falling back to a log-only publisher on failure.
    pub async fn connect(url: Option<&str>) -> Self {
        let Some(url) = url else { return Self::default() };
        match async_nats::connect(url).await {
            Ok(client) => {
                tracing::info!(url, "connected to NATS");
                Self::new(Some(client))
            }
            Err(err) => {
                tracing::warn!(url, error = %err, "NATS unavailable, events will only be logged");
                Self::default()
            }
        }
    }

    pub fn is_connected(&self) -> bool { self.nats.is_some() }

    pub async fn publish(&self, events: impl IntoIterator<Item = DomainEvent>) {
        for event in events {
            let subject = event.subject();
            tracing::debug!(subject = %subject, ?event, "domain event");
            let Some(client) = &self.nats else { continue };
            let payload = match serde_json::to_vec(&event) {
                Ok(payload) => payload,
                Err(err) => {
                    tracing::warn!(subject = %subject, error = %err, "failed to encode event");
                    continue;
                }
            };
            if let Err(err) = client.publish(subject.clone(), payload.into()).await {
                tracing::warn!(subject = %subject, error = %err, "failed to publish event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::{InventoryEvent, DomainEvent};

    #[tokio::test]
    async fn test_publish_without_nats_is_noop() {
        let publisher = EventPublisher::connect(None).await;
        assert!(!publisher.is_connected());
        publisher.publish([DomainEvent::Inventory(InventoryEvent::Removed { item_id: "MED-001".into() })]).await;
    }
}
