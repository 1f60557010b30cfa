use super::events::VideoMediaCreated;
use super::gateway::{GatewayResult, MediaEventPublisher};
use crate::infrastructure::queue::rabbitmq::RabbitMqService;
use anyhow::Context;
use async_trait::async_trait;
use tracing::info;

/// Sends encoding requests to the encoder's queue.
#[derive(Clone)]
pub struct EncoderRequestPublisher {
    queue: RabbitMqService,
    queue_name: String,
}

impl EncoderRequestPublisher {
    pub fn new(queue: RabbitMqService, queue_name: impl Into<String>) -> Self {
        Self {
            queue,
            queue_name: queue_name.into(),
        }
    }
}

#[async_trait]
impl MediaEventPublisher for EncoderRequestPublisher {
    async fn publish(&self, event: &VideoMediaCreated) -> GatewayResult<()> {
        let payload = serde_json::to_vec(event).context("Failed to serialize encoder request")?;
        self.queue.publish(&self.queue_name, &payload).await?;
        info!(video_id = %event.video_id, resource_id = %event.resource_id, queue = %self.queue_name, "📤 Encoder request published");
        Ok(())
    }
}
