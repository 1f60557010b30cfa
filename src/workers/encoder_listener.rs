use crate::common::error::AppError;
use crate::infrastructure::queue::rabbitmq::RabbitMqService;
use crate::modules::video::dto::UpdateMediaStatusCommand;
use crate::modules::video::events::EncoderResult;
use crate::modules::video::media::MediaStatus;
use crate::modules::video::service::VideoService;
use crate::state::AppState;
use futures_util::StreamExt;
use lapin::options::BasicAckOptions;
use tracing::{error, info, warn};
use uuid::Uuid;

const CONSUMER_TAG: &str = "video_catalog_encoder_listener";

/// Consumes encoder results until the channel closes. Every delivery is acked,
/// whether or not it could be applied.
pub async fn start_encoder_listener(state: AppState, rabbit: RabbitMqService) -> anyhow::Result<()> {
    let queue_name = state.config.encoder_result_queue.clone();
    let mut consumer = rabbit.consume(&queue_name, CONSUMER_TAG).await?;

    info!("🎥 Encoder listener waiting on '{}'", queue_name);

    while let Some(delivery) = consumer.next().await {
        let delivery = match delivery {
            Ok(delivery) => delivery,
            Err(e) => {
                error!("❌ Failed to receive encoder message: {}", e);
                continue;
            }
        };

        if let Err(e) = handle_encoder_message(&state, &delivery.data).await {
            error!("❌ Failed to apply encoder result: {}", e);
        }

        if let Err(e) = delivery.ack(BasicAckOptions::default()).await {
            error!("Failed to ack message: {}", e);
        }
    }

    warn!("Encoder listener on '{}' stopped", queue_name);
    Ok(())
}

pub async fn handle_encoder_message(state: &AppState, payload: &[u8]) -> Result<(), AppError> {
    match EncoderResult::decode(payload) {
        EncoderResult::Completed(completed) => {
            info!(
                video_id = %completed.video_id,
                resource_id = %completed.metadata.resource_id,
                bucket = %completed.output_bucket,
                "📦 Received encoded media"
            );
            let video_id = Uuid::parse_str(&completed.video_id)
                .map_err(|_| AppError::not_found("Video", &completed.video_id))?;

            let cmd = UpdateMediaStatusCommand {
                status: MediaStatus::Completed,
                video_id,
                resource_id: completed.metadata.resource_id,
                folder: completed.metadata.folder,
                filename: completed.metadata.filename,
            };
            VideoService::update_media_status(state, cmd).await
        }
        EncoderResult::Error(failure) => {
            error!(
                resource_id = %failure.message.resource_id,
                video_id = ?failure.message.video_id,
                "❌ Encoder reported failure: {}",
                failure.error
            );
            Ok(())
        }
        EncoderResult::Unknown => {
            warn!("Ignoring unrecognized encoder message: {}", String::from_utf8_lossy(payload));
            Ok(())
        }
    }
}
