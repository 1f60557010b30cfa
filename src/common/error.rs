use crate::common::validation::FieldError;
use crate::modules::video::media::MediaKind;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{entity} with id {id} was not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {}", join_errors(.0))]
    ValidationFailed(Vec<FieldError>),

    #[error("No media attached to slot {0}")]
    MediaNotAttached(MediaKind),

    #[error("Slot {0} does not go through encoding")]
    NotEncodable(MediaKind),

    #[error("Media shape does not fit slot {0}")]
    MediaKindMismatch(MediaKind),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    External(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        AppError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_every_field() {
        let err = AppError::ValidationFailed(vec![
            FieldError::new("title", "is required"),
            FieldError::new("duration", "must not be negative"),
        ]);

        assert_eq!(
            err.to_string(),
            "Validation failed: title: is required, duration: must not be negative"
        );
    }

    #[test]
    fn not_found_names_entity_and_id() {
        assert_eq!(AppError::not_found("Video", "42").to_string(), "Video with id 42 was not found");
    }
}
