use crate::common::error::AppError;
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collects every field error before failing, so callers see all problems at once.
#[derive(Debug, Default)]
pub struct Notification {
    errors: Vec<FieldError>,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, error: FieldError) -> &mut Self {
        self.errors.push(error);
        self
    }

    /// Folds `validator` derive output into the notification.
    pub fn append_validator(&mut self, errors: validator::ValidationErrors) -> &mut Self {
        let mut collected: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    FieldError::new(field.clone(), message)
                })
            })
            .collect();
        // HashMap iteration order is not stable
        collected.sort_by(|a, b| a.field.cmp(&b.field));
        self.errors.extend(collected);
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<(), AppError> {
        if !self.has_errors() {
            Ok(())
        } else {
            Err(AppError::ValidationFailed(self.errors))
        }
    }
}
