use crate::settings::{CursorSettings, error::SettingsError, validated::ValidatedSettings};
use std::num::NonZeroUsize;
use tracing::{info, warn};

/// Pages above this size hold a lot of rows in memory at once.
const LARGE_BATCH_SIZE: usize = 100_000;

/// Checks raw cursor settings and produces [`ValidatedSettings`].
pub struct SettingsValidator<'a> {
    settings: &'a CursorSettings,
}

impl<'a> SettingsValidator<'a> {
    pub fn new(settings: &'a CursorSettings) -> Self {
        Self { settings }
    }

    pub fn validate(&self) -> Result<ValidatedSettings, SettingsError> {
        let mut errors: Vec<String> = Vec::new();

        let batch_size = self.validate_batch_size(&mut errors);
        self.validate_array_size(&mut errors);

        match batch_size {
            Some(batch_size) if errors.is_empty() => {
                let validated = ValidatedSettings {
                    batch_size,
                    array_size: self.settings.array_size,
                };
                info!("Cursor settings validated: {:?}", validated);
                Ok(validated)
            }
            _ => Err(SettingsError::ValidationFailed(errors)),
        }
    }

    fn validate_batch_size(&self, errors: &mut Vec<String>) -> Option<NonZeroUsize> {
        let batch_size = NonZeroUsize::new(self.settings.batch_size);
        match batch_size {
            None => errors.push("batch_size must be greater than 0".to_string()),
            Some(size) if size.get() > LARGE_BATCH_SIZE => {
                warn!("Batch size {} is very large, may cause memory issues", size);
            }
            Some(_) => {}
        }
        batch_size
    }

    fn validate_array_size(&self, errors: &mut Vec<String>) {
        if self.settings.array_size == 0 {
            errors.push("array_size must be greater than 0".to_string());
        }
    }
}
