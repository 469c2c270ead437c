//! Settings Command Handlers

use std::collections::HashSet;
use std::sync::Arc;

use crate::application::commands::SaveSettings;
use crate::application::error::ApplicationError;
use crate::application::ports::SettingsRepositoryPort;
use crate::domain::evaluation::StageSettings;

/// SaveSettings Handler
pub struct SaveSettingsHandler {
    settings_repo: Arc<dyn SettingsRepositoryPort>,
}

impl SaveSettingsHandler {
    pub fn new(settings_repo: Arc<dyn SettingsRepositoryPort>) -> Self {
        Self { settings_repo }
    }

    pub async fn handle(&self, command: SaveSettings) -> Result<usize, ApplicationError> {
        validate_settings(&command.settings)?;

        self.settings_repo.save(&command.settings).await?;

        tracing::info!(stages = command.settings.len(), "Settings saved");

        Ok(command.settings.len())
    }
}

fn validate_settings(settings: &[StageSettings]) -> Result<(), ApplicationError> {
    let mut seen = HashSet::new();
    for stage in settings {
        if stage.stage.trim().is_empty() {
            return Err(ApplicationError::validation("stage name must not be empty"));
        }
        if !seen.insert(stage.stage.as_str()) {
            return Err(ApplicationError::validation(format!(
                "duplicate stage: {}",
                stage.stage
            )));
        }
        for criterion in &stage.criteria {
            let min = criterion.min_score.as_f64().unwrap_or(f64::NAN);
            let max = criterion.max_score.as_f64().unwrap_or(f64::NAN);
            if min.is_nan() || max.is_nan() || min > max {
                return Err(ApplicationError::validation(format!(
                    "criterion {} of stage {}: minScore must not exceed maxScore",
                    criterion.id, stage.stage
                )));
            }
        }
    }
    Ok(())
}
