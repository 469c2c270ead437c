//! Settings Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::SettingsRepositoryPort;
use crate::application::queries::GetSettings;
use crate::domain::evaluation::StageSettings;

/// GetSettings Handler
pub struct GetSettingsHandler {
    settings_repo: Arc<dyn SettingsRepositoryPort>,
}

impl GetSettingsHandler {
    pub fn new(settings_repo: Arc<dyn SettingsRepositoryPort>) -> Self {
        Self { settings_repo }
    }

    pub async fn handle(&self, _query: GetSettings) -> Result<Vec<StageSettings>, ApplicationError> {
        Ok(self.settings_repo.load().await?)
    }
}
