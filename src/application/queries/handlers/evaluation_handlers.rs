//! Evaluation Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{EvaluationStorePort, StoredEvaluation};
use crate::application::queries::{GetEvaluations, ListEvaluations};

/// GetEvaluations Handler
pub struct GetEvaluationsHandler {
    eval_store: Arc<dyn EvaluationStorePort>,
}

impl GetEvaluationsHandler {
    pub fn new(eval_store: Arc<dyn EvaluationStorePort>) -> Self {
        Self { eval_store }
    }

    pub async fn handle(
        &self,
        query: GetEvaluations,
    ) -> Result<Vec<StoredEvaluation>, ApplicationError> {
        Ok(self.eval_store.find_by_work(&query.work_id).await?)
    }
}

/// ListEvaluations Handler
pub struct ListEvaluationsHandler {
    eval_store: Arc<dyn EvaluationStorePort>,
}

impl ListEvaluationsHandler {
    pub fn new(eval_store: Arc<dyn EvaluationStorePort>) -> Self {
        Self { eval_store }
    }

    pub async fn handle(
        &self,
        _query: ListEvaluations,
    ) -> Result<Vec<StoredEvaluation>, ApplicationError> {
        Ok(self.eval_store.find_all().await?)
    }
}
