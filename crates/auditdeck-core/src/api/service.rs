//! Collaborator boundary to the audit backend.
//!
//! The dashboard treats the backend as an opaque service: typed JSON for
//! datasets, models and jobs, plus a progress stream for running audits.
//! Implementations that consume a real event stream should fall back to
//! polling `job_status` when the stream errors; the in-memory service used
//! by the demo and tests models that behavior directly.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{Error, Result};

use super::models::{AuditJob, Dataset, JobStatus, ModelEntry, ProgressEvent};

#[async_trait]
pub trait AuditService: Send + Sync {
    async fn list_datasets(&self) -> Result<Vec<Dataset>>;

    async fn list_models(&self) -> Result<Vec<ModelEntry>>;

    async fn list_jobs(&self) -> Result<Vec<AuditJob>>;

    async fn job_status(&self, id: Uuid) -> Result<AuditJob>;

    /// Wait for the next status frame of a running job.
    ///
    /// Implementations backed by an event stream yield frames as they
    /// arrive; the polling fallback simply re-reads `job_status`.
    async fn next_progress(&self, id: Uuid) -> Result<ProgressEvent>;
}

/// In-memory audit service with canned data.
///
/// Backs the demo deck and the tests; each `next_progress` call walks a
/// running job one pipeline step forward.
pub struct StaticAuditService {
    datasets: Vec<Dataset>,
    models: Vec<ModelEntry>,
    jobs: Mutex<Vec<AuditJob>>,
}

const PIPELINE_STEPS: &[&str] = &[
    "metrics",
    "xai",
    "fairness",
    "robustness",
    "overfit",
    "report",
];

impl StaticAuditService {
    pub fn new(datasets: Vec<Dataset>, models: Vec<ModelEntry>, jobs: Vec<AuditJob>) -> Self {
        Self {
            datasets,
            models,
            jobs: Mutex::new(jobs),
        }
    }

    /// Canned data for the demo deck
    pub fn with_demo_data() -> Self {
        let now = Utc::now();
        let dataset_id = Uuid::new_v4();
        let model_id = Uuid::new_v4();

        let datasets = vec![
            Dataset {
                id: dataset_id,
                name: "credit-default".into(),
                filename: "credit_default.csv".into(),
                file_format: "csv".into(),
                size_bytes: 4_812_339,
                target_column: "defaulted".into(),
                created_at: now,
            },
            Dataset {
                id: Uuid::new_v4(),
                name: "churn-q2".into(),
                filename: "churn_q2.parquet".into(),
                file_format: "parquet".into(),
                size_bytes: 11_207_580,
                target_column: "churned".into(),
                created_at: now,
            },
        ];

        let models = vec![
            ModelEntry {
                id: model_id,
                name: "gbm-default-v3".into(),
                framework: "xgboost".into(),
                task_type: Some("classification".into()),
                size_bytes: 2_448_771,
                created_at: now,
            },
            ModelEntry {
                id: Uuid::new_v4(),
                name: "churn-logreg".into(),
                framework: "sklearn".into(),
                task_type: Some("classification".into()),
                size_bytes: 88_214,
                created_at: now,
            },
        ];

        let jobs = vec![AuditJob {
            id: Uuid::new_v4(),
            dataset_id,
            model_id,
            status: JobStatus::Running,
            step: Some(PIPELINE_STEPS[0].into()),
            progress: Some(0.0),
            created_at: now,
        }];

        Self::new(datasets, models, jobs)
    }
}

#[async_trait]
impl AuditService for StaticAuditService {
    async fn list_datasets(&self) -> Result<Vec<Dataset>> {
        Ok(self.datasets.clone())
    }

    async fn list_models(&self) -> Result<Vec<ModelEntry>> {
        Ok(self.models.clone())
    }

    async fn list_jobs(&self) -> Result<Vec<AuditJob>> {
        let jobs = self
            .jobs
            .lock()
            .map_err(|_| Error::AuditService("job store poisoned".into()))?;
        Ok(jobs.clone())
    }

    async fn job_status(&self, id: Uuid) -> Result<AuditJob> {
        let jobs = self
            .jobs
            .lock()
            .map_err(|_| Error::AuditService("job store poisoned".into()))?;
        jobs.iter()
            .find(|j| j.id == id)
            .cloned()
            .ok_or(Error::JobNotFound(id))
    }

    async fn next_progress(&self, id: Uuid) -> Result<ProgressEvent> {
        let mut jobs = self
            .jobs
            .lock()
            .map_err(|_| Error::AuditService("job store poisoned".into()))?;
        let job = jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or(Error::JobNotFound(id))?;

        if job.status == JobStatus::Running {
            let step_index = job
                .step
                .as_deref()
                .and_then(|s| PIPELINE_STEPS.iter().position(|p| *p == s))
                .unwrap_or(0);
            if step_index + 1 < PIPELINE_STEPS.len() {
                job.step = Some(PIPELINE_STEPS[step_index + 1].into());
                job.progress = Some((step_index + 1) as f64 / PIPELINE_STEPS.len() as f64);
            } else {
                job.status = JobStatus::Completed;
                job.step = None;
                job.progress = Some(1.0);
            }
        }

        Ok(ProgressEvent {
            job_id: job.id,
            status: job.status,
            step: job.step.clone(),
            progress: job.progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_data_is_consistent() {
        let service = StaticAuditService::with_demo_data();
        let datasets = service.list_datasets().await.unwrap();
        let models = service.list_models().await.unwrap();
        let jobs = service.list_jobs().await.unwrap();
        assert!(!datasets.is_empty());
        assert!(!models.is_empty());
        // Every job references a known dataset and model
        for job in &jobs {
            assert!(datasets.iter().any(|d| d.id == job.dataset_id));
            assert!(models.iter().any(|m| m.id == job.model_id));
        }
    }

    #[tokio::test]
    async fn test_progress_walks_to_completion() {
        let service = StaticAuditService::with_demo_data();
        let job = service.list_jobs().await.unwrap().remove(0);

        let mut last_progress = 0.0;
        for _ in 0..PIPELINE_STEPS.len() + 1 {
            let event = service.next_progress(job.id).await.unwrap();
            if let Some(p) = event.progress {
                assert!(p >= last_progress);
                last_progress = p;
            }
            if event.status.is_terminal() {
                break;
            }
        }
        let done = service.job_status(job.id).await.unwrap();
        assert_eq!(done.status, JobStatus::Completed);
        assert_eq!(done.progress, Some(1.0));
    }

    #[tokio::test]
    async fn test_unknown_job_errors() {
        let service = StaticAuditService::with_demo_data();
        let err = service.job_status(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, Error::JobNotFound(_)));
    }
}
