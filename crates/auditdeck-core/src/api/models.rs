use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An uploaded dataset registered with the audit backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub id: Uuid,
    pub name: String,
    pub filename: String,
    pub file_format: String,
    pub size_bytes: u64,
    pub target_column: String,
    pub created_at: DateTime<Utc>,
}

/// An uploaded model registered with the audit backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEntry {
    pub id: Uuid,
    pub name: String,
    /// sklearn | xgboost | pytorch | onnx
    pub framework: String,
    /// classification | regression | other
    pub task_type: Option<String>,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle state of an audit job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Created,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    /// Whether the job has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// A full-audit job running against one dataset/model pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditJob {
    pub id: Uuid,
    pub dataset_id: Uuid,
    pub model_id: Uuid,
    pub status: JobStatus,
    /// Pipeline step currently executing, e.g. "fairness"
    pub step: Option<String>,
    /// Fraction of pipeline steps finished, in [0, 1]
    pub progress: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// One status frame from the job progress stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub job_id: Uuid,
    pub status: JobStatus,
    pub step: Option<String>,
    pub progress: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&JobStatus::Running).unwrap();
        assert_eq!(json, "\"running\"");
        let parsed: JobStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(parsed, JobStatus::Completed);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!JobStatus::Created.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }
}
