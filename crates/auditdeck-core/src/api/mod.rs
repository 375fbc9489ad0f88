pub mod models;
pub mod service;

pub use models::{AuditJob, Dataset, JobStatus, ModelEntry, ProgressEvent};
pub use service::{AuditService, StaticAuditService};
