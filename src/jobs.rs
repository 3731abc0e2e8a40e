use crate::errors::{AppError, AppResult};
use crate::handshake::Handshake;
use crate::models::{DiscoveryResult, ListKind};
use crate::session::Transport;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Mutex;
use time::OffsetDateTime;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Running,
    Complete,
    Error,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Complete => "COMPLETE",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub status: JobStatus,
    pub updated: OffsetDateTime,
}

/// Keyed job-status records, written by the import jobs.
pub trait JobStatusStore {
    /// Sets `status` and stamps `updated` on the record named `job_name`.
    ///
    /// Returns `false` when no such record exists; nothing is written in that case.
    fn update_status(&self, job_name: &str, status: JobStatus) -> bool;
}

/// Process-local [`JobStatusStore`] that also remembers every update in order.
#[derive(Debug, Default)]
pub struct InMemoryJobStore {
    inner: Mutex<JobTable>,
}

#[derive(Debug, Default)]
struct JobTable {
    records: BTreeMap<String, JobRecord>,
    history: Vec<(String, JobStatus)>,
}

impl InMemoryJobStore {
    /// Creates a store holding one `COMPLETE` record per job name.
    pub fn with_jobs<'a>(job_names: impl IntoIterator<Item = &'a str>) -> Self {
        let now = OffsetDateTime::now_utc();
        let records = job_names
            .into_iter()
            .map(|name| {
                (
                    name.to_string(),
                    JobRecord {
                        status: JobStatus::Complete,
                        updated: now,
                    },
                )
            })
            .collect();
        Self {
            inner: Mutex::new(JobTable {
                records,
                history: Vec::new(),
            }),
        }
    }

    pub fn get(&self, job_name: &str) -> Option<JobRecord> {
        self.lock().records.get(job_name).cloned()
    }

    /// Every applied update, oldest first.
    pub fn history(&self) -> Vec<(String, JobStatus)> {
        self.lock().history.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, JobTable> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl JobStatusStore for InMemoryJobStore {
    fn update_status(&self, job_name: &str, status: JobStatus) -> bool {
        let mut table = self.lock();
        let Some(record) = table.records.get_mut(job_name) else {
            return false;
        };
        record.status = status;
        record.updated = OffsetDateTime::now_utc();
        table.history.push((job_name.to_string(), status));
        true
    }
}

/// One discovery run recorded against a job-status record.
///
/// The job is marked `RUNNING` before the handshake and `ERROR` once on any failure,
/// including a listing that has none of the files this kind of job needs. On success
/// the status is left for the caller to complete after the files are consumed.
pub struct DiscoveryJob<'a, S: JobStatusStore> {
    store: &'a S,
    job_name: String,
    kind: ListKind,
}

impl<'a, S: JobStatusStore> DiscoveryJob<'a, S> {
    pub fn new(store: &'a S, job_name: impl Into<String>, kind: ListKind) -> Self {
        Self {
            store,
            job_name: job_name.into(),
            kind,
        }
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub async fn run<T: Transport>(&self, handshake: Handshake<T>) -> AppResult<DiscoveryResult> {
        self.mark(JobStatus::Running);

        let outcome = match handshake.discover_files(self.kind).await {
            Ok(result) if self.kind.files(&result).is_empty() => Err(AppError::NoFilesFound {
                listing: self.kind.display_name().to_string(),
            }),
            Ok(result) => Ok(result),
            Err(e) => Err(AppError::from(e)),
        };

        if let Err(e) = &outcome {
            error!(job_name = %self.job_name, error = %e, "Discovery failed");
            self.mark(JobStatus::Error);
        }
        outcome
    }

    /// Marks the job `COMPLETE`.
    pub fn complete(&self) {
        self.mark(JobStatus::Complete);
    }

    fn mark(&self, status: JobStatus) {
        if self.store.update_status(&self.job_name, status) {
            info!(job_name = %self.job_name, status = %status, "Job status updated");
        } else {
            warn!(job_name = %self.job_name, status = %status, "No job record to update");
        }
    }
}
