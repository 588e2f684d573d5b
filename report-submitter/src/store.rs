use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::errors::StoreError;
use crate::models::Report;

/// Append-only report collection. `add` is fallible by contract even though
/// the in-memory implementation cannot fail; `list_all` is a snapshot in
/// insertion order.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn add(&self, report: Report) -> Result<(), StoreError>;
    async fn list_all(&self) -> Vec<Report>;
}

/// No dedup, no delete, no update. Two adds with equal content are two
/// records.
#[derive(Default)]
pub struct MemoryReportStore {
    reports: Mutex<Vec<Report>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn add(&self, report: Report) -> Result<(), StoreError> {
        self.reports.lock().await.push(report);
        Ok(())
    }

    async fn list_all(&self) -> Vec<Report> {
        self.reports.lock().await.clone()
    }
}
