//! Local implementation of ReportRepository

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

use portal_core::entities::{MaintenanceReport, ReportStatus};
use portal_core::traits::{RepoResult, ReportRepository};
use portal_core::value_objects::RecordId;

use crate::collection::JsonCollection;
use crate::keys::REPORTS_KEY;
use crate::store::KeyValueStore;

use super::error::{map_store_error, report_not_found};

/// Reports kept newest first under `pixoul_maintenance_reports`
pub struct LocalReportRepository<S: ?Sized = dyn KeyValueStore> {
    reports: JsonCollection<MaintenanceReport, S>,
}

impl<S: KeyValueStore + ?Sized> LocalReportRepository<S> {
    pub fn open(store: Arc<S>) -> RepoResult<Self> {
        Ok(Self {
            reports: JsonCollection::open(store, REPORTS_KEY).map_err(map_store_error)?,
        })
    }
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> ReportRepository for LocalReportRepository<S> {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<MaintenanceReport>> {
        Ok(self.reports.snapshot())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<MaintenanceReport>> {
        Ok(self
            .reports
            .read(|reports| reports.iter().find(|r| &r.id == id).cloned()))
    }

    #[instrument(skip(self, report), fields(report_id = %report.id, device = %report.device))]
    async fn create(&self, report: &MaintenanceReport) -> RepoResult<()> {
        self.reports.mutate(|reports| {
            reports.insert(0, report.clone());
            Ok(())
        })?;

        info!("Maintenance report stored");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        id: &RecordId,
        status: ReportStatus,
    ) -> RepoResult<MaintenanceReport> {
        let (updated, previous) = self.reports.mutate(|reports| {
            let report = reports
                .iter_mut()
                .find(|r| &r.id == id)
                .ok_or_else(|| report_not_found(id))?;
            let previous = report.set_status(status);
            Ok((report.clone(), previous))
        })?;

        info!(from = %previous, to = %status, "Report status changed");
        Ok(updated)
    }
}
