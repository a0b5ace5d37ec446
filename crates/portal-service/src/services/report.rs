//! Maintenance report service
//!
//! Handles fault reports for arcade devices and their status lifecycle.

use tracing::{info, instrument};
use validator::Validate;

use portal_core::entities::{MaintenanceReport, ReportStatus};
use portal_core::{PortalEvent, RecordId};

use crate::dto::{ReportCounts, SubmitReportRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Maintenance report service
pub struct ReportService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReportService<'a> {
    /// Create a new ReportService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// File a new open report
    #[instrument(skip(self, request), fields(device = %request.device, room = %request.room))]
    pub async fn submit(
        &self,
        request: SubmitReportRequest,
        reported_by: &str,
    ) -> ServiceResult<MaintenanceReport> {
        request.validate()?;

        let report = MaintenanceReport::new(
            self.ctx.generate_id(),
            request.device,
            request.room,
            request.description,
            request.image,
            reported_by.to_string(),
        );
        self.ctx.report_repo().create(&report).await?;

        info!(report_id = %report.id, "Maintenance report submitted");
        self.ctx
            .publish(PortalEvent::ReportSubmitted(report.clone()));

        Ok(report)
    }

    /// Reports newest first, optionally only those in one status
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        status: Option<ReportStatus>,
    ) -> ServiceResult<Vec<MaintenanceReport>> {
        let mut reports = self.ctx.report_repo().list().await?;
        if let Some(status) = status {
            reports.retain(|r| r.status == status);
        }
        Ok(reports)
    }

    /// Move a report to `status`
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: &RecordId,
        status: ReportStatus,
    ) -> ServiceResult<MaintenanceReport> {
        let report = self.ctx.report_repo().update_status(id, status).await?;

        info!(report_id = %id, status = %status, "Report status updated");
        self.ctx.publish(PortalEvent::ReportStatusChanged {
            id: id.clone(),
            status,
        });

        Ok(report)
    }

    pub async fn counts(&self) -> ServiceResult<ReportCounts> {
        let reports = self.ctx.report_repo().list().await?;
        Ok(ReportCounts::tally(&reports))
    }
}
