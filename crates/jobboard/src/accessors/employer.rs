use tracing::info;

use crate::client::{ApiError, Transport};
use crate::domain::{JobDraft, JobId, JobPosting, JobStats, JobStatus, StatsSummary, Validate};

const MY_JOBS: &str = "/employers/my-jobs";

/// Endpoints scoped to the signed-in employer. Every call carries the bearer token.
#[derive(Clone)]
pub struct EmployerApi {
    transport: Transport,
}

impl EmployerApi {
    pub fn new(transport: Transport) -> Self {
        Self {
            transport: transport.authenticated(),
        }
    }

    pub async fn my_jobs(&self) -> Result<Vec<JobPosting>, ApiError> {
        self.transport
            .get_with_query(MY_JOBS, &[("includeAll", "true")])
            .await
    }

    pub async fn my_jobs_by_status(&self, status: JobStatus) -> Result<Vec<JobPosting>, ApiError> {
        self.transport
            .get(&format!("{MY_JOBS}/status/{}", status.wire_label()))
            .await
    }

    pub async fn create_job(&self, draft: &JobDraft) -> Result<JobPosting, ApiError> {
        draft.validate()?;
        let created: JobPosting = self.transport.post(MY_JOBS, draft).await?;
        info!(job_id = created.id, "job created");
        Ok(created)
    }

    pub async fn update_job(&self, id: JobId, draft: &JobDraft) -> Result<JobPosting, ApiError> {
        draft.validate()?;
        self.transport.put(&format!("{MY_JOBS}/{id}"), draft).await
    }

    pub async fn delete_job(&self, id: JobId) -> Result<(), ApiError> {
        self.transport.delete(&format!("{MY_JOBS}/{id}")).await?;
        info!(job_id = id, "job deleted");
        Ok(())
    }

    pub async fn stats(&self) -> Result<Vec<JobStats>, ApiError> {
        self.transport.get(&format!("{MY_JOBS}/stats")).await
    }

    pub async fn stats_summary(&self) -> Result<(Vec<JobStats>, StatsSummary), ApiError> {
        let stats = self.stats().await?;
        let summary = StatsSummary::from_stats(&stats);
        Ok((stats, summary))
    }
}
