use crate::client::{ApiError, Transport};
use crate::domain::{JobId, JobPosting, JobStatus};

/// Plain job endpoints. Use `ResilientQuery` for searches that must not fail.
#[derive(Clone)]
pub struct JobsApi {
    transport: Transport,
}

impl JobsApi {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<JobPosting>, ApiError> {
        self.transport.public().get("/jobs").await
    }

    pub async fn get(&self, id: JobId) -> Result<JobPosting, ApiError> {
        self.transport.public().get(&format!("/jobs/{id}")).await
    }

    pub async fn search_by_keyword(&self, keyword: &str) -> Result<Vec<JobPosting>, ApiError> {
        self.transport
            .public()
            .get_with_query("/jobs/search", &[("keyword", keyword)])
            .await
    }

    pub async fn search(&self, params: &serde_json::Value) -> Result<Vec<JobPosting>, ApiError> {
        self.transport.public().post("/jobs/search", params).await
    }

    pub async fn by_status(&self, status: JobStatus) -> Result<Vec<JobPosting>, ApiError> {
        self.transport
            .authenticated()
            .get(&format!("/jobs/status/{}", status.wire_label()))
            .await
    }

    pub async fn by_employer(&self, employer_id: i64) -> Result<Vec<JobPosting>, ApiError> {
        self.transport
            .authenticated()
            .get(&format!("/jobs/employers/{employer_id}"))
            .await
    }
}
