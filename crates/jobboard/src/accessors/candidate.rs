use serde::Deserialize;
use tracing::{info, warn};

use crate::client::{ApiError, Transport};
use crate::domain::{
    Application, ApplicationDraft, ApplicationKey, ApplicationStatus, ApplicationStatusView,
    JobPosting, Validate,
};

/// An application together with the posting it targets, when that posting could be loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationWithJob {
    pub application: Application,
    pub job: Option<JobPosting>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StatusBody {
    View(ApplicationStatusView),
    Bare(ApplicationStatus),
}

/// Endpoints scoped to the signed-in candidate.
#[derive(Clone)]
pub struct CandidateApi {
    transport: Transport,
}

impl CandidateApi {
    pub fn new(transport: Transport) -> Self {
        Self {
            transport: transport.authenticated(),
        }
    }

    pub async fn my_applications(&self) -> Result<Vec<Application>, ApiError> {
        self.transport.get("/candidates/my-applications").await
    }

    pub async fn apply(&self, draft: &ApplicationDraft) -> Result<Application, ApiError> {
        draft.validate()?;
        let application: Application = self
            .transport
            .post(&format!("/candidates/jobs/{}/apply", draft.job_id), draft)
            .await?;
        info!(job_id = draft.job_id, "application submitted");
        Ok(application)
    }

    pub async fn get_application(&self, key: ApplicationKey) -> Result<Application, ApiError> {
        self.transport.get(&key.path()).await
    }

    pub async fn update_application(
        &self,
        key: ApplicationKey,
        draft: &ApplicationDraft,
    ) -> Result<Application, ApiError> {
        draft.validate()?;
        self.transport.put(&key.path(), draft).await
    }

    pub async fn delete_application(&self, key: ApplicationKey) -> Result<(), ApiError> {
        self.transport.delete(&key.path()).await
    }

    pub async fn application_status(
        &self,
        key: ApplicationKey,
    ) -> Result<ApplicationStatus, ApiError> {
        let body: StatusBody = self
            .transport
            .get(&format!("{}/status", key.path()))
            .await?;
        Ok(match body {
            StatusBody::View(view) => view.status,
            StatusBody::Bare(status) => status,
        })
    }

    /// Applications paired with their postings, fetched one after another.
    pub async fn applications_with_jobs(&self) -> Result<Vec<ApplicationWithJob>, ApiError> {
        let applications = self.my_applications().await?;
        let public = self.transport.public();
        let mut joined = Vec::with_capacity(applications.len());

        for application in applications {
            let job = match public
                .get::<JobPosting>(&format!("/jobs/{}", application.job_id))
                .await
            {
                Ok(job) => Some(job),
                Err(err) => {
                    warn!(job_id = application.job_id, tag = err.tag().label(), "job detail unavailable");
                    None
                }
            };
            joined.push(ApplicationWithJob { application, job });
        }

        Ok(joined)
    }
}
