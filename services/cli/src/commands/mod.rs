pub(crate) mod applications;
pub(crate) mod auth;
pub(crate) mod employer;
pub(crate) mod jobs;

use clap::ValueEnum;
use jobboard::client::{Access, Session};
use jobboard::domain::{JobPosting, JobStatus, Role};
use jobboard::error::AppError;
use jobboard::query::{QueryOutcome, QuerySource};
use jobboard::JobBoardClient;
use tracing::debug;

pub(crate) struct Context {
    pub(crate) client: JobBoardClient,
}

impl Context {
    pub(crate) fn new(client: JobBoardClient) -> Self {
        Self { client }
    }

    /// Route guard: refuse the command before any request is sent.
    pub(crate) fn require(&self, role: Option<Role>) -> Result<Session, AppError> {
        let session = self.client.session();
        match session.authorize(role) {
            Access::Granted => Ok(session),
            denied => Err(AppError::AccessDenied(denied)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum StatusArg {
    Open,
    Closed,
    Expired,
}

impl From<StatusArg> for JobStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Open => JobStatus::Open,
            StatusArg::Closed => JobStatus::Closed,
            StatusArg::Expired => JobStatus::Expired,
        }
    }
}

/// Unwrap a query outcome, telling the user on stderr when results are degraded.
pub(crate) fn settle(outcome: QueryOutcome) -> Result<Vec<JobPosting>, AppError> {
    let tag = outcome
        .status_tag()
        .map(|tag| tag.label())
        .unwrap_or("unknown");

    match outcome.source {
        QuerySource::Server => debug!(results = outcome.jobs.len(), "served by backend"),
        QuerySource::LocalFallback => eprintln!(
            "notice: the server could not run this query ({tag}); showing locally filtered results"
        ),
        QuerySource::Unavailable => {
            eprintln!("notice: jobs are unavailable right now ({tag}); try again later")
        }
        QuerySource::LoginRequired => {
            return Err(match outcome.error {
                Some(error) => AppError::Api(error),
                None => AppError::AccessDenied(Access::LoginRequired),
            })
        }
    }

    Ok(outcome.jobs)
}
