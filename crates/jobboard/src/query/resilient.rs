use serde::Serialize;
use tracing::{info, warn};

use crate::client::{ApiError, ErrorView, StatusTag, Transport};
use crate::domain::{JobId, JobPosting};

use super::criteria::{FilterCriteria, FilterPayload, SortOrder};
use super::predicate;

/// Canonical server-side filter endpoint, shared by the public and employer views.
pub const FILTER_PATH: &str = "/employers/jobs/search-by-salary-date";
pub const KEYWORD_SEARCH_PATH: &str = "/jobs/search";

/// Which listing a query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobScope {
    /// Every posting, readable without credentials.
    Public,
    /// Postings owned by the signed-in employer.
    Employer,
}

impl JobScope {
    pub const fn collection_path(self) -> &'static str {
        match self {
            JobScope::Public => "/jobs",
            JobScope::Employer => "/employers/my-jobs",
        }
    }

    fn collection_query(self) -> &'static [(&'static str, &'static str)] {
        match self {
            JobScope::Public => &[],
            JobScope::Employer => &[("includeAll", "true")],
        }
    }

    fn transport(self, base: &Transport) -> Transport {
        match self {
            JobScope::Public => base.public(),
            JobScope::Employer => base.authenticated(),
        }
    }
}

/// Where the jobs in an outcome came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuerySource {
    Server,
    LocalFallback,
    Unavailable,
    LoginRequired,
}

/// Always-resolved result of a search or filter.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub jobs: Vec<JobPosting>,
    pub source: QuerySource,
    /// The failure that forced a degraded source, if any.
    pub error: Option<ApiError>,
}

impl QueryOutcome {
    fn server(jobs: Vec<JobPosting>) -> Self {
        Self {
            jobs,
            source: QuerySource::Server,
            error: None,
        }
    }

    fn local(jobs: Vec<JobPosting>, cause: ApiError) -> Self {
        Self {
            jobs,
            source: QuerySource::LocalFallback,
            error: Some(cause),
        }
    }

    fn unavailable(cause: ApiError) -> Self {
        Self {
            jobs: Vec::new(),
            source: QuerySource::Unavailable,
            error: Some(cause),
        }
    }

    fn login_required(cause: ApiError) -> Self {
        Self {
            jobs: Vec::new(),
            source: QuerySource::LoginRequired,
            error: Some(cause),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.source != QuerySource::Server
    }

    pub fn status_tag(&self) -> Option<StatusTag> {
        self.error.as_ref().map(ApiError::tag)
    }

    pub fn error_view(&self) -> Option<ErrorView> {
        self.error.as_ref().map(ErrorView::from)
    }
}

/// Search and filter that degrade to local evaluation instead of failing.
///
/// Policy: 401/403 never trigger a fallback; the caller gets `LoginRequired`.
/// Any other failure of the primary call refetches the scope's full collection and
/// evaluates the same predicate locally. If that also fails the outcome is
/// `Unavailable` with no jobs.
#[derive(Clone)]
pub struct ResilientQuery {
    transport: Transport,
}

impl ResilientQuery {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn filter(&self, scope: JobScope, criteria: &FilterCriteria) -> QueryOutcome {
        let transport = scope.transport(&self.transport);
        let payload = criteria.server_payload();

        match transport
            .post::<_, Vec<JobPosting>>(FILTER_PATH, &payload)
            .await
        {
            Ok(jobs) => {
                let jobs = predicate::retain_matching(jobs, criteria);
                info!(?scope, results = jobs.len(), "server-side filter succeeded");
                QueryOutcome::server(jobs)
            }
            Err(err) => {
                self.degrade(scope, err, |all| predicate::apply_filter(all, criteria))
                    .await
            }
        }
    }

    /// Keyword search. A blank keyword lists the whole scope.
    pub async fn search(&self, scope: JobScope, keyword: &str) -> QueryOutcome {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.list(scope).await;
        }

        let transport = scope.transport(&self.transport);
        let primary = match scope {
            JobScope::Public => {
                transport
                    .get_with_query::<Vec<JobPosting>>(KEYWORD_SEARCH_PATH, &[("keyword", keyword)])
                    .await
            }
            JobScope::Employer => {
                transport
                    .post::<_, Vec<JobPosting>>(
                        FILTER_PATH,
                        &FilterPayload::keyword(keyword, SortOrder::Desc),
                    )
                    .await
            }
        };

        match primary {
            Ok(jobs) => {
                info!(?scope, results = jobs.len(), "server-side keyword search succeeded");
                QueryOutcome::server(jobs)
            }
            Err(err) => {
                self.degrade(scope, err, |all| {
                    predicate::apply_keyword(all, keyword, SortOrder::Desc)
                })
                .await
            }
        }
    }

    /// Unfiltered listing of a scope; no second source exists to fall back to.
    pub async fn list(&self, scope: JobScope) -> QueryOutcome {
        match self.fetch_collection(scope).await {
            Ok(jobs) => QueryOutcome::server(jobs),
            Err(err) if err.is_auth_boundary() => QueryOutcome::login_required(err),
            Err(err) => {
                warn!(?scope, tag = err.tag().label(), "job listing unavailable");
                QueryOutcome::unavailable(err)
            }
        }
    }

    /// Job detail, looked up in the public listing when the detail endpoint is down.
    pub async fn find_job(&self, id: JobId) -> Result<JobPosting, ApiError> {
        let transport = self.transport.public();
        let err = match transport.get::<JobPosting>(&format!("/jobs/{id}")).await {
            Ok(job) => return Ok(job),
            Err(err) => err,
        };

        if !matches!(
            err.tag(),
            StatusTag::ServerError | StatusTag::NetworkError | StatusTag::InvalidResponse
        ) {
            return Err(err);
        }

        info!(job_id = id, tag = err.tag().label(), "job detail failed; searching the listing");
        let all = self.fetch_collection(JobScope::Public).await?;
        all.into_iter()
            .find(|job| job.id == id)
            .ok_or_else(|| ApiError::NotFound {
                message: format!("job {id} not found"),
            })
    }

    async fn fetch_collection(&self, scope: JobScope) -> Result<Vec<JobPosting>, ApiError> {
        scope
            .transport(&self.transport)
            .get_with_query(scope.collection_path(), scope.collection_query())
            .await
    }

    async fn degrade<F>(&self, scope: JobScope, cause: ApiError, narrow: F) -> QueryOutcome
    where
        F: FnOnce(Vec<JobPosting>) -> Vec<JobPosting>,
    {
        if cause.is_auth_boundary() {
            warn!(?scope, tag = cause.tag().label(), "query needs login; not falling back");
            return QueryOutcome::login_required(cause);
        }

        info!(
            ?scope,
            tag = cause.tag().label(),
            error = %cause,
            "server-side query failed; evaluating locally"
        );

        match self.fetch_collection(scope).await {
            Ok(all) => {
                let jobs = narrow(all);
                info!(?scope, results = jobs.len(), "local fallback evaluated");
                QueryOutcome::local(jobs, cause)
            }
            Err(fallback) if fallback.is_auth_boundary() => QueryOutcome::login_required(fallback),
            Err(fallback) => {
                warn!(
                    ?scope,
                    tag = fallback.tag().label(),
                    error = %fallback,
                    "fallback listing failed; returning no results"
                );
                QueryOutcome::unavailable(fallback)
            }
        }
    }
}
