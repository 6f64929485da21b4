//! In-process job board backend for integration tests.
//!
//! Each test spawns its own server on an ephemeral port. Endpoints can be forced to fail
//! with a given status so the degraded paths of the client can be exercised end to end.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Path, Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};

use jobboard::client::{LoginRedirect, MemorySessionStore, Session};
use jobboard::config::ApiConfig;
use jobboard::domain::{
    Application, ApplicationDraft, ApplicationStatus, JobDraft, JobPosting, JobStats, JobStatus,
    Role,
};
use jobboard::JobBoardClient;

pub const EMPLOYER_ID: i64 = 7;
pub const PROFILE_ID: i64 = 42;
pub const PASSWORD: &str = "secret1";

#[derive(Default)]
pub struct Backend {
    pub jobs: Vec<JobPosting>,
    pub applications: Vec<Application>,
    pub stats: Vec<JobStats>,
    failures: HashMap<&'static str, u16>,
    hits: HashMap<&'static str, usize>,
    last_filter: Option<Value>,
    last_authorization: Option<String>,
}

impl Backend {
    pub fn with_jobs(jobs: Vec<JobPosting>) -> Self {
        Self {
            jobs,
            ..Self::default()
        }
    }

    pub fn fail(mut self, endpoint: &'static str, status: u16) -> Self {
        self.failures.insert(endpoint, status);
        self
    }
}

type Shared = Arc<Mutex<Backend>>;

fn lock(state: &Shared) -> MutexGuard<'_, Backend> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn posted(year: i32, month: u32, day: u32) -> Option<chrono::NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day).and_then(|date| date.and_hms_opt(8, 0, 0))
}

fn job(id: i64, name: &str, job_type: &str, salary: (i64, i64)) -> JobPosting {
    JobPosting {
        id,
        name: name.to_string(),
        job_type: job_type.to_string(),
        contract_type: "Full-time".to_string(),
        level: "Mid".to_string(),
        quantity: 1,
        salary_from: salary.0,
        salary_to: salary.1,
        required_experience_years: 2,
        location: "Ha Noi".to_string(),
        description: "Ship features with the product team".to_string(),
        employer_id: Some(EMPLOYER_ID),
        ..JobPosting::default()
    }
}

/// Five postings; 1-3 belong to `EMPLOYER_ID`, 4-5 to another employer.
pub fn fixture_jobs() -> Vec<JobPosting> {
    let mut jobs = vec![
        job(1, "Junior Rust Developer", "IT", (5_000_000, 8_000_000)),
        job(2, "QA Engineer", "IT", (9_000_000, 15_000_000)),
        job(3, "Senior Rust Engineer", "IT", (12_000_000, 18_000_000)),
        job(4, "Marketing Lead", "Marketing", (20_000_000, 25_000_000)),
        job(5, "Data Analyst", "IT", (18_000_000, 22_000_000)),
    ];
    jobs[0].post_date = posted(2025, 1, 10);
    jobs[1].post_date = posted(2025, 2, 15);
    jobs[2].post_date = posted(2025, 3, 1);
    jobs[3].post_date = posted(2025, 3, 20);
    jobs[3].employer_id = Some(8);
    jobs[4].status = JobStatus::Closed;
    jobs[4].employer_id = Some(8);
    jobs
}

/// The five fixture postings plus an expired one and one with a label the client has
/// never seen.
pub fn mixed_status_jobs() -> Vec<JobPosting> {
    let mut jobs = fixture_jobs();
    let mut expired = job(6, "Rust Intern", "IT", (11_000_000, 14_000_000));
    expired.status = JobStatus::Expired;
    expired.post_date = posted(2024, 12, 1);
    let mut paused = job(7, "Site Reliability Engineer", "IT", (13_000_000, 19_000_000));
    paused.status = JobStatus::Unknown;
    paused.post_date = posted(2025, 4, 2);
    jobs.extend([expired, paused]);
    jobs
}

/// Status labels as the backend stores them.
pub fn backend_job_label(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Open => "Đang mở",
        JobStatus::Closed => "Đã đóng",
        JobStatus::Expired => "Đã hết hạn",
        JobStatus::Unknown => "Tạm dừng",
    }
}

pub fn backend_application_label(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Submitted => "Đã nộp",
        ApplicationStatus::UnderReview => "Đang xem xét",
        ApplicationStatus::Qualified => "Đạt yêu cầu",
        ApplicationStatus::Rejected => "Không đạt",
        ApplicationStatus::NeedsInfo => "Yêu cầu thông tin bổ sung",
        ApplicationStatus::Hired => "Đã nhận việc",
        ApplicationStatus::Completed => "Hoàn thành",
        ApplicationStatus::Unknown => "Đang chờ",
    }
}

fn emit_job(job: &JobPosting) -> Value {
    let mut value = serde_json::to_value(job).expect("job serializes");
    value["jobStatus"] = json!(backend_job_label(job.status));
    value
}

fn emit_jobs<'a>(jobs: impl IntoIterator<Item = &'a JobPosting>) -> Value {
    Value::Array(jobs.into_iter().map(emit_job).collect())
}

fn emit_application(application: &Application) -> Value {
    let mut value = serde_json::to_value(application).expect("application serializes");
    value["Status"] = json!(backend_application_label(application.status));
    value
}

/// Drafts must carry one of the stored labels; anything else is rejected like the
/// backend's status check does.
fn accept_draft(body: Value) -> Result<JobDraft, Response> {
    let known = [JobStatus::Open, JobStatus::Closed, JobStatus::Expired]
        .into_iter()
        .any(|status| body["jobStatus"] == backend_job_label(status));
    if !known {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": format!("invalid jobStatus {}", body["jobStatus"]) })),
        )
            .into_response());
    }
    serde_json::from_value(body).map_err(|err| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": err.to_string() })),
        )
            .into_response()
    })
}

pub struct MockServer {
    pub base_url: String,
    state: Shared,
}

impl MockServer {
    pub fn hits(&self, endpoint: &str) -> usize {
        lock(&self.state).hits.get(endpoint).copied().unwrap_or(0)
    }

    pub fn last_filter(&self) -> Option<Value> {
        lock(&self.state).last_filter.clone()
    }

    pub fn last_authorization(&self) -> Option<String> {
        lock(&self.state).last_authorization.clone()
    }

    pub fn set_failure(&self, endpoint: &'static str, status: u16) {
        lock(&self.state).failures.insert(endpoint, status);
    }

    pub fn clear_failures(&self) {
        lock(&self.state).failures.clear();
    }
}

pub async fn spawn(backend: Backend) -> MockServer {
    let state: Shared = Arc::new(Mutex::new(backend));
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/jobs", get(list_jobs))
        .route("/jobs/search", get(keyword_search))
        .route("/jobs/:id", get(job_detail))
        .route("/jobs/status/:status", get(jobs_by_status))
        .route("/employers/jobs/search-by-salary-date", post(filter_jobs))
        .route("/employers/my-jobs", get(my_jobs).post(create_job))
        .route("/employers/my-jobs/stats", get(stats))
        .route("/employers/my-jobs/status/:status", get(my_jobs_by_status))
        .route("/employers/my-jobs/:id", axum::routing::put(update_job).delete(delete_job))
        .route("/candidates/my-applications", get(my_applications))
        .route("/candidates/jobs/:id/apply", post(apply))
        .route(
            "/candidates/applications/:candidate/:job",
            get(application_detail)
                .put(update_application)
                .delete(delete_application),
        )
        .route(
            "/candidates/applications/:candidate/:job/status",
            get(application_status),
        )
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend runs");
    });

    MockServer {
        base_url: format!("http://{addr}"),
        state,
    }
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind scratch listener");
    let addr = listener.local_addr().expect("scratch address");
    drop(listener);
    format!("http://{addr}")
}

#[derive(Default)]
pub struct RecordingRedirect {
    paths: Mutex<Vec<String>>,
}

impl RecordingRedirect {
    pub fn paths(&self) -> Vec<String> {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LoginRedirect for RecordingRedirect {
    fn redirect_to_login(&self, login_path: &str) {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(login_path.to_string());
    }
}

pub struct Harness {
    pub client: JobBoardClient,
    pub session: Arc<MemorySessionStore>,
    pub redirect: Arc<RecordingRedirect>,
}

pub fn client_for(base_url: &str, session: Session) -> Harness {
    let config = ApiConfig::with_base_url(base_url).expect("valid base url");
    let store = Arc::new(MemorySessionStore::with_session(session));
    let redirect = Arc::new(RecordingRedirect::default());
    let client = JobBoardClient::new(&config, store.clone(), redirect.clone())
        .expect("client builds");
    Harness {
        client,
        session: store,
        redirect,
    }
}

pub fn signed_in(role: Role, token: &str) -> Session {
    Session {
        auth_token: Some(token.to_string()),
        refresh_token: None,
        role: Some(role),
        profile_id: Some(PROFILE_ID),
    }
}

fn failure(status: u16) -> Response {
    let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (code, Json(json!({ "message": format!("forced failure {status}") }))).into_response()
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
}

/// Count the hit, remember the credential, and return the forced failure if one is set.
fn enter(state: &Shared, endpoint: &'static str, headers: &HeaderMap) -> Option<Response> {
    let mut backend = lock(state);
    *backend.hits.entry(endpoint).or_default() += 1;
    backend.last_authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    backend.failures.get(endpoint).copied().map(failure)
}

fn require_bearer(headers: &HeaderMap) -> Option<Response> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("Bearer "));
    if bearer {
        None
    } else {
        Some(
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "missing token" })),
            )
                .into_response(),
        )
    }
}

async fn login(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Some(response) = enter(&state, "login", &headers) {
        return response;
    }
    if body["password"] != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
            .into_response();
    }
    let username = body["username"].as_str().unwrap_or_default();
    Json(json!({
        "accessToken": format!("token-{username}"),
        "refreshToken": "refresh-token",
        "typeId": PROFILE_ID,
    }))
    .into_response()
}

async fn register(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Some(response) = enter(&state, "register", &headers) {
        return response;
    }
    (
        StatusCode::CREATED,
        Json(json!({ "message": "registered", "username": body["username"] })),
    )
        .into_response()
}

async fn list_jobs(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Some(response) = enter(&state, "list_jobs", &headers) {
        return response;
    }
    let jobs = emit_jobs(&lock(&state).jobs);
    Json(jobs).into_response()
}

async fn jobs_by_status(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(status): Path<String>,
) -> Response {
    if let Some(response) = enter(&state, "jobs_by_status", &headers) {
        return response;
    }
    let backend = lock(&state);
    let found = emit_jobs(
        backend
            .jobs
            .iter()
            .filter(|job| backend_job_label(job.status) == status),
    );
    Json(found).into_response()
}

async fn keyword_search(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(response) = enter(&state, "keyword_search", &headers) {
        return response;
    }
    let keyword = params
        .get("keyword")
        .map(|value| value.to_lowercase())
        .unwrap_or_default();
    let backend = lock(&state);
    let found = emit_jobs(
        backend
            .jobs
            .iter()
            .filter(|job| job.name.to_lowercase().contains(&keyword)),
    );
    Json(found).into_response()
}

async fn job_detail(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if let Some(response) = enter(&state, "job_detail", &headers) {
        return response;
    }
    let found = lock(&state).jobs.iter().find(|job| job.id == id).cloned();
    match found {
        Some(job) => Json(json!({ "data": emit_job(&job) })).into_response(),
        None => not_found("Job not found"),
    }
}

async fn filter_jobs(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    if let Some(response) = enter(&state, "filter", &headers) {
        return response;
    }
    let jobs = {
        let mut backend = lock(&state);
        backend.last_filter = Some(payload.clone());
        backend.jobs.clone()
    };

    if payload["action"] == "search" {
        let keyword = payload["jcName"].as_str().unwrap_or_default().to_lowercase();
        let found = emit_jobs(
            jobs.iter()
                .filter(|job| job.name.to_lowercase().contains(&keyword)),
        );
        return Json(json!({ "data": found })).into_response();
    }

    // The stored procedure only accepts string bounds.
    let (Some(from), Some(to)) = (payload["salaryFrom"].as_str(), payload["salaryTo"].as_str()) else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "salary bounds must be strings" })),
        )
            .into_response();
    };
    let (Ok(from), Ok(to)) = (from.parse::<i64>(), to.parse::<i64>()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "salary bounds must be numeric" })),
        )
            .into_response();
    };
    let category = payload["jcName"].as_str().unwrap_or_default().to_string();
    let posted_after = payload["postDate"]
        .as_str()
        .and_then(|raw| raw.get(..10))
        .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());
    // The procedure matches the stored label verbatim.
    let wanted_status = if payload["filter"] == "1" {
        match payload["jobStatus"].as_str() {
            Some(label) => Some(label.to_string()),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "jobStatus is required when filter is set" })),
                )
                    .into_response()
            }
        }
    } else {
        None
    };

    let mut found: Vec<JobPosting> = jobs
        .into_iter()
        .filter(|job| {
            job.salary_from >= from
                && job.salary_to <= to
                && (category.is_empty() || job.job_type == category)
                && posted_after.map_or(true, |floor| {
                    job.post_date.is_some_and(|posted| posted.date() >= floor)
                })
                && wanted_status
                    .as_deref()
                    .map_or(true, |label| backend_job_label(job.status) == label)
        })
        .collect();
    found.sort_by_key(|job| std::cmp::Reverse(job.post_date));
    Json(json!({ "data": emit_jobs(&found) })).into_response()
}

async fn my_jobs(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Some(response) = enter(&state, "my_jobs", &headers) {
        return response;
    }
    if let Some(response) = require_bearer(&headers) {
        return response;
    }
    let backend = lock(&state);
    let jobs = emit_jobs(
        backend
            .jobs
            .iter()
            .filter(|job| job.employer_id == Some(EMPLOYER_ID)),
    );
    Json(json!({ "data": jobs })).into_response()
}

async fn my_jobs_by_status(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(status): Path<String>,
) -> Response {
    if let Some(response) = enter(&state, "my_jobs_by_status", &headers) {
        return response;
    }
    if let Some(response) = require_bearer(&headers) {
        return response;
    }
    let backend = lock(&state);
    let jobs = emit_jobs(backend.jobs.iter().filter(|job| {
        job.employer_id == Some(EMPLOYER_ID) && backend_job_label(job.status) == status
    }));
    Json(json!({ "data": jobs })).into_response()
}

fn apply_draft(job: &mut JobPosting, draft: JobDraft) {
    job.name = draft.name;
    job.job_type = draft.job_type;
    job.contract_type = draft.contract_type;
    job.level = draft.level;
    job.quantity = u32::try_from(draft.quantity).unwrap_or(0);
    job.salary_from = draft.salary_from;
    job.salary_to = draft.salary_to;
    job.required_experience_years = draft.required_experience_years;
    job.location = draft.location;
    job.description = draft.description;
    job.post_date = draft.post_date.or(job.post_date);
    job.expire_date = draft.expire_date;
    job.status = draft.status;
}

async fn create_job(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(response) = enter(&state, "create_job", &headers) {
        return response;
    }
    if let Some(response) = require_bearer(&headers) {
        return response;
    }
    let draft = match accept_draft(body) {
        Ok(draft) => draft,
        Err(response) => return response,
    };
    let mut backend = lock(&state);
    let id = backend.jobs.iter().map(|job| job.id).max().unwrap_or(0) + 1;
    let mut job = JobPosting {
        id,
        employer_id: Some(EMPLOYER_ID),
        post_date: posted(2025, 5, 1),
        ..JobPosting::default()
    };
    apply_draft(&mut job, draft);
    backend.jobs.push(job.clone());
    (
        StatusCode::CREATED,
        Json(json!({ "data": emit_job(&job), "message": "created" })),
    )
        .into_response()
}

async fn update_job(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if let Some(response) = enter(&state, "update_job", &headers) {
        return response;
    }
    let draft = match accept_draft(body) {
        Ok(draft) => draft,
        Err(response) => return response,
    };
    let mut backend = lock(&state);
    match backend.jobs.iter_mut().find(|job| job.id == id) {
        Some(job) => {
            apply_draft(job, draft);
            Json(json!({ "data": emit_job(job) })).into_response()
        }
        None => not_found("Job not found"),
    }
}

async fn delete_job(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if let Some(response) = enter(&state, "delete_job", &headers) {
        return response;
    }
    let mut backend = lock(&state);
    let before = backend.jobs.len();
    backend.jobs.retain(|job| job.id != id);
    if backend.jobs.len() == before {
        return not_found("Job not found");
    }
    Json(json!({ "message": "deleted" })).into_response()
}

async fn stats(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Some(response) = enter(&state, "stats", &headers) {
        return response;
    }
    let stats = lock(&state).stats.clone();
    Json(json!({ "data": stats })).into_response()
}

async fn my_applications(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Some(response) = enter(&state, "my_applications", &headers) {
        return response;
    }
    if let Some(response) = require_bearer(&headers) {
        return response;
    }
    let applications: Vec<Value> = lock(&state)
        .applications
        .iter()
        .map(emit_application)
        .collect();
    Json(applications).into_response()
}

async fn apply(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(job_id): Path<i64>,
    Json(draft): Json<ApplicationDraft>,
) -> Response {
    if let Some(response) = enter(&state, "apply", &headers) {
        return response;
    }
    let mut backend = lock(&state);
    let job_name = backend
        .jobs
        .iter()
        .find(|job| job.id == job_id)
        .map(|job| job.name.clone());
    let application = Application {
        candidate_id: draft.candidate_id,
        job_id,
        job_name,
        cover_letter: draft.cover_letter,
        cv_link: draft.cv_link,
        status: ApplicationStatus::Submitted,
        submitted_date: posted(2025, 5, 2),
    };
    backend.applications.push(application.clone());
    (
        StatusCode::CREATED,
        Json(json!({ "data": emit_application(&application) })),
    )
        .into_response()
}

async fn application_detail(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((candidate, job)): Path<(i64, i64)>,
) -> Response {
    if let Some(response) = enter(&state, "application", &headers) {
        return response;
    }
    let found = lock(&state)
        .applications
        .iter()
        .find(|app| app.candidate_id == candidate && app.job_id == job)
        .cloned();
    match found {
        Some(application) => Json(emit_application(&application)).into_response(),
        None => not_found("Application not found"),
    }
}

async fn update_application(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((candidate, job)): Path<(i64, i64)>,
    Json(draft): Json<ApplicationDraft>,
) -> Response {
    if let Some(response) = enter(&state, "update_application", &headers) {
        return response;
    }
    let mut backend = lock(&state);
    match backend
        .applications
        .iter_mut()
        .find(|app| app.candidate_id == candidate && app.job_id == job)
    {
        Some(application) => {
            application.cover_letter = draft.cover_letter;
            application.cv_link = draft.cv_link;
            Json(json!({ "data": emit_application(application) })).into_response()
        }
        None => not_found("Application not found"),
    }
}

async fn delete_application(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((candidate, job)): Path<(i64, i64)>,
) -> Response {
    if let Some(response) = enter(&state, "delete_application", &headers) {
        return response;
    }
    lock(&state)
        .applications
        .retain(|app| !(app.candidate_id == candidate && app.job_id == job));
    StatusCode::NO_CONTENT.into_response()
}

async fn application_status(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((candidate, job)): Path<(i64, i64)>,
) -> Response {
    if let Some(response) = enter(&state, "application_status", &headers) {
        return response;
    }
    let found = lock(&state)
        .applications
        .iter()
        .find(|app| app.candidate_id == candidate && app.job_id == job)
        .map(|app| app.status);
    match found {
        Some(status) => {
            Json(json!({ "Status": backend_application_label(status) })).into_response()
        }
        None => not_found("Application not found"),
    }
}

pub fn stats_fixture() -> Vec<JobStats> {
    vec![
        JobStats {
            job_id: Some(1),
            job_name: "Junior Rust Developer".to_string(),
            accepted: 2,
            rejected: 1,
            pending: 3,
        },
        JobStats {
            job_id: Some(2),
            job_name: "QA Engineer".to_string(),
            accepted: 0,
            rejected: 4,
            pending: 0,
        },
    ]
}
