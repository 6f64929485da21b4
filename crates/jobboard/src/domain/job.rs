use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::wire::optional_datetime;

/// Identifier of a job posting as assigned by the backend.
pub type JobId = i64;

/// Publication state of a posting.
///
/// The backend speaks the localized labels; the English spellings and the legacy
/// `ACTIVE` are accepted on input. Labels nobody knows decode as `Unknown` so one odd
/// record cannot sink a whole listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    #[default]
    #[serde(
        rename = "Đang mở",
        alias = "OPEN",
        alias = "Open",
        alias = "open",
        alias = "ACTIVE"
    )]
    Open,
    #[serde(rename = "Đã đóng", alias = "CLOSED", alias = "Closed", alias = "closed")]
    Closed,
    #[serde(
        rename = "Đã hết hạn",
        alias = "EXPIRED",
        alias = "Expired",
        alias = "expired"
    )]
    Expired,
    #[serde(rename = "UNKNOWN", other)]
    Unknown,
}

impl JobStatus {
    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            JobStatus::Open => "OPEN",
            JobStatus::Closed => "CLOSED",
            JobStatus::Expired => "EXPIRED",
            JobStatus::Unknown => "UNKNOWN",
        }
    }

    /// Label the backend stores and filters on.
    pub const fn wire_label(self) -> &'static str {
        match self {
            JobStatus::Open => "Đang mở",
            JobStatus::Closed => "Đã đóng",
            JobStatus::Expired => "Đã hết hạn",
            JobStatus::Unknown => "UNKNOWN",
        }
    }
}

/// A job posting as exchanged with the remote service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPosting {
    #[serde(alias = "jobId", alias = "JobID")]
    pub id: JobId,
    #[serde(rename = "jobName")]
    pub name: String,
    #[serde(rename = "jobType")]
    pub job_type: String,
    pub contract_type: String,
    pub level: String,
    pub quantity: u32,
    pub salary_from: i64,
    pub salary_to: i64,
    #[serde(rename = "requireExpYear")]
    pub required_experience_years: i32,
    pub location: String,
    #[serde(rename = "jobDescription")]
    pub description: String,
    #[serde(with = "optional_datetime")]
    pub post_date: Option<NaiveDateTime>,
    #[serde(with = "optional_datetime")]
    pub expire_date: Option<NaiveDateTime>,
    #[serde(rename = "jobStatus")]
    pub status: JobStatus,
    pub employer_id: Option<i64>,
}

/// Editable fields of a posting, submitted on create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    #[serde(rename = "jobName")]
    pub name: String,
    #[serde(rename = "jobType")]
    pub job_type: String,
    pub contract_type: String,
    pub level: String,
    pub quantity: i32,
    pub salary_from: i64,
    pub salary_to: i64,
    #[serde(rename = "requireExpYear")]
    pub required_experience_years: i32,
    pub location: String,
    #[serde(rename = "jobDescription")]
    pub description: String,
    #[serde(
        with = "optional_datetime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub post_date: Option<NaiveDateTime>,
    #[serde(with = "optional_datetime", default)]
    pub expire_date: Option<NaiveDateTime>,
    #[serde(rename = "jobStatus")]
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer_id: Option<i64>,
}

impl From<&JobPosting> for JobDraft {
    fn from(job: &JobPosting) -> Self {
        Self {
            name: job.name.clone(),
            job_type: job.job_type.clone(),
            contract_type: job.contract_type.clone(),
            level: job.level.clone(),
            quantity: i32::try_from(job.quantity).unwrap_or(i32::MAX),
            salary_from: job.salary_from,
            salary_to: job.salary_to,
            required_experience_years: job.required_experience_years,
            location: job.location.clone(),
            description: job.description.clone(),
            post_date: job.post_date,
            expire_date: job.expire_date,
            status: job.status,
            employer_id: job.employer_id,
        }
    }
}
