use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::job::JobId;
use super::wire::optional_datetime;

/// Lifecycle of a candidate application. Transitions are driven by the employer side.
///
/// Serialized with the backend's localized labels; the screaming-snake and English
/// spellings are accepted on input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    #[serde(rename = "Đã nộp", alias = "SUBMITTED", alias = "Submitted")]
    Submitted,
    #[serde(
        rename = "Đang xem xét",
        alias = "UNDER_REVIEW",
        alias = "Under Review",
        alias = "UnderReview"
    )]
    UnderReview,
    #[serde(rename = "Đạt yêu cầu", alias = "QUALIFIED", alias = "Qualified")]
    Qualified,
    #[serde(rename = "Không đạt", alias = "REJECTED", alias = "Rejected")]
    Rejected,
    #[serde(
        rename = "Yêu cầu thông tin bổ sung",
        alias = "NEEDS_INFO",
        alias = "Needs Info",
        alias = "NeedsInfo"
    )]
    NeedsInfo,
    #[serde(rename = "Đã nhận việc", alias = "HIRED", alias = "Hired")]
    Hired,
    #[serde(rename = "Hoàn thành", alias = "COMPLETED", alias = "Completed")]
    Completed,
    #[serde(rename = "UNKNOWN", other)]
    Unknown,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::Qualified => "qualified",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::NeedsInfo => "needs_info",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Completed => "completed",
            ApplicationStatus::Unknown => "unknown",
        }
    }
}

/// Composite identity of an application: one candidate, one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApplicationKey {
    pub candidate_id: i64,
    pub job_id: JobId,
}

impl ApplicationKey {
    pub fn new(candidate_id: i64, job_id: JobId) -> Self {
        Self {
            candidate_id,
            job_id,
        }
    }

    pub(crate) fn path(&self) -> String {
        format!(
            "/candidates/applications/{}/{}",
            self.candidate_id, self.job_id
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Application {
    #[serde(rename = "CandidateID")]
    pub candidate_id: i64,
    #[serde(rename = "JobID")]
    pub job_id: JobId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    pub cover_letter: Option<String>,
    #[serde(rename = "UploadCV")]
    pub cv_link: Option<String>,
    pub status: ApplicationStatus,
    #[serde(rename = "Date", with = "optional_datetime")]
    pub submitted_date: Option<NaiveDateTime>,
}

impl Application {
    pub fn key(&self) -> ApplicationKey {
        ApplicationKey::new(self.candidate_id, self.job_id)
    }
}

/// Candidate-editable part of an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationDraft {
    #[serde(rename = "CandidateID")]
    pub candidate_id: i64,
    #[serde(rename = "JobID")]
    pub job_id: JobId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(rename = "UploadCV", default, skip_serializing_if = "Option::is_none")]
    pub cv_link: Option<String>,
}

impl ApplicationDraft {
    pub fn key(&self) -> ApplicationKey {
        ApplicationKey::new(self.candidate_id, self.job_id)
    }
}

/// Payload returned by the application status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationStatusView {
    #[serde(alias = "status")]
    pub status: ApplicationStatus,
}
