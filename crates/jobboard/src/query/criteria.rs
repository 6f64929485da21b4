use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::JobStatus;

/// Lower-bound sentinel the filter endpoint reads as "no minimum".
pub const SALARY_FLOOR: i64 = 0;
/// Upper-bound sentinel the filter endpoint reads as "no maximum".
pub const SALARY_CEILING: i64 = 99_999_999_999_999;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Optional constraints applied to a job listing. Absent means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub salary_from: Option<i64>,
    pub salary_to: Option<i64>,
    pub posted_after: Option<NaiveDate>,
    pub category: Option<String>,
    pub status_only: Option<JobStatus>,
    pub sort_order: SortOrder,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn salary_from(mut self, value: i64) -> Self {
        self.salary_from = Some(value);
        self
    }

    pub fn salary_to(mut self, value: i64) -> Self {
        self.salary_to = Some(value);
        self
    }

    pub fn posted_after(mut self, date: NaiveDate) -> Self {
        self.posted_after = Some(date);
        self
    }

    pub fn category(mut self, name: impl Into<String>) -> Self {
        self.category = Some(name.into());
        self
    }

    pub fn status_only(mut self, status: JobStatus) -> Self {
        self.status_only = Some(status);
        self
    }

    pub fn sort(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    /// A non-positive bound carries no constraint.
    pub fn min_salary(&self) -> Option<i64> {
        self.salary_from.filter(|value| *value > 0)
    }

    pub fn max_salary(&self) -> Option<i64> {
        self.salary_to.filter(|value| *value > 0)
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn is_unconstrained(&self) -> bool {
        self.min_salary().is_none()
            && self.max_salary().is_none()
            && self.posted_after.is_none()
            && self.category_name().is_none()
            && self.status_only.is_none()
    }

    /// Body for the salary/date filter endpoint, with numbers sent as strings.
    pub fn server_payload(&self) -> FilterPayload {
        FilterPayload {
            action: FilterAction::Get,
            sort_order: self.sort_order,
            salary_from: Some(self.min_salary().unwrap_or(SALARY_FLOOR).to_string()),
            salary_to: Some(self.max_salary().unwrap_or(SALARY_CEILING).to_string()),
            jc_name: self.category_name().unwrap_or_default().to_string(),
            post_date: self
                .posted_after
                .map(|date| format!("{}T00:00:00.000Z", date.format("%Y-%m-%d"))),
            filter: Some(if self.status_only.is_some() { "1" } else { "0" }),
            job_status: self.status_only.map(JobStatus::wire_label),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterAction {
    Get,
    Search,
}

/// Wire body of `POST /employers/jobs/search-by-salary-date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPayload {
    pub action: FilterAction,
    pub sort_order: SortOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_to: Option<String>,
    pub jc_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_status: Option<&'static str>,
}

impl FilterPayload {
    /// Keyword variant used by the employer-scoped search.
    pub fn keyword(keyword: &str, sort_order: SortOrder) -> Self {
        Self {
            action: FilterAction::Search,
            sort_order,
            salary_from: None,
            salary_to: None,
            jc_name: keyword.trim().to_string(),
            post_date: None,
            filter: None,
            job_status: None,
        }
    }
}
