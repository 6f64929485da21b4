//! Pure predicates shared by the server path and the local fallback path.

use std::cmp::Ordering;

use crate::domain::JobPosting;

use super::criteria::{FilterCriteria, SortOrder};

/// Salary containment, exact category, post-date floor, and status.
pub fn matches_criteria(job: &JobPosting, criteria: &FilterCriteria) -> bool {
    if let Some(min) = criteria.min_salary() {
        if job.salary_from < min {
            return false;
        }
    }
    if let Some(max) = criteria.max_salary() {
        if job.salary_to > max {
            return false;
        }
    }
    if let Some(category) = criteria.category_name() {
        if job.job_type != category {
            return false;
        }
    }
    if let Some(floor) = criteria.posted_after {
        match job.post_date {
            Some(posted) if posted.date() >= floor => {}
            _ => return false,
        }
    }
    if let Some(status) = criteria.status_only {
        if job.status != status {
            return false;
        }
    }
    true
}

/// Case-insensitive substring match over the descriptive text fields.
pub fn matches_keyword(job: &JobPosting, keyword: &str) -> bool {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [
        &job.name,
        &job.description,
        &job.level,
        &job.contract_type,
        &job.location,
        &job.job_type,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Jobs without a post date always sort last.
pub fn sort_by_post_date(jobs: &mut [JobPosting], order: SortOrder) {
    jobs.sort_by(|a, b| match (a.post_date, b.post_date) {
        (Some(left), Some(right)) => match order {
            SortOrder::Asc => left.cmp(&right),
            SortOrder::Desc => right.cmp(&left),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Filter then order a full collection the way the server would.
pub fn apply_filter(jobs: Vec<JobPosting>, criteria: &FilterCriteria) -> Vec<JobPosting> {
    let mut matched = retain_matching(jobs, criteria);
    sort_by_post_date(&mut matched, criteria.sort_order);
    matched
}

pub fn apply_keyword(jobs: Vec<JobPosting>, keyword: &str, order: SortOrder) -> Vec<JobPosting> {
    let mut matched: Vec<JobPosting> = jobs
        .into_iter()
        .filter(|job| matches_keyword(job, keyword))
        .collect();
    sort_by_post_date(&mut matched, order);
    matched
}

pub(crate) fn retain_matching(jobs: Vec<JobPosting>, criteria: &FilterCriteria) -> Vec<JobPosting> {
    jobs.into_iter()
        .filter(|job| matches_criteria(job, criteria))
        .collect()
}
