use std::collections::BTreeMap;
use std::fmt;

use chrono::{Local, NaiveDateTime};

use super::application::ApplicationDraft;
use super::auth::Registration;
use super::job::{JobDraft, JobStatus};

/// Field-level problems found before a request is dispatched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.fields {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Client-side form checks.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

fn require_text(errors: &mut ValidationErrors, field: &'static str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.add(field, format!("{label} is required"));
    }
}

impl JobDraft {
    /// Validate against an explicit clock so expiry checks are deterministic.
    pub fn validate_at(&self, now: NaiveDateTime) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        require_text(&mut errors, "jobName", &self.name, "job name");
        require_text(&mut errors, "jobType", &self.job_type, "job type");
        require_text(&mut errors, "contractType", &self.contract_type, "contract type");
        require_text(&mut errors, "level", &self.level, "level");
        require_text(&mut errors, "location", &self.location, "location");
        require_text(&mut errors, "jobDescription", &self.description, "job description");

        if self.quantity <= 0 {
            errors.add("quantity", "quantity must be greater than 0");
        }
        if self.salary_from < 0 {
            errors.add("salaryFrom", "salary cannot be negative");
        }
        if self.salary_to <= 0 {
            errors.add("salaryTo", "salary must be greater than 0");
        } else if self.salary_to < self.salary_from {
            errors.add(
                "salaryTo",
                "maximum salary must be greater than or equal to the minimum salary",
            );
        }
        if self.required_experience_years < 0 {
            errors.add("requireExpYear", "experience cannot be negative");
        }
        if self.status == JobStatus::Unknown {
            errors.add("jobStatus", "choose open, closed or expired");
        }

        let floor = self.post_date.unwrap_or(now);
        match self.expire_date {
            None => errors.add("expireDate", "expire date is required"),
            Some(expire) if expire <= floor => {
                let message = if self.post_date.is_some() {
                    "expire date must be after the post date"
                } else {
                    "expire date must be in the future"
                };
                errors.add("expireDate", message);
            }
            Some(_) => {}
        }

        errors.into_result()
    }
}

impl Validate for JobDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.validate_at(Local::now().naive_local())
    }
}

impl Validate for ApplicationDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.candidate_id <= 0 {
            errors.add("CandidateID", "candidate id must be a positive number");
        }
        if self.job_id <= 0 {
            errors.add("JobID", "a job must be selected");
        }
        if let Some(letter) = self.cover_letter.as_deref() {
            let trimmed = letter.trim();
            if !trimmed.is_empty() && trimmed.chars().count() < 10 {
                errors.add(
                    "CoverLetter",
                    "cover letter should be at least 10 characters",
                );
            }
        }
        if let Some(link) = self.cv_link.as_deref() {
            if !link.trim().is_empty() && url::Url::parse(link.trim()).is_err() {
                errors.add("UploadCV", "CV link must be a valid URL");
            }
        }

        errors.into_result()
    }
}

fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

impl Validate for Registration {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        require_text(&mut errors, "fullName", &self.full_name, "full name");
        if self.username.trim().chars().count() < 4 {
            errors.add("username", "username must be at least 4 characters");
        }
        if self.password.chars().count() < 6 {
            errors.add("password", "password must be at least 6 characters");
        }
        if self.password != self.confirm_password {
            errors.add("confirmPassword", "password confirmation does not match");
        }
        if !looks_like_email(&self.email) {
            errors.add("email", "email address is invalid");
        }

        errors.into_result()
    }
}
