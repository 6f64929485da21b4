use std::io;

use chrono::NaiveDateTime;
use clap::ValueEnum;
use jobboard::accessors::ApplicationWithJob;
use jobboard::client::Session;
use jobboard::domain::{Application, JobPosting, JobStats, StatsSummary};
use jobboard::error::AppError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Serialize)]
struct JobRow<'a> {
    id: i64,
    name: &'a str,
    category: &'a str,
    level: &'a str,
    location: &'a str,
    salary_from: i64,
    salary_to: i64,
    posted: String,
    expires: String,
    status: &'static str,
}

impl<'a> From<&'a JobPosting> for JobRow<'a> {
    fn from(job: &'a JobPosting) -> Self {
        Self {
            id: job.id,
            name: &job.name,
            category: &job.job_type,
            level: &job.level,
            location: &job.location,
            salary_from: job.salary_from,
            salary_to: job.salary_to,
            posted: day(job.post_date),
            expires: day(job.expire_date),
            status: job.status.label(),
        }
    }
}

#[derive(Serialize)]
struct ApplicationRow<'a> {
    job_id: i64,
    job_name: &'a str,
    location: &'a str,
    status: &'static str,
    submitted: String,
}

impl<'a> From<&'a ApplicationWithJob> for ApplicationRow<'a> {
    fn from(entry: &'a ApplicationWithJob) -> Self {
        let job_name = entry
            .job
            .as_ref()
            .map(|job| job.name.as_str())
            .or(entry.application.job_name.as_deref())
            .unwrap_or("(unavailable)");
        Self {
            job_id: entry.application.job_id,
            job_name,
            location: entry
                .job
                .as_ref()
                .map(|job| job.location.as_str())
                .unwrap_or(""),
            status: entry.application.status.label(),
            submitted: day(entry.application.submitted_date),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionView {
    authenticated: bool,
    role: Option<&'static str>,
    profile_id: Option<i64>,
}

fn day(moment: Option<NaiveDateTime>) -> String {
    moment
        .map(|value| value.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_csv<R: Serialize>(rows: impl IntoIterator<Item = R>) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|err| AppError::Render(err.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

pub(crate) fn jobs(format: OutputFormat, jobs: &[JobPosting]) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => print_json(jobs),
        OutputFormat::Csv => print_csv(jobs.iter().map(JobRow::from)),
        OutputFormat::Table => {
            if jobs.is_empty() {
                println!("No jobs found.");
                return Ok(());
            }
            println!(
                "{:>5}  {:<32} {:<12} {:<16} {:>25}  {:<10}  {}",
                "ID", "NAME", "CATEGORY", "LOCATION", "SALARY", "POSTED", "STATUS"
            );
            for row in jobs.iter().map(JobRow::from) {
                println!(
                    "{:>5}  {:<32} {:<12} {:<16} {:>25}  {:<10}  {}",
                    row.id,
                    row.name,
                    row.category,
                    row.location,
                    format!("{} - {}", row.salary_from, row.salary_to),
                    row.posted,
                    row.status
                );
            }
            println!("{} job(s)", jobs.len());
            Ok(())
        }
    }
}

pub(crate) fn job(format: OutputFormat, job: &JobPosting) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => print_json(job),
        OutputFormat::Csv => print_csv([JobRow::from(job)]),
        OutputFormat::Table => {
            println!("{} (#{})", job.name, job.id);
            println!("- Category: {} | Level: {} | Contract: {}", job.job_type, job.level, job.contract_type);
            println!("- Location: {}", job.location);
            println!(
                "- Salary: {} - {} | Openings: {} | Experience: {} year(s)",
                job.salary_from, job.salary_to, job.quantity, job.required_experience_years
            );
            println!(
                "- Posted: {} | Expires: {} | Status: {}",
                day(job.post_date),
                day(job.expire_date),
                job.status.label()
            );
            if !job.description.trim().is_empty() {
                println!("\n{}", job.description.trim());
            }
            Ok(())
        }
    }
}

pub(crate) fn applications(
    format: OutputFormat,
    applications: &[ApplicationWithJob],
) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => {
            let entries: Vec<_> = applications
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "application": entry.application,
                        "job": entry.job,
                    })
                })
                .collect();
            print_json(&entries)
        }
        OutputFormat::Csv => print_csv(applications.iter().map(ApplicationRow::from)),
        OutputFormat::Table => {
            if applications.is_empty() {
                println!("No applications yet.");
                return Ok(());
            }
            println!(
                "{:>6}  {:<32} {:<16} {:<14} {}",
                "JOB", "NAME", "LOCATION", "STATUS", "SUBMITTED"
            );
            for row in applications.iter().map(ApplicationRow::from) {
                println!(
                    "{:>6}  {:<32} {:<16} {:<14} {}",
                    row.job_id, row.job_name, row.location, row.status, row.submitted
                );
            }
            Ok(())
        }
    }
}

pub(crate) fn application(format: OutputFormat, application: &Application) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => print_json(application),
        OutputFormat::Csv => print_csv([application]),
        OutputFormat::Table => {
            println!(
                "Application to job {}{}",
                application.job_id,
                application
                    .job_name
                    .as_deref()
                    .map(|name| format!(" ({name})"))
                    .unwrap_or_default()
            );
            println!("- Status: {}", application.status.label());
            println!("- Submitted: {}", day(application.submitted_date));
            if let Some(link) = application.cv_link.as_deref() {
                println!("- CV: {link}");
            }
            if let Some(letter) = application.cover_letter.as_deref() {
                println!("\n{}", letter.trim());
            }
            Ok(())
        }
    }
}

pub(crate) fn stats(
    format: OutputFormat,
    stats: &[JobStats],
    summary: &StatsSummary,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "jobs": stats,
            "summary": summary,
        })),
        OutputFormat::Csv => print_csv(stats),
        OutputFormat::Table => {
            println!(
                "{} job(s) | {} application(s): {} accepted ({}%), {} rejected ({}%), {} pending ({}%)",
                summary.jobs,
                summary.applications,
                summary.accepted,
                summary.percentage(summary.accepted),
                summary.rejected,
                summary.percentage(summary.rejected),
                summary.pending,
                summary.percentage(summary.pending)
            );
            for entry in stats {
                println!(
                    "- {}: {} accepted | {} rejected | {} pending",
                    entry.job_name, entry.accepted, entry.rejected, entry.pending
                );
            }
            Ok(())
        }
    }
}

pub(crate) fn session(format: OutputFormat, session: &Session) -> Result<(), AppError> {
    let view = SessionView {
        authenticated: session.is_authenticated(),
        role: session.role.map(|role| role.label()),
        profile_id: session.profile_id,
    };
    match format {
        OutputFormat::Json => print_json(&view),
        OutputFormat::Csv => print_csv([view]),
        OutputFormat::Table => {
            match (view.authenticated, view.role) {
                (false, _) => println!("Not signed in."),
                (true, Some(role)) => println!("Signed in as {}", role.to_lowercase()),
                (true, None) => println!("Signed in"),
            }
            if let Some(id) = view.profile_id {
                println!("Profile id: {id}");
            }
            Ok(())
        }
    }
}
