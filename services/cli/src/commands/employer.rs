use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args, Subcommand};
use jobboard::domain::{JobDraft, JobId, JobStatus, Role};
use jobboard::error::AppError;

use super::{Context, StatusArg};
use crate::render::{self, OutputFormat};

#[derive(Subcommand, Debug)]
pub(crate) enum EmployerCommand {
    /// List your postings, optionally by status
    Jobs {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Publish a new posting
    Create(CreateArgs),
    /// Edit a posting; omitted fields keep their current value
    Update(UpdateArgs),
    /// Remove a posting
    Delete { id: JobId },
    /// Application counts per posting
    Stats {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

#[derive(Args, Debug)]
pub(crate) struct CreateArgs {
    #[arg(long)]
    pub(crate) name: String,
    /// Job category, e.g. IT
    #[arg(long)]
    pub(crate) job_type: String,
    #[arg(long)]
    pub(crate) contract_type: String,
    #[arg(long)]
    pub(crate) level: String,
    #[arg(long, default_value_t = 1)]
    pub(crate) quantity: i32,
    #[arg(long)]
    pub(crate) salary_from: i64,
    #[arg(long)]
    pub(crate) salary_to: i64,
    /// Required years of experience
    #[arg(long, default_value_t = 0)]
    pub(crate) experience: i32,
    #[arg(long)]
    pub(crate) location: String,
    #[arg(long)]
    pub(crate) description: String,
    /// Publication date (YYYY-MM-DD); the server assigns one when omitted
    #[arg(long, value_parser = jobboard::domain::parse_date)]
    pub(crate) post_date: Option<NaiveDate>,
    /// Closing date (YYYY-MM-DD)
    #[arg(long, value_parser = jobboard::domain::parse_date)]
    pub(crate) expire_date: NaiveDate,
    #[arg(long, value_enum)]
    pub(crate) status: Option<StatusArg>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct UpdateArgs {
    pub(crate) id: JobId,
    #[arg(long)]
    pub(crate) name: Option<String>,
    #[arg(long)]
    pub(crate) job_type: Option<String>,
    #[arg(long)]
    pub(crate) contract_type: Option<String>,
    #[arg(long)]
    pub(crate) level: Option<String>,
    #[arg(long)]
    pub(crate) quantity: Option<i32>,
    #[arg(long)]
    pub(crate) salary_from: Option<i64>,
    #[arg(long)]
    pub(crate) salary_to: Option<i64>,
    #[arg(long)]
    pub(crate) experience: Option<i32>,
    #[arg(long)]
    pub(crate) location: Option<String>,
    #[arg(long)]
    pub(crate) description: Option<String>,
    #[arg(long, value_parser = jobboard::domain::parse_date)]
    pub(crate) expire_date: Option<NaiveDate>,
    #[arg(long, value_enum)]
    pub(crate) status: Option<StatusArg>,
}

fn start_of(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

impl CreateArgs {
    fn into_draft(self, employer_id: Option<i64>) -> JobDraft {
        JobDraft {
            name: self.name,
            job_type: self.job_type,
            contract_type: self.contract_type,
            level: self.level,
            quantity: self.quantity,
            salary_from: self.salary_from,
            salary_to: self.salary_to,
            required_experience_years: self.experience,
            location: self.location,
            description: self.description,
            post_date: self.post_date.map(start_of),
            expire_date: Some(start_of(self.expire_date)),
            status: self.status.map(JobStatus::from).unwrap_or_default(),
            employer_id,
        }
    }
}

impl UpdateArgs {
    fn apply(self, draft: &mut JobDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(job_type) = self.job_type {
            draft.job_type = job_type;
        }
        if let Some(contract_type) = self.contract_type {
            draft.contract_type = contract_type;
        }
        if let Some(level) = self.level {
            draft.level = level;
        }
        if let Some(quantity) = self.quantity {
            draft.quantity = quantity;
        }
        if let Some(salary_from) = self.salary_from {
            draft.salary_from = salary_from;
        }
        if let Some(salary_to) = self.salary_to {
            draft.salary_to = salary_to;
        }
        if let Some(years) = self.experience {
            draft.required_experience_years = years;
        }
        if let Some(location) = self.location {
            draft.location = location;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(date) = self.expire_date {
            draft.expire_date = Some(start_of(date));
        }
        if let Some(status) = self.status {
            draft.status = status.into();
        }
    }
}

pub(crate) async fn run(ctx: &Context, command: EmployerCommand) -> Result<(), AppError> {
    let session = ctx.require(Some(Role::Employer))?;
    let employer = ctx.client.employer();

    match command {
        EmployerCommand::Jobs { status, format } => {
            let jobs = match status {
                Some(status) => employer.my_jobs_by_status(status.into()).await?,
                None => employer.my_jobs().await?,
            };
            render::jobs(format, &jobs)
        }
        EmployerCommand::Create(args) => {
            let job = employer
                .create_job(&args.into_draft(session.profile_id))
                .await?;
            println!("Created job {} ({})", job.id, job.name);
            Ok(())
        }
        EmployerCommand::Update(args) => {
            let id = args.id;
            let current = ctx.client.jobs().get(id).await?;
            let mut draft = JobDraft::from(&current);
            args.apply(&mut draft);
            let job = employer.update_job(id, &draft).await?;
            println!("Updated job {} ({})", job.id, job.name);
            Ok(())
        }
        EmployerCommand::Delete { id } => {
            employer.delete_job(id).await?;
            println!("Deleted job {id}");
            Ok(())
        }
        EmployerCommand::Stats { format } => {
            let (stats, summary) = employer.stats_summary().await?;
            render::stats(format, &stats, &summary)
        }
    }
}
