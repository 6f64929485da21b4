use chrono::NaiveDate;
use clap::{Args, Subcommand};
use jobboard::domain::{JobId, Role};
use jobboard::error::AppError;
use jobboard::query::{FilterCriteria, JobScope, SortOrder};

use super::{settle, Context, StatusArg};
use crate::render::{self, OutputFormat};

#[derive(Subcommand, Debug)]
pub(crate) enum JobsCommand {
    /// List every posting
    List(ScopeArgs),
    /// Show one posting
    Show {
        id: JobId,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Keyword search over names, descriptions and locations
    Search {
        keyword: String,
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Filter by salary band, category, post date and status
    Filter(FilterArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ScopeArgs {
    /// Query the signed-in employer's own postings
    #[arg(long)]
    pub(crate) mine: bool,
    #[arg(long, value_enum, default_value_t)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug, Default)]
pub(crate) struct FilterArgs {
    /// Minimum salary; the posting's whole range must sit above it
    #[arg(long)]
    pub(crate) salary_from: Option<i64>,
    /// Maximum salary; the posting's whole range must sit below it
    #[arg(long)]
    pub(crate) salary_to: Option<i64>,
    /// Only postings published on or after this date (YYYY-MM-DD)
    #[arg(long, value_parser = jobboard::domain::parse_date)]
    pub(crate) posted_after: Option<NaiveDate>,
    /// Exact job category, e.g. IT
    #[arg(long)]
    pub(crate) category: Option<String>,
    #[arg(long, value_enum)]
    pub(crate) status: Option<StatusArg>,
    /// Oldest postings first
    #[arg(long)]
    pub(crate) asc: bool,
    #[command(flatten)]
    pub(crate) scope: ScopeArgs,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::new().sort(if self.asc {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        });
        if let Some(min) = self.salary_from {
            criteria = criteria.salary_from(min);
        }
        if let Some(max) = self.salary_to {
            criteria = criteria.salary_to(max);
        }
        if let Some(date) = self.posted_after {
            criteria = criteria.posted_after(date);
        }
        if let Some(category) = &self.category {
            criteria = criteria.category(category.clone());
        }
        if let Some(status) = self.status {
            criteria = criteria.status_only(status.into());
        }
        criteria
    }
}

fn scope(ctx: &Context, args: &ScopeArgs) -> Result<JobScope, AppError> {
    if args.mine {
        ctx.require(Some(Role::Employer))?;
        Ok(JobScope::Employer)
    } else {
        Ok(JobScope::Public)
    }
}

pub(crate) async fn run(ctx: &Context, command: JobsCommand) -> Result<(), AppError> {
    let query = ctx.client.query();

    match command {
        JobsCommand::List(args) => {
            let jobs = settle(query.list(scope(ctx, &args)?).await)?;
            render::jobs(args.format, &jobs)
        }
        JobsCommand::Show { id, format } => {
            let job = query.find_job(id).await?;
            render::job(format, &job)
        }
        JobsCommand::Search { keyword, scope: args } => {
            let jobs = settle(query.search(scope(ctx, &args)?, &keyword).await)?;
            render::jobs(args.format, &jobs)
        }
        JobsCommand::Filter(args) => {
            let criteria = args.criteria();
            let jobs = settle(query.filter(scope(ctx, &args.scope)?, &criteria).await)?;
            render::jobs(args.scope.format, &jobs)
        }
    }
}
