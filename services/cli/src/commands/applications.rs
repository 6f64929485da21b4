use clap::{Args, Subcommand};
use jobboard::client::{Access, Session};
use jobboard::domain::{ApplicationDraft, ApplicationKey, JobId, Role};
use jobboard::error::AppError;

use super::Context;
use crate::render::{self, OutputFormat};

#[derive(Subcommand, Debug)]
pub(crate) enum ApplicationsCommand {
    /// List your applications with the postings they target
    List {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Apply to a posting
    Apply(ApplicationArgs),
    /// Show one application
    Show {
        job_id: JobId,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Replace the cover letter or CV link of an application
    Update(ApplicationArgs),
    /// Withdraw an application
    Withdraw { job_id: JobId },
    /// Current review status of an application
    Status { job_id: JobId },
}

#[derive(Args, Debug)]
pub(crate) struct ApplicationArgs {
    pub(crate) job_id: JobId,
    #[arg(long)]
    pub(crate) cover_letter: Option<String>,
    /// Link to a hosted CV
    #[arg(long)]
    pub(crate) cv_link: Option<String>,
}

impl ApplicationArgs {
    fn into_draft(self, candidate_id: i64) -> ApplicationDraft {
        ApplicationDraft {
            candidate_id,
            job_id: self.job_id,
            cover_letter: self.cover_letter,
            cv_link: self.cv_link,
        }
    }
}

/// Candidate commands address applications by the signed-in profile id.
fn candidate_id(session: &Session) -> Result<i64, AppError> {
    session
        .profile_id
        .ok_or(AppError::AccessDenied(Access::LoginRequired))
}

pub(crate) async fn run(ctx: &Context, command: ApplicationsCommand) -> Result<(), AppError> {
    let session = ctx.require(Some(Role::Candidate))?;
    let candidate_id = candidate_id(&session)?;
    let candidate = ctx.client.candidate();

    match command {
        ApplicationsCommand::List { format } => {
            let applications = candidate.applications_with_jobs().await?;
            render::applications(format, &applications)
        }
        ApplicationsCommand::Apply(args) => {
            let application = candidate.apply(&args.into_draft(candidate_id)).await?;
            println!(
                "Applied to job {} ({})",
                application.job_id,
                application.status.label()
            );
            Ok(())
        }
        ApplicationsCommand::Show { job_id, format } => {
            let application = candidate
                .get_application(ApplicationKey::new(candidate_id, job_id))
                .await?;
            render::application(format, &application)
        }
        ApplicationsCommand::Update(args) => {
            let draft = args.into_draft(candidate_id);
            candidate.update_application(draft.key(), &draft).await?;
            println!("Updated application for job {}", draft.job_id);
            Ok(())
        }
        ApplicationsCommand::Withdraw { job_id } => {
            candidate
                .delete_application(ApplicationKey::new(candidate_id, job_id))
                .await?;
            println!("Withdrew application for job {job_id}");
            Ok(())
        }
        ApplicationsCommand::Status { job_id } => {
            let status = candidate
                .application_status(ApplicationKey::new(candidate_id, job_id))
                .await?;
            println!("{}", status.label());
            Ok(())
        }
    }
}
