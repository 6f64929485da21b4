use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jobboard::config::{ApiConfig, AppConfig};
use jobboard::error::AppError;
use jobboard::telemetry;

use crate::commands::applications::{self, ApplicationsCommand};
use crate::commands::auth::{self, LoginArgs, WhoamiArgs};
use crate::commands::employer::{self, EmployerCommand};
use crate::commands::jobs::{self, JobsCommand};
use crate::commands::Context;
use crate::infra::build_client;

#[derive(Parser, Debug)]
#[command(
    name = "jobboard",
    about = "Browse, publish and apply for jobs from the command line",
    version
)]
struct Cli {
    /// Override APP_API_URL for this invocation
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Override APP_SESSION_PATH for this invocation
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session
    Login(LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show who is signed in
    Whoami(WhoamiArgs),
    /// Browse, search and filter postings
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },
    /// Manage the signed-in employer's postings
    Employer {
        #[command(subcommand)]
        command: EmployerCommand,
    },
    /// Manage the signed-in candidate's applications
    Applications {
        #[command(subcommand)]
        command: ApplicationsCommand,
    },
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(api_url) = cli.api_url {
        config.api = ApiConfig::new(
            api_url,
            config.api.login_path.clone(),
            config.api.request_timeout,
        )?;
    }
    if let Some(path) = cli.session_file {
        config.session.path = path;
    }

    telemetry::init(&config.telemetry)?;

    let ctx = Context::new(build_client(&config)?);

    match cli.command {
        Command::Login(args) => auth::login(&ctx, args).await,
        Command::Logout => auth::logout(&ctx),
        Command::Whoami(args) => auth::whoami(&ctx, args),
        Command::Jobs { command } => jobs::run(&ctx, command).await,
        Command::Employer { command } => employer::run(&ctx, command).await,
        Command::Applications { command } => applications::run(&ctx, command).await,
    }
}
