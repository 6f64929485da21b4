use clap::Args;
use jobboard::domain::Role;
use jobboard::error::AppError;

use super::Context;
use crate::render::{self, OutputFormat};

#[derive(Args, Debug)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) username: String,
    #[arg(long)]
    pub(crate) password: String,
    /// Account kind: employer or candidate
    #[arg(long)]
    pub(crate) role: Role,
}

#[derive(Args, Debug, Default)]
pub(crate) struct WhoamiArgs {
    #[arg(long, value_enum, default_value_t)]
    pub(crate) format: OutputFormat,
}

pub(crate) async fn login(ctx: &Context, args: LoginArgs) -> Result<(), AppError> {
    let session = ctx
        .client
        .auth()
        .login(&args.username, &args.password, args.role)
        .await?;
    println!(
        "Signed in as {} ({})",
        args.username,
        args.role.label().to_lowercase()
    );
    if let Some(profile_id) = session.profile_id {
        println!("Profile id: {profile_id}");
    }
    Ok(())
}

pub(crate) fn logout(ctx: &Context) -> Result<(), AppError> {
    ctx.client.auth().logout();
    println!("Signed out.");
    Ok(())
}

pub(crate) fn whoami(ctx: &Context, args: WhoamiArgs) -> Result<(), AppError> {
    render::session(args.format, &ctx.client.session())
}
