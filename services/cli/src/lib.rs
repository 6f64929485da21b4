mod cli;
mod commands;
mod infra;
mod render;

use jobboard::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
