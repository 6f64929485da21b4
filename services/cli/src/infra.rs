use std::sync::Arc;

use jobboard::client::{FileSessionStore, LoginRedirect};
use jobboard::config::AppConfig;
use jobboard::error::AppError;
use jobboard::JobBoardClient;
use tracing::debug;

/// Prints the sign-in hint when the backend rejects the stored token.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct CliLoginRedirect;

impl LoginRedirect for CliLoginRedirect {
    fn redirect_to_login(&self, login_path: &str) {
        eprintln!("Session expired ({login_path}). Sign in again with `jobboard login`.");
    }
}

pub(crate) fn build_client(config: &AppConfig) -> Result<JobBoardClient, AppError> {
    let store = Arc::new(FileSessionStore::new(config.session.path.clone()));
    let client = JobBoardClient::new(&config.api, store, Arc::new(CliLoginRedirect))?;
    debug!(
        environment = ?config.environment,
        api = %config.api.base_url,
        session = %config.session.path.display(),
        "client ready"
    );
    Ok(client)
}
