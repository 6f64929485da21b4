//! Typed request builders: one business operation, one transport call.

pub mod auth;
pub mod candidate;
pub mod employer;
pub mod jobs;

use std::sync::Arc;

pub use auth::AuthApi;
pub use candidate::{ApplicationWithJob, CandidateApi};
pub use employer::EmployerApi;
pub use jobs::JobsApi;

use crate::client::{ApiError, LoginRedirect, Session, SessionStore, Transport};
use crate::config::ApiConfig;
use crate::query::ResilientQuery;

/// Entry point bundling every accessor over one shared transport.
#[derive(Clone)]
pub struct JobBoardClient {
    transport: Transport,
}

impl JobBoardClient {
    pub fn new(
        config: &ApiConfig,
        session: Arc<dyn SessionStore>,
        redirect: Arc<dyn LoginRedirect>,
    ) -> Result<Self, ApiError> {
        Ok(Self::from_transport(Transport::new(config, session, redirect)?))
    }

    pub fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn session(&self) -> Session {
        self.transport.session().get()
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.transport.clone())
    }

    pub fn jobs(&self) -> JobsApi {
        JobsApi::new(self.transport.clone())
    }

    pub fn employer(&self) -> EmployerApi {
        EmployerApi::new(self.transport.clone())
    }

    pub fn candidate(&self) -> CandidateApi {
        CandidateApi::new(self.transport.clone())
    }

    pub fn query(&self) -> ResilientQuery {
        ResilientQuery::new(self.transport.clone())
    }
}
