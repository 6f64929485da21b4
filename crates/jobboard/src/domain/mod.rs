//! Records exchanged with the job board API and the client-side checks applied to them.

pub mod application;
pub mod auth;
pub mod job;
pub mod stats;
pub mod validation;
pub(crate) mod wire;

pub use application::{
    Application, ApplicationDraft, ApplicationKey, ApplicationStatus, ApplicationStatusView,
};
pub use auth::{LoginRequest, LoginResponse, Registration, Role};
pub use job::{JobDraft, JobId, JobPosting, JobStatus};
pub use stats::{JobStats, StatsSummary};
pub use validation::{ValidationErrors, Validate};
pub use wire::parse_date;
