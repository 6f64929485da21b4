//! Session persistence and the HTTP transport every accessor goes through.

pub mod error;
pub mod session;
pub mod transport;

pub use error::{ApiError, ErrorView, StatusTag};
pub use session::{Access, FileSessionStore, MemorySessionStore, Session, SessionStore};
pub use transport::{AuthMode, LogRedirect, LoginRedirect, Transport};
