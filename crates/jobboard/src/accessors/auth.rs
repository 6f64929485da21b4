use tracing::info;

use crate::client::{ApiError, Session, Transport};
use crate::domain::{LoginRequest, LoginResponse, Registration, Role, Validate};

/// Sign-in, sign-out and registration.
#[derive(Clone)]
pub struct AuthApi {
    transport: Transport,
}

impl AuthApi {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Exchange credentials for a token and persist the resulting session.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Session, ApiError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            user_type: role,
        };
        let response: LoginResponse = self.transport.public().post("/auth/login", &request).await?;

        if response.access_token.trim().is_empty() {
            return Err(ApiError::Decode {
                message: "login response carried no access token".to_string(),
            });
        }

        let session = Session {
            auth_token: Some(response.access_token),
            refresh_token: response.refresh_token,
            role: Some(role),
            profile_id: response.type_id,
        };
        self.transport.session().set(session.clone());
        info!(role = role.label(), profile_id = ?session.profile_id, "signed in");
        Ok(session)
    }

    pub fn logout(&self) {
        self.transport.session().clear();
        info!("signed out");
    }

    pub fn current(&self) -> Session {
        self.transport.session().get()
    }

    pub async fn register(&self, registration: &Registration) -> Result<serde_json::Value, ApiError> {
        registration.validate()?;
        self.transport
            .public()
            .post("/auth/register", registration)
            .await
    }
}
