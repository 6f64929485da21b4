use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::ApiError;
use super::session::SessionStore;
use crate::config::ApiConfig;

/// Hook fired after a 401 wiped the session, sending the user back to the login entry point.
pub trait LoginRedirect: Send + Sync {
    fn redirect_to_login(&self, login_path: &str);
}

/// Redirect that only records the event in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRedirect;

impl LoginRedirect for LogRedirect {
    fn redirect_to_login(&self, login_path: &str) {
        warn!(login_path, "session expired; login required");
    }
}

/// Whether a transport attaches the stored bearer credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Anonymous,
    Bearer,
}

struct Shared {
    http: reqwest::Client,
    base_url: String,
    login_path: String,
    session: Arc<dyn SessionStore>,
    redirect: Arc<dyn LoginRedirect>,
}

/// JSON-over-HTTP client for the job board API.
///
/// Cloning is cheap; `public()` and `authenticated()` hand out the two configurations
/// over the same connection pool and session store.
#[derive(Clone)]
pub struct Transport {
    shared: Arc<Shared>,
    auth: AuthMode,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Body<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Body<T> {
    fn into_inner(self) -> T {
        match self {
            Body::Wrapped { data } => data,
            Body::Bare(data) => data,
        }
    }
}

impl Transport {
    pub fn new(
        config: &ApiConfig,
        session: Arc<dyn SessionStore>,
        redirect: Arc<dyn LoginRedirect>,
    ) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|err| ApiError::Network {
            message: format!("unable to build HTTP client: {err}"),
        })?;

        Ok(Self {
            shared: Arc::new(Shared {
                http,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                login_path: config.login_path.clone(),
                session,
                redirect,
            }),
            auth: AuthMode::Anonymous,
        })
    }

    pub fn public(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            auth: AuthMode::Anonymous,
        }
    }

    pub fn authenticated(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            auth: AuthMode::Bearer,
        }
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.auth
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.shared.session
    }

    pub fn base_url(&self) -> &str {
        &self.shared.base_url
    }

    pub async fn get<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.request::<(), T>(Method::GET, path, &[], None).await
    }

    pub async fn get_with_query<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.request::<(), T>(Method::GET, path, query, None).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    /// Deletes ignore whatever body the server sends back.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.dispatch::<()>(Method::DELETE, path, &[], None)
            .await
            .map(|_| ())
    }

    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = self.dispatch(method, path, query, body).await?;
        decode_body(path, &bytes)
    }

    async fn dispatch<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Vec<u8>, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.shared.base_url, path);
        let mut request = self
            .shared
            .http
            .request(method.clone(), &url)
            .header(ACCEPT, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }

        if self.auth == AuthMode::Bearer {
            match self.shared.session.get().bearer_token() {
                Some(token) => request = request.header(AUTHORIZATION, format!("Bearer {token}")),
                None => debug!(%method, path, "no stored token; sending request without credentials"),
            }
        }

        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(|err| ApiError::Decode {
                message: format!("unable to encode request body: {err}"),
            })?;
            request = request.header(CONTENT_TYPE, "application/json").body(payload);
        }

        debug!(%method, path, auth = ?self.auth, "dispatching request");

        let response = request.send().await.map_err(|err| {
            warn!(%method, path, error = %err, "no response from server");
            ApiError::Network {
                message: err.to_string(),
            }
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::Network {
                message: format!("failed to read response body: {err}"),
            })?
            .to_vec();

        if status.is_success() {
            return Ok(bytes);
        }

        let error = ApiError::from_status(status.as_u16(), error_message(&bytes));
        warn!(
            %method,
            path,
            status = status.as_u16(),
            tag = error.tag().label(),
            "request failed"
        );

        if matches!(error, ApiError::AuthRequired { .. }) {
            self.shared.session.clear();
            self.shared.redirect.redirect_to_login(&self.shared.login_path);
        }

        Err(error)
    }
}

fn decode_body<T>(path: &str, bytes: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let source: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        bytes
    };
    serde_json::from_slice::<Body<T>>(source)
        .map(Body::into_inner)
        .map_err(|err| {
            warn!(path, error = %err, "response body did not match the expected shape");
            ApiError::Decode {
                message: format!("{path}: {err}"),
            }
        })
}

fn error_message(bytes: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(bytes).ok()?;
    ["message", "error"].iter().find_map(|key| {
        value
            .get(*key)
            .and_then(serde_json::Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
    })
}
