use serde::{Deserialize, Serialize};

/// Account kind selected at login; decides which API surface is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Employer,
    Candidate,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Employer => "EMPLOYER",
            Role::Candidate => "CANDIDATE",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "EMPLOYER" => Ok(Role::Employer),
            "CANDIDATE" => Ok(Role::Candidate),
            other => Err(format!("unknown role '{other}' (expected employer or candidate)")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub user_type: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub type_id: Option<i64>,
}

/// Sign-up form; checked client-side before it is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
    pub user_type: Option<Role>,
}
