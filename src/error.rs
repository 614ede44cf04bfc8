use serde::{Deserialize, Serialize};

pub type APIResult<T> = Result<T, APIError>;

#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("Error on Reqwest Request: {0}")]
    ReqwestError(#[from] reqwest::Error),
    #[error("Error parsing JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Error parsing URL: {0}")]
    UrlParseError(#[from] url::ParseError),
    #[error("Error reading environment variable: {0}")]
    EnvVarError(#[from] std::env::VarError),
    #[error("Invalid environment, expected `sandbox` or `production`: {0}")]
    InvalidEnvironment(String),
    #[error("Invalid bind address: {0}")]
    InvalidBindAddr(#[from] std::net::AddrParseError),
    #[error("Access token is invalid or expired: {0}")]
    InvalidToken(QBErrorResponse),
    #[error("QuickBooks returned a fault: {0}")]
    Fault(QBErrorResponse),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Trying to read an object that has no ID")]
    NoIdOnRead,
    #[error("Trying to reference an object that has no ID")]
    NoIdOnRef,
    #[error("Object is missing items required for creation")]
    CreateMissingItems,
    #[error("QuickBooks returned no object in the response")]
    EmptyResponse,
}

impl APIError {
    /// Every fault error QuickBooks attached to this failure, if any
    #[must_use]
    pub fn fault_errors(&self) -> &[FaultError] {
        match self {
            APIError::InvalidToken(resp) | APIError::Fault(resp) => &resp.fault.error,
            _ => &[],
        }
    }

    #[must_use]
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, APIError::InvalidToken(_))
    }
}

/// Fault body QuickBooks sends back on an unsuccessful request
///
/// The authentication endpoints send the same shape with lowercase keys,
/// hence the aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QBErrorResponse {
    #[serde(rename = "Fault", alias = "fault")]
    pub fault: Fault,
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fault {
    #[serde(rename = "type", default)]
    pub r#type: String,
    #[serde(rename = "Error", alias = "error", default)]
    pub error: Vec<FaultError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaultError {
    #[serde(rename = "Message", alias = "message", default)]
    pub message: String,
    #[serde(rename = "Detail", alias = "detail", default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub element: Option<String>,
}

impl QBErrorResponse {
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        self.fault.r#type.eq_ignore_ascii_case("AUTHENTICATION")
    }
}

impl std::fmt::Display for QBErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fault.r#type)?;
        for err in &self.fault.error {
            write!(
                f,
                " [{}] {} : {}",
                err.code,
                err.message,
                err.detail.as_deref().unwrap_or("[[No Detail]]")
            )?;
        }
        Ok(())
    }
}
