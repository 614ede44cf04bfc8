use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;

use crate::{
    error::{APIError, APIResult, QBErrorResponse},
    QBContext,
};

pub mod create;
pub mod query;
pub mod read;

/// Sends a request to the QuickBooks API endpoint with the given parameters
///
/// # Arguments
///
/// * `qb` - The context containing authentication details
/// * `client` - The HTTP client the request is executed on
/// * `method` - The HTTP method for the request
/// * `path` - The path for the API request URL
/// * `body` - Optional request body to send
/// * `query` - Optional query parameters
pub(crate) async fn qb_request<T, U>(
    qb: &QBContext,
    client: &Client,
    method: Method,
    path: &str,
    body: Option<&T>,
    query: Option<&[(&str, &str)]>,
) -> APIResult<U>
where
    T: serde::Serialize,
    U: serde::de::DeserializeOwned,
{
    let request = crate::client::build_request(method, path, body, query, qb, client)?;
    let response = client.execute(request).await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await?;
        return Err(error_from_response(status, &body));
    }
    Ok(response.json().await?)
}

/// Turns an unsuccessful response into the matching error kind
///
/// A 401, or a fault QuickBooks tags as `AUTHENTICATION`, means the access
/// token is no good. Any other parseable fault keeps its error list.
pub(crate) fn error_from_response(status: StatusCode, body: &str) -> APIError {
    match serde_json::from_str::<QBErrorResponse>(body) {
        Ok(resp) if status == StatusCode::UNAUTHORIZED || resp.is_authentication() => {
            APIError::InvalidToken(resp)
        }
        Ok(resp) => APIError::Fault(resp),
        Err(_) if status == StatusCode::UNAUTHORIZED => {
            APIError::InvalidToken(QBErrorResponse::default())
        }
        Err(_) => APIError::BadRequest(format!("{status} : {body}")),
    }
}

/// Internal struct that Quickbooks returns most
/// of the time when interacting with the API
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct QBResponse<T> {
    #[serde(
        default,
        alias = "Item",
        alias = "Account",
        alias = "Customer",
        alias = "Invoice"
    )]
    object: Option<T>,
    #[allow(dead_code)]
    #[serde(default)]
    time: String,
}

impl<T> QBResponse<T> {
    pub(crate) fn into_object(self) -> APIResult<T> {
        self.object.ok_or(APIError::EmptyResponse)
    }
}
