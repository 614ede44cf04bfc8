//! HTTP surface: `GET /inventory` runs the walkthrough for the caller's books.
//!
//! The caller passes its credentials with every request: the realm id in the
//! `X-Realm-Id` header and the access token as a bearer token. Whatever
//! happens, the body is `{ "response": ... }` holding either the item as it
//! reads after the sale or one of the fixed messages below.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::{error::APIError, gateway::GatewayFactory, resolver::AccountResolver, workflow};

pub const REALM_HEADER: &str = "x-realm-id";

pub const NO_REALM_MESSAGE: &str =
    "No realm ID.  QBO calls only work if the accounting scope was passed!";
pub const INVALID_TOKEN_MESSAGE: &str = "InvalidToken - Refresh token and try again";
pub const FAILED_MESSAGE: &str = "Failed";

#[derive(Clone)]
pub struct AppState {
    pub factory: Arc<dyn GatewayFactory>,
    pub resolver: AccountResolver,
}

impl AppState {
    pub fn new(factory: impl GatewayFactory + 'static) -> Self {
        Self {
            factory: Arc::new(factory),
            resolver: AccountResolver::new(),
        }
    }
}

/// Credentials the OAuth layer in front of us established for the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCredentials {
    pub realm_id: Option<String>,
    pub access_token: Option<String>,
}

impl SessionCredentials {
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let non_empty = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        let realm_id = headers
            .get(REALM_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(non_empty);
        let access_token = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
            .and_then(|(_, token)| non_empty(token));
        Self {
            realm_id,
            access_token,
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/inventory", get(inventory))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn respond(response: impl Into<Value>) -> Json<Value> {
    Json(json!({ "response": response.into() }))
}

async fn inventory(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    let credentials = SessionCredentials::from_headers(&headers);
    let Some(realm_id) = credentials.realm_id else {
        return respond(NO_REALM_MESSAGE);
    };
    let Some(access_token) = credentials.access_token else {
        log::warn!("No access token for realm {realm_id}");
        return respond(INVALID_TOKEN_MESSAGE);
    };

    let gateway = state.factory.connect(&realm_id, &access_token);
    match workflow::run_inventory_sample(&state.resolver, gateway.as_ref()).await {
        Ok(item) => match serde_json::to_value(&item) {
            Ok(item) => respond(item),
            Err(e) => {
                log::error!("Exception while managing inventory : {e}");
                respond(FAILED_MESSAGE)
            }
        },
        Err(e) if e.is_invalid_token() => {
            log::warn!("Access token rejected for realm {realm_id} : {e}");
            respond(INVALID_TOKEN_MESSAGE)
        }
        Err(e) => {
            log_failure(&e);
            respond(FAILED_MESSAGE)
        }
    }
}

fn log_failure(e: &APIError) {
    let errors = e.fault_errors();
    if errors.is_empty() {
        log::error!("Error while calling the API :: {e}");
    }
    for error in errors {
        log::error!(
            "Error while calling the API :: {} ({})",
            error.message,
            error.detail.as_deref().unwrap_or("[[No Detail]]")
        );
    }
}
