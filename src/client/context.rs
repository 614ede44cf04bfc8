//! # `QuickBooks` Online Context
//!
//! `QBContext` carries what every request to the accounting API needs: which
//! environment to talk to, the company (realm) the books belong to, and the
//! OAuth 2.0 access token. Obtaining and refreshing that token happens outside
//! this crate; the context only holds it.
//!
//! ```no_run
//! use oxibooks_inventory::{Environment, QBContext};
//!
//! // Create manually
//! let context = QBContext::new(
//!     Environment::SANDBOX,
//!     "company_id".to_string(),
//!     "access_token".to_string(),
//! );
//!
//! // Create from environment variables QB_COMPANY_ID and QB_ACCESS_TOKEN
//! let context = QBContext::new_from_env(Environment::SANDBOX).unwrap();
//! ```
use crate::{APIResult, Environment};

#[derive(Clone)]
pub struct QBContext {
    pub(crate) environment: Environment,
    pub(crate) company_id: String,
    pub(crate) access_token: String,
}

impl QBContext {
    /// Creates a new `QuickBooks` context with the specified parameters.
    #[must_use]
    pub fn new(environment: Environment, company_id: String, access_token: String) -> Self {
        Self {
            environment,
            company_id,
            access_token,
        }
    }

    /// Creates a new `QuickBooks` context from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QB_COMPANY_ID`: The `QuickBooks` company ID
    /// - `QB_ACCESS_TOKEN`: Valid OAuth 2.0 access token
    ///
    /// # Errors
    ///
    /// `EnvVarError` if either variable is missing
    pub fn new_from_env(environment: Environment) -> APIResult<Self> {
        let company_id = std::env::var("QB_COMPANY_ID")?;
        let access_token = std::env::var("QB_ACCESS_TOKEN")?;
        Ok(Self::new(environment, company_id, access_token))
    }

    #[must_use]
    pub fn company_id(&self) -> &str {
        &self.company_id
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }
}

// Keep the token out of logs
impl std::fmt::Debug for QBContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QBContext")
            .field("environment", &self.environment)
            .field("company_id", &self.company_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}
