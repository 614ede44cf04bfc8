/*!
 * A small service that walks through the QuickBooks Online inventory flow:
 * chart-of-accounts lookup, an inventory item, a customer and an invoice,
 * then a re-read of the item to observe quantity on hand after the sale.
 *
 * For more information on the API, you can check out their documentation at:
 * https://developer.intuit.com/app/developer/qbo/docs/develop
 */
#![warn(clippy::pedantic)]

pub mod app;
pub mod client;
pub use client::QBContext;
pub mod config;
pub mod error;
pub use error::{APIError, APIResult};
pub mod functions;
pub mod gateway;
pub mod resolver;
pub mod types;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Environment {
    PRODUCTION,
    #[default]
    SANDBOX,
}

impl Environment {
    #[inline]
    #[must_use]
    pub fn endpoint_url(&self) -> &'static str {
        match self {
            Environment::PRODUCTION => "https://quickbooks.api.intuit.com/v3/",
            Environment::SANDBOX => "https://sandbox-quickbooks.api.intuit.com/v3/",
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = APIError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(Environment::PRODUCTION),
            "sandbox" => Ok(Environment::SANDBOX),
            other => Err(APIError::InvalidEnvironment(other.to_string())),
        }
    }
}
