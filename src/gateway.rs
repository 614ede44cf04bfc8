//! The slice of the accounting API the inventory flow depends on.
//!
//! [`LedgerGateway`] names each remote capability the flow uses instead of
//! exposing a generic "find everything" call, so fakes in tests only have to
//! model what is actually exercised. [`QBGateway`] is the real thing, backed
//! by the generic operations in [`crate::functions`].

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::APIResult,
    functions::{
        create::QBCreate,
        query::QBQuery,
        read::QBRead,
    },
    types::{Account, Customer, Invoice, Item},
    Environment, QBContext,
};

#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Realm (company) the gateway is bound to
    fn realm_id(&self) -> &str;

    /// Every account in the chart of accounts, in the order the ledger returns them
    async fn list_accounts(&self) -> APIResult<Vec<Account>>;

    async fn create_account(&self, account: &Account) -> APIResult<Account>;

    async fn create_item(&self, item: &Item) -> APIResult<Item>;

    async fn read_item(&self, id: &str) -> APIResult<Item>;

    async fn create_customer(&self, customer: &Customer) -> APIResult<Customer>;

    async fn create_invoice(&self, invoice: &Invoice) -> APIResult<Invoice>;
}

/// Hands out a gateway bound to one realm and access token
pub trait GatewayFactory: Send + Sync {
    fn connect(&self, realm_id: &str, access_token: &str) -> Box<dyn LedgerGateway>;
}

/// Gateway over the QuickBooks Online REST API
pub struct QBGateway {
    qb: QBContext,
    client: Client,
}

impl QBGateway {
    #[must_use]
    pub fn new(qb: QBContext, client: Client) -> Self {
        Self { qb, client }
    }
}

#[async_trait]
impl LedgerGateway for QBGateway {
    fn realm_id(&self) -> &str {
        self.qb.company_id()
    }

    async fn list_accounts(&self) -> APIResult<Vec<Account>> {
        Account::query_all("", &self.qb, &self.client).await
    }

    async fn create_account(&self, account: &Account) -> APIResult<Account> {
        account.create(&self.qb, &self.client).await
    }

    async fn create_item(&self, item: &Item) -> APIResult<Item> {
        item.create(&self.qb, &self.client).await
    }

    async fn read_item(&self, id: &str) -> APIResult<Item> {
        Item::get(id, &self.qb, &self.client).await
    }

    async fn create_customer(&self, customer: &Customer) -> APIResult<Customer> {
        customer.create(&self.qb, &self.client).await
    }

    async fn create_invoice(&self, invoice: &Invoice) -> APIResult<Invoice> {
        invoice.create(&self.qb, &self.client).await
    }
}

/// Builds [`QBGateway`]s sharing one HTTP client
#[derive(Clone)]
pub struct QBGatewayFactory {
    environment: Environment,
    client: Client,
}

impl QBGatewayFactory {
    #[must_use]
    pub fn new(environment: Environment, client: Client) -> Self {
        Self {
            environment,
            client,
        }
    }
}

impl GatewayFactory for QBGatewayFactory {
    fn connect(&self, realm_id: &str, access_token: &str) -> Box<dyn LedgerGateway> {
        let qb = QBContext::new(
            self.environment,
            realm_id.to_string(),
            access_token.to_string(),
        );
        Box::new(QBGateway::new(qb, self.client.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_binds_realm() {
        let factory = QBGatewayFactory::new(Environment::SANDBOX, Client::new());
        let gateway = factory.connect("4620816365257778210", "token");
        assert_eq!(gateway.realm_id(), "4620816365257778210");
    }
}
