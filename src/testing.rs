//! In-memory ledger used by the tests in place of the QBO API.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;

use crate::{
    error::{APIError, APIResult, Fault, FaultError, QBErrorResponse},
    gateway::{GatewayFactory, LedgerGateway},
    types::{Account, Customer, Invoice, Item, ItemType, QBCreatable},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Calls {
    pub list_accounts: usize,
    pub create_account: usize,
    pub create_item: usize,
    pub read_item: usize,
    pub create_customer: usize,
    pub create_invoice: usize,
}

impl Calls {
    pub fn creates(&self) -> usize {
        self.create_account + self.create_item + self.create_customer + self.create_invoice
    }

    pub fn total(&self) -> usize {
        self.creates() + self.list_accounts + self.read_item
    }
}

#[derive(Debug, Clone, Copy)]
enum Failure {
    InvalidToken,
    Fault,
    CreateFault,
    CreateWithoutId,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    accounts: Vec<Account>,
    items: Vec<Item>,
    customers: Vec<Customer>,
    invoices: Vec<Invoice>,
    calls: Calls,
}

impl State {
    fn assign_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeLedger {
    state: Arc<Mutex<State>>,
    failure: Option<Failure>,
    list_delay: Option<Duration>,
    realm_id: Option<String>,
}

impl FakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if the access token had expired
    pub fn rejecting_token() -> Self {
        Self {
            failure: Some(Failure::InvalidToken),
            ..Self::default()
        }
    }

    /// Every call fails with a validation fault
    pub fn failing_with_fault() -> Self {
        Self {
            failure: Some(Failure::Fault),
            ..Self::default()
        }
    }

    /// Reads succeed but every create is rejected with a validation fault
    pub fn failing_on_create() -> Self {
        Self {
            failure: Some(Failure::CreateFault),
            ..Self::default()
        }
    }

    /// Creates succeed but hand back the object without an id
    pub fn creating_without_ids() -> Self {
        Self {
            failure: Some(Failure::CreateWithoutId),
            ..Self::default()
        }
    }

    pub fn with_realm(self, realm_id: impl Into<String>) -> Self {
        Self {
            realm_id: Some(realm_id.into()),
            ..self
        }
    }

    pub fn with_list_delay(self, delay: Duration) -> Self {
        Self {
            list_delay: Some(delay),
            ..self
        }
    }

    pub fn seed_account(&self, mut account: Account) {
        let mut state = self.state.lock().unwrap();
        account.id = Some(state.assign_id());
        state.accounts.push(account);
    }

    pub fn calls(&self) -> Calls {
        self.state.lock().unwrap().calls
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.state.lock().unwrap().accounts.clone()
    }

    pub fn invoices(&self) -> Vec<Invoice> {
        self.state.lock().unwrap().invoices.clone()
    }

    fn check(&self) -> APIResult<()> {
        match self.failure {
            None | Some(Failure::CreateFault | Failure::CreateWithoutId) => Ok(()),
            Some(Failure::InvalidToken) => Err(APIError::InvalidToken(fault(
                "AUTHENTICATION",
                "AuthenticationFailed",
                "3200",
            ))),
            Some(Failure::Fault) => Err(APIError::Fault(duplicate_name())),
        }
    }

    fn create<T: QBCreatable + Clone>(
        &self,
        record: impl FnOnce(&mut Calls),
        object: &T,
        store: impl FnOnce(&mut State, T) -> T,
    ) -> APIResult<T> {
        let mut state = self.state.lock().unwrap();
        record(&mut state.calls);
        drop(state);
        self.check()?;
        if !object.can_create() {
            return Err(APIError::CreateMissingItems);
        }
        match self.failure {
            Some(Failure::CreateFault) => return Err(APIError::Fault(duplicate_name())),
            Some(Failure::CreateWithoutId) => return Ok(object.clone()),
            _ => {}
        }
        let mut state = self.state.lock().unwrap();
        Ok(store(&mut *state, object.clone()))
    }
}

fn duplicate_name() -> QBErrorResponse {
    fault("ValidationFault", "Duplicate Name Exists Error", "6240")
}

fn fault(r#type: &str, message: &str, code: &str) -> QBErrorResponse {
    QBErrorResponse {
        fault: Fault {
            r#type: r#type.to_string(),
            error: vec![FaultError {
                message: message.to_string(),
                detail: Some(format!("{message} detail")),
                code: code.to_string(),
                element: None,
            }],
        },
        time: None,
    }
}

#[async_trait]
impl LedgerGateway for FakeLedger {
    fn realm_id(&self) -> &str {
        self.realm_id.as_deref().unwrap_or("123145")
    }

    async fn list_accounts(&self) -> APIResult<Vec<Account>> {
        self.state.lock().unwrap().calls.list_accounts += 1;
        self.check()?;
        if let Some(delay) = self.list_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.accounts())
    }

    async fn create_account(&self, account: &Account) -> APIResult<Account> {
        self.create(|c| c.create_account += 1, account, |state, mut account| {
            account.id = Some(state.assign_id());
            account.sync_token = Some("0".into());
            state.accounts.push(account.clone());
            account
        })
    }

    async fn create_item(&self, item: &Item) -> APIResult<Item> {
        self.create(|c| c.create_item += 1, item, |state, mut item| {
            item.id = Some(state.assign_id());
            item.sync_token = Some("0".into());
            state.items.push(item.clone());
            item
        })
    }

    async fn read_item(&self, id: &str) -> APIResult<Item> {
        self.state.lock().unwrap().calls.read_item += 1;
        self.check()?;
        let state = self.state.lock().unwrap();
        let item = state.items.iter().find(|i| i.id.as_deref() == Some(id)).cloned();
        item.ok_or_else(|| APIError::Fault(fault("ValidationFault", "Object Not Found", "610")))
    }

    async fn create_customer(&self, customer: &Customer) -> APIResult<Customer> {
        self.create(|c| c.create_customer += 1, customer, |state, mut customer| {
            customer.id = Some(state.assign_id());
            customer.sync_token = Some("0".into());
            state.customers.push(customer.clone());
            customer
        })
    }

    /// Selling tracked stock takes it off the shelf, like QBO does
    async fn create_invoice(&self, invoice: &Invoice) -> APIResult<Invoice> {
        self.create(|c| c.create_invoice += 1, invoice, |state, mut invoice| {
            for (item_ref, qty) in invoice.sold_items() {
                let item = state
                    .items
                    .iter_mut()
                    .find(|i| i.id.is_some() && i.id == item_ref.value);
                if let Some(item) = item {
                    let tracked = item.item_type == Some(ItemType::Inventory)
                        && item.track_qty_on_hand == Some(true);
                    if tracked {
                        item.qty_on_hand = item.qty_on_hand.map(|q| q - qty);
                        item.sync_token = Some("1".into());
                    }
                }
            }
            invoice.id = Some(state.assign_id());
            state.invoices.push(invoice.clone());
            invoice
        })
    }
}

/// Factory handing out the same fake ledger whatever the credentials
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeFactory {
    pub ledger: FakeLedger,
    pub connections: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeFactory {
    pub fn new(ledger: FakeLedger) -> Self {
        Self {
            ledger,
            connections: Arc::default(),
        }
    }

    pub fn connections(&self) -> Vec<(String, String)> {
        self.connections.lock().unwrap().clone()
    }
}

impl GatewayFactory for FakeFactory {
    fn connect(&self, realm_id: &str, access_token: &str) -> Box<dyn LedgerGateway> {
        self.connections
            .lock()
            .unwrap()
            .push((realm_id.to_string(), access_token.to_string()));
        Box::new(self.ledger.clone())
    }
}
