//! Find-or-create resolution of chart-of-accounts entries.
//!
//! The ledger is scanned for the first account with the requested type and
//! subtype; when none exists a default one is created. Within this process
//! resolution is serialized per realm, so two requests for the same books
//! can't both miss and both create. Separate processes can still race.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use rand::{distributions::Alphanumeric, Rng};
use rust_decimal::Decimal;

use crate::{
    error::{APIError, APIResult},
    gateway::LedgerGateway,
    types::{Account, AccountSubType, AccountType, NtRef},
};

const NAME_SUFFIX_LEN: usize = 5;

/// Outcome of resolving an account
#[derive(Debug)]
pub enum AccountResolution {
    /// An existing account already matched
    Found(Account),
    /// Nothing matched, so a default account was created
    Created(Account),
    Failed(APIError),
}

impl AccountResolution {
    /// # Errors
    ///
    /// The gateway error if resolution failed
    pub fn into_result(self) -> APIResult<Account> {
        match self {
            AccountResolution::Found(account) | AccountResolution::Created(account) => Ok(account),
            AccountResolution::Failed(e) => Err(e),
        }
    }

    #[must_use]
    pub fn was_created(&self) -> bool {
        matches!(self, AccountResolution::Created(_))
    }
}

/// Accounts an inventory item has to point at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryAccount {
    Income,
    Expense,
    Asset,
}

impl InventoryAccount {
    #[must_use]
    pub fn account_type(self) -> AccountType {
        match self {
            InventoryAccount::Income => AccountType::Income,
            InventoryAccount::Expense => AccountType::CostOfGoodsSold,
            InventoryAccount::Asset => AccountType::OtherCurrentAsset,
        }
    }

    #[must_use]
    pub fn sub_type(self) -> AccountSubType {
        match self {
            InventoryAccount::Income => AccountSubType::SalesOfProductIncome,
            InventoryAccount::Expense => AccountSubType::SuppliesMaterialsCogs,
            InventoryAccount::Asset => AccountSubType::Inventory,
        }
    }
}

/// Prefix for the name of a freshly created account of this type
#[must_use]
pub fn name_prefix(account_type: &AccountType) -> &'static str {
    match account_type {
        AccountType::Income => "Income",
        AccountType::CostOfGoodsSold => "Expense",
        AccountType::OtherCurrentAsset => "Other Current Asset",
        _ => "Account",
    }
}

pub(crate) fn random_suffix(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Account with the defaults used when the ledger has no match
#[must_use]
pub fn default_account(account_type: &AccountType, sub_type: &AccountSubType) -> Account {
    let name = format!(
        "{} {}",
        name_prefix(account_type),
        random_suffix(NAME_SUFFIX_LEN)
    );
    Account {
        fully_qualified_name: Some(name.clone()),
        name: Some(name),
        sub_account: Some(false),
        active: Some(true),
        classification: account_type.classification(),
        account_type: Some(account_type.clone()),
        account_sub_type: Some(sub_type.clone()),
        current_balance: Some(Decimal::ZERO),
        current_balance_with_sub_accounts: Some(Decimal::ZERO),
        currency_ref: Some(NtRef::new("USD", "United States Dollar")),
        ..Default::default()
    }
}

/// Scan the ledger for an account of the given kind, creating one if needed
///
/// The first match in ledger order wins. Which account that is when several
/// match depends entirely on the order the ledger lists them in.
pub async fn resolve_account(
    gateway: &dyn LedgerGateway,
    account_type: &AccountType,
    sub_type: &AccountSubType,
) -> AccountResolution {
    let accounts = match gateway.list_accounts().await {
        Ok(accounts) => accounts,
        Err(e) => return AccountResolution::Failed(e),
    };

    if let Some(found) = accounts
        .into_iter()
        .find(|a| a.is_kind(account_type, sub_type))
    {
        log::debug!(
            "Using existing account {} for {account_type:?}/{sub_type:?}",
            found.id.as_deref().unwrap_or_default()
        );
        return AccountResolution::Found(found);
    }

    let account = default_account(account_type, sub_type);
    match gateway.create_account(&account).await {
        Ok(created) if created.id.is_some() => {
            log::info!(
                "Created account {} for {account_type:?}/{sub_type:?}",
                created.name.as_deref().unwrap_or_default()
            );
            AccountResolution::Created(created)
        }
        Ok(_) => AccountResolution::Failed(APIError::NoIdOnRef),
        Err(e) => AccountResolution::Failed(e),
    }
}

type RealmLocks = Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>;

/// Serializes account resolution per realm
///
/// A realm's lock lives in the map only while some resolution holds or
/// waits on it, so realm ids that come and go don't pile up.
#[derive(Debug, Clone, Default)]
pub struct AccountResolver {
    locks: Arc<RealmLocks>,
}

/// Claim on a realm's lock, dropping the map entry with the last claim
struct RealmLease<'a> {
    locks: &'a RealmLocks,
    realm_id: String,
    lock: Arc<tokio::sync::Mutex<()>>,
}

impl Drop for RealmLease<'_> {
    fn drop(&mut self) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // the map's copy and ours
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.realm_id);
        }
    }
}

impl AccountResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lease(&self, realm_id: &str) -> RealmLease<'_> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        let lock = locks.entry(realm_id.to_string()).or_default().clone();
        RealmLease {
            locks: &self.locks,
            realm_id: realm_id.to_string(),
            lock,
        }
    }

    #[cfg(test)]
    fn tracked_realms(&self) -> usize {
        self.locks.lock().unwrap().len()
    }

    /// [`resolve_account`], holding the realm's lock from scan to create
    pub async fn resolve(
        &self,
        gateway: &dyn LedgerGateway,
        account_type: &AccountType,
        sub_type: &AccountSubType,
    ) -> AccountResolution {
        let lease = self.lease(gateway.realm_id());
        let _guard = lease.lock.lock().await;
        resolve_account(gateway, account_type, sub_type).await
    }

    pub async fn resolve_inventory(
        &self,
        gateway: &dyn LedgerGateway,
        kind: InventoryAccount,
    ) -> AccountResolution {
        self.resolve(gateway, &kind.account_type(), &kind.sub_type())
            .await
    }
}
