//! Typed `QuickBooks` Online entities used by the inventory flow.
//!
//! Every field is optional because QBO omits whatever isn't set, and sparse
//! objects are what we send on create. Field names follow the QBO wire
//! format (`PascalCase`, `Id`, `SyncToken`).

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{APIError, APIResult};

mod account;
mod customer;
mod invoice;
mod item;

pub use account::{Account, AccountClassification, AccountSubType, AccountType};
pub use customer::{Customer, Email};
pub use invoice::{Invoice, Line, LineDetailType, SalesItemLineDetail};
pub use item::{Item, ItemType};

/// Common behaviour of every object the QBO API hands back
pub trait QBItem:
    Serialize + DeserializeOwned + std::fmt::Debug + Clone + Default + Send + Sync
{
    fn id(&self) -> Option<&String>;
    /// Entity name as it appears in queries and response envelopes
    fn name() -> &'static str;
    /// Lowercase entity name used in endpoint paths
    fn qb_id() -> &'static str;
}

/// Objects that can be checked for the minimum fields QBO requires on create
pub trait QBCreatable {
    fn can_create(&self) -> bool;
}

/// Objects that can be pointed at from another object
pub trait QBToRef: QBItem {
    /// Display name carried in the reference
    fn ref_name(&self) -> Option<&String>;

    /// Build a reference to this object
    ///
    /// # Errors
    ///
    /// `NoIdOnRef` if the object hasn't been persisted yet
    fn to_ref(&self) -> APIResult<NtRef> {
        let id = self.id().ok_or(APIError::NoIdOnRef)?;
        Ok(NtRef {
            value: Some(id.clone()),
            name: self.ref_name().cloned(),
        })
    }
}

/// Lightweight (id, name) pointer from one record to another
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NtRef {
    #[serde(alias = "Value", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(alias = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl NtRef {
    #[must_use]
    pub fn new(value: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            name: Some(name.into()),
        }
    }
}

macro_rules! impl_qb_item {
    ($($ty:ident, $name:literal, $qb_id:literal;)+) => {
        $(
            impl QBItem for $ty {
                fn id(&self) -> Option<&String> {
                    self.id.as_ref()
                }

                fn name() -> &'static str {
                    $name
                }

                fn qb_id() -> &'static str {
                    $qb_id
                }
            }
        )+
    };
}

impl_qb_item!(
    Account, "Account", "account";
    Item, "Item", "item";
    Customer, "Customer", "customer";
    Invoice, "Invoice", "invoice";
);
