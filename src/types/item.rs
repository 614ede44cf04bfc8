use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{NtRef, QBCreatable, QBToRef};

/// Product or service on the item list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty_on_hand: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_qty_on_hand: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inv_start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_account_ref: Option<NtRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_account_ref: Option<NtRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_account_ref: Option<NtRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Inventory,
    Service,
    NonInventory,
    Group,
    Category,
}

impl QBCreatable for Item {
    fn can_create(&self) -> bool {
        if self.name.is_none() {
            return false;
        }
        match self.item_type {
            // Tracked stock needs all three accounts and a starting count
            Some(ItemType::Inventory) => {
                self.income_account_ref.is_some()
                    && self.expense_account_ref.is_some()
                    && self.asset_account_ref.is_some()
                    && self.qty_on_hand.is_some()
                    && self.inv_start_date.is_some()
            }
            _ => self.income_account_ref.is_some() || self.expense_account_ref.is_some(),
        }
    }
}

impl QBToRef for Item {
    fn ref_name(&self) -> Option<&String> {
        self.name.as_ref()
    }
}
