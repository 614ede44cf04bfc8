use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{NtRef, QBCreatable, QBToRef};

/// Chart-of-accounts entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Account {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_account: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<AccountClassification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_sub_type: Option<AccountSubType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_balance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_balance_with_sub_accounts: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_ref: Option<NtRef>,
}

impl Account {
    /// Whether this account has exactly the given type and subtype
    #[must_use]
    pub fn is_kind(&self, account_type: &AccountType, sub_type: &AccountSubType) -> bool {
        self.account_type.as_ref() == Some(account_type)
            && self.account_sub_type.as_ref() == Some(sub_type)
    }
}

impl QBCreatable for Account {
    fn can_create(&self) -> bool {
        self.name.is_some() && (self.account_type.is_some() || self.account_sub_type.is_some())
    }
}

impl QBToRef for Account {
    fn ref_name(&self) -> Option<&String> {
        self.name.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    Bank,
    #[serde(rename = "Other Current Asset")]
    OtherCurrentAsset,
    #[serde(rename = "Fixed Asset")]
    FixedAsset,
    #[serde(rename = "Other Asset")]
    OtherAsset,
    #[serde(rename = "Accounts Receivable")]
    AccountsReceivable,
    Equity,
    Expense,
    #[serde(rename = "Other Expense")]
    OtherExpense,
    #[serde(rename = "Cost of Goods Sold")]
    CostOfGoodsSold,
    #[serde(rename = "Accounts Payable")]
    AccountsPayable,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Long Term Liability")]
    LongTermLiability,
    #[serde(rename = "Other Current Liability")]
    OtherCurrentLiability,
    Income,
    #[serde(rename = "Other Income")]
    OtherIncome,
    #[serde(untagged)]
    Other(String),
}

impl AccountType {
    /// Top-level classification QBO files this type under
    #[must_use]
    pub fn classification(&self) -> Option<AccountClassification> {
        use AccountType as T;
        let class = match self {
            T::Bank
            | T::OtherCurrentAsset
            | T::FixedAsset
            | T::OtherAsset
            | T::AccountsReceivable => AccountClassification::Asset,
            T::Equity => AccountClassification::Equity,
            T::Expense | T::OtherExpense | T::CostOfGoodsSold => AccountClassification::Expense,
            T::AccountsPayable
            | T::CreditCard
            | T::LongTermLiability
            | T::OtherCurrentLiability => AccountClassification::Liability,
            T::Income | T::OtherIncome => AccountClassification::Revenue,
            T::Other(_) => return None,
        };
        Some(class)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountClassification {
    Asset,
    Equity,
    Expense,
    Liability,
    Revenue,
}

/// Detail type of an account. Only the ones this crate cares about are
/// spelled out; anything else QBO sends is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountSubType {
    SalesOfProductIncome,
    ServiceFeeIncome,
    DiscountsRefundsGiven,
    SuppliesMaterialsCogs,
    CostOfLaborCos,
    Inventory,
    UndepositedFunds,
    Checking,
    Savings,
    AccountsReceivable,
    AccountsPayable,
    #[serde(untagged)]
    Other(String),
}
