//! The inventory walkthrough: stock an item, sell one, look at what's left.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::{
    error::APIResult,
    gateway::LedgerGateway,
    resolver::{random_suffix, AccountResolver, InventoryAccount},
    types::{
        Account, Customer, Email, Invoice, Item, ItemType, Line, LineDetailType, QBToRef,
        SalesItemLineDetail,
    },
};

pub const STARTING_QTY: u32 = 10;
pub const SOLD_QTY: u32 = 1;
pub const SALE_AMOUNT: u32 = 100;
pub const CUSTOMER_COMPANY: &str = "ABC Corporations";
pub const CUSTOMER_EMAIL: &str = "testconceptsample@mailinator.com";

/// Accounts the sample item is booked against
#[derive(Debug, Clone)]
pub struct InventoryAccounts {
    pub income: Account,
    pub expense: Account,
    pub asset: Account,
}

impl InventoryAccounts {
    /// Resolve income, expense and asset accounts, in that order
    ///
    /// # Errors
    ///
    /// The first resolution that fails
    pub async fn resolve(
        resolver: &AccountResolver,
        gateway: &dyn LedgerGateway,
    ) -> APIResult<Self> {
        let income = resolver
            .resolve_inventory(gateway, InventoryAccount::Income)
            .await
            .into_result()?;
        let expense = resolver
            .resolve_inventory(gateway, InventoryAccount::Expense)
            .await
            .into_result()?;
        let asset = resolver
            .resolve_inventory(gateway, InventoryAccount::Asset)
            .await
            .into_result()?;
        Ok(Self {
            income,
            expense,
            asset,
        })
    }
}

/// Tracked inventory item starting with [`STARTING_QTY`] on hand
///
/// # Errors
///
/// `NoIdOnRef` if any of the accounts hasn't been persisted
pub fn inventory_item(accounts: &InventoryAccounts, start_date: NaiveDate) -> APIResult<Item> {
    Ok(Item {
        name: Some(format!("Inventory Item {}", random_suffix(5))),
        item_type: Some(ItemType::Inventory),
        inv_start_date: Some(start_date),
        qty_on_hand: Some(Decimal::from(STARTING_QTY)),
        track_qty_on_hand: Some(true),
        income_account_ref: Some(accounts.income.to_ref()?),
        expense_account_ref: Some(accounts.expense.to_ref()?),
        asset_account_ref: Some(accounts.asset.to_ref()?),
        ..Default::default()
    })
}

#[must_use]
pub fn sample_customer() -> Customer {
    Customer {
        display_name: Some(random_suffix(6)),
        company_name: Some(CUSTOMER_COMPANY.to_string()),
        primary_email_addr: Some(Email {
            address: Some(CUSTOMER_EMAIL.to_string()),
        }),
        ..Default::default()
    }
}

/// Invoice selling [`SOLD_QTY`] of `item` to `customer`
///
/// # Errors
///
/// `NoIdOnRef` if the customer or item hasn't been persisted
pub fn sale_invoice(customer: &Customer, item: &Item) -> APIResult<Invoice> {
    let line = Line {
        amount: Some(Decimal::from(SALE_AMOUNT)),
        detail_type: Some(LineDetailType::SalesItemLineDetail),
        sales_item_line_detail: Some(SalesItemLineDetail {
            item_ref: Some(item.to_ref()?),
            qty: Some(Decimal::from(SOLD_QTY)),
            unit_price: None,
        }),
        ..Default::default()
    };
    Ok(Invoice {
        customer_ref: Some(customer.to_ref()?),
        line: Some(vec![line]),
        ..Default::default()
    })
}

/// Run the whole walkthrough against `gateway`, returning the item as it
/// reads after the sale
///
/// Nothing is rolled back on failure; whatever was created before the
/// failing step stays in the ledger.
///
/// # Errors
///
/// The first gateway or reference error encountered
pub async fn run_inventory_sample(
    resolver: &AccountResolver,
    gateway: &dyn LedgerGateway,
) -> APIResult<Item> {
    let accounts = InventoryAccounts::resolve(resolver, gateway).await?;

    let item = inventory_item(&accounts, Utc::now().date_naive())?;
    let saved_item = gateway.create_item(&item).await?;

    let saved_customer = gateway.create_customer(&sample_customer()).await?;
    let invoice = sale_invoice(&saved_customer, &saved_item)?;
    gateway.create_invoice(&invoice).await?;

    let item_id = saved_item.id.as_deref().ok_or(crate::APIError::NoIdOnRead)?;
    let remaining = gateway.read_item(item_id).await?;
    log::info!(
        "Item {} has {} on hand after the sale",
        item_id,
        remaining.qty_on_hand.unwrap_or_default()
    );
    Ok(remaining)
}
