use std::future::Future;

use reqwest::{Client, Method};
use serde::Deserialize;

use crate::{error::APIResult, types::QBItem, QBContext};

use super::qb_request;

/// Largest page QBO will hand back for a single query
pub const MAX_RESULTS: usize = 1000;

pub trait QBQuery {
    /// Every object of this type matching the query, see [`qb_query_all`]
    fn query_all(
        query_str: &str,
        qb: &QBContext,
        client: &Client,
    ) -> impl Future<Output = APIResult<Vec<Self>>> + Send
    where
        Self: Sized;
}

impl<T: QBItem> QBQuery for T {
    fn query_all(
        query_str: &str,
        qb: &QBContext,
        client: &Client,
    ) -> impl Future<Output = APIResult<Vec<Self>>> + Send {
        qb_query_all(query_str, qb, client)
    }
}

/// Query QuickBooks for one page of objects matching the query string
///
/// Builds a query using the `query_str` and queries for objects of
/// type `T`. Returns up to `max_results` objects starting at the 1-based
/// `start_position`, in a `Vec` which is empty when nothing matched.
///
/// The `query_str` parameter will be placed into the query
/// like so:
/// ```ignore
///  "select * from {type_name} {query_str} STARTPOSITION {start_position} MAXRESULTS {max_results}"
/// ```
///
/// # Errors
///
/// Transport, fault or decoding errors from the request
pub async fn qb_query<T: QBItem>(
    query_str: &str,
    start_position: usize,
    max_results: usize,
    qb: &QBContext,
    client: &Client,
) -> APIResult<Vec<T>> {
    let query = build_query::<T>(query_str, start_position, max_results);
    let response: QueryResponseExt<T> = qb_request(
        qb,
        client,
        Method::GET,
        &format!("company/{}/query", qb.company_id()),
        None::<&()>,
        Some(&[("query", query.as_str())]),
    )
    .await?;

    let items = response.query_response.items;
    if items.is_empty() {
        log::warn!("Queried no items for query : {query}");
    } else {
        log::info!(
            "Successfully Queried {} {}(s) for query string : {query}",
            items.len(),
            T::name()
        );
    }
    Ok(items)
}

/// Query every page of objects matching the query string, [`MAX_RESULTS`]
/// at a time, stopping at the first short page
///
/// # Errors
///
/// The first error from any page request
pub async fn qb_query_all<T: QBItem>(
    query_str: &str,
    qb: &QBContext,
    client: &Client,
) -> APIResult<Vec<T>> {
    collect_pages(MAX_RESULTS, |start_position| {
        qb_query(query_str, start_position, MAX_RESULTS, qb, client)
    })
    .await
}

/// Fetch pages of `page_size` through `fetch_page` (called with the 1-based
/// start position) until one comes back short
pub(crate) async fn collect_pages<T, F, Fut>(
    page_size: usize,
    mut fetch_page: F,
) -> APIResult<Vec<T>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = APIResult<Vec<T>>>,
{
    let mut all = Vec::new();
    loop {
        let page = fetch_page(all.len() + 1).await?;
        let last = page.len() < page_size;
        all.extend(page);
        if last {
            return Ok(all);
        }
    }
}

pub(crate) fn build_query<T: QBItem>(
    query_str: &str,
    start_position: usize,
    max_results: usize,
) -> String {
    let query_str = query_str.trim();
    let paging = format!("STARTPOSITION {start_position} MAXRESULTS {max_results}");
    if query_str.is_empty() {
        format!("select * from {} {paging}", T::name())
    } else {
        format!("select * from {} {query_str} {paging}", T::name())
    }
}

/// Internal struct that Quickbooks returns when querying objects
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct QueryResponse<T> {
    #[serde(alias = "Item", alias = "Account", alias = "Customer", alias = "Invoice")]
    items: Vec<T>,
    #[allow(dead_code)]
    #[serde(rename = "startPosition")]
    start_position: i64,
    #[allow(dead_code)]
    #[serde(rename = "maxResults")]
    max_results: i64,
}

/// Internal struct that Quickbooks returns when querying objects
#[derive(Debug, Clone, Deserialize)]
struct QueryResponseExt<T> {
    #[serde(default, rename = "QueryResponse")]
    query_response: QueryResponse<T>,
    #[allow(dead_code)]
    #[serde(default)]
    time: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::APIError,
        types::{Account, AccountSubType, AccountType},
    };

    #[test]
    fn query_text() {
        assert_eq!(
            build_query::<Account>("", 1, MAX_RESULTS),
            "select * from Account STARTPOSITION 1 MAXRESULTS 1000"
        );
        assert_eq!(
            build_query::<Account>(" where Active = true ", 11, 10),
            "select * from Account where Active = true STARTPOSITION 11 MAXRESULTS 10"
        );
    }

    async fn pages_of(source: &[u32], page_size: usize) -> (Vec<u32>, Vec<usize>) {
        let mut starts = Vec::new();
        let fetched = collect_pages(page_size, |start| {
            starts.push(start);
            let page: Vec<u32> = source.iter().skip(start - 1).take(page_size).copied().collect();
            async move { Ok(page) }
        })
        .await
        .unwrap();
        (fetched, starts)
    }

    #[tokio::test]
    async fn paging_runs_until_a_short_page() {
        let source: Vec<u32> = (1..=5).collect();
        let (fetched, starts) = pages_of(&source, 2).await;
        assert_eq!(fetched, source);
        assert_eq!(starts, vec![1, 3, 5]);
    }

    #[tokio::test]
    async fn full_last_page_needs_one_more_request() {
        let source: Vec<u32> = (1..=4).collect();
        let (fetched, starts) = pages_of(&source, 2).await;
        assert_eq!(fetched, source);
        assert_eq!(starts, vec![1, 3, 5]);
    }

    #[tokio::test]
    async fn paging_stops_at_first_error() {
        let mut calls = 0;
        let result: APIResult<Vec<u32>> = collect_pages(2, |start| {
            calls += 1;
            async move {
                if start == 1 {
                    Ok(vec![1, 2])
                } else {
                    Err(APIError::EmptyResponse)
                }
            }
        })
        .await;
        assert!(matches!(result, Err(APIError::EmptyResponse)));
        assert_eq!(calls, 2);
    }

    #[test]
    fn query_response_of_accounts() {
        let s = r#"{
  "QueryResponse": {
    "Account": [
      { "Name": "Checking", "AccountType": "Bank", "AccountSubType": "Checking", "Id": "35" },
      { "Name": "Inventory Asset", "AccountType": "Other Current Asset", "AccountSubType": "Inventory", "Id": "81" }
    ],
    "startPosition": 1,
    "maxResults": 2
  },
  "time": "2024-03-01T10:00:00.000-08:00"
}"#;
        let resp: QueryResponseExt<Account> = serde_json::from_str(s).unwrap();
        let items = resp.query_response.items;
        assert_eq!(items.len(), 2);
        assert!(items[1].is_kind(&AccountType::OtherCurrentAsset, &AccountSubType::Inventory));
    }

    #[test]
    fn empty_query_response() {
        let s = r#"{"QueryResponse": {}, "time": "2024-03-01T10:00:00.000-08:00"}"#;
        let resp: QueryResponseExt<Account> = serde_json::from_str(s).unwrap();
        assert!(resp.query_response.items.is_empty());
    }
}
