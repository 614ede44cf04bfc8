use std::future::Future;

use reqwest::{Client, Method};

use crate::{error::APIResult, types::QBItem, QBContext};

use super::{qb_request, QBResponse};

pub trait QBRead {
    fn get(id: &str, qb: &QBContext, client: &Client) -> impl Future<Output = APIResult<Self>> + Send
    where
        Self: Sized;
}

impl<T: QBItem> QBRead for T {
    fn get(id: &str, qb: &QBContext, client: &Client) -> impl Future<Output = APIResult<Self>> + Send {
        qb_get_single(id, qb, client)
    }
}

/// Retrieves an object by ID from quickbooks context
///
/// # Errors
///
/// Transport, fault or decoding errors from the request, or
/// `EmptyResponse` if the envelope held no object
pub async fn qb_get_single<T: QBItem>(id: &str, qb: &QBContext, client: &Client) -> APIResult<T> {
    let response: QBResponse<T> = qb_request(
        qb,
        client,
        Method::GET,
        &format!("company/{}/{}/{}", qb.company_id(), T::qb_id(), id),
        None::<&()>,
        None,
    )
    .await?;
    let object = response.into_object()?;

    log::info!("Successfully Read {} object with ID : {}", T::name(), id);

    Ok(object)
}
