use std::future::Future;

use reqwest::{Client, Method};

use crate::{
    error::{APIError, APIResult},
    types::{QBCreatable, QBItem},
    QBContext,
};

use super::{qb_request, QBResponse};

pub trait QBCreate {
    fn create(&self, qb: &QBContext, client: &Client) -> impl Future<Output = APIResult<Self>> + Send
    where
        Self: Sized;
}

impl<T: QBItem + QBCreatable> QBCreate for T {
    fn create(&self, qb: &QBContext, client: &Client) -> impl Future<Output = APIResult<Self>> + Send {
        qb_create(self, qb, client)
    }
}

/// Creates the given item using the context given, but first
/// checks if the item is suitable to be created.
///
/// # Errors
///
/// `CreateMissingItems` if required fields are missing, otherwise any
/// transport, fault or decoding error from the request
pub async fn qb_create<T: QBItem + QBCreatable>(
    item: &T,
    qb: &QBContext,
    client: &Client,
) -> APIResult<T> {
    if !item.can_create() {
        return Err(APIError::CreateMissingItems);
    }

    let response: QBResponse<T> = qb_request(
        qb,
        client,
        Method::POST,
        &format!("company/{}/{}", qb.company_id(), T::qb_id()),
        Some(item),
        None,
    )
    .await?;
    let object = response.into_object()?;

    log::info!(
        "Successfully created {} with ID of {}",
        T::name(),
        object
            .id()
            .map_or("No ID on QB object after creation", String::as_str)
    );

    Ok(object)
}
