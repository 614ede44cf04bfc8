use reqwest::{
    header::{self, HeaderMap, HeaderValue, InvalidHeaderValue},
    Client, Method, Request,
};
use serde::Serialize;
use url::Url;

use crate::{APIResult, Environment};

mod context;
pub use context::QBContext;

const MINOR_VERSION: &str = "75";

pub(crate) fn build_headers(
    content_type: &str,
    access_token: &str,
) -> Result<HeaderMap, InvalidHeaderValue> {
    let bearer = HeaderValue::from_str(&format!("Bearer {access_token}"))?;
    let mut headers = HeaderMap::new();
    headers.append(header::AUTHORIZATION, bearer);
    headers.append(header::CONTENT_TYPE, HeaderValue::from_str(content_type)?);
    headers.append(header::ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}

pub(crate) fn build_request<B: Serialize>(
    method: Method,
    path: &str,
    body: Option<&B>,
    query: Option<&[(&str, &str)]>,
    qb: &QBContext,
    client: &Client,
) -> APIResult<Request> {
    let url = build_url(qb.environment(), path, query)?;

    // A token with bytes that can't go in a header can never authenticate
    let headers = build_headers("application/json", &qb.access_token)
        .map_err(|e| crate::APIError::BadRequest(format!("Invalid access token header: {e}")))?;

    let mut request = client.request(method.clone(), url).headers(headers);

    if method != Method::GET && method != Method::DELETE {
        if let Some(body) = body {
            request = request.json(body);
        }
    }

    let request = request.build()?;

    log::debug!(
        "Built Request with params: {}-{}-{}",
        path,
        method,
        if body.is_some() {
            "With JSON Body"
        } else {
            "No JSON Body"
        },
    );

    Ok(request)
}

pub(crate) fn build_url(
    environment: Environment,
    path: &str,
    query: Option<&[(&str, &str)]>,
) -> APIResult<Url> {
    let mut url = Url::parse(environment.endpoint_url())?.join(path)?;
    url.query_pairs_mut()
        .extend_pairs(query.unwrap_or_default())
        .append_pair("minorversion", MINOR_VERSION);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_query_and_minor_version() {
        let url = build_url(
            Environment::SANDBOX,
            "company/123/query",
            Some(&[("query", "select * from Account MAXRESULTS 1000")]),
        )
        .unwrap();
        assert_eq!(url.host_str(), Some("sandbox-quickbooks.api.intuit.com"));
        assert_eq!(url.path(), "/v3/company/123/query");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                (
                    "query".to_string(),
                    "select * from Account MAXRESULTS 1000".to_string()
                ),
                ("minorversion".to_string(), "75".to_string()),
            ]
        );
    }

    #[test]
    fn url_without_query_still_pins_minor_version() {
        let url = build_url(Environment::PRODUCTION, "company/9/item/4", None).unwrap();
        assert_eq!(
            url.as_str(),
            "https://quickbooks.api.intuit.com/v3/company/9/item/4?minorversion=75"
        );
    }

    #[test]
    fn headers_carry_bearer_token() {
        let headers = build_headers("application/json", "abc").unwrap();
        assert_eq!(headers[header::AUTHORIZATION], "Bearer abc");
        assert_eq!(headers[header::ACCEPT], "application/json");
        assert!(build_headers("application/json", "bad\ntoken").is_err());
    }

    #[test]
    fn get_requests_have_no_body() {
        let qb = QBContext::new(Environment::SANDBOX, "1".into(), "tok".into());
        let client = Client::new();
        let request =
            build_request(Method::GET, "company/1/item/2", Some(&()), None, &qb, &client).unwrap();
        assert!(request.body().is_none());
        assert_eq!(request.method(), Method::GET);
    }
}
