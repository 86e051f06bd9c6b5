//! Bookstack REST API client.
//!
//! Provides a sync HTTP client for the Bookstack REST API with token
//! authentication.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::http::Response;
use ureq::typestate::WithBody;
use ureq::{Agent, Body, RequestBuilder};

use super::Client;
use super::envelope::{decode_json, http_error_message, unwrap_data};
use crate::credentials::Credentials;
use crate::endpoint::{ApiPath, Endpoint, Listing, RequestBody, RequestKind};
use crate::error::BookstackError;
use crate::types::{Book, Chapter, Page, Shelf, SystemInfo};

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Largest page size Bookstack accepts for listings.
const LISTING_PAGE_SIZE: usize = 500;

/// Bookstack REST API client.
pub struct RemoteClient {
    agent: Agent,
    credentials: Credentials,
    auth_header: String,
}

impl RemoteClient {
    /// Create client from explicit credentials.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            auth_header: credentials.authorization(),
            credentials,
        }
    }

    /// Create client from the `BOOKSTACK_*` environment variables.
    ///
    /// Missing variables are not an error here; see [`Credentials::from_env`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(Credentials::from_env())
    }

    /// Instance base URL.
    pub fn base_url(&self) -> &str {
        &self.credentials.base_url
    }

    /// Send an authenticated request and return the raw response.
    ///
    /// Bodies are ignored for `GET` and `DELETE`.
    ///
    /// # Errors
    ///
    /// - [`BookstackError::MissingBaseUrl`] before any network traffic if no base URL is set
    /// - [`BookstackError::Request`] on transport failure
    /// - [`BookstackError::Http`] for status codes >= 400
    pub fn make_request(
        &self,
        kind: RequestKind,
        endpoint: &impl ApiPath,
        body: RequestBody,
    ) -> Result<Response<Body>, BookstackError> {
        if self.credentials.base_url.is_empty() {
            return Err(BookstackError::MissingBaseUrl);
        }

        let url = format!("{}{}", self.credentials.base_url, endpoint.path());
        debug!("{kind} {url}");

        let response = match kind {
            RequestKind::Get => self.authorized(self.agent.get(&url)).call()?,
            RequestKind::Delete => self.authorized(self.agent.delete(&url)).call()?,
            RequestKind::Post => send(self.authorized(self.agent.post(&url)), body)?,
            RequestKind::Put => send(self.authorized(self.agent.put(&url)), body)?,
        };

        let status = response.status().as_u16();
        if status >= 400 {
            let error_body = response.into_body().read_to_vec().unwrap_or_default();
            return Err(BookstackError::Http {
                message: http_error_message(status, &error_body),
                status,
                url,
            });
        }

        Ok(response)
    }

    /// `GET` an endpoint and return the payload under `data`.
    ///
    /// A bare JSON list is returned unchanged.
    ///
    /// # Errors
    ///
    /// Besides the [`make_request`](Self::make_request) errors:
    /// - [`BookstackError::Decode`] if the body is not UTF-8
    /// - [`BookstackError::Parse`] if the body is not JSON
    /// - [`BookstackError::Api`] if the body is an error payload
    /// - [`BookstackError::UnexpectedEnvelope`] for any other shape
    pub fn get(&self, endpoint: &impl ApiPath) -> Result<serde_json::Value, BookstackError> {
        let response = self.make_request(RequestKind::Get, endpoint, RequestBody::None)?;
        unwrap_data(read_json(response)?)
    }

    /// `POST` JSON and return the created record.
    pub fn post(
        &self,
        endpoint: &impl ApiPath,
        json: serde_json::Value,
    ) -> Result<serde_json::Value, BookstackError> {
        let response = self.make_request(RequestKind::Post, endpoint, RequestBody::Json(json))?;
        read_json(response)
    }

    /// `PUT` JSON and return the updated record.
    pub fn put(
        &self,
        endpoint: &impl ApiPath,
        json: serde_json::Value,
    ) -> Result<serde_json::Value, BookstackError> {
        let response = self.make_request(RequestKind::Put, endpoint, RequestBody::Json(json))?;
        read_json(response)
    }

    /// `DELETE` a record.
    pub fn delete(&self, endpoint: &impl ApiPath) -> Result<(), BookstackError> {
        self.make_request(RequestKind::Delete, endpoint, RequestBody::None)?;
        Ok(())
    }

    /// Fetch every record of a collection, one listing page at a time.
    ///
    /// Instances may cap the page size below what is asked for, so paging
    /// follows the reported `total`. Without one, a short page ends it.
    pub fn list<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<Vec<T>, BookstackError> {
        let mut records = Vec::new();
        let mut offset = 0;

        loop {
            let listing = Listing {
                endpoint,
                count: LISTING_PAGE_SIZE,
                offset,
            };
            let response = self.make_request(RequestKind::Get, &listing, RequestBody::None)?;
            let body = read_json(response)?;
            let total = body
                .get("total")
                .and_then(serde_json::Value::as_u64)
                .map(|total| usize::try_from(total).unwrap_or(usize::MAX));

            let page: Vec<T> = serde_json::from_value(unwrap_data(body)?)?;
            let fetched = page.len();
            records.extend(page);
            offset += fetched;

            let done = match total {
                Some(total) => offset >= total,
                None => fetched < LISTING_PAGE_SIZE,
            };
            if fetched == 0 || done {
                break;
            }
        }

        debug!("Fetched {} records from {}", records.len(), endpoint.as_str());
        Ok(records)
    }

    /// Instance version information.
    pub fn system_info(&self) -> Result<SystemInfo, BookstackError> {
        let response =
            self.make_request(RequestKind::Get, &Endpoint::SystemInfo, RequestBody::None)?;
        Ok(serde_json::from_value(read_json(response)?)?)
    }

    fn authorized<B>(&self, request: RequestBuilder<B>) -> RequestBuilder<B> {
        request
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
    }
}

impl Client for RemoteClient {
    fn shelves(&self) -> Result<Vec<Shelf>, BookstackError> {
        self.list(Endpoint::Shelves)
    }

    fn books(&self) -> Result<Vec<Book>, BookstackError> {
        self.list(Endpoint::Books)
    }

    fn chapters(&self) -> Result<Vec<Chapter>, BookstackError> {
        self.list(Endpoint::Chapters)
    }

    fn pages(&self) -> Result<Vec<Page>, BookstackError> {
        self.list(Endpoint::Pages)
    }
}

fn send(
    request: RequestBuilder<WithBody>,
    body: RequestBody,
) -> Result<Response<Body>, ureq::Error> {
    match body {
        RequestBody::None => request.send_empty(),
        RequestBody::Raw(bytes) => request.send(&bytes[..]),
        RequestBody::Json(json) => request.send_json(&json),
    }
}

fn read_json(response: Response<Body>) -> Result<serde_json::Value, BookstackError> {
    let bytes = response.into_body().read_to_vec()?;
    decode_json(&bytes)
}
