//! # Rhapsody REST layer
//!
//! Thin, typed access to the Rhapsody (Napster) REST API. [`RhapsodyApi`]
//! owns the reqwest client and the base URL and knows how to send a request
//! and turn the response into either a decoded record or an [`SdkError`].
//! It carries no authorization state: every endpoint takes the header value
//! it needs, which keeps token handling in
//! [`TokenManager`](crate::management::TokenManager).
//!
//! Endpoints are grouped by API area:
//!
//! - [`auth`] - password and refresh grants (`/oauth/*`)
//! - [`metadata`] - albums, artists, genres and new releases (`/v1/albums`, ...)
//! - [`member`] - account, library and charts (`/v1/me/*`)
//!
//! ## Failure mapping
//!
//! - non-2xx status → [`SdkError::Http`], reason enriched with the `message`
//!   of a JSON error body
//! - no response at all → [`SdkError::Transport`]
//! - 2xx with an unexpected body → [`SdkError::Decode`]
//!
//! Nothing is retried.

pub mod auth;
pub mod member;
pub mod metadata;

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use reqwest::{Client, RequestBuilder, Response, Url, header::AUTHORIZATION};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::error::{Result, SdkError};

/// Query parameters of a GET request.
///
/// `pretty` is always present; optional parameters are only added when set.
#[derive(Debug, Clone)]
pub struct Query(Vec<(&'static str, String)>);

impl Query {
    fn new(pretty: bool) -> Self {
        Self(vec![("pretty", pretty.to_string())])
    }

    pub fn opt<V: ToString>(mut self, key: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.0.push((key, value.to_string()));
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Low-level HTTP client for the Rhapsody API.
///
/// Cheap to clone; clones share the connection pool and the verbose flag.
#[derive(Debug, Clone)]
pub struct RhapsodyApi {
    client: Client,
    base_url: Url,
    pretty: Arc<AtomicBool>,
}

impl RhapsodyApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SdkError::Configuration(format!("invalid API URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SdkError::Configuration(format!(
                "API URL {base_url} cannot be used as a base"
            )));
        }

        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            pretty: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Asks the server for pretty printed JSON and logs response bodies at
    /// debug level.
    pub fn set_pretty(&self, enabled: bool) {
        self.pretty.store(enabled, Ordering::Relaxed);
    }

    pub fn pretty(&self) -> bool {
        self.pretty.load(Ordering::Relaxed)
    }

    /// A fresh query carrying the current `pretty` flag.
    pub fn query(&self) -> Query {
        Query::new(self.pretty())
    }

    /// Joins path segments onto the base URL, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // checked in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        bearer: &str,
        query: Query,
    ) -> Result<T> {
        let url = self.endpoint(segments);
        debug!("GET {} with {} params", url, query.len());

        let request = self
            .client
            .get(url)
            .header(AUTHORIZATION, bearer)
            .query(&query.0);
        self.send_json(request).await
    }

    pub(crate) async fn post_json<B, T>(
        &self,
        segments: &[&str],
        authorization: Option<&str>,
        body: &B,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        debug!("POST {}", url);

        let mut request = self.client.post(url).json(body);
        if let Some(authorization) = authorization {
            request = request.header(AUTHORIZATION, authorization);
        }
        self.send_json(request).await
    }

    pub(crate) async fn post_form(
        &self,
        segments: &[&str],
        bearer: &str,
        form: &[(&str, &str)],
    ) -> Result<()> {
        let url = self.endpoint(segments);
        debug!("POST {} with {} fields", url, form.len());

        let request = self
            .client
            .post(url)
            .header(AUTHORIZATION, bearer)
            .form(form);
        self.send_empty(request).await
    }

    pub(crate) async fn delete(&self, segments: &[&str], bearer: &str) -> Result<()> {
        let url = self.endpoint(segments);
        debug!("DELETE {}", url);

        let request = self.client.delete(url).header(AUTHORIZATION, bearer);
        self.send_empty(request).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let body = self.successful_body(response).await?;

        serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse response: {}", e);
            SdkError::Decode(e)
        })
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<()> {
        let response = request.send().await?;
        self.successful_body(response).await?;
        Ok(())
    }

    /// Returns the body of a 2xx response, or the matching HTTP error.
    async fn successful_body(&self, response: Response) -> Result<String> {
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("API error ({}): {}", status.as_u16(), body);
            return Err(SdkError::from_response(status.as_u16(), &body));
        }

        let body = response.text().await?;
        if self.pretty() {
            debug!("Response body: {}", body);
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_always_carries_pretty_flag() {
        let api = RhapsodyApi::new("https://api.rhapsody.com").unwrap();
        let query = api.query();
        assert_eq!(query.get("pretty"), Some("false"));

        api.set_pretty(true);
        assert_eq!(api.query().get("pretty"), Some("true"));
    }

    #[test]
    fn absent_optional_params_are_omitted() {
        let api = RhapsodyApi::new("https://api.rhapsody.com").unwrap();
        let query = api
            .query()
            .opt("catalog", Some("US"))
            .opt("limit", None::<u32>);
        assert_eq!(query.get("catalog"), Some("US"));
        assert_eq!(query.get("limit"), None);
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn endpoint_joins_and_encodes_segments() {
        let api = RhapsodyApi::new("https://api.rhapsody.com/").unwrap();
        let url = api.endpoint(&["v1", "albums", "Alb.1"]);
        assert_eq!(url.as_str(), "https://api.rhapsody.com/v1/albums/Alb.1");

        let url = api.endpoint(&["v1", "artists", "a/b"]);
        assert_eq!(url.as_str(), "https://api.rhapsody.com/v1/artists/a%2Fb");
    }

    #[test]
    fn invalid_base_url_is_a_configuration_error() {
        let err = RhapsodyApi::new("not a url").unwrap_err();
        assert!(matches!(err, SdkError::Configuration(_)));
    }

    #[test]
    fn clones_share_the_verbose_flag() {
        let api = RhapsodyApi::new("https://api.rhapsody.com").unwrap();
        let clone = api.clone();
        api.set_pretty(true);
        assert!(clone.pretty());
    }
}
