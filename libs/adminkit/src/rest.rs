//! REST abstraction shared by every SDK proxy.
//!
//! The SDKs never open connections themselves. The host application injects
//! a [`RestService`] (backed by whatever HTTP stack it already uses) and the
//! proxies describe their calls as [`RestRequest`] values sent through a
//! [`RestClient`] bound to one configured API.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::{ConfigError, EnvironmentConfig};
use crate::error::RestError;

/// Transport used by all proxies.
///
/// Implementations send the request and return the decoded JSON body:
/// - an empty body is `Value::Null`;
/// - a non-JSON text body is `Value::String`;
/// - a non-success status is `RestError::Remote` (see [`RestError::from_response`]).
#[async_trait]
pub trait RestService: Send + Sync {
    async fn request(&self, request: RestRequest) -> Result<Value, RestError>;
}

/// A single REST call: method, URL, query parameters and optional JSON body.
///
/// Query parameters are kept apart from the URL; absent optional values are
/// simply not added (see [`RestRequest::param_opt`]).
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct RestRequest {
    pub method: Method,
    pub url: String,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RestRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Add a query parameter.
    pub fn param(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.params.push((name.to_owned(), value.to_string()));
        self
    }

    /// Add a query parameter only when a value is present.
    pub fn param_opt<V: fmt::Display>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    /// Set the JSON body.
    ///
    /// # Errors
    /// Returns `RestError::Encode` if the body cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, RestError> {
        self.body = Some(serde_json::to_value(body).map_err(RestError::Encode)?);
        Ok(self)
    }

    /// Value of a query parameter, if set.
    #[must_use]
    pub fn query(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Absolute URL including the encoded query string.
    ///
    /// # Errors
    /// Returns the parse error if `url` is not absolute.
    pub fn full_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.url)?;
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(
                self.params
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str())),
            );
        }
        Ok(url)
    }
}

/// Percent-encode a value used as one URL path segment.
#[must_use]
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// [`RestService`] bound to the base URL of one named API.
///
/// Cheap to clone; proxies keep their own copy.
#[derive(Clone)]
pub struct RestClient {
    service: Arc<dyn RestService>,
    api_name: Arc<str>,
    base_url: Arc<str>,
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("api_name", &self.api_name)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl RestClient {
    /// Bind `service` to the API named `api_name` in `env`.
    ///
    /// # Errors
    /// Returns `ConfigError` if the API (or the default API) is not configured
    /// or its URL is invalid.
    pub fn for_api(
        service: Arc<dyn RestService>,
        env: &EnvironmentConfig,
        api_name: &str,
    ) -> Result<Self, ConfigError> {
        let base_url = env.base_url(api_name)?;
        Ok(Self {
            service,
            api_name: Arc::from(api_name),
            base_url: Arc::from(base_url.as_str().trim_end_matches('/')),
        })
    }

    #[must_use]
    pub fn api_name(&self) -> &str {
        &self.api_name
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resolve(&self, mut request: RestRequest) -> RestRequest {
        if !request.url.contains("://") {
            let path = request.url.trim_start_matches('/');
            request.url = format!("{}/{path}", self.base_url);
        }
        request
    }

    async fn execute(&self, request: RestRequest) -> Result<(String, Value), RestError> {
        let request = self.resolve(request);
        let url = request.url.clone();
        tracing::debug!(
            api = %self.api_name,
            method = %request.method,
            url = %url,
            params = request.params.len(),
            "sending request"
        );
        match self.service.request(request).await {
            Ok(body) => Ok((url, body)),
            Err(err) => {
                tracing::debug!(api = %self.api_name, url = %url, error = %err, "request failed");
                Err(err)
            }
        }
    }

    /// Send and decode the JSON body into `T`.
    ///
    /// # Errors
    /// Returns the transport error, or `RestError::Decode` on a body mismatch.
    pub async fn send<T: DeserializeOwned>(&self, request: RestRequest) -> Result<T, RestError> {
        let (url, body) = self.execute(request).await?;
        serde_json::from_value(body).map_err(|source| RestError::Decode { url, source })
    }

    /// Send and discard the body.
    ///
    /// # Errors
    /// Returns the transport error.
    pub async fn send_unit(&self, request: RestRequest) -> Result<(), RestError> {
        self.execute(request).await.map(|_| ())
    }

    /// Send and read a plain-text body; an empty body is `None`.
    ///
    /// # Errors
    /// Returns the transport error, or `RestError::Decode` if the body is neither text nor empty.
    pub async fn send_text(&self, request: RestRequest) -> Result<Option<String>, RestError> {
        let (url, body) = self.execute(request).await?;
        match body {
            Value::Null => Ok(None),
            Value::String(text) if text.is_empty() => Ok(None),
            Value::String(text) => Ok(Some(text)),
            other => serde_json::from_value::<String>(other)
                .map(Some)
                .map_err(|source| RestError::Decode { url, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockRestService;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
    }

    fn client(mock: &Arc<MockRestService>) -> RestClient {
        let env = EnvironmentConfig::with_default_api("https://api.example.com/");
        RestClient::for_api(mock.clone(), &env, "Identity").unwrap()
    }

    #[test]
    fn optional_params_are_omitted() {
        let request = RestRequest::get("/api/items")
            .param_opt("filter", None::<&str>)
            .param_opt("skipCount", Some(10))
            .param("maxResultCount", 5);

        assert_eq!(request.params.len(), 2);
        assert_eq!(request.query("filter"), None);
        assert_eq!(request.query("skipCount"), Some("10"));
    }

    #[test]
    fn full_url_encodes_query() {
        let request = RestRequest::get("https://api.example.com/api/items")
            .param("filter", "a b&c");
        assert_eq!(
            request.full_url().unwrap().as_str(),
            "https://api.example.com/api/items?filter=a+b%26c"
        );
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        assert_eq!(path_segment("john doe/admin"), "john%20doe%2Fadmin");
    }

    #[tokio::test]
    async fn relative_paths_resolve_against_base_url() {
        let mock = Arc::new(MockRestService::new());
        mock.on(Method::GET, "/api/items/1", json!({ "name": "one" }));

        let rest = client(&mock);
        assert_eq!(rest.base_url(), "https://api.example.com");
        assert_eq!(rest.api_name(), "Identity");

        let item: Item = rest.send(RestRequest::get("/api/items/1")).await.unwrap();
        assert_eq!(item.name, "one");
        assert_eq!(mock.requests()[0].url, "https://api.example.com/api/items/1");
    }

    #[tokio::test]
    async fn body_mismatch_is_a_decode_error() {
        let mock = Arc::new(MockRestService::new());
        mock.on(Method::GET, "/api/items/1", json!({ "title": 1 }));

        let err = client(&mock)
            .send::<Item>(RestRequest::get("/api/items/1"))
            .await
            .unwrap_err();
        assert!(matches!(err, RestError::Decode { url, .. } if url.ends_with("/api/items/1")));
    }

    #[tokio::test]
    async fn text_bodies() {
        let mock = Arc::new(MockRestService::new());
        mock.on(Method::GET, "/api/text", json!("Server=db;Database=t1"));
        mock.on(Method::GET, "/api/empty", Value::Null);

        let rest = client(&mock);
        assert_eq!(
            rest.send_text(RestRequest::get("/api/text")).await.unwrap().as_deref(),
            Some("Server=db;Database=t1")
        );
        assert_eq!(rest.send_text(RestRequest::get("/api/empty")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn unmatched_route_is_not_found() {
        let mock = Arc::new(MockRestService::new());
        let err = client(&mock)
            .send_unit(RestRequest::delete("/api/items/9"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
