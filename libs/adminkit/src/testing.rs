//! In-memory [`RestService`] double for SDK test suites.
//!
//! ```ignore
//! let mock = Arc::new(MockRestService::new());
//! mock.on(Method::GET, "/api/identity/roles/all", json!({ "items": [] }));
//!
//! let rest = RestClient::for_api(mock.clone(), &env, "Identity")?;
//! // ... exercise a proxy ...
//! assert_eq!(mock.requests().len(), 1);
//! ```

use async_trait::async_trait;
use http::Method;
use parking_lot::Mutex;
use serde_json::Value;
use url::Url;

use crate::error::RestError;
use crate::rest::{RestRequest, RestService};

#[derive(Clone)]
enum Reply {
    Body(Value),
    Failure { status: u16, body: Value },
}

struct Route {
    method: Method,
    path: String,
    reply: Reply,
}

/// Canned responses by `(method, path)`; records every request it receives.
///
/// Later registrations for the same route win. Unmatched requests fail with
/// a 404 remote error.
#[derive(Default)]
pub struct MockRestService {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<RestRequest>>,
}

impl MockRestService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with `body`.
    pub fn on(&self, method: Method, path: &str, body: Value) {
        self.routes.lock().push(Route {
            method,
            path: path.to_owned(),
            reply: Reply::Body(body),
        });
    }

    /// Answer `method path` with a remote error built from `status` and `body`.
    pub fn on_error(&self, method: Method, path: &str, status: u16, body: Value) {
        self.routes.lock().push(Route {
            method,
            path: path.to_owned(),
            reply: Reply::Failure { status, body },
        });
    }

    /// Every request received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RestRequest> {
        self.requests.lock().clone()
    }

    /// Requests received for `method path`.
    #[must_use]
    pub fn requests_to(&self, method: &Method, path: &str) -> Vec<RestRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == *method && request_path(r) == path)
            .cloned()
            .collect()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().clear();
    }
}

fn request_path(request: &RestRequest) -> String {
    Url::parse(&request.url).map_or_else(|_| request.url.clone(), |url| url.path().to_owned())
}

#[async_trait]
impl RestService for MockRestService {
    async fn request(&self, request: RestRequest) -> Result<Value, RestError> {
        let path = request_path(&request);
        let reply = self
            .routes
            .lock()
            .iter()
            .rev()
            .find(|route| route.method == request.method && route.path == path)
            .map(|route| route.reply.clone());
        self.requests.lock().push(request);

        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Failure { status, body }) => Err(RestError::from_response(status, &body)),
            None => Err(RestError::not_found(&path)),
        }
    }
}
