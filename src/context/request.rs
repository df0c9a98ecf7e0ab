// SPDX-License-Identifier: MIT OR Apache-2.0

//! The inbound HTTP request descriptor.

use http::header::{REFERER, USER_AGENT};
use http::{HeaderMap, Method, Uri};

/// The parts of an inbound HTTP request that emitters may report.
///
/// Bodies and extensions are not kept.  Build one from any [`http::Request`]:
///
/// ```rust
/// use tagwise::context::HttpRequest;
///
/// let request = http::Request::post("/upload").body(()).unwrap();
/// let described = HttpRequest::from(&request);
/// assert_eq!(described.method(), &http::Method::POST);
/// ```
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
}

impl HttpRequest {
    pub fn new(method: Method, uri: Uri) -> Self {
        HttpRequest {
            method,
            uri,
            headers: HeaderMap::new(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// The first `User-Agent` header, if it is present, non-empty and visible ASCII.
    pub fn user_agent(&self) -> Option<&str> {
        self.first_header(USER_AGENT.as_str())
    }

    /// The first `Referer` header, if it is present, non-empty and visible ASCII.
    pub fn referer(&self) -> Option<&str> {
        self.first_header(REFERER.as_str())
    }

    pub(crate) fn first_header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
    }
}

impl<B> From<&http::Request<B>> for HttpRequest {
    fn from(request: &http::Request<B>) -> Self {
        HttpRequest {
            method: request.method().clone(),
            uri: request.uri().clone(),
            headers: request.headers().clone(),
        }
    }
}
