//! Request/response values and the blocking transport seam.

use std::borrow::Cow;
use std::time::Duration;

/// HTTP verbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

/// An outgoing request.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// Verb.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Extra headers in send order.
    pub headers: Vec<(String, String)>,
    /// Request body, empty for none.
    pub body: Vec<u8>,
    /// Caller-chosen label echoed back on the response.
    pub tag: Option<String>,
}

impl HttpRequest {
    /// Request with no headers or body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: Vec::new(),
            tag: None,
        }
    }

    /// `GET url`.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    /// `POST url` with a body.
    pub fn post(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::new(Method::Post, url).with_body(body)
    }

    /// `PUT url` with a body.
    pub fn put(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::new(Method::Put, url).with_body(body)
    }

    /// `DELETE url`.
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    /// Builder-style header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Builder-style body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Builder-style tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// Outcome of a request. Failures are values, never errors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HttpResponse {
    /// `true` for a 2xx status with the body fully read.
    pub succeeded: bool,
    /// Status code, `0` when no response arrived.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
    /// Failure description.
    pub error: Option<String>,
    /// Tag of the originating request.
    pub tag: Option<String>,
}

impl HttpResponse {
    /// A response that arrived with `status`.
    pub fn completed(status: u16, body: Vec<u8>) -> Self {
        let succeeded = (200..300).contains(&status);
        Self {
            succeeded,
            status,
            error: (!succeeded).then(|| format!("http status {status}")),
            body,
            tag: None,
        }
    }

    /// A request that failed before a full response was read.
    pub fn failed(status: Option<u16>, error: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            status: status.unwrap_or(0),
            body: Vec::new(),
            error: Some(error.into()),
            tag: None,
        }
    }

    /// Body decoded as UTF-8, lossily.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Connect and read limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeouts {
    /// Connection establishment limit.
    pub connect: Duration,
    /// Whole-response limit.
    pub read: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(30),
            read: Duration::from_secs(60),
        }
    }
}

/// Performs one blocking request. Runs on the client's worker thread.
pub trait Transport: Send + 'static {
    /// Send `request` and wait for the response.
    fn perform(&self, request: &HttpRequest) -> HttpResponse;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> HttpResponse + Send + 'static,
{
    fn perform(&self, request: &HttpRequest) -> HttpResponse {
        self(request)
    }
}

/// [`Transport`] backed by `reqwest`'s blocking client.
#[cfg(feature = "http")]
#[derive(Debug)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl ReqwestTransport {
    /// Build a client with the given limits.
    pub fn new(timeouts: Timeouts) -> crate::foundation::error::TableauResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.read)
            .build()
            .map_err(|e| crate::foundation::error::TableauError::platform(format!("http client: {e}")))?;
        Ok(Self { client })
    }
}

#[cfg(feature = "http")]
impl Transport for ReqwestTransport {
    fn perform(&self, request: &HttpRequest) -> HttpResponse {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.client.request(method, request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }
        match builder.send() {
            Ok(resp) => {
                let status = resp.status().as_u16();
                match resp.bytes() {
                    Ok(bytes) => HttpResponse::completed(status, bytes.to_vec()),
                    Err(e) => HttpResponse::failed(Some(status), format!("read body: {e}")),
                }
            }
            Err(e) => HttpResponse::failed(e.status().map(|s| s.as_u16()), e.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/network/transport.rs"]
mod tests;
