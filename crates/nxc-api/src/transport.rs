// ──────────────────────────────────────────────────────────────────────────────
// nxc-api · transport
// ──────────────────────────────────────────────────────────────────────────────
// One authenticated request/response exchange:
//  • `ApiRequest` — verb, url, query, form or raw body, Depth / Destination
//  • `ApiResponse` — status code plus raw body bytes
//  • `Transport` trait, with `HttpTransport` backed by reqwest
//
// The status code is reported but never checked here: failures are read
// from the body by the translation layer.
// ──────────────────────────────────────────────────────────────────────────────

use crate::config::Credentials;
use crate::error::{NextcloudError, NextcloudResult};
use async_trait::async_trait;
use log::{debug, trace};
use reqwest::{header, Client, Method};
use serde::Serialize;
use std::fmt;
use url::Url;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
pub const XML_CONTENT_TYPE: &str = "application/xml";
pub const JSON_CONTENT_TYPE: &str = "application/json";

const USER_AGENT: &str = concat!("nxc-api/", env!("CARGO_PKG_VERSION"));

// ── Verb ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
    Propfind,
    Proppatch,
    Report,
    Search,
    Mkcol,
    Move,
    Copy,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Propfind => "PROPFIND",
            Self::Proppatch => "PROPPATCH",
            Self::Report => "REPORT",
            Self::Search => "SEARCH",
            Self::Mkcol => "MKCOL",
            Self::Move => "MOVE",
            Self::Copy => "COPY",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// WebDAV `Depth` header value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Depth {
    Zero,
    #[default]
    One,
    Infinity,
}

impl Depth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::One => "1",
            Self::Infinity => "infinity",
        }
    }
}

// ── Request / response ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub verb: Verb,
    /// Absolute url without query string.
    pub url: String,
    pub query: Vec<(String, String)>,
    /// Urlencoded into the body when no raw body is set.
    pub form: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub content_type: Option<String>,
    pub depth: Depth,
    /// Absolute url for MOVE and COPY.
    pub destination: Option<String>,
}

impl ApiRequest {
    pub fn new(verb: Verb, url: impl Into<String>) -> Self {
        Self {
            verb,
            url: url.into(),
            query: Vec::new(),
            form: Vec::new(),
            body: None,
            content_type: None,
            depth: Depth::default(),
            destination: None,
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn form(mut self, key: &str, value: impl ToString) -> Self {
        self.form.push((key.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON body.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> NextcloudResult<Self> {
        let bytes = serde_json::to_vec(value)?;
        Ok(self.body(bytes).content_type(JSON_CONTENT_TYPE))
    }

    pub fn content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    pub fn depth(mut self, depth: Depth) -> Self {
        self.depth = depth;
        self
    }

    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// SEARCH always sends XML; everything else defaults to a form post.
    pub fn effective_content_type(&self) -> &str {
        match (&self.content_type, self.verb) {
            (_, Verb::Search) => XML_CONTENT_TYPE,
            (Some(ct), _) => ct.as_str(),
            (None, _) => FORM_CONTENT_TYPE,
        }
    }

    /// The bytes put on the wire: the raw body, else the urlencoded form.
    pub fn encoded_body(&self) -> Option<Vec<u8>> {
        if let Some(body) = &self.body {
            return Some(body.clone());
        }
        if self.form.is_empty() {
            return None;
        }
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.form)
            .finish();
        Some(encoded.into_bytes())
    }

    /// Body as text, for logs and tests.
    pub fn body_text(&self) -> String {
        self.encoded_body()
            .map(|b| String::from_utf8_lossy(&b).into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

// ── Transport ────────────────────────────────────────────────────────────────

/// Performs one exchange with the server.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    async fn exchange(&self, credentials: &Credentials, request: ApiRequest) -> NextcloudResult<ApiResponse>;
}

/// reqwest-backed transport with basic authentication.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn exchange(&self, credentials: &Credentials, request: ApiRequest) -> NextcloudResult<ApiResponse> {
        let method = Method::from_bytes(request.verb.as_str().as_bytes())
            .map_err(|_| NextcloudError::InvalidMethod(request.verb.to_string()))?;

        let mut url = Url::parse(&request.url).map_err(|source| NextcloudError::InvalidUrl {
            url: request.url.clone(),
            source,
        })?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }

        let mut req = self
            .http
            .request(method, url.clone())
            .basic_auth(&credentials.username, Some(&credentials.password))
            .header(header::USER_AGENT, USER_AGENT)
            .header("OCS-APIRequest", "true")
            .header("Depth", request.depth.as_str())
            .header(header::CONTENT_TYPE, request.effective_content_type());

        if let Some(ref destination) = request.destination {
            req = req.header("Destination", destination);
        }
        if let Some(body) = request.encoded_body() {
            req = req.body(body);
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?.to_vec();

        debug!("{} {} → {} ({} bytes)", request.verb, url, status, body.len());
        trace!("{}", String::from_utf8_lossy(&body));

        Ok(ApiResponse { status, body })
    }
}

// ── Recording transport (tests) ──────────────────────────────────────────────


// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
