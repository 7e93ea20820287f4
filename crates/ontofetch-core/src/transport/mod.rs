//! Redirect-following HTTP transport.
//!
//! Uses the curl crate (libcurl) with automatic redirects turned off: every
//! hop is issued by hand so the `Accept` header is sent again on each one.
//! Some servers (and some client libraries) drop custom headers across
//! automatic redirects, which breaks content negotiation.

mod classify;
mod error;
mod head;
mod redirect;

pub use classify::classify_curl_error;
pub use error::{IoFaultKind, TransportError};
pub use head::{media_type, ResponseHead};
pub use redirect::{ensure_http, is_followed_redirect, resolve_location, FOLLOWED_REDIRECTS};

use redirect::RedirectState;
use std::cell::Cell;
use std::io::Cursor;
use std::str;
use std::time::Duration;
use url::Url;

/// Default bound on redirect hops per GET.
pub const DEFAULT_MAX_REDIRECTS: u32 = 10;

/// Default cap on a 200 body, in bytes (64 MiB).
pub const DEFAULT_MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Per-request limits applied to every hop.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    pub connect_timeout: Duration,
    /// Deadline for one hop (connect + transfer).
    pub request_timeout: Duration,
    /// Largest 200 body kept in memory; bigger responses fail the hop.
    pub max_body_bytes: u64,
    pub user_agent: Option<String>,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            request_timeout: Duration::from_secs(60),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            user_agent: None,
        }
    }
}

/// Body of a 200 response plus where it came from.
#[derive(Debug, Clone)]
pub struct FetchedBody {
    final_url: Url,
    hops: u32,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl FetchedBody {
    pub fn new(final_url: Url, hops: u32, content_type: Option<String>, body: Vec<u8>) -> Self {
        Self {
            final_url,
            hops,
            content_type,
            body,
        }
    }

    /// URL that answered 200 after following redirects.
    pub fn final_url(&self) -> &Url {
        &self.final_url
    }

    /// Number of redirects followed.
    pub fn hops(&self) -> u32 {
        self.hops
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn into_reader(self) -> Cursor<Vec<u8>> {
        Cursor::new(self.body)
    }
}

/// One GET with a fixed `Accept` header, following up to `max_redirects`
/// 301/302/303 hops. No retries.
pub trait Transport {
    fn fetch(
        &self,
        url: &Url,
        accept: &str,
        max_redirects: u32,
    ) -> Result<FetchedBody, TransportError>;
}

/// libcurl-backed transport. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    options: TransportOptions,
}

struct RawResponse {
    head: ResponseHead,
    body: Vec<u8>,
}

impl CurlTransport {
    pub fn new(options: TransportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TransportOptions {
        &self.options
    }

    /// Issues exactly one GET; never follows `Location` itself.
    ///
    /// Only the body of a 200 block is kept. Redirect and error bodies are
    /// read off the wire and dropped.
    fn get_once(&self, url: &Url, accept: &str) -> Result<RawResponse, TransportError> {
        ensure_http(url)?;

        let max_body = self.options.max_body_bytes;
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();
        let block_status = Cell::new(0u32);
        let oversized = Cell::new(false);

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str())?;
        easy.get(true)?;
        easy.follow_location(false)?;
        easy.connect_timeout(self.options.connect_timeout)?;
        easy.timeout(self.options.request_timeout)?;
        if let Some(ua) = &self.options.user_agent {
            easy.useragent(ua)?;
        }

        let mut list = curl::easy::List::new();
        list.append(&format!("Accept: {}", accept.trim()))?;
        easy.http_headers(list)?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    let line = s.trim_end();
                    if let Some(code) = head::status_code(line) {
                        block_status.set(code);
                    }
                    header_lines.push(line.to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                if block_status.get() != 200 {
                    return Ok(data.len());
                }
                if body.len() as u64 + data.len() as u64 > max_body {
                    oversized.set(true);
                    // Short write aborts the transfer.
                    return Ok(0);
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()
        };
        if oversized.get() {
            return Err(TransportError::io_fault(
                IoFaultKind::Other,
                format!("response body from {} exceeds {} bytes", url, max_body),
            ));
        }
        performed?;

        let status = easy.response_code()?;
        Ok(RawResponse {
            head: head::parse_response_head(status, &header_lines),
            body,
        })
    }
}

impl Transport for CurlTransport {
    fn fetch(
        &self,
        url: &Url,
        accept: &str,
        max_redirects: u32,
    ) -> Result<FetchedBody, TransportError> {
        let mut state = RedirectState::new(url.clone());
        loop {
            let response = self.get_once(&state.url, accept)?;
            let status = response.head.status;
            match (status, response.head.location) {
                (200, _) => {
                    state.last_status = Some(status);
                    tracing::debug!(
                        url = %state.url,
                        hops = state.hops,
                        bytes = response.body.len(),
                        "GET completed"
                    );
                    return Ok(FetchedBody::new(
                        state.url,
                        state.hops,
                        response.head.content_type,
                        response.body,
                    ));
                }
                (code, Some(location)) if is_followed_redirect(code) => {
                    state.follow(code, &location, max_redirects)?;
                }
                (code, _) => {
                    state.last_status = Some(code);
                    tracing::debug!(url = %state.url, status = ?state.last_status, "GET ended without a body");
                    return Err(TransportError::HttpStatus(code));
                }
            }
        }
    }
}
