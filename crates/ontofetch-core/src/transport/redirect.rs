//! Redirect bookkeeping for one GET-with-redirects call.

use super::error::{IoFaultKind, TransportError};
use url::Url;

/// Statuses that are re-issued as a GET to `Location` with the same `Accept` header.
pub const FOLLOWED_REDIRECTS: [u32; 3] = [301, 302, 303];

pub fn is_followed_redirect(status: u32) -> bool {
    FOLLOWED_REDIRECTS.contains(&status)
}

/// Transient state of one redirect chain. Dropped when the call returns.
#[derive(Debug, Clone)]
pub(crate) struct RedirectState {
    pub url: Url,
    pub hops: u32,
    pub last_status: Option<u32>,
}

impl RedirectState {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            hops: 0,
            last_status: None,
        }
    }

    /// Moves to `location` (resolved against the current URL), counting one hop.
    ///
    /// Fails with `RedirectLoop` once `max_redirects` hops have already been
    /// followed, so at most `max_redirects + 1` requests go out per chain.
    pub fn follow(
        &mut self,
        status: u32,
        location: &str,
        max_redirects: u32,
    ) -> Result<(), TransportError> {
        self.last_status = Some(status);
        if self.hops >= max_redirects {
            return Err(TransportError::RedirectLoop {
                hops: self.hops,
                last_url: self.url.to_string(),
            });
        }
        let next = resolve_location(&self.url, location)?;
        tracing::debug!(status, from = %self.url, to = %next, hop = self.hops + 1, "following redirect");
        self.url = next;
        self.hops += 1;
        Ok(())
    }
}

/// Resolves a `Location` value, absolute or relative, against `base`.
///
/// The target must stay on http or https.
pub fn resolve_location(base: &Url, location: &str) -> Result<Url, TransportError> {
    let next = base.join(location).map_err(|e| {
        TransportError::io_fault(
            IoFaultKind::Other,
            format!("invalid Location {:?}: {}", location, e),
        )
    })?;
    ensure_http(&next)?;
    Ok(next)
}

/// Refuses any URL whose scheme is not http or https.
pub fn ensure_http(url: &Url) -> Result<(), TransportError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(TransportError::io_fault(
            IoFaultKind::Other,
            format!("refusing {} URL {}", other, url),
        )),
    }
}
