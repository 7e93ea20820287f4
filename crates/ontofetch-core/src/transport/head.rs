//! Parse the header lines of one response into the fields the transport needs.

/// Status plus the headers that drive redirect handling and logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u32,
    /// Raw `Location` value, possibly relative.
    pub location: Option<String>,
    pub content_type: Option<String>,
}

/// Builds a `ResponseHead` from collected header lines.
///
/// A status line (`HTTP/...`) starts a new header block, so only the last
/// block's values survive (interim `100 Continue` or proxy `CONNECT` blocks
/// are dropped).
pub(crate) fn parse_response_head(status: u32, lines: &[String]) -> ResponseHead {
    let mut head = ResponseHead {
        status,
        ..ResponseHead::default()
    };

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            head.location = None;
            head.content_type = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("location") && !value.is_empty() {
                head.location = Some(value.to_string());
            } else if name.eq_ignore_ascii_case("content-type") {
                head.content_type = Some(value.to_string());
            }
        }
    }

    head
}

/// Status code of an `HTTP/...` status line; `None` for any other header line.
pub(crate) fn status_code(line: &str) -> Option<u32> {
    let rest = line.trim().strip_prefix("HTTP/")?;
    rest.split_whitespace().nth(1)?.parse().ok()
}

/// Media type of a `Content-Type` value, lowercased and without parameters.
pub fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}
