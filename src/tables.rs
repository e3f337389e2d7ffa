//! Fixed vocabularies the mutators and the request builder draw from.
//!
//! Every table is non-empty and read-only; callers select from them with
//! [`crate::rng::pick`].

/// Baseline booking record, one entry per form field. The trailing empty
/// field is part of the record and is never mutated.
pub const BOOKING_BASE_FIELDS: &[&str] = &[
    "Antonio",
    "Morales",
    "antonio-morales@github.com",
    "single",
    "1",
    "2025-05-21T21:48",
    "2025 05 23",
    "false",
    "",
];

/// Date-format directives (Moment.js style).
pub const DATE_DIRECTIVES: &[&str] = &[
    "YYYY", "YY", "Q", "M", "MM", "MMM", "MMMM", "D", "DD", "Do", "DDD", "DDDD", "H", "HH", "h",
    "hh", "a", "A", "m", "mm", "s", "ss", "SSS", "Z", "ZZ", "X", "x",
];

/// Literal tokens wrapped in `[...]` inside format strings.
pub const LITERAL_TOKENS: &[&str] = &[
    "booking",
    "{user}",
    "TZ",
    "room42",
    "edge-case",
    // line separator, often mishandled by line-oriented code
    "\u{2028}",
    "'quote",
    "\"double-quote",
];

/// Placeholder inside [`MARKDOWN_SNIPPETS`] replaced with a date directive.
pub const DATE_MARKER: &str = "%%DATE%%";

/// Markdown and raw HTML snippets.
pub const MARKDOWN_SNIPPETS: &[&str] = &[
    "# Heading \n",
    "*bold*",
    "_italic_",
    "`inline-code`",
    "[link](javascript:alert('x'))",
    "<script src='data:x'></script>",
    "<img src=x onerror=alert(1)>",
    "<div class=\"cta\" data-label='promo'>",
    "<a href=\"/book?date=%%DATE%%\">Book</a>",
    "| col1 | col2 |\n| --- | --- |",
];

pub const HTTP_METHODS: &[&str] = &[
    "GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS", "TRACE", "CONNECT", "PROPFIND", "MKCOL",
];

/// Methods that always carry a body.
pub const BODY_METHODS: &[&str] = &["POST", "PUT", "PATCH", "PROPFIND", "MKCOL"];

/// Protocol versions, including deliberately invalid ones.
pub const HTTP_VERSIONS: &[&str] = &[
    "HTTP/1.1",
    "HTTP/1.0",
    "HTTP/0.9",
    "HTTP/2",
    "HTP/1.1",
    "HTTP/1.1 FUZZ",
];

pub const HEADER_NAMES: &[&str] = &[
    "User-Agent",
    "Accept",
    "Accept-Encoding",
    "Accept-Language",
    "Content-Type",
    "Cache-Control",
    "Pragma",
    "Upgrade",
    "Referer",
    "Origin",
    "X-Requested-With",
    "X-Forwarded-For",
    "X-Forwarded-Proto",
    "If-None-Match",
    "If-Modified-Since",
    "Range",
    "Cookie",
    "Authorization",
    "Forwarded",
    "TE",
    "DNT",
    "Via",
];

pub const HEADER_VALUE_TOKENS: &[&str] = &[
    "gzip, deflate",
    "br",
    "identity",
    "chunked",
    "keep-alive",
    "max-age=0",
    "no-cache",
    "0",
    "application/json",
    "text/html; charset=utf-8",
    "multipart/form-data; boundary=----fuzz",
    "Basic ZmRzOnRlc3Q=",
    "%0d%0acrash",
];

/// Characters used for random header values.
pub const HEADER_CHARS: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-_/.,;=:%[]";

/// Characters used for random query values.
pub const QUERY_VALUE_CHARS: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789%._-";

/// Characters used for random host labels.
pub const HOST_LABEL_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789-";

/// Placeholder inside [`PATH_TOKENS`] replaced with a generated payload.
pub const PAYLOAD_MARKER: &str = "%%PAYLOAD%%";

pub const PATH_TOKENS: &[&str] = &[
    "",
    "api",
    "v1",
    "v2",
    "booking",
    "admin",
    "../../etc/passwd",
    "%2e%2e",
    "healthz",
    "assets",
    "%%PAYLOAD%%",
    "{id}",
    "~user",
    r"\u0000",
];

pub const QUERY_KEYS: &[&str] = &[
    "id", "date", "token", "redirect", "format", "chunk", "range", "debug", "session",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_non_empty() {
        let tables: &[&[&str]] = &[
            BOOKING_BASE_FIELDS,
            DATE_DIRECTIVES,
            LITERAL_TOKENS,
            MARKDOWN_SNIPPETS,
            HTTP_METHODS,
            BODY_METHODS,
            HTTP_VERSIONS,
            HEADER_NAMES,
            HEADER_VALUE_TOKENS,
            PATH_TOKENS,
            QUERY_KEYS,
        ];
        for table in tables {
            assert!(!table.is_empty());
        }
        assert!(!HEADER_CHARS.is_empty());
        assert!(!QUERY_VALUE_CHARS.is_empty());
        assert!(!HOST_LABEL_CHARS.is_empty());
    }

    #[test]
    fn test_markers_present() {
        assert_eq!(
            MARKDOWN_SNIPPETS.iter().filter(|s| s.contains(DATE_MARKER)).count(),
            1
        );
        assert!(PATH_TOKENS.contains(&PAYLOAD_MARKER));
    }

    #[test]
    fn test_body_methods_are_known_methods() {
        for method in BODY_METHODS {
            assert!(HTTP_METHODS.contains(method));
        }
    }

    #[test]
    fn test_booking_baseline_shape() {
        assert_eq!(BOOKING_BASE_FIELDS.len(), 9);
        assert_eq!(BOOKING_BASE_FIELDS.last(), Some(&""));
    }
}
