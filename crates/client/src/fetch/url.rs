//! Request target parsing.

/// Why a string could not be used as a fetch target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("URL has no host")]
    MissingHost,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Parse a user-supplied URL into the form that is actually requested.
///
/// Surrounding whitespace is ignored, a bare host gets `https://`, only
/// http and https are accepted and the fragment is dropped (it never reaches
/// the server). Host case folding is done by the `url` parser.
pub fn parse_target(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let with_scheme =
        if trimmed.contains("://") { std::borrow::Cow::Borrowed(trimmed) } else { format!("https://{trimmed}").into() };

    let mut parsed = url::Url::parse(&with_scheme).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(UrlError::UnsupportedScheme(parsed.scheme().to_string()));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    parsed.set_fragment(None);
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let url = parse_target("https://example.com/page?q=1").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page?q=1");
    }

    #[test]
    fn test_bare_host_defaults_to_https() {
        let url = parse_target("example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_host_is_lowercased() {
        let url = parse_target("http://WWW.Example.COM/Path").unwrap();
        assert_eq!(url.host_str(), Some("www.example.com"));
        assert_eq!(url.path(), "/Path");
    }

    #[test]
    fn test_fragment_dropped() {
        let url = parse_target("  https://example.com/doc#section  ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/doc");
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(matches!(parse_target("ftp://example.com"), Err(UrlError::UnsupportedScheme(s)) if s == "ftp"));
        assert!(matches!(parse_target("file:///etc/passwd"), Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(parse_target(""), Err(UrlError::Empty));
        assert_eq!(parse_target("   "), Err(UrlError::Empty));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(parse_target("https://exa mple.com"), Err(UrlError::InvalidUrl(_))));
    }
}
