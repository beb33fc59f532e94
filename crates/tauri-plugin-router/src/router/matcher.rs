//! Path normalization and segment matching.
//!
//! # Responsibilities
//! - Turn a request URL into the `/`-joined path that patterns are matched against
//! - Compare a pattern with a path segment by segment
//! - Bind `:name` segments to percent-decoded values
//!
//! # Design Decisions
//! - The URL authority is treated as the first path segment, so
//!   `app://user/42` and a plain `/user/42` both match `/user/:id`;
//!   `localhost` origins (`http://app.localhost/user/42`) contribute no segment
//! - Absolute URLs are normalized by `url`, which resolves dot segments
//!   (including `%2e%2e`) and re-encodes some characters; scheme-less paths
//!   are matched raw
//! - Segment counts must be equal; there are no catch-all segments
//! - Literal segments are compared byte for byte, case-sensitive, undecoded
//! - Patterns are re-split on every match; route tables are expected to be small

use crate::{Params, ProtocolRequest, RouteError, RouteResult};
use percent_encoding::percent_decode_str;
use url::Url;

/// Build the path a request is matched against.
///
/// Absolute URLs with an authority yield `"/" + host[:port] + path`; anything
/// else falls back to the URI path as-is. `http::Uri` cannot tell `app://user`
/// from `app://user/`, so a bare `/` after the authority counts as no path.
///
/// Hosts that Tauri uses as a stand-in origin (`localhost` and
/// `<scheme>.localhost`, as on Windows and Android) carry no segment, so
/// `http://app.localhost/user/42` and `app://user/42` match alike.
pub(crate) fn request_path(request: &ProtocolRequest) -> String {
    let uri = request.uri();
    if uri.scheme().is_none() {
        return uri.path().to_string();
    }

    match Url::parse(&uri.to_string()) {
        Ok(url) => match url.host_str() {
            Some(host) if is_origin_host(host) => url.path().to_string(),
            Some(host) => {
                let path = match url.path() {
                    "/" => "",
                    path => path,
                };
                match url.port() {
                    Some(port) => format!("/{}:{}{}", host, port, path),
                    None => format!("/{}{}", host, path),
                }
            }
            None => url.path().to_string(),
        },
        Err(err) => {
            tracing::debug!(uri = %uri, error = %err, "Request URL did not parse, matching on raw path");
            uri.path().to_string()
        }
    }
}

fn is_origin_host(host: &str) -> bool {
    host == "localhost" || host.ends_with(".localhost")
}

/// Match `pattern` against `path`.
///
/// Returns `Ok(None)` when the shapes differ or a literal segment does not
/// match, and `Ok(Some(params))` on a match. A parameter segment that decodes
/// to invalid UTF-8 is reported as an error so the dispatcher can record it.
pub(crate) fn match_pattern(pattern: &str, path: &str) -> RouteResult<Option<Params>> {
    let pattern_segments: Vec<&str> = pattern.split('/').collect();
    let path_segments: Vec<&str> = path.split('/').collect();

    if pattern_segments.len() != path_segments.len() {
        return Ok(None);
    }

    // Literals first, so a decode failure is only reported for a real match.
    let literals_match = pattern_segments
        .iter()
        .zip(&path_segments)
        .filter(|(p, _)| !p.starts_with(':'))
        .all(|(p, s)| p == s);
    if !literals_match {
        return Ok(None);
    }

    let mut params = Params::new();
    for (segment, value) in pattern_segments.iter().zip(&path_segments) {
        if let Some(name) = segment.strip_prefix(':') {
            let decoded = percent_decode_str(value)
                .decode_utf8()
                .map_err(|_| RouteError::invalid_parameter(name, value))?;
            params.insert(name, decoded.into_owned());
        }
    }

    Ok(Some(params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tauri::http;

    fn request(uri: &str) -> ProtocolRequest {
        http::Request::builder().uri(uri).body(Vec::new()).unwrap()
    }

    #[test]
    fn test_request_path_prefixes_authority() {
        assert_eq!(request_path(&request("app://user/42")), "/user/42");
        assert_eq!(request_path(&request("app://user")), "/user");
        assert_eq!(request_path(&request("app://user/")), "/user");
        assert_eq!(request_path(&request("app://files:8080/a")), "/files:8080/a");
        assert_eq!(request_path(&request("/user/42")), "/user/42");
    }

    #[test]
    fn test_request_path_drops_localhost_origin() {
        assert_eq!(request_path(&request("http://app.localhost/user/42")), "/user/42");
        assert_eq!(request_path(&request("https://app.localhost/user/42")), "/user/42");
        assert_eq!(request_path(&request("app://localhost/user/42")), "/user/42");
        assert_eq!(request_path(&request("http://app.localhost/")), "/");
    }

    #[test]
    fn test_request_path_removes_dot_segments() {
        assert_eq!(request_path(&request("app://user/a/../42")), "/user/42");
        assert_eq!(request_path(&request("app://user/a/%2e%2e/42")), "/user/42");
    }

    #[test]
    fn test_schemeless_path_is_kept_raw() {
        assert_eq!(request_path(&request("/user/a/%2e%2e/42")), "/user/a/%2e%2e/42");
        assert_eq!(request_path(&request("/a%7Bb%7D")), "/a%7Bb%7D");
    }

    #[test]
    fn test_request_path_ignores_query() {
        assert_eq!(request_path(&request("app://user/42?full=true")), "/user/42");
    }

    #[test]
    fn test_literal_match() {
        assert_eq!(match_pattern("/user", "/user").unwrap(), Some(Params::new()));
        assert_eq!(match_pattern("/user", "/User").unwrap(), None);
        assert_eq!(match_pattern("/user", "/users").unwrap(), None);
    }

    #[test]
    fn test_segment_count_must_match() {
        assert_eq!(match_pattern("/user/:id", "/user").unwrap(), None);
        assert_eq!(match_pattern("/user/:id", "/user/1/2").unwrap(), None);
        assert_eq!(match_pattern("/user", "/user/").unwrap(), None);
    }

    #[test]
    fn test_params_are_decoded() {
        let params = match_pattern("/file/:name/:rev", "/file/hello%20world.txt/3")
            .unwrap()
            .unwrap();
        assert_eq!(params.get("name"), Some("hello world.txt"));
        assert_eq!(params.get("rev"), Some("3"));
    }

    #[test]
    fn test_literals_are_not_decoded() {
        assert_eq!(match_pattern("/a b", "/a%20b").unwrap(), None);
        assert!(match_pattern("/a%20b", "/a%20b").unwrap().is_some());
    }

    #[test]
    fn test_invalid_utf8_parameter_is_an_error() {
        let err = match_pattern("/user/:id", "/user/%FF").unwrap_err();
        assert_eq!(err.code, crate::RouteErrorCode::InvalidParameter);
    }

    #[test]
    fn test_invalid_parameter_ignored_when_literal_differs() {
        assert_eq!(match_pattern("/user/:id", "/post/%FF").unwrap(), None);
    }

    #[test]
    fn test_empty_pattern_segments_do_not_match_real_paths() {
        assert_eq!(match_pattern("//user", "/api/user").unwrap(), None);
    }
}
